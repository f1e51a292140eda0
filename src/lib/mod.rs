//! # Regtag Core Library
//!
//! Infers missing track metadata (artist, title, track number, album) from
//! file names by matching a group of related files against an ordered cascade
//! of regular-expression templates with named capture groups. The engine is a
//! pure function of the item group and the active configuration; callers own
//! the files and apply the reported mutations themselves.

pub mod audio;
pub mod cascade;
pub mod config;
pub mod engine;
pub mod item;
pub mod reconcile;
pub mod sanitize;
pub mod tagging;

pub use config::{CompiledConfig, InferConfig};
pub use engine::InferenceEngine;
pub use item::{FieldMutation, MediaItem, TagField};
