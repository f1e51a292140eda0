use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::cascade::Template;

/// Default cascade templates, most specific first.
///
/// The order matters twice over: templates are tried top to bottom, and every
/// template that matches the whole group is reconciled, so the catch-all at
/// the bottom can still fill in titles an earlier pass had to abort on.
pub const DEFAULT_MATCHLIST: &[&str] = &[
    r"^(?P<artist>.+?)\s*-\s*(?P<title>.+?)\s*-\s*(?P<tag>.*)$",
    r"^(?P<track>\d+)[\s.\-_]+(?P<artist>.+?)\s*-\s*(?P<title>.+)$",
    r"^(?P<track>\d+)[\s.\-_]+(?P<title>.+)$",
    r"^(?P<artist>.+?)\s*-\s*(?P<title>.+)$",
    r"^(?P<title>.+)$",
];

/// Titles that count as missing or meaningless and may be replaced.
pub const DEFAULT_BAD_TITLES: &[&str] = &["^$", r"\d+?\s?-?\s*track\s*\d+"];

const DEFAULT_TRACK_LIMIT: u32 = 99;

/// User-facing configuration, merged over the defaults field by field.
///
/// Loaded from a JSON file; any field absent from the file keeps its default,
/// so a config that only sets `fill_album_from_title` still gets the full
/// default template cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferConfig {
    /// Cascade templates, most specific first.
    pub custom_matchlist: Vec<String>,
    /// Patterns marking an existing title as eligible for replacement.
    pub bad_title_matchlist: Vec<String>,
    /// Noise patterns stripped from an extracted artist.
    pub artist_post_sub: Vec<String>,
    /// Noise patterns stripped from an extracted title.
    pub title_post_sub: Vec<String>,
    /// Trim surrounding whitespace after substitution.
    pub final_strip: bool,
    /// Copy the title into an empty album field after all passes.
    pub fill_album_from_title: bool,
    /// Captured track numbers above this bound are rejected.
    pub limit_tracknumber: u32,
}

impl Default for InferConfig {
    fn default() -> Self {
        Self {
            custom_matchlist: DEFAULT_MATCHLIST.iter().map(|s| s.to_string()).collect(),
            bad_title_matchlist: DEFAULT_BAD_TITLES.iter().map(|s| s.to_string()).collect(),
            artist_post_sub: Vec::new(),
            title_post_sub: Vec::new(),
            final_strip: true,
            fill_album_from_title: false,
            limit_tracknumber: DEFAULT_TRACK_LIMIT,
        }
    }
}

impl InferConfig {
    /// Load a configuration file, merging its fields over the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    /// Compile every pattern list.
    ///
    /// A malformed pattern is a configuration problem, not a runtime one: it
    /// is reported here with a warning and dropped, and the engine only ever
    /// sees patterns that compiled. Empty lists degrade the matching phases
    /// rather than failing the run.
    pub fn compile(&self) -> CompiledConfig {
        let templates: Vec<Template> = self
            .custom_matchlist
            .iter()
            .filter_map(|p| report_invalid("custom_matchlist", p, Template::compile(p)))
            .collect();
        if templates.is_empty() {
            warn!("custom_matchlist is empty; filename inference is disabled");
        }

        let bad_titles: Vec<Regex> = self
            .bad_title_matchlist
            .iter()
            .filter_map(|p| {
                report_invalid(
                    "bad_title_matchlist",
                    p,
                    RegexBuilder::new(p).case_insensitive(true).build(),
                )
            })
            .collect();
        if bad_titles.is_empty() {
            warn!("bad_title_matchlist is empty; existing titles will never be replaced");
        }

        CompiledConfig {
            templates,
            bad_titles,
            artist_post_sub: compile_subs("artist_post_sub", &self.artist_post_sub),
            title_post_sub: compile_subs("title_post_sub", &self.title_post_sub),
            final_strip: self.final_strip,
            fill_album_from_title: self.fill_album_from_title,
            limit_tracknumber: self.limit_tracknumber,
        }
    }
}

/// Substitution patterns stay case-sensitive; authors opt into `(?i)` inline.
fn compile_subs(option: &str, patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| report_invalid(option, p, Regex::new(p)))
        .collect()
}

fn report_invalid<T>(option: &str, pattern: &str, result: Result<T, regex::Error>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Ignoring invalid {} pattern '{}': {}", option, pattern, e);
            None
        }
    }
}

/// Configuration after pattern compilation, as consumed by the engine.
#[derive(Debug)]
pub struct CompiledConfig {
    pub templates: Vec<Template>,
    pub bad_titles: Vec<Regex>,
    pub artist_post_sub: Vec<Regex>,
    pub title_post_sub: Vec<Regex>,
    pub final_strip: bool,
    pub fill_album_from_title: bool,
    pub limit_tracknumber: u32,
}
