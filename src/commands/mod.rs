pub mod infer;
pub mod show_config;
