use anyhow::{Context, Result};

use crate::commands::infer::load_config;

/// Print the effective configuration (defaults merged with the optional
/// config file) as pretty JSON.
pub fn run(config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)?;
    let rendered =
        serde_json::to_string_pretty(&config).context("Failed to render configuration")?;
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_run_with_defaults() -> Result<()> {
        run(None)
    }

    #[test]
    fn test_run_with_config_file() -> Result<()> {
        let tmp_dir = tempdir()?;
        let path = tmp_dir.path().join("config.json");
        fs::File::create(&path)?.write_all(br#"{"final_strip": false}"#)?;
        run(path.to_str())
    }

    #[test]
    fn test_run_with_malformed_file_fails() -> Result<()> {
        let tmp_dir = tempdir()?;
        let path = tmp_dir.path().join("config.json");
        fs::File::create(&path)?.write_all(b"{not json")?;
        assert!(run(path.to_str()).is_err());
        Ok(())
    }
}
