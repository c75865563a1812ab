//! Configuration loading and parsing
//!
//! Optional TOML configuration for repeated scans of the same recording.
//! Command-line arguments take precedence over file values.

use crate::table::SortColumn;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    /// BLF recording to scan
    pub log: Option<PathBuf>,
    /// DBC files for message naming
    #[serde(default)]
    pub dbc_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScanConfig {
    /// End of the baseline window in seconds
    pub end_time: Option<i64>,
    /// Comma separated hexadecimal addresses to ignore
    pub blacklist: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub sort: Option<SortColumn>,
}

/// Output format for the result table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [input]
            log = "trace.blf"
            dbc_files = ["powertrain.dbc", "chassis.dbc"]

            [scan]
            end_time = 120
            blacklist = "1A1, 2B0"

            [output]
            format = "json"
            sort = "count"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.log, Some(PathBuf::from("trace.blf")));
        assert_eq!(config.input.dbc_files.len(), 2);
        assert_eq!(config.scan.end_time, Some(120));
        assert_eq!(config.scan.blacklist.as_deref(), Some("1A1, 2B0"));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(config.output.sort, Some(SortColumn::Count));
    }

    #[test]
    fn test_empty_sections_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.input.log.is_none());
        assert!(config.input.dbc_files.is_empty());
        assert!(config.scan.end_time.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_missing_config_file() {
        assert!(load_config(Path::new("no-such-config.toml")).is_err());
    }
}
