//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.innovindex.toml` files.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analysis::InsightLimits;
use crate::cli::OutputFormat;
use crate::models::QUESTION_COUNT;

/// Default configuration file name.
pub const CONFIG_FILE: &str = ".innovindex.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default report format.
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            verbose: false,
        }
    }
}

fn default_format() -> String {
    "text".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of strengths to list.
    #[serde(default = "default_strengths")]
    pub strengths: usize,

    /// Number of improvement areas to list.
    #[serde(default = "default_weaknesses")]
    pub weaknesses: usize,

    /// Report heading.
    #[serde(default = "default_title")]
    pub title: String,

    /// Write a radar chart to this path after every assessment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            strengths: default_strengths(),
            weaknesses: default_weaknesses(),
            title: default_title(),
            chart: None,
        }
    }
}

fn default_strengths() -> usize {
    2
}

fn default_weaknesses() -> usize {
    1
}

fn default_title() -> String {
    "Innovation Assessment Results".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.format().is_none() {
            bail!(
                "Unknown report format '{}' (expected text, markdown or json)",
                self.general.format
            );
        }
        for (name, value) in [
            ("strengths", self.report.strengths),
            ("weaknesses", self.report.weaknesses),
        ] {
            if value == 0 || value > QUESTION_COUNT {
                bail!("report.{} must be between 1 and {}", name, QUESTION_COUNT);
            }
        }
        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings and only
    /// override values they explicitly provide.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(format) = args.format {
            self.general.format = format.as_str().to_string();
        }
        if let Some(strengths) = args.strengths {
            self.report.strengths = strengths;
        }
        if let Some(weaknesses) = args.weaknesses {
            self.report.weaknesses = weaknesses;
        }
        if let Some(ref chart) = args.chart {
            self.report.chart = Some(chart.display().to_string());
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// The configured report format, if recognised.
    pub fn format(&self) -> Option<OutputFormat> {
        OutputFormat::parse(&self.general.format)
    }

    /// Insight counts for the aggregator.
    pub fn insight_limits(&self) -> InsightLimits {
        InsightLimits {
            strengths: self.report.strengths,
            weaknesses: self.report.weaknesses,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.format, "text");
        assert_eq!(config.report.strengths, 2);
        assert_eq!(config.report.weaknesses, 1);
        assert_eq!(config.report.title, "Innovation Assessment Results");
        assert!(config.report.chart.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
format = "markdown"
verbose = true

[report]
strengths = 3
chart = "radar.svg"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.format(), Some(OutputFormat::Markdown));
        assert!(config.general.verbose);
        assert_eq!(config.report.strengths, 3);
        assert_eq!(config.report.weaknesses, 1);
        assert_eq!(config.report.chart.as_deref(), Some("radar.svg"));
        assert_eq!(
            config.insight_limits(),
            InsightLimits {
                strengths: 3,
                weaknesses: 1
            }
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.report.strengths = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.report.weaknesses = 9;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.general.format = "pdf".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[report]\nweaknesses = 2\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.report.weaknesses, 2);

        std::fs::write(&path, "[report]\nweaknesses = 0\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[report]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.report.strengths, 2);
    }
}
