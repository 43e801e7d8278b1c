//! Configuration management for the imagesc binary.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ImagescError, Result};
use crate::options::OptionSet;

/// Command-line arguments for imagesc
#[derive(Parser, Debug)]
#[command(name = "imagesc")]
#[command(author, version, about = "Export a CSV matrix as an interactive d3 heatmap", long_about = None)]
pub struct Args {
    /// Path to the CSV matrix (header row = column labels, first column = row labels)
    pub input: PathBuf,

    /// Output directory for the web export
    #[arg(short, long, env = "IMAGESC_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "IMAGESC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); defaults to info
    #[arg(long, env = "IMAGESC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Reject malformed options instead of falling back to defaults
    #[arg(long)]
    pub strict: bool,

    /// Heatmap option as key=value, e.g. -s title=Example -s figsize=[10,10]
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory the web export is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Fail on malformed options
    #[serde(default)]
    pub strict: bool,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Heatmap options
    #[serde(default)]
    pub options: OptionSet,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, PathBuf)> {
        Self::from_args(Args::parse())
    }

    /// Build the configuration from already parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, PathBuf)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if let Some(output) = args.output {
            config.export.output_dir = output;
        }
        if args.strict {
            config.export.strict = true;
        }
        for assignment in &args.set {
            let (key, value) = OptionSet::parse_assignment(assignment)?;
            config.options.insert(&key, value);
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok((config, args.input))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.export.output_dir = other.export.output_dir;
        self.export.strict = self.export.strict || other.export.strict;
        self.options.merge(other.options);
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.export.output_dir.as_os_str().is_empty() {
            return Err(ImagescError::Config {
                message: "Output directory cannot be empty".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => {}
            _ => {
                return Err(ImagescError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error, off",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            options: OptionSet::new(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            strict: false,
        }
    }
}

// Default value functions for serde
fn default_output_dir() -> PathBuf {
    PathBuf::from("d3heatmap")
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionValue;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export.output_dir, PathBuf::from("d3heatmap"));
        assert!(!config.export.strict);
        assert!(config.options.is_empty());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_merge() {
        let mut config1 = Config::default();
        config1.options.insert("cmap", "rainbow");
        let mut config2 = Config::default();
        config2.export.output_dir = PathBuf::from("out");
        config2.options.insert("dpi", 200);

        config1.merge(config2);

        assert_eq!(config1.export.output_dir, PathBuf::from("out"));
        assert_eq!(config1.options.get("dpi"), Some(&OptionValue::Int(200)));
        assert_eq!(config1.options.get("cmap"), Some(&OptionValue::from("rainbow")));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{"export": {"output_dir": "web"}, "options": {"title": "demo", "figsize": [10, 10]}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.export.output_dir, PathBuf::from("web"));
        assert_eq!(config.options.get("title"), Some(&OptionValue::from("demo")));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_args_override() {
        let args = Args::parse_from([
            "imagesc",
            "matrix.csv",
            "-o",
            "site",
            "--strict",
            "-s",
            "title=Example",
            "--set",
            "width=300",
        ]);
        let (config, input) = Config::from_args(args).unwrap();

        assert_eq!(input, PathBuf::from("matrix.csv"));
        assert_eq!(config.export.output_dir, PathBuf::from("site"));
        assert!(config.export.strict);
        assert_eq!(config.options.get("width"), Some(&OptionValue::Int(300)));
        assert_eq!(config.options.get("title"), Some(&OptionValue::from("Example")));
    }

    #[test]
    fn test_file_log_level_survives_without_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imagesc.json");
        std::fs::write(&path, r#"{"log_level": "debug"}"#).unwrap();
        let path = path.to_string_lossy().into_owned();

        let args = Args::parse_from(["imagesc", "matrix.csv", "-c", path.as_str()]);
        let (config, _) = Config::from_args(args).unwrap();
        assert_eq!(config.log_level, "debug");

        let args = Args::parse_from(["imagesc", "matrix.csv", "-c", path.as_str(), "--log-level", "warn"]);
        let (config, _) = Config::from_args(args).unwrap();
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.export.output_dir = PathBuf::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }
}
