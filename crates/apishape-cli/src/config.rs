//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Command-line arguments (applied by the handlers)

use crate::error::{Error, Result};
use anyhow::Context;
use apishape_core::PipelineSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Primary alias used when `--alias` is not given
    pub default_alias: Option<String>,

    /// Switches for the built-in transformations
    pub pipeline: PipelineSettings,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON results by default
    pub pretty: bool,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,

    /// Log file path
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            color: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            file: None,
        }
    }
}

/// Serialization format of a configuration file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "toml, yaml or json".to_string(),
            }),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = match FileFormat::from_path(path)? {
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };

        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration file");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// First existing file among the default locations
    pub fn find_config_file() -> Option<PathBuf> {
        Self::default_config_paths()
            .into_iter()
            .find(|path| path.is_file())
    }

    /// Get default configuration file paths to check
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Current directory
        for name in [".apishape.toml", ".apishape.yaml", ".apishape.json"] {
            paths.push(PathBuf::from(name));
        }

        // User config directory
        if let Some(path) = Self::user_config_path() {
            paths.push(path);
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            for name in [".apishape.toml", ".apishape.yaml", ".apishape.json"] {
                paths.push(home_dir.join(name));
            }
        }

        paths
    }

    /// Location written by `config init`
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("apishape").join("config.toml"))
    }

    /// Primary alias from the command line, falling back to the configured default
    pub fn resolve_alias(&self, cli_alias: Option<&str>) -> Result<String> {
        cli_alias
            .map(str::to_string)
            .or_else(|| self.default_alias.clone())
            .ok_or_else(|| {
                Error::config("no primary alias given; pass --alias or set default_alias")
            })
    }

    /// Serialize to the format implied by `path`'s extension
    pub fn to_string_for(&self, path: &Path) -> Result<String> {
        let content = match FileFormat::from_path(path)? {
            FileFormat::Toml => toml::to_string_pretty(self)?,
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
        };
        Ok(content)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_string_for(path)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apishape_core::TimeZoneSetting;
    use tempfile::TempDir;

    #[test]
    fn test_load_toml_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_alias = "Post"

[pipeline]
change_keys = false
time_zone = "utc"

[output]
pretty = true
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.default_alias.as_deref(), Some("Post"));
        assert!(!config.pipeline.change_keys);
        assert!(config.pipeline.change_nesting);
        assert_eq!(config.pipeline.time_zone, TimeZoneSetting::Utc);
        assert!(config.output.pretty);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_yaml_and_json_config() {
        let dir = TempDir::new().unwrap();

        let yaml = dir.path().join("config.yml");
        std::fs::write(&yaml, "pipeline:\n  time_zone: \"+02:00\"\n").unwrap();
        let config = Config::from_file(&yaml).unwrap();
        assert_eq!(config.pipeline.time_zone, TimeZoneSetting::Fixed(7200));

        let json = dir.path().join("config.json");
        std::fs::write(&json, r#"{"default_alias": "Article"}"#).unwrap();
        let config = Config::from_file(&json).unwrap();
        assert_eq!(config.default_alias.as_deref(), Some("Article"));
    }

    #[test]
    fn test_invalid_time_zone_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[pipeline]\ntime_zone = \"mars\"\n").unwrap();

        assert!(matches!(Config::from_file(&path), Err(Error::TomlDe(_))));
    }

    #[test]
    fn test_missing_and_unknown_files() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::from_file(&missing),
            Err(Error::FileNotFound { .. })
        ));

        let ini = dir.path().join("config.ini");
        std::fs::write(&ini, "").unwrap();
        assert!(matches!(
            Config::from_file(&ini),
            Err(Error::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.default_alias = Some("Post".to_string());
        config.pipeline.time_zone = TimeZoneSetting::Fixed(-18000);
        config.save(&path).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_save_into_file_path_reports_target() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let err = Config::default()
            .save(&blocker.join("config.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to create directory"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_resolve_alias() {
        let mut config = Config::default();
        assert!(config.resolve_alias(None).is_err());

        config.default_alias = Some("Post".to_string());
        assert_eq!(config.resolve_alias(None).unwrap(), "Post");
        assert_eq!(config.resolve_alias(Some("User")).unwrap(), "User");
    }
}
