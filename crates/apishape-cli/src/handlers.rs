//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand
//! and the input loading they share.

mod completions;
mod config;
mod transform;

pub use completions::handle_completions;
pub use config::handle_config;
pub use transform::handle_transform;

use crate::error::{Error, Result};
use anyhow::Context;
use apishape_core::Value;
use std::io::Read;
use std::path::Path;

/// Input document encodings understood by `transform`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Pick the encoding from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Read a result tree from `path`, or JSON from stdin when `path` is `-`
pub fn read_input(path: &Path) -> Result<Value> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read input from stdin")?;
        return parse_input(&content, InputFormat::Json, path);
    }

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_input(&content, InputFormat::from_path(path), path)
}

/// Parse document text in the given encoding
pub fn parse_input(content: &str, format: InputFormat, path: &Path) -> Result<Value> {
    let parsed = match format {
        InputFormat::Json => serde_json::from_str::<Value>(content).map_err(|e| e.to_string()),
        InputFormat::Yaml => serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|reason| {
        tracing::debug!(path = %path.display(), %reason, "Failed to parse input");
        Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: format.name().to_string(),
        }
    })
}
