//! Runner configuration.
//!
//! A [`RunnerConfig`] tells [`ChainBuilder::new_runner`](crate::builder::ChainBuilder::new_runner)
//! where the images live and how results are named. It can be built in code
//! or loaded from a TOML file:
//!
//! ```toml
//! # All keys are optional here; `source` is required by the builder.
//!
//! source = "photos"                 # Base directory the runner works in
//! format = "{NAME}-{####}-{W}x{H}"  # Naming template for processed images
//! quality = 80                      # JPG output quality (1-100)
//! ```
//!
//! Unknown keys are rejected to catch typos early. Command-line flags
//! override values read from the file, see [`RunnerConfig::merge`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Base directory holding the images.
    pub source: Option<PathBuf>,
    /// Naming template; the builder's default applies when absent.
    pub format: Option<String>,
    /// JPG output quality for every staged image.
    pub quality: Option<u32>,
}

impl RunnerConfig {
    pub fn with_source(source: impl Into<PathBuf>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RunnerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(q) = self.quality {
            if !(1..=100).contains(&q) {
                return Err(ConfigError::Validation("quality must be 1-100".into()));
            }
        }
        if self.format.as_deref() == Some("") {
            return Err(ConfigError::Validation("format must not be empty".into()));
        }
        Ok(())
    }

    /// Overlay every value `other` sets on top of `self`.
    pub fn merge(self, other: RunnerConfig) -> Self {
        Self {
            source: other.source.or(self.source),
            format: other.format.or(self.format),
            quality: other.quality.or(self.quality),
        }
    }
}
