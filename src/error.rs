//! Error taxonomy shared by the runner, the builder and the rules.
//!
//! Every variant carries the exact human-readable message callers see; the
//! `Display` output of a [`ChainError`] is part of the observable contract.
//! Lower-level failures (codec, filesystem, crop geometry) keep their own
//! error types and convert into [`ChainError`] through `#[from]`.

use crate::config::ConfigError;
use crate::fs::FsError;
use crate::imaging::{CodecError, InvalidDimensionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    /// Missing or unusable base directory, missing required builder option.
    #[error("{0}")]
    Configuration(String),
    /// Bad JPG quality, missing or invalid rule setting.
    #[error("{0}")]
    Validation(String),
    /// Crop target with a non-positive width or height.
    #[error(transparent)]
    InvalidDimensions(#[from] InvalidDimensionError),
    /// Operation invoked before the runner was ready for it.
    #[error("{0}")]
    State(String),
    /// Rule-set document could not be parsed or written.
    #[error("{0}")]
    Serialization(String),
    /// Rule-set document names a rule type the registry does not know.
    #[error("Unable to find {0}")]
    UnknownRule(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    FileSystem(#[from] FsError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ChainError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ChainError>;
