//! Error types for pedigree operations.
//!
//! Routing and interaction never fail: a missing node or an unmatched edge is
//! simply skipped. [`PedigreeError`] covers the outer surfaces that read
//! external input, namely configuration loading and style resolution.

use std::io;

use thiserror::Error;

/// The main error type for pedigree operations.
#[derive(Debug, Error)]
pub enum PedigreeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

impl From<toml::de::Error> for PedigreeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
