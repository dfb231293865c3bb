//! Error types for envchain operations.
//!
//! This module defines [`EnvchainError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A key that no source defines surfaces as [`EnvchainError::MissingConfig`]
//! - Unreadable files surface as [`EnvchainError::SourceUnavailable`]; the
//!   resolver logs them and moves on to the next source
//! - Malformed `.env` lines never produce an error
//! - Use `anyhow::Error` (via `EnvchainError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for envchain operations.
#[derive(Debug, Error)]
pub enum EnvchainError {
    /// No source defines the key and the caller gave no default.
    #[error("missing required configuration: {key}")]
    MissingConfig { key: String },

    /// A source exists but could not be read.
    #[error("source unavailable at {path}: {message}")]
    SourceUnavailable { path: PathBuf, message: String },

    /// Failed to parse a structured file (the preference store).
    #[error("Failed to parse {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EnvchainError {
    /// Whether the resolver may skip this failure and try the next source.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}

/// Result type alias for envchain operations.
pub type Result<T> = std::result::Result<T, EnvchainError>;
