//! Error handling for contact import operations.
//!
//! Malformed CSV content never surfaces here: the parser folds it into
//! line-numbered diagnostics. These variants cover the surrounding surface
//! (opening files, configuration, storage and report rendering).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to open input file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Contact store rejected batch of {batch_size} records: {reason}")]
    Store { batch_size: usize, reason: String },

    #[error("Failed to render report: {0}")]
    Report(#[from] serde_json::Error),
}

impl ImportError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a store error for a rejected batch
    pub fn store(batch_size: usize, reason: impl Into<String>) -> Self {
        Self::Store {
            batch_size,
            reason: reason.into(),
        }
    }

    /// Map an open failure to the most specific variant
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileOpen { path, source }
        }
    }
}

/// A single-line problem found while tokenizing or coercing cells.
///
/// The display text is user-facing and must stay stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Invalid date format '{0}'")]
    InvalidDate(String),

    #[error("Invalid married field '{0}'")]
    InvalidMarried(String),

    #[error("Phone cannot be empty")]
    EmptyPhone,

    #[error("Invalid salary format '{0}'")]
    InvalidSalary(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;
