//! Custom error types for casepack
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.
//!
//! Fatal errors (missing inputs, malformed required fields, bad cipher config,
//! crypto failures) abort the run before any artifact is written. Gaps in
//! optional enrichment data never become errors; they are absorbed where they
//! are detected.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for casepack operations
#[derive(Error, Debug)]
pub enum CasepackError {
    /// A required source table or file is absent
    #[error("Required input missing: {path}")]
    InputMissing { path: PathBuf },

    /// A structurally required field could not be parsed
    #[error("Schema violation: {0}")]
    Schema(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Cipher configuration errors (malformed or inconsistent config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Encryption/decryption errors
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Output storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CasepackError {
    /// Create an "input missing" error for a required source file
    pub fn input_missing(path: impl Into<PathBuf>) -> Self {
        Self::InputMissing { path: path.into() }
    }

    /// Create a schema violation for an unparseable required field
    pub fn schema(context: impl Into<String>) -> Self {
        Self::Schema(context.into())
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CasepackError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CasepackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for CasepackError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for casepack operations
pub type CasepackResult<T> = Result<T, CasepackError>;
