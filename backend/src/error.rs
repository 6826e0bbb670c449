//! Error types for the csvtidy pipeline.
//!
//! Errors are layered the same way the pipeline is:
//!
//! - [`CsvError`] - reading and decoding input
//! - [`SessionError`] - user actions rejected by the session controller
//! - [`ConfigError`] - invalid environment configuration
//! - [`ServerError`] - HTTP-facing errors
//!
//! Each layer converts into the next through `From`, so `?` works across
//! boundaries.

use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading or decoding CSV input.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
}

// =============================================================================
// Session Errors
// =============================================================================

/// Errors raised by [`crate::session::Session`] when an action is not allowed.
#[derive(Debug, Error)]
pub enum SessionError {
    /// File name does not end in `.csv`.
    #[error("Please upload a CSV file (.csv), got '{0}'")]
    InvalidFileType(String),

    /// File parsed to zero rows.
    #[error("The CSV file seems to be empty")]
    EmptyFile,

    /// Upload exceeds the configured size limit.
    #[error("File is too large: {size} bytes (limit {max} bytes)")]
    TooLarge { size: usize, max: usize },

    /// Clean requested before any file was loaded.
    #[error("No file loaded yet")]
    NotLoaded,

    /// Download requested before a clean ran.
    #[error("Data has not been cleaned yet")]
    NotCleaned,

    /// Underlying CSV error.
    #[error(transparent)]
    Csv(#[from] CsvError),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Invalid configuration value.
#[derive(Debug, Error)]
#[error("Invalid value for {key}: '{value}' ({message})")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub message: String,
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Unknown session id.
    #[error("Session not found: {0}")]
    NotFound(Uuid),

    /// Session action rejected.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for session actions.
pub type SessionResult<T> = Result<T, SessionError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
