//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Log Types** - Real-time log streaming
//! - **API Types** - Backend request/response structures
//! - **Error Types** - Frontend error handling

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level.
///
/// Matches the backend's log levels for SSE streaming.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Error,
    Warning,
}

impl LogLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Error => "log-error",
            LogLevel::Warning => "log-warning",
        }
    }
}

/// A single log entry, either from the backend stream or local.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Timestamp string (HH:MM:SS)
    pub timestamp: String,
}

// =============================================================================
// API Types
// =============================================================================

/// Summary counts for the current data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub row_count: usize,
    pub col_count: usize,
    pub missing_count: usize,
    pub duplicate_count: usize,
}

/// One preview cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreviewCell {
    pub value: String,
    pub missing: bool,
}

/// First rows of the current data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<PreviewCell>>,
}

/// Cleaning steps selected by the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanOptions {
    pub remove_duplicates: bool,
    pub fill_missing: bool,
}

/// Counts of changes made by a clean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningReport {
    pub removed_duplicates: usize,
    pub filled_missing: usize,
}

/// A header renamed by the backend to keep names unique.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenamedColumn {
    pub original: String,
    pub renamed: String,
}

/// Response from `POST /api/upload`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub session_id: String,
    pub status: String,
    pub file_name: String,
    pub encoding: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub renamed_columns: Vec<RenamedColumn>,
    pub stats: Stats,
    pub preview: Preview,
}

/// Response from `POST /api/sessions/{id}/clean`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanResponse {
    pub session_id: String,
    pub status: String,
    pub report: CleaningReport,
    pub report_lines: Vec<String>,
    pub stats: Stats,
    pub preview: Preview,
}

/// Error body returned by the backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    pub error: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug)]
pub enum AppError {
    /// Rejected before contacting the backend.
    Validation(String),
    /// Backend answered with an error.
    Server { status: u16, message: String },
    /// Network/HTTP error.
    Network(String),
    /// Browser API failure (Blob, URL, DOM).
    Browser(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "{}", msg),
            AppError::Server { status, message } => write!(f, "Server error ({}): {}", status, message),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Browser(msg) => write!(f, "Browser error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
