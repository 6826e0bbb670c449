//! # csvtidy - load, inspect, clean and re-export CSV files
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌───────────┐   ┌──────────┐   ┌─────────────────┐
//! │ CSV File │──▶│  Parser  │──▶│   Clean   │──▶│  Writer  │──▶│ cleaned_data.csv│
//! │ (bytes)  │   │(auto-enc)│   │(dedup/avg)│   │ (quoting)│   │                 │
//! └──────────┘   └────┬─────┘   └─────┬─────┘   └──────────┘   └─────────────────┘
//!                     └──── Stats ◀───┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use csvtidy::{clean, parse, serialize, CleanOptions};
//!
//! let raw = parse("Name,Age\nJohn,20\nJane,\nJohn,20\n");
//! let outcome = clean(&raw, CleanOptions::all());
//!
//! assert_eq!(outcome.report.removed_duplicates, 1);
//! assert_eq!(serialize(&outcome.dataset), "Name,Age\nJohn,20\nJane,20.00\n");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Layered error types
//! - [`models`] - Dataset, cell classification, stats and report types
//! - [`parser`] - CSV parsing with charset detection
//! - [`writer`] - CSV serialization
//! - [`stats`] - Summary statistics and preview
//! - [`clean`] - Deduplication and mean imputation
//! - [`session`] - Per-upload controller with readiness gating
//! - [`cache`] - In-memory session store
//! - [`validation`] - Upload checks
//! - [`config`] - Environment configuration
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Pipeline
pub mod parser;
pub mod writer;
pub mod stats;
pub mod clean;

// Sessions
pub mod session;
pub mod cache;
pub mod validation;

// Configuration
pub mod config;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, CsvError, ServerError, SessionError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    is_missing,
    is_numeric,
    Cell,
    CleanOptions,
    CleaningReport,
    Dataset,
    Preview,
    PreviewCell,
    Row,
    Stats,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use parser::{parse, parse_bytes, parse_file, ParseResult};
pub use writer::{serialize, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
pub use stats::{compute_stats, preview, preview_rows, PREVIEW_ROWS};
pub use clean::{clean, CleanOutcome};

// =============================================================================
// Re-exports - Sessions
// =============================================================================

pub use session::{CleanSummary, Download, LoadSummary, Session};
pub use cache::SessionStore;
pub use config::ServerConfig;

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, CleanResponse, RenamedColumn, UploadResponse};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
