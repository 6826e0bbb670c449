//! Session controller: one loaded file and its cleaning state.
//!
//! ```text
//!            on_file_loaded            on_clean_requested
//!  Empty ───────────────────▶ Loaded ────────────────────▶ Cleaned ─┐
//!    ▲                          ▲  │                          ▲     │ on_clean_requested
//!    │                          │  └── on_file_loaded ──┐     └─────┘ on_download_requested
//!    │                          └───────────────────────┘
//! ```
//!
//! A failed load leaves the previous state untouched. Every successful load
//! resets cleaning, and every clean restarts from the raw dataset.

use serde::Serialize;

use crate::api::logs::{log_info, log_success, log_warning};
use crate::clean::clean;
use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::error::{SessionError, SessionResult};
use crate::models::{CleanOptions, CleaningReport, Dataset, Preview, Stats};
use crate::parser::{parse_bytes, ParseResult};
use crate::stats::{compute_stats, preview};
use crate::validation::{validate_file_name, validate_size};
use crate::writer::{serialize, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};

/// What the presentation layer needs after a file is loaded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSummary {
    pub file_name: String,
    pub encoding: String,
    pub columns: Vec<String>,
    pub renamed_columns: Vec<(String, String)>,
    pub stats: Stats,
    pub preview: Preview,
}

/// What the presentation layer needs after a clean.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanSummary {
    pub report: CleaningReport,
    pub stats: Stats,
    pub preview: Preview,
}

/// A serialized export ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

#[derive(Debug, Clone, Default)]
enum State {
    #[default]
    Empty,
    Loaded {
        raw: Dataset,
    },
    Cleaned {
        raw: Dataset,
        cleaned: Dataset,
        report: CleaningReport,
    },
}

/// One user's pipeline: `load → (clean)* → (download)*`.
#[derive(Debug, Clone)]
pub struct Session {
    state: State,
    file_name: Option<String>,
    max_upload_bytes: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::with_max_upload(DEFAULT_MAX_UPLOAD_BYTES)
    }

    /// Session that rejects uploads above `max_upload_bytes`.
    pub fn with_max_upload(max_upload_bytes: usize) -> Self {
        Self {
            state: State::Empty,
            file_name: None,
            max_upload_bytes,
        }
    }

    /// Load a new file, replacing anything loaded or cleaned before.
    pub fn on_file_loaded(&mut self, file_name: &str, bytes: &[u8]) -> SessionResult<LoadSummary> {
        self.validate_upload(file_name, bytes.len())?;

        log_info(format!("📖 Reading {} ({} bytes)...", file_name, bytes.len()));
        self.install(file_name, parse_bytes(bytes))
    }

    /// Reject a file by name or size before any parsing work is done.
    pub fn validate_upload(&self, file_name: &str, size: usize) -> SessionResult<()> {
        validate_file_name(file_name)?;
        validate_size(size, self.max_upload_bytes)
    }

    /// Install an already parsed file, replacing anything loaded before.
    ///
    /// Lets callers parse outside of whatever guards the session. A file
    /// with no data rows is rejected and the previous state is kept.
    pub fn install(&mut self, file_name: &str, parsed: ParseResult) -> SessionResult<LoadSummary> {
        if parsed.dataset.is_empty() {
            log_warning(format!("{} contains no data rows", file_name));
            return Err(SessionError::EmptyFile);
        }

        log_success(format!("Detected encoding: {}", parsed.encoding));
        for (original, renamed) in &parsed.renamed_headers {
            log_warning(format!("Duplicate column '{}' renamed to '{}'", original, renamed));
        }

        let raw = parsed.dataset;
        let stats = compute_stats(&raw);
        log_success(format!(
            "Read {} rows, {} columns ({} missing cells, {} duplicate rows)",
            stats.row_count, stats.col_count, stats.missing_count, stats.duplicate_count
        ));

        let summary = LoadSummary {
            file_name: file_name.to_string(),
            encoding: parsed.encoding,
            columns: raw.headers().to_vec(),
            renamed_columns: parsed.renamed_headers,
            stats,
            preview: preview(&raw),
        };

        self.file_name = Some(file_name.to_string());
        self.state = State::Loaded { raw };

        Ok(summary)
    }

    /// Clean a fresh copy of the raw dataset.
    pub fn on_clean_requested(&mut self, options: CleanOptions) -> SessionResult<CleanSummary> {
        let raw = match std::mem::take(&mut self.state) {
            State::Empty => return Err(SessionError::NotLoaded),
            State::Loaded { raw } | State::Cleaned { raw, .. } => raw,
        };

        log_info(format!(
            "🧹 Cleaning (remove duplicates: {}, fill missing: {})...",
            options.remove_duplicates, options.fill_missing
        ));
        let outcome = clean(&raw, options);
        for line in outcome.report.lines() {
            log_success(line);
        }

        let summary = CleanSummary {
            report: outcome.report,
            stats: compute_stats(&outcome.dataset),
            preview: preview(&outcome.dataset),
        };

        self.state = State::Cleaned {
            raw,
            cleaned: outcome.dataset,
            report: outcome.report,
        };

        Ok(summary)
    }

    /// Serialize the cleaned dataset for download.
    pub fn on_download_requested(&self) -> SessionResult<Download> {
        let cleaned = match &self.state {
            State::Cleaned { cleaned, .. } => cleaned,
            _ => return Err(SessionError::NotCleaned),
        };

        let body = serialize(cleaned);
        log_info(format!("💾 Exporting {} ({} bytes)", EXPORT_FILE_NAME, body.len()));

        Ok(Download {
            file_name: EXPORT_FILE_NAME,
            content_type: EXPORT_CONTENT_TYPE,
            body,
        })
    }

    pub fn can_clean(&self) -> bool {
        !matches!(self.state, State::Empty)
    }

    pub fn can_download(&self) -> bool {
        matches!(self.state, State::Cleaned { .. })
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn raw(&self) -> Option<&Dataset> {
        match &self.state {
            State::Empty => None,
            State::Loaded { raw } | State::Cleaned { raw, .. } => Some(raw),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &[u8] = b"Name,Age\nJohn,20\nJane,\nJohn,20\n";

    #[test]
    fn test_new_session_gates() {
        let session = Session::new();
        assert!(!session.can_clean());
        assert!(!session.can_download());
        assert!(session.raw().is_none());
    }

    #[test]
    fn test_load_summary() {
        let mut session = Session::new();
        let summary = session.on_file_loaded("people.csv", SCENARIO).unwrap();

        assert_eq!(summary.file_name, "people.csv");
        assert_eq!(summary.columns, vec!["Name", "Age"]);
        assert_eq!(summary.stats.row_count, 3);
        assert_eq!(summary.stats.duplicate_count, 1);
        assert_eq!(summary.preview.rows.len(), 3);
        assert!(session.can_clean());
        assert!(!session.can_download());
    }

    #[test]
    fn test_invalid_file_type_keeps_state() {
        let mut session = Session::new();
        session.on_file_loaded("people.csv", SCENARIO).unwrap();

        let err = session.on_file_loaded("people.xlsx", b"a,b\n1,2").unwrap_err();
        assert!(matches!(err, SessionError::InvalidFileType(_)));
        assert_eq!(session.file_name(), Some("people.csv"));
        assert_eq!(session.raw().unwrap().len(), 3);
    }

    #[test]
    fn test_empty_file_rejected() {
        let mut session = Session::new();
        assert!(matches!(
            session.on_file_loaded("empty.csv", b"  \n"),
            Err(SessionError::EmptyFile)
        ));
        assert!(matches!(
            session.on_file_loaded("header.csv", b"a,b\n"),
            Err(SessionError::EmptyFile)
        ));
        assert!(!session.can_clean());
    }

    #[test]
    fn test_too_large_rejected() {
        let mut session = Session::with_max_upload(8);
        assert!(matches!(
            session.on_file_loaded("big.csv", SCENARIO),
            Err(SessionError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_clean_requires_load() {
        let mut session = Session::new();
        assert!(matches!(
            session.on_clean_requested(CleanOptions::all()),
            Err(SessionError::NotLoaded)
        ));
    }

    #[test]
    fn test_download_requires_clean() {
        let mut session = Session::new();
        session.on_file_loaded("people.csv", SCENARIO).unwrap();
        assert!(matches!(
            session.on_download_requested(),
            Err(SessionError::NotCleaned)
        ));
    }

    #[test]
    fn test_full_flow() {
        let mut session = Session::new();
        session.on_file_loaded("people.csv", SCENARIO).unwrap();

        let summary = session.on_clean_requested(CleanOptions::all()).unwrap();
        assert_eq!(summary.report.removed_duplicates, 1);
        assert_eq!(summary.report.filled_missing, 1);
        assert_eq!(summary.stats.row_count, 2);
        assert_eq!(summary.stats.missing_count, 0);
        assert!(session.can_download());

        let download = session.on_download_requested().unwrap();
        assert_eq!(download.file_name, "cleaned_data.csv");
        assert_eq!(download.content_type, "text/csv");
        assert_eq!(download.body, "Name,Age\nJohn,20\nJane,20.00\n");
    }

    #[test]
    fn test_clean_is_not_cumulative() {
        let mut session = Session::new();
        session.on_file_loaded("people.csv", SCENARIO).unwrap();

        session.on_clean_requested(CleanOptions::all()).unwrap();
        let second = session
            .on_clean_requested(CleanOptions {
                remove_duplicates: false,
                fill_missing: false,
            })
            .unwrap();

        assert_eq!(second.stats.row_count, 3);
        assert_eq!(second.report, CleaningReport::default());
        assert_eq!(
            session.on_download_requested().unwrap().body,
            "Name,Age\nJohn,20\nJane,\nJohn,20\n"
        );
    }

    #[test]
    fn test_reload_resets_cleaning() {
        let mut session = Session::new();
        session.on_file_loaded("people.csv", SCENARIO).unwrap();
        session.on_clean_requested(CleanOptions::all()).unwrap();

        session.on_file_loaded("other.CSV", b"x\n1\n").unwrap();
        assert!(!session.can_download());
        assert_eq!(session.file_name(), Some("other.CSV"));
    }

    #[test]
    fn test_install_parsed_file() {
        let mut session = Session::new();
        session.validate_upload("people.csv", SCENARIO.len()).unwrap();

        let summary = session.install("people.csv", parse_bytes(SCENARIO)).unwrap();
        assert_eq!(summary.stats.row_count, 3);
        assert!(session.can_clean());
    }

    #[test]
    fn test_install_empty_keeps_previous_file() {
        let mut session = Session::new();
        session.on_file_loaded("people.csv", SCENARIO).unwrap();
        session.on_clean_requested(CleanOptions::all()).unwrap();

        let err = session.install("header.csv", parse_bytes(b"a,b\n")).unwrap_err();
        assert!(matches!(err, SessionError::EmptyFile));
        assert_eq!(session.file_name(), Some("people.csv"));
        assert!(session.can_download());
    }

    #[test]
    fn test_validate_upload_rejects_before_parsing() {
        let session = Session::with_max_upload(8);
        assert!(matches!(
            session.validate_upload("a.txt", 1),
            Err(SessionError::InvalidFileType(_))
        ));
        assert!(matches!(
            session.validate_upload("a.csv", 9),
            Err(SessionError::TooLarge { .. })
        ));
    }
}
