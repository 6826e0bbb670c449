//! REST API types shared with the frontend.
//!
//! All bodies use camelCase keys.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::{CleaningReport, Preview, Stats};
use crate::session::{CleanSummary, LoadSummary};

/// Response to a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Session to use for clean and download
    pub session_id: Uuid,
    /// Always "ready"
    pub status: String,
    pub file_name: String,
    pub encoding: String,
    pub columns: Vec<String>,
    /// Duplicate header names that were renamed
    pub renamed_columns: Vec<RenamedColumn>,
    pub stats: Stats,
    pub preview: Preview,
}

/// A header renamed to keep column names unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamedColumn {
    pub original: String,
    pub renamed: String,
}

impl UploadResponse {
    pub fn new(session_id: Uuid, summary: LoadSummary) -> Self {
        Self {
            session_id,
            status: "ready".to_string(),
            file_name: summary.file_name,
            encoding: summary.encoding,
            columns: summary.columns,
            renamed_columns: summary
                .renamed_columns
                .into_iter()
                .map(|(original, renamed)| RenamedColumn { original, renamed })
                .collect(),
            stats: summary.stats,
            preview: summary.preview,
        }
    }
}

/// Response to a clean request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanResponse {
    pub session_id: Uuid,
    pub status: String,
    pub report: CleaningReport,
    /// Human-readable report, one line per entry
    pub report_lines: Vec<String>,
    pub stats: Stats,
    pub preview: Preview,
}

impl CleanResponse {
    pub fn new(session_id: Uuid, summary: CleanSummary) -> Self {
        Self {
            session_id,
            status: "cleaned".to_string(),
            report_lines: summary.report.lines(),
            report: summary.report,
            stats: summary.stats,
            preview: summary.preview,
        }
    }
}

/// Create an error response body
pub fn error_response(error: &str) -> Value {
    json!({
        "status": "error",
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CleanOptions;
    use crate::session::Session;

    #[test]
    fn test_upload_response_shape() {
        let mut session = Session::new();
        let summary = session.on_file_loaded("p.csv", b"a,a\n1,2\n").unwrap();
        let id = Uuid::new_v4();

        let json = serde_json::to_value(UploadResponse::new(id, summary)).unwrap();

        assert_eq!(json["sessionId"], id.to_string());
        assert_eq!(json["status"], "ready");
        assert_eq!(json["fileName"], "p.csv");
        assert_eq!(json["columns"][1], "a_2");
        assert_eq!(json["renamedColumns"][0]["renamed"], "a_2");
        assert_eq!(json["stats"]["rowCount"], 1);
        assert_eq!(json["preview"]["rows"][0][1]["value"], "2");
        assert_eq!(json["preview"]["rows"][0][1]["missing"], false);
    }

    #[test]
    fn test_clean_response_shape() {
        let mut session = Session::new();
        session.on_file_loaded("p.csv", b"a\n1\n1\n").unwrap();
        let summary = session.on_clean_requested(CleanOptions::all()).unwrap();

        let json = serde_json::to_value(CleanResponse::new(Uuid::new_v4(), summary)).unwrap();

        assert_eq!(json["status"], "cleaned");
        assert_eq!(json["report"]["removedDuplicates"], 1);
        assert_eq!(json["report"]["filledMissing"], 0);
        assert_eq!(json["reportLines"][0], "Cleaning complete.");
    }

    #[test]
    fn test_error_response() {
        let body = error_response("No file provided");
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "No file provided");
    }
}
