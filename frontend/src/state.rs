//! Page state shared by the components.
//!
//! Mirrors the backend session lifecycle: `load -> (clean)* -> (download)*`,
//! with everything reset on each new load.

use leptos::*;

use crate::types::{CleanResponse, LogEntry, LogLevel, Preview, Stats, UploadResponse};
use crate::MAX_LOG_ENTRIES;

#[derive(Clone, Copy)]
pub struct AppState {
    /// Last successful upload (session id, file info, raw stats).
    pub upload: RwSignal<Option<UploadResponse>>,
    /// Last successful clean for the current upload.
    pub cleaned: RwSignal<Option<CleanResponse>>,
    /// Stats currently on screen (raw after load, cleaned after clean).
    pub stats: RwSignal<Stats>,
    pub preview: RwSignal<Preview>,
    /// A request is in flight.
    pub busy: RwSignal<bool>,
    pub logs: RwSignal<Vec<LogEntry>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            upload: create_rw_signal(None),
            cleaned: create_rw_signal(None),
            stats: create_rw_signal(Stats::default()),
            preview: create_rw_signal(Preview::default()),
            busy: create_rw_signal(false),
            logs: create_rw_signal(Vec::new()),
        }
    }

    pub fn session_id(&self) -> Option<String> {
        self.upload.with_untracked(|u| u.as_ref().map(|u| u.session_id.clone()))
    }

    pub fn can_clean(&self) -> bool {
        self.upload.with(Option::is_some) && !self.busy.get()
    }

    pub fn can_download(&self) -> bool {
        self.cleaned.with(Option::is_some) && !self.busy.get()
    }

    /// Make `upload` the current file, dropping any clean of the previous
    /// one. Returns the session id it replaced, if any.
    pub fn replace_upload(&self, upload: UploadResponse) -> Option<String> {
        let previous = self.session_id();
        self.set_loaded(upload);
        previous
    }

    pub fn set_loaded(&self, upload: UploadResponse) {
        self.stats.set(upload.stats);
        self.preview.set(upload.preview.clone());
        self.cleaned.set(None);
        self.upload.set(Some(upload));
    }

    pub fn set_cleaned(&self, result: CleanResponse) {
        self.stats.set(result.stats);
        self.preview.set(result.preview.clone());
        self.cleaned.set(Some(result));
    }

    /// Append a local entry to the logs panel and the browser console.
    pub fn add_log(&self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Error => log::error!("{}", message),
            LogLevel::Warning => log::warn!("{}", message),
            _ => log::info!("{}", message),
        }

        let entry = LogEntry {
            level,
            message,
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        };
        self.logs.update(|logs| push_capped(logs, entry));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Push an entry, dropping the oldest beyond [`MAX_LOG_ENTRIES`].
pub fn push_capped(logs: &mut Vec<LogEntry>, entry: LogEntry) {
    logs.push(entry);
    if logs.len() > MAX_LOG_ENTRIES {
        let excess = logs.len() - MAX_LOG_ENTRIES;
        logs.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(i: usize) -> LogEntry {
        LogEntry {
            level: LogLevel::Info,
            message: i.to_string(),
            timestamp: "00:00:00".to_string(),
        }
    }

    fn upload(session_id: &str) -> UploadResponse {
        UploadResponse {
            session_id: session_id.to_string(),
            status: "ready".to_string(),
            file_name: format!("{}.csv", session_id),
            encoding: "utf-8".to_string(),
            columns: vec!["a".to_string()],
            renamed_columns: Vec::new(),
            stats: Stats {
                row_count: 2,
                col_count: 1,
                missing_count: 1,
                duplicate_count: 0,
            },
            preview: Preview::default(),
        }
    }

    fn cleaned(session_id: &str) -> CleanResponse {
        CleanResponse {
            session_id: session_id.to_string(),
            status: "cleaned".to_string(),
            report: Default::default(),
            report_lines: vec!["Cleaning complete.".to_string()],
            stats: Stats::default(),
            preview: Preview::default(),
        }
    }

    #[test]
    fn test_replace_upload_returns_previous_session() {
        let runtime = create_runtime();
        let state = AppState::new();

        assert_eq!(state.replace_upload(upload("first")), None);
        state.set_cleaned(cleaned("first"));
        assert!(state.cleaned.get_untracked().is_some());

        assert_eq!(state.replace_upload(upload("second")), Some("first".to_string()));
        assert_eq!(state.session_id(), Some("second".to_string()));
        assert!(state.cleaned.get_untracked().is_none());
        assert_eq!(state.stats.get_untracked().missing_count, 1);

        runtime.dispose();
    }

    #[test]
    fn test_push_capped_drops_oldest() {
        let mut logs = Vec::new();
        for i in 0..MAX_LOG_ENTRIES + 5 {
            push_capped(&mut logs, entry(i));
        }

        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs[0].message, "5");
    }
}
