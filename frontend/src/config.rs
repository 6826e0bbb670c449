//! Application configuration.
//!
//! Compile-time settings for the csvtidy frontend.

/// Backend API base URL.
pub const BACKEND_URL: &str = "http://localhost:3000";

/// Application name shown in the page title.
pub const APP_NAME: &str = "csvtidy";

/// Name given to the downloaded file.
pub const EXPORT_FILE_NAME: &str = "cleaned_data.csv";

/// Content type of the downloaded file.
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";

/// Maximum logs to keep in memory.
pub const MAX_LOG_ENTRIES: usize = 100;
