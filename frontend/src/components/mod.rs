//! UI Components for the csvtidy application.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - CSV file picker
//! - [`DataInfo`] - File name and column list
//! - [`StatsCards`] - Row, column, missing and duplicate counts
//! - [`PreviewTable`] - First rows with missing cells highlighted
//! - [`CleanPanel`] - Cleaning options, report and download
//! - [`LogsPanel`] - Real-time processing logs (SSE)

mod hero;
mod upload;
mod info;
mod stats;
mod preview;
mod clean;
mod footer;
mod logs;

pub use hero::*;
pub use upload::*;
pub use info::*;
pub use stats::*;
pub use preview::*;
pub use clean::*;
pub use footer::*;
pub use logs::*;
