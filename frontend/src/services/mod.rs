//! Backend communication.
//!
//! - [`api`] - Upload, clean, download and close calls to the csvtidy backend
//! - [`save_file`] - Hand a text file to the browser as a download

pub mod api;
mod download;

pub use api::*;
pub use download::save_file;
