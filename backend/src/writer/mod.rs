//! Dataset to CSV text.
//!
//! Quoting is minimal: a value containing a comma is wrapped in double
//! quotes, nothing else is escaped.

use crate::models::Dataset;

/// Name of the exported file.
pub const EXPORT_FILE_NAME: &str = "cleaned_data.csv";

/// Content type of the exported file.
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";

/// Serialize a dataset to CSV. Every line, the last included, ends in `\n`.
///
/// An empty dataset serializes to an empty string.
pub fn serialize(dataset: &Dataset) -> String {
    if dataset.is_empty() {
        return String::new();
    }

    let mut out = dataset.headers().join(",");
    out.push('\n');

    for row in dataset.rows() {
        let line = row
            .values()
            .iter()
            .map(|v| quote_field(v))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }

    out
}

fn quote_field(value: &str) -> String {
    if value.contains(',') {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}
