//! Domain models for the csvtidy pipeline.
//!
//! - [`Dataset`] - header plus ordered rows, all values kept as text
//! - [`Row`] - one record, stored positionally against the header
//! - [`Cell`] - per-cell classification used by the cleaning engine
//! - [`Stats`] / [`Preview`] - what the statistics engine reports
//! - [`CleanOptions`] / [`CleaningReport`] - cleaning input and outcome

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// =============================================================================
// Rows and datasets
// =============================================================================

/// A single record. Values line up with [`Dataset::headers`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Vec<String>);

impl Row {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// Value at column position `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub(crate) fn set(&mut self, index: usize, value: String) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = value;
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<&str>> for Row {
    fn from(values: Vec<&str>) -> Self {
        Self(values.into_iter().map(String::from).collect())
    }
}

/// Ordered rows sharing one header.
///
/// Every row holds exactly one value per header column; [`Dataset::new`]
/// pads short rows with empty values and drops extra ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut values = row.0;
                values.resize(width, String::new());
                Row(values)
            })
            .collect();

        Self { headers, rows }
    }

    /// A dataset with no header and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no rows, even if a header was read.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Value of column `name` in row `row`.
    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column_index(name)?;
        self.rows.get(row)?.get(col)
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }
}

// =============================================================================
// Cell classification
// =============================================================================

/// Decimal literal with optional sign, fraction and exponent.
static NUMERIC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("valid numeric pattern")
});

/// A cell is missing when it holds no text.
pub fn is_missing(value: &str) -> bool {
    value.is_empty()
}

/// Classified view of one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Empty value.
    Missing,
    /// Present but not a number.
    Text(String),
    /// Finite number together with the text it was read from.
    Number { value: f64, text: String },
}

impl Cell {
    pub fn classify(raw: &str) -> Self {
        if is_missing(raw) {
            return Cell::Missing;
        }

        let trimmed = raw.trim();
        if NUMERIC_PATTERN.is_match(trimmed) {
            if let Ok(value) = trimmed.parse::<f64>() {
                if value.is_finite() {
                    return Cell::Number {
                        value,
                        text: raw.to_string(),
                    };
                }
            }
        }

        Cell::Text(raw.to_string())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number { value, .. } => Some(*value),
            _ => None,
        }
    }
}

/// True when `value` is present and reads as a finite decimal number.
///
/// Only plain decimal literals count. Hex (`0x10`), `Infinity` and values
/// that overflow (`1e400`) are text, so they are neither averaged nor
/// counted: a column `0x10, 4, <missing>` fills with `4.00`, not with the
/// `2.00` a loose "not NaN" test would give by reading `0x10` as zero.
pub fn is_numeric(value: &str) -> bool {
    Cell::classify(value).as_number().is_some()
}

// =============================================================================
// Statistics
// =============================================================================

/// Summary counts for a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub row_count: usize,
    pub col_count: usize,
    pub missing_count: usize,
    pub duplicate_count: usize,
}

/// One preview cell with its missing flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewCell {
    pub value: String,
    pub missing: bool,
}

/// First rows of a dataset, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<PreviewCell>>,
}

// =============================================================================
// Cleaning
// =============================================================================

/// Which cleaning steps to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CleanOptions {
    pub remove_duplicates: bool,
    pub fill_missing: bool,
}

impl CleanOptions {
    pub fn all() -> Self {
        Self {
            remove_duplicates: true,
            fill_missing: true,
        }
    }
}

/// Changes made by one cleaning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningReport {
    pub removed_duplicates: usize,
    pub filled_missing: usize,
}

impl CleaningReport {
    /// Report lines as shown to the user.
    pub fn lines(&self) -> Vec<String> {
        vec![
            "Cleaning complete.".to_string(),
            format!("Removed duplicate rows: {}", self.removed_duplicates),
            format!("Filled missing numeric cells: {}", self.filled_missing),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_pads_and_truncates_rows() {
        let ds = Dataset::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![Row::from(vec!["1"]), Row::from(vec!["1", "2", "3", "4"])],
        );

        assert_eq!(ds.rows()[0].values(), &["1", "", ""]);
        assert_eq!(ds.rows()[1].values(), &["1", "2", "3"]);
    }

    #[test]
    fn test_value_by_column_name() {
        let ds = Dataset::new(
            vec!["Name".into(), "Age".into()],
            vec![Row::from(vec!["John", "20"])],
        );

        assert_eq!(ds.value(0, "Name"), Some("John"));
        assert_eq!(ds.value(0, "Age"), Some("20"));
        assert_eq!(ds.value(0, "Unknown"), None);
        assert_eq!(ds.value(1, "Name"), None);
    }

    #[test]
    fn test_classify_cells() {
        assert_eq!(Cell::classify(""), Cell::Missing);
        assert_eq!(Cell::classify("abc"), Cell::Text("abc".into()));
        assert_eq!(Cell::classify("42").as_number(), Some(42.0));
        assert_eq!(Cell::classify("-1.5").as_number(), Some(-1.5));
        assert_eq!(Cell::classify(".5").as_number(), Some(0.5));
        assert_eq!(Cell::classify("1e3").as_number(), Some(1000.0));
    }

    #[test]
    fn test_non_numeric_forms() {
        for value in ["NaN", "inf", "Infinity", "12abc", "1,5", "1e400", "-", ".", "0x10"] {
            assert!(!is_numeric(value), "{value} should not be numeric");
        }
    }

    #[test]
    fn test_number_keeps_original_text() {
        match Cell::classify("007") {
            Cell::Number { value, text } => {
                assert_eq!(value, 7.0);
                assert_eq!(text, "007");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_clean_options_deserialize_defaults() {
        let opts: CleanOptions = serde_json::from_str(r#"{"fillMissing": true}"#).unwrap();
        assert!(opts.fill_missing);
        assert!(!opts.remove_duplicates);
    }

    #[test]
    fn test_report_lines() {
        let report = CleaningReport {
            removed_duplicates: 2,
            filled_missing: 3,
        };
        let lines = report.lines();
        assert_eq!(lines[1], "Removed duplicate rows: 2");
        assert_eq!(lines[2], "Filled missing numeric cells: 3");
    }
}
