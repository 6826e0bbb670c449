//! Cleaning engine: duplicate removal and missing-value imputation.
//!
//! ```text
//! raw ──copy──▶ remove_duplicates? ──▶ fill_missing? ──▶ cleaned + report
//! ```
//!
//! Cleaning always starts from the raw dataset, so running it twice with
//! different options never stacks.

use std::collections::HashSet;

use crate::models::{Cell, CleanOptions, CleaningReport, Dataset, Row};

/// Cleaned dataset plus what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOutcome {
    pub dataset: Dataset,
    pub report: CleaningReport,
}

/// Run the selected cleaning steps on a copy of `raw`.
pub fn clean(raw: &Dataset, options: CleanOptions) -> CleanOutcome {
    let mut dataset = raw.clone();
    let mut report = CleaningReport::default();

    if options.remove_duplicates {
        report.removed_duplicates = remove_duplicates(&mut dataset);
    }

    if options.fill_missing {
        report.filled_missing = fill_missing(&mut dataset);
    }

    CleanOutcome { dataset, report }
}

/// Keep the first occurrence of every distinct row, preserving order.
///
/// Returns the number of rows dropped.
pub fn remove_duplicates(dataset: &mut Dataset) -> usize {
    let rows = dataset.rows_mut();
    let before = rows.len();

    let mut seen: HashSet<Row> = HashSet::with_capacity(before);
    rows.retain(|row| seen.insert(row.clone()));

    before - rows.len()
}

/// Fill missing cells of every column that holds at least one number with
/// that column's mean, written with two decimals.
///
/// Text values are left alone and do not count towards the mean. Returns the
/// number of cells filled.
pub fn fill_missing(dataset: &mut Dataset) -> usize {
    let mut filled = 0;

    for col in 0..dataset.column_count() {
        let cells: Vec<Cell> = dataset.column(col).map(Cell::classify).collect();

        let Some(avg) = mean(cells.iter().filter_map(Cell::as_number)) else {
            continue;
        };
        let replacement = format_mean(avg);

        for (row, cell) in dataset.rows_mut().iter_mut().zip(&cells) {
            if cell.is_missing() {
                row.set(col, replacement.clone());
                filled += 1;
            }
        }
    }

    filled
}

/// Arithmetic mean summed left to right; `None` when there are no values.
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0_f64, 0_usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Digits after the point needed to print any `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Two-decimal text form of an imputed mean.
///
/// Rounds the exact decimal value of `value` half away from zero, so a tie
/// such as `1.125` becomes `1.13`, while `1.005` (stored just below) stays
/// `1.00`. The sign is kept even when the rounded magnitude is zero.
pub fn format_mean(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let frac = frac.as_bytes();

    let mut digits: Vec<u8> = int_part.bytes().collect();
    digits.extend((0..2).map(|i| frac.get(i).copied().unwrap_or(b'0')));
    if frac.get(2).is_some_and(|d| *d >= b'5') {
        increment(&mut digits);
    }

    let (whole, cents) = digits.split_at(digits.len() - 2);
    format!(
        "{}{}.{}",
        sign,
        String::from_utf8_lossy(whole),
        String::from_utf8_lossy(cents)
    )
}

/// Add one to a string of ASCII decimal digits.
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
