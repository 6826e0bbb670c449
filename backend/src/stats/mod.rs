//! Summary statistics and preview for a dataset.

use std::collections::HashSet;

use crate::models::{is_missing, Dataset, Preview, PreviewCell, Row, Stats};

/// Number of rows shown in a preview.
pub const PREVIEW_ROWS: usize = 10;

/// Compute row, column, missing and duplicate counts.
///
/// Two rows are duplicates when every value matches.
pub fn compute_stats(dataset: &Dataset) -> Stats {
    let row_count = dataset.len();

    let missing_count = dataset
        .rows()
        .iter()
        .flat_map(|row| row.values())
        .filter(|v| is_missing(v))
        .count();

    Stats {
        row_count,
        col_count: dataset.column_count(),
        missing_count,
        duplicate_count: row_count - distinct_rows(dataset.rows()),
    }
}

/// Number of distinct rows by full content.
pub fn distinct_rows(rows: &[Row]) -> usize {
    rows.iter().collect::<HashSet<&Row>>().len()
}

/// First [`PREVIEW_ROWS`] rows with per-cell missing flags.
pub fn preview(dataset: &Dataset) -> Preview {
    preview_rows(dataset, PREVIEW_ROWS)
}

/// First `limit` rows with per-cell missing flags.
pub fn preview_rows(dataset: &Dataset, limit: usize) -> Preview {
    let rows = dataset
        .rows()
        .iter()
        .take(limit)
        .map(|row| {
            row.values()
                .iter()
                .map(|value| PreviewCell {
                    value: value.clone(),
                    missing: is_missing(value),
                })
                .collect()
        })
        .collect();

    Preview {
        columns: dataset.headers().to_vec(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_scenario_stats() {
        let ds = parse("Name,Age\nJohn,20\nJane,\nJohn,20\n");
        let stats = compute_stats(&ds);

        assert_eq!(
            stats,
            Stats {
                row_count: 3,
                col_count: 2,
                missing_count: 1,
                duplicate_count: 1,
            }
        );
    }

    #[test]
    fn test_triplicate_counts_twice() {
        let ds = parse("a\nx\nx\nx\ny");
        assert_eq!(compute_stats(&ds).duplicate_count, 2);
    }

    #[test]
    fn test_stats_are_idempotent() {
        let ds = parse("a,b\n1,\n1,\n,2\n");
        assert_eq!(compute_stats(&ds), compute_stats(&ds));
    }

    #[test]
    fn test_empty_dataset_zeroed() {
        let stats = compute_stats(&Dataset::empty());
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn test_preview_limits_rows_and_flags_missing() {
        let mut text = String::from("id,v\n");
        for i in 0..15 {
            let v = if i % 2 == 0 { "x" } else { "" };
            text.push_str(&format!("{},{}\n", i, v));
        }
        let ds = parse(&text);
        let p = preview(&ds);

        assert_eq!(p.columns, vec!["id", "v"]);
        assert_eq!(p.rows.len(), PREVIEW_ROWS);
        assert!(!p.rows[0][1].missing);
        assert!(p.rows[1][1].missing);
        assert_eq!(p.rows[9][0].value, "9");
    }

    #[test]
    fn test_preview_short_dataset() {
        let ds = parse("a\n1\n2");
        assert_eq!(preview_rows(&ds, 5).rows.len(), 2);
    }
}
