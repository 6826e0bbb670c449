//! Upload checks run before any parsing.
//!
//! Only the file name suffix and size are checked; the content itself is
//! never rejected here.

use crate::error::{SessionError, SessionResult};

/// Accepted file suffix, compared case-insensitively.
pub const CSV_EXTENSION: &str = ".csv";

/// True when `file_name` ends in `.csv`, ignoring case.
pub fn is_csv_file_name(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(CSV_EXTENSION)
}

/// Reject anything not named `*.csv`.
pub fn validate_file_name(file_name: &str) -> SessionResult<()> {
    if is_csv_file_name(file_name) {
        Ok(())
    } else {
        Err(SessionError::InvalidFileType(file_name.to_string()))
    }
}

/// Reject uploads larger than `max` bytes.
pub fn validate_size(size: usize, max: usize) -> SessionResult<()> {
    if size > max {
        Err(SessionError::TooLarge { size, max })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_names() {
        assert!(is_csv_file_name("data.csv"));
        assert!(is_csv_file_name("DATA.CSV"));
        assert!(is_csv_file_name("report.final.Csv"));
    }

    #[test]
    fn test_non_csv_names() {
        assert!(!is_csv_file_name("data.xlsx"));
        assert!(!is_csv_file_name("data.csv.txt"));
        assert!(!is_csv_file_name("csv"));
        assert!(!is_csv_file_name(""));
    }

    #[test]
    fn test_validate_file_name_error() {
        let err = validate_file_name("notes.txt").unwrap_err();
        assert!(matches!(err, SessionError::InvalidFileType(ref n) if n == "notes.txt"));
    }

    #[test]
    fn test_validate_size() {
        assert!(validate_size(10, 10).is_ok());
        assert!(matches!(
            validate_size(11, 10),
            Err(SessionError::TooLarge { size: 11, max: 10 })
        ));
    }
}
