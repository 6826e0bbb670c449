//! CSV text to [`Dataset`] parser with charset auto-detection.
//!
//! The dialect is deliberately plain: lines split on `\n`, fields split on
//! `,`, no quoted fields. Every value is kept as text.

use std::collections::HashSet;
use std::path::Path;

use crate::error::CsvResult;
use crate::models::{Dataset, Row};

/// Result of parsing raw bytes, with metadata.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed dataset
    pub dataset: Dataset,
    /// Charset used to decode the bytes
    pub encoding: String,
    /// Duplicate header names that were renamed, as `(original, renamed)`
    pub renamed_headers: Vec<(String, String)>,
}

/// Detect the charset of raw bytes.
///
/// Valid UTF-8 wins outright; anything else is left to chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes with the given charset.
///
/// Invalid UTF-8 and unknown charsets fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        },
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        label => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    }
}

/// Parse CSV text into a dataset.
///
/// # Example
/// ```
/// use csvtidy::parse;
///
/// let ds = parse("Name,Age\nJohn,20\n");
/// assert_eq!(ds.headers(), &["Name", "Age"]);
/// assert_eq!(ds.value(0, "Age"), Some("20"));
/// ```
pub fn parse(text: &str) -> Dataset {
    parse_with_renames(text).0
}

/// Parse CSV text, also returning renamed duplicate headers.
pub fn parse_with_renames(text: &str) -> (Dataset, Vec<(String, String)>) {
    let content = text.trim_start_matches('\u{feff}').trim();
    if content.is_empty() {
        return (Dataset::empty(), Vec::new());
    }

    let mut lines = content.split('\n');

    let header_line = lines.next().unwrap_or("");
    let raw_headers: Vec<String> = header_line
        .split(',')
        .map(|s| s.trim().to_string())
        .collect();
    let (headers, renamed) = unique_headers(raw_headers);

    let rows: Vec<Row> = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let values: Vec<&str> = line.split(',').collect();
            let cells = (0..headers.len())
                .map(|i| values.get(i).map(|v| v.trim()).unwrap_or("").to_string())
                .collect();
            Row::new(cells)
        })
        .collect();

    (Dataset::new(headers, rows), renamed)
}

/// Make header names unique by suffixing later duplicates with `_2`, `_3`, ...
fn unique_headers(raw: Vec<String>) -> (Vec<String>, Vec<(String, String)>) {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut renamed = Vec::new();
    let mut headers = Vec::with_capacity(raw.len());

    for name in raw {
        if seen.insert(name.clone()) {
            headers.push(name);
            continue;
        }

        let mut n = 2;
        let candidate = loop {
            let candidate = format!("{}_{}", name, n);
            if !seen.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        seen.insert(candidate.clone());
        renamed.push((name, candidate.clone()));
        headers.push(candidate);
    }

    (headers, renamed)
}

/// Parse CSV bytes with charset auto-detection.
pub fn parse_bytes(bytes: &[u8]) -> ParseResult {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let (dataset, renamed_headers) = parse_with_renames(&content);

    ParseResult {
        dataset,
        encoding,
        renamed_headers,
    }
}

/// Read and parse a CSV file from disk.
pub fn parse_file<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    Ok(parse_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_simple_csv() {
        let ds = parse("name,age\nAlice,30\nBob,25");

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.value(0, "name"), Some("Alice"));
        assert_eq!(ds.value(0, "age"), Some("30"));
        assert_eq!(ds.value(1, "name"), Some("Bob"));
        assert_eq!(ds.value(1, "age"), Some("25"));
    }

    #[test]
    fn test_fields_and_headers_trimmed() {
        let ds = parse("  name , age \n Alice ,  30 \r\n");

        assert_eq!(ds.headers(), &["name", "age"]);
        assert_eq!(ds.rows()[0].values(), &["Alice", "30"]);
    }

    #[test]
    fn test_empty_lines_skipped() {
        let ds = parse("a,b\n1,2\n\n   \n3,4\n");
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_missing_values() {
        let ds = parse("a,b,c\n1,,3\n1");

        assert_eq!(ds.rows()[0].values(), &["1", "", "3"]);
        assert_eq!(ds.rows()[1].values(), &["1", "", ""]);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let ds = parse("a,b\n1,2,3,4");
        assert_eq!(ds.rows()[0].values(), &["1", "2"]);
    }

    #[test]
    fn test_quotes_are_not_special() {
        let ds = parse("name,title\nJohn,\"Doe, Jr.\"");
        assert_eq!(ds.rows()[0].values(), &["John", "\"Doe"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("  \n\n \t ").is_empty());
        assert_eq!(parse("").column_count(), 0);
    }

    #[test]
    fn test_header_only() {
        let ds = parse("a,b\n");
        assert!(ds.is_empty());
        assert_eq!(ds.headers(), &["a", "b"]);
    }

    #[test]
    fn test_bom_is_stripped() {
        let ds = parse("\u{feff}id,v\n1,2");
        assert_eq!(ds.headers(), &["id", "v"]);
    }

    #[test]
    fn test_duplicate_headers_renamed() {
        let (ds, renamed) = parse_with_renames("a,b,a,a_2,a\n1,2,3,4,5");

        assert_eq!(ds.headers(), &["a", "b", "a_2", "a_2_2", "a_3"]);
        assert_eq!(ds.value(0, "a"), Some("1"));
        assert_eq!(ds.value(0, "a_2"), Some("3"));
        assert_eq!(ds.value(0, "a_3"), Some("5"));
        assert_eq!(renamed.len(), 3);
        assert_eq!(renamed[0], ("a".to_string(), "a_2".to_string()));
    }

    #[test]
    fn test_parse_bytes_utf8() {
        let result = parse_bytes("name,city\nZoé,Paris".as_bytes());

        assert_eq!(result.encoding, "utf-8");
        assert_eq!(result.dataset.value(0, "name"), Some("Zoé"));
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let decoded = decode_content(&[b'a', 0xFF, b'b'], "utf-8");
        assert!(decoded.starts_with('a'));
        assert!(decoded.ends_with('b'));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "x,y\n1,2\n3,4\n").unwrap();

        let result = parse_file(file.path()).unwrap();
        assert_eq!(result.dataset.len(), 2);
        assert_eq!(result.dataset.headers(), &["x", "y"]);
    }

    #[test]
    fn test_parse_missing_file() {
        assert!(parse_file("/definitely/not/here.csv").is_err());
    }
}
