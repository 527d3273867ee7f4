//! Delimited text load/save using the csv crate
//!
//! RFC 4180 compliant parsing with support for quoted fields,
//! escaped quotes, and custom delimiters. The grid itself never sees the
//! delimiter; this module only converts between text and a [`Table`].

use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Supported delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    /// Get the character for this delimiter
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    fn byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Pipe => b'|',
            Delimiter::Semicolon => b';',
        }
    }

    /// Detect delimiter from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "tsv" => Delimiter::Tab,
            "psv" => Delimiter::Pipe,
            _ => Delimiter::Comma,
        }
    }

    /// Parse a user-supplied delimiter name or character
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "," | "comma" | "csv" => Some(Delimiter::Comma),
            "\t" | "\\t" | "tab" | "tsv" => Some(Delimiter::Tab),
            "|" | "pipe" | "psv" => Some(Delimiter::Pipe),
            ";" | "semicolon" => Some(Delimiter::Semicolon),
            _ => None,
        }
    }
}

/// Headers plus rows, as exchanged with the file codec
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Error type for delimited text parsing and writing
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: Option<usize>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "CSV parse error at line {}: {}", line, self.message),
            None => write!(f, "CSV parse error: {}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse delimited content into a [`Table`]
///
/// With `has_header`, the first record becomes the column headers and the
/// column count is its width. Otherwise headers are generated as spreadsheet
/// letters and the column count is the widest row.
pub fn parse_table(
    content: &str,
    delimiter: Delimiter,
    has_header: bool,
) -> Result<Table, ParseError> {
    let cursor = Cursor::new(content.as_bytes());

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.byte())
        .has_headers(false)
        .flexible(true)
        .from_reader(cursor);

    let mut rows: Vec<Vec<String>> = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
                rows.push(row);
            }
            Err(e) => {
                return Err(ParseError {
                    message: e.to_string(),
                    line: Some(line_num + 1),
                });
            }
        }
    }

    let headers = if has_header && !rows.is_empty() {
        rows.remove(0)
    } else {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        (0..width).map(column_letter).collect()
    };

    let width = headers.len();
    for row in &mut rows {
        row.resize(width, String::new());
    }

    Ok(Table { headers, rows })
}

/// Serialize a [`Table`] back to delimited text
pub fn write_table(
    table: &Table,
    delimiter: Delimiter,
    has_header: bool,
) -> Result<String, ParseError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter.byte())
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    let records = has_header
        .then_some(&table.headers)
        .into_iter()
        .chain(table.rows.iter());

    for (line_num, record) in records.enumerate() {
        writer.write_record(record).map_err(|e| ParseError {
            message: e.to_string(),
            line: Some(line_num + 1),
        })?;
    }

    let bytes = writer.into_inner().map_err(|e| ParseError {
        message: e.to_string(),
        line: None,
    })?;

    String::from_utf8(bytes).map_err(|e| ParseError {
        message: e.to_string(),
        line: None,
    })
}

/// Detect delimiter by analyzing first few lines
pub fn detect_delimiter(content: &str) -> Delimiter {
    let first_lines: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

    let comma_count = first_lines.matches(',').count();
    let tab_count = first_lines.matches('\t').count();
    let pipe_count = first_lines.matches('|').count();
    let semi_count = first_lines.matches(';').count();

    let max = comma_count.max(tab_count).max(pipe_count).max(semi_count);

    if max == 0 {
        return Delimiter::Comma;
    }

    if tab_count == max {
        Delimiter::Tab
    } else if pipe_count == max {
        Delimiter::Pipe
    } else if semi_count == max {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}

/// Spreadsheet-style column name: 0 → "A", 25 → "Z", 26 → "AA"
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
