//! Plain-text clipboard format for cell blocks
//!
//! Cells are separated by tabs and rows by newlines, which is what other
//! spreadsheets put on the clipboard for a copied range. Cells holding a tab,
//! a line break or a quote are double-quoted so they paste back as one cell.

use crate::grid::ParseError;

/// Split clipboard text into a grid of cells
///
/// `\r\n` line endings are accepted and blank lines are skipped. Empty text
/// gives an empty grid.
pub fn parse_grid(text: &str) -> Result<Vec<Vec<String>>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut grid = Vec::new();
    for (line_num, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ParseError {
            message: e.to_string(),
            line: Some(line_num + 1),
        })?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Join a grid of cells into clipboard text, without a trailing newline
pub fn format_grid(grid: &[Vec<String>]) -> Result<String, ParseError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    for row in grid {
        writer.write_record(row).map_err(|e| ParseError {
            message: e.to_string(),
            line: None,
        })?;
    }

    let bytes = writer.into_inner().map_err(|e| ParseError {
        message: e.to_string(),
        line: None,
    })?;
    let mut text = String::from_utf8(bytes).map_err(|e| ParseError {
        message: e.to_string(),
        line: None,
    })?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
