//! Plain-text grid rendering
//!
//! Renders the grid as an aligned table with:
//! - Row numbers column
//! - Column letters (A, B, C, ...) above the header titles
//! - Numbers right-aligned, text left-aligned
//! - `>` marking the row of the current cell

use crate::grid::{column_letter, CellPosition};
use crate::history::CellRange;
use crate::table::TableController;

const MIN_WIDTH: usize = 4;
const MAX_WIDTH: usize = 40;

/// Check if a string looks like a number (for right-alignment)
pub fn is_number(s: &str) -> bool {
    !s.is_empty() && s.parse::<f64>().is_ok()
}

/// Truncate text with ellipsis if too long
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('…');
        result
    }
}

/// Display text for a cell; embedded tabs and newlines would break the layout
fn display_text(s: &str) -> String {
    s.replace('\t', "\\t").replace('\n', "\\n")
}

fn column_widths(table: &TableController) -> Vec<usize> {
    let store = table.store();
    (0..store.column_count())
        .map(|col| {
            let letter = column_letter(col).chars().count();
            let header = display_text(store.header(col)).chars().count();
            let widest = (0..store.row_count())
                .map(|row| display_text(store.text(row, col)).chars().count())
                .max()
                .unwrap_or(0);
            letter.max(header).max(widest).clamp(MIN_WIDTH, MAX_WIDTH)
        })
        .collect()
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    let text = truncate_text(&display_text(text), width);
    if right_align {
        format!("{:>width$}", text, width = width)
    } else {
        format!("{:<width$}", text, width = width)
    }
}

/// Format a range as `A1` or `A1:C4`
pub fn format_range(range: &CellRange) -> String {
    let start = format_cell(range.top_left());
    if range.row_count() == 1 && range.column_count() == 1 {
        start
    } else {
        format!(
            "{}:{}",
            start,
            format_cell(CellPosition::new(range.bottom, range.right))
        )
    }
}

/// Format a position as `B3`
pub fn format_cell(pos: CellPosition) -> String {
    format!("{}{}", column_letter(pos.col), pos.row + 1)
}

/// Render the whole grid, followed by a selection line
pub fn render_grid(table: &TableController) -> String {
    let store = table.store();
    if store.column_count() == 0 {
        return "(empty grid)\n".to_string();
    }

    let widths = column_widths(table);
    let row_digits = store.row_count().max(1).to_string().len().max(3);
    let current_row = table.selection().current().row;

    let mut out = String::new();
    let gutter = " ".repeat(row_digits + 2);

    out.push_str(&gutter);
    for (col, width) in widths.iter().enumerate() {
        out.push_str(&pad(&column_letter(col), *width, false));
        out.push_str("  ");
    }
    out.truncate(out.trim_end().len());
    out.push('\n');

    out.push_str(&gutter);
    for (col, width) in widths.iter().enumerate() {
        out.push_str(&pad(store.header(col), *width, false));
        out.push_str("  ");
    }
    out.truncate(out.trim_end().len());
    out.push('\n');

    for row in 0..store.row_count() {
        let marker = if row == current_row { '>' } else { ' ' };
        let mut line = format!("{}{:>digits$} ", marker, row + 1, digits = row_digits);
        for (col, width) in widths.iter().enumerate() {
            let text = store.text(row, col);
            line.push_str(&pad(text, *width, is_number(text)));
            line.push_str("  ");
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let selection = table
        .selection()
        .ranges()
        .iter()
        .map(format_range)
        .collect::<Vec<_>>();
    let selection = if selection.is_empty() {
        format_cell(table.selection().current())
    } else {
        selection.join(", ")
    };
    out.push_str(&format!(
        "{} rows x {} columns, selection {}\n",
        store.row_count(),
        store.column_count(),
        selection
    ));
    out
}
