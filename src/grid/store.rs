//! Grid storage
//!
//! Rows are kept as `Vec<Vec<String>>` with a parallel header list. Every row
//! always has exactly `column_count()` cells.
//!
//! Mutation is split in two tiers: the public API is read-only, and the
//! `*_raw` primitives are crate-private so that every change a user makes has
//! to go through a [`Command`](crate::history::Command).

use serde::Serialize;

/// Position of a cell in the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// In-memory cell and header storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridStore {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl GridStore {
    /// Create an empty 0×0 grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-load a grid from headers and rows
    ///
    /// Rows are padded or truncated to the header width. This is the only
    /// public way to populate a store without going through the history.
    pub fn from_table(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut store = Self {
            headers,
            rows: Vec::with_capacity(rows.len()),
        };
        for row in rows {
            store.add_row_raw(row);
        }
        store
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the grid has neither rows nor columns
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.headers.is_empty()
    }

    /// Header title of column `col`
    ///
    /// Panics if `col` is out of bounds.
    pub fn header(&self, col: usize) -> &str {
        self.check_col(col);
        &self.headers[col]
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Cell text at (`row`, `col`)
    ///
    /// Panics if the position is out of bounds. Use [`GridStore::get`] to check first.
    pub fn text(&self, row: usize, col: usize) -> &str {
        self.check_cell(row, col);
        &self.rows[row][col]
    }

    /// Cell text, or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
    }

    /// All cells of a row
    pub fn row(&self, row: usize) -> &[String] {
        self.check_row(row);
        &self.rows[row]
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Check that a position lies inside the grid
    pub fn contains(&self, pos: CellPosition) -> bool {
        pos.row < self.row_count() && pos.col < self.column_count()
    }

    // === Raw (untracked) mutation ===

    pub(crate) fn set_text_raw(&mut self, row: usize, col: usize, value: &str) {
        self.check_cell(row, col);
        value.clone_into(&mut self.rows[row][col]);
    }

    /// Append a column, backfilling an empty cell in every row
    pub(crate) fn add_column_raw(&mut self, title: &str) {
        let index = self.column_count();
        self.insert_column_raw(index, title);
    }

    pub(crate) fn insert_column_raw(&mut self, index: usize, title: &str) {
        assert!(
            index <= self.column_count(),
            "column insert index {} out of bounds (columns: {})",
            index,
            self.column_count()
        );
        self.headers.insert(index, title.to_string());
        for row in &mut self.rows {
            row.insert(index, String::new());
        }
    }

    pub(crate) fn remove_column_raw(&mut self, index: usize) {
        self.check_col(index);
        self.headers.remove(index);
        for row in &mut self.rows {
            row.remove(index);
        }
    }

    /// Append a row, padding or truncating `values` to the column count
    pub(crate) fn add_row_raw(&mut self, values: Vec<String>) {
        let index = self.row_count();
        self.insert_row_raw(index, values);
    }

    pub(crate) fn insert_row_raw(&mut self, index: usize, mut values: Vec<String>) {
        assert!(
            index <= self.row_count(),
            "row insert index {} out of bounds (rows: {})",
            index,
            self.row_count()
        );
        values.resize(self.column_count(), String::new());
        self.rows.insert(index, values);
    }

    pub(crate) fn remove_row_raw(&mut self, index: usize) {
        self.check_row(index);
        self.rows.remove(index);
    }

    /// Drop all rows and columns
    pub(crate) fn reset(&mut self) {
        self.headers.clear();
        self.rows.clear();
    }

    fn check_row(&self, row: usize) {
        assert!(
            row < self.row_count(),
            "row {} out of bounds (rows: {})",
            row,
            self.row_count()
        );
    }

    fn check_col(&self, col: usize) {
        assert!(
            col < self.column_count(),
            "column {} out of bounds (columns: {})",
            col,
            self.column_count()
        );
    }

    fn check_cell(&self, row: usize, col: usize) {
        self.check_row(row);
        self.check_col(col);
    }
}
