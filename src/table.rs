//! Table controller
//!
//! Combines the grid, its selection and the transaction manager behind one
//! API. All public edits go through transactions, so every multi-cell
//! operation undoes in a single step.

use std::ops::{Deref, DerefMut};

use crate::grid::{CellPosition, GridStore, Table};
use crate::history::{CellRange, Command, GridSelection, HistoryEvent, TransactionManager};

/// How a newly added column is filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnInit {
    #[default]
    Empty,
    /// Copy every cell of the given source column
    Duplicate(usize),
}

#[derive(Debug, Clone, Default)]
pub struct TableController {
    store: GridStore,
    selection: GridSelection,
    history: TransactionManager,
}

impl TableController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller over an already loaded grid, with empty history
    pub fn from_table(table: Table) -> Self {
        let mut controller = Self::new();
        controller.load(table);
        controller
    }

    // === Read access ===

    pub fn store(&self) -> &GridStore {
        &self.store
    }

    pub fn selection(&self) -> &GridSelection {
        &self.selection
    }

    pub fn history(&self) -> &TransactionManager {
        &self.history
    }

    pub fn column_count(&self) -> usize {
        self.store.column_count()
    }

    pub fn row_count(&self) -> usize {
        self.store.row_count()
    }

    pub fn header(&self, col: usize) -> &str {
        self.store.header(col)
    }

    pub fn text(&self, row: usize, col: usize) -> &str {
        self.store.text(row, col)
    }

    /// Headers and rows for the save routine
    pub fn to_table(&self) -> Table {
        Table {
            headers: self.store.headers().to_vec(),
            rows: self.store.rows().to_vec(),
        }
    }

    // === Document lifecycle ===

    /// Replace the whole grid. History is cleared and no event is emitted.
    pub fn load(&mut self, table: Table) {
        self.store = GridStore::from_table(table.headers, table.rows);
        self.history.clear();
        self.history.drain_events();
        self.selection.clear();
        tracing::debug!(
            "Loaded grid {}x{}",
            self.store.row_count(),
            self.store.column_count()
        );
    }

    /// Drop all rows and columns and forget history
    pub fn reset(&mut self) {
        self.store.reset();
        self.history.clear();
        self.history.drain_events();
        self.selection.clear();
    }

    // === Transactions ===

    pub fn begin_transaction(&mut self, name: &str) {
        self.history.begin(name, &self.selection);
    }

    pub fn commit_transaction(&mut self) {
        self.history.commit(&self.selection);
    }

    /// Close every open transaction, returning how many were open
    pub fn commit_all(&mut self) -> usize {
        let open = self.history.depth();
        while self.history.is_open() {
            self.commit_transaction();
        }
        open
    }

    /// Open a transaction that commits when the returned guard is dropped
    ///
    /// The guard derefs to the controller, so edits made through it land in
    /// the same history entry even on early return or unwinding.
    pub fn transaction(&mut self, name: &str) -> Transaction<'_> {
        self.begin_transaction(name);
        Transaction { controller: self }
    }

    /// Run `f` inside a named transaction
    pub fn with_transaction<R>(&mut self, name: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        let mut tx = self.transaction(name);
        f(&mut tx)
    }

    /// Apply a command, wrapping it in its own transaction if none is open
    pub fn add_command(&mut self, cmd: Command) {
        self.history
            .add_command(cmd, &mut self.store, &self.selection);
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.store, &mut self.selection);
        if undone {
            self.clamp_selection();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.store, &mut self.selection);
        if redone {
            self.clamp_selection();
        }
        redone
    }

    pub fn history_length(&self) -> usize {
        self.history.len()
    }

    pub fn cursor(&self) -> usize {
        self.history.cursor()
    }

    pub fn drain_events(&mut self) -> Vec<HistoryEvent> {
        self.history.drain_events()
    }

    // === Selection ===

    pub fn select_cell(&mut self, row: usize, col: usize) {
        self.selection.select_cell(CellPosition::new(row, col));
    }

    pub fn select_range(&mut self, anchor: CellPosition, head: CellPosition) {
        self.selection.select_range(anchor, head);
    }

    fn clamp_selection(&mut self) {
        self.selection
            .clamp_to(self.store.row_count(), self.store.column_count());
    }

    // === Edits ===

    /// Set one cell; writing the value it already holds records nothing
    pub fn set_text(&mut self, row: usize, col: usize, value: &str) {
        let cmd = Command::set_cell(&self.store, row, col, value);
        if cmd.is_noop() {
            return;
        }
        self.add_command(cmd);
    }

    /// Append an empty column and return its index
    pub fn add_column(&mut self, title: &str) -> usize {
        let cmd = Command::add_column(&self.store, title);
        let index = self.store.column_count();
        self.add_command(cmd);
        index
    }

    /// Append a column initialized per `init`, as one "Add Column" transaction
    ///
    /// Panics if a duplicate source column is out of bounds.
    pub fn add_column_with(&mut self, title: &str, init: ColumnInit) -> usize {
        let mut tx = self.transaction("Add Column");
        let col = tx.add_column(title);

        if let ColumnInit::Duplicate(src) = init {
            for row in 0..tx.row_count() {
                let value = tx.text(row, src).to_string();
                tx.set_text(row, col, &value);
            }
        }

        col
    }

    /// Append a row and return its index
    pub fn add_row(&mut self, values: Vec<String>) -> usize {
        let cmd = Command::add_row(&self.store, values);
        let index = self.store.row_count();
        self.add_command(cmd);
        index
    }

    /// Selected range clipped to the grid, if any of it lies inside
    fn selected_range(&self) -> Option<CellRange> {
        self.selection
            .primary_range()
            .clamped(self.store.row_count(), self.store.column_count())
    }

    /// Text of the primary selected range, row by row
    pub fn copy(&self) -> Vec<Vec<String>> {
        let Some(range) = self.selected_range() else {
            return Vec::new();
        };

        (range.top..=range.bottom)
            .map(|row| {
                (range.left..=range.right)
                    .map(|col| self.store.text(row, col).to_string())
                    .collect()
            })
            .collect()
    }

    /// Empty every selected cell in one "Clear" transaction
    pub fn clear(&mut self) {
        let mut tx = self.transaction("Clear");
        tx.clear_selected();
    }

    /// Copy the selection, then clear it, in one "Cut" transaction
    pub fn cut(&mut self) -> Vec<Vec<String>> {
        let copied = self.copy();
        let mut tx = self.transaction("Cut");
        tx.clear_selected();
        copied
    }

    fn clear_selected(&mut self) {
        let Some(range) = self.selected_range() else {
            return;
        };
        for pos in range.positions() {
            self.set_text(pos.row, pos.col, "");
        }
    }

    /// Paste a rectangular block of text over the selection
    ///
    /// The destination starts at the selection's top-left corner and covers at
    /// least the source size; a smaller source is tiled across a larger
    /// selection. Cells past the grid edge are dropped. The whole paste is one
    /// "Paste" transaction.
    pub fn paste(&mut self, source: &[Vec<String>]) {
        let source_rows = source.len();
        let source_cols = source.iter().map(|r| r.len()).max().unwrap_or(0);
        if source_rows == 0 || source_cols == 0 {
            return;
        }

        let selected = self.selection.primary_range();
        let bottom = selected.bottom.max(selected.top + source_rows - 1);
        let right = selected.right.max(selected.left + source_cols - 1);
        let Some(dest) = CellRange::new(selected.top_left(), CellPosition::new(bottom, right))
            .clamped(self.store.row_count(), self.store.column_count())
        else {
            return;
        };

        let mut tx = self.transaction("Paste");
        for pos in dest.positions() {
            let dr = (pos.row - dest.top) % source_rows;
            let dc = (pos.col - dest.left) % source_cols;
            let value = source[dr].get(dc).map(|s| s.as_str()).unwrap_or("");
            tx.set_text(pos.row, pos.col, value);
        }
        tx.select_range(dest.top_left(), CellPosition::new(dest.bottom, dest.right));
    }
}

/// Open transaction on a [`TableController`]; commits on drop
pub struct Transaction<'a> {
    controller: &'a mut TableController,
}

impl Deref for Transaction<'_> {
    type Target = TableController;

    fn deref(&self) -> &Self::Target {
        &*self.controller
    }
}

impl DerefMut for Transaction<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.controller
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        self.controller.commit_transaction();
    }
}
