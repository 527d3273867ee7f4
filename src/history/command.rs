//! Reversible grid mutations.

use serde::Serialize;

use crate::grid::GridStore;

/// A single reversible change to a [`GridStore`]
///
/// Every variant carries the state it needs to undo itself, captured when the
/// command is built. Commands address cells by coordinate only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    SetCell {
        row: usize,
        col: usize,
        old_value: String,
        new_value: String,
    },
    /// Insert a column at `index`; undo removes that same column
    AddColumn { index: usize, title: String },
    /// Insert a row at `index`; `values` already match the column count
    AddRow { index: usize, values: Vec<String> },
}

impl Command {
    /// Set one cell, capturing its current text as the undo value
    pub fn set_cell(store: &GridStore, row: usize, col: usize, new_value: impl Into<String>) -> Self {
        Command::SetCell {
            row,
            col,
            old_value: store.text(row, col).to_string(),
            new_value: new_value.into(),
        }
    }

    /// Append a column after the current last one
    pub fn add_column(store: &GridStore, title: impl Into<String>) -> Self {
        Command::AddColumn {
            index: store.column_count(),
            title: title.into(),
        }
    }

    /// Append a row; `values` are padded or truncated to the column count
    pub fn add_row(store: &GridStore, mut values: Vec<String>) -> Self {
        values.resize(store.column_count(), String::new());
        Command::AddRow {
            index: store.row_count(),
            values,
        }
    }

    pub fn redo(&self, store: &mut GridStore) {
        match self {
            Command::SetCell {
                row,
                col,
                new_value,
                ..
            } => store.set_text_raw(*row, *col, new_value),
            Command::AddColumn { index, title } if *index == store.column_count() => {
                store.add_column_raw(title)
            }
            Command::AddColumn { index, title } => store.insert_column_raw(*index, title),
            Command::AddRow { index, values } => store.insert_row_raw(*index, values.clone()),
        }
    }

    pub fn undo(&self, store: &mut GridStore) {
        match self {
            Command::SetCell {
                row,
                col,
                old_value,
                ..
            } => store.set_text_raw(*row, *col, old_value),
            Command::AddColumn { index, .. } => store.remove_column_raw(*index),
            Command::AddRow { index, .. } => store.remove_row_raw(*index),
        }
    }

    /// True for a cell write that would not change anything
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            Command::SetCell { old_value, new_value, .. } if old_value == new_value
        )
    }

    /// Short label for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetCell { .. } => "set_cell",
            Command::AddColumn { .. } => "add_column",
            Command::AddRow { .. } => "add_row",
        }
    }
}
