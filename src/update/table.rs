//! Grid editing message handlers

use crate::clipboard::{format_grid, parse_grid};
use crate::commands::Cmd;
use crate::grid::{column_letter, CellPosition};
use crate::messages::TableMsg;
use crate::model::AppModel;
use crate::render::{format_cell, format_range};
use crate::table::ColumnInit;

/// Report a rejected message without touching the grid
fn reject(model: &mut AppModel, message: String) -> Option<Cmd> {
    tracing::warn!("{}", message);
    model.set_status(format!("Error: {}", message));
    None
}

fn out_of_bounds(model: &AppModel, pos: CellPosition) -> Option<String> {
    if model.table.store().contains(pos) {
        None
    } else {
        Some(format!(
            "{} is outside the grid ({} rows x {} columns)",
            format_cell(pos),
            model.table.row_count(),
            model.table.column_count()
        ))
    }
}

/// Handle grid editing messages
pub fn update_table(model: &mut AppModel, msg: TableMsg) -> Option<Cmd> {
    match msg {
        TableMsg::SetCell { pos, value } => {
            if let Some(err) = out_of_bounds(model, pos) {
                return reject(model, err);
            }
            model.table.set_text(pos.row, pos.col, &value);
            None
        }

        TableMsg::Select { anchor, head } => {
            if let Some(err) = out_of_bounds(model, anchor).or_else(|| out_of_bounds(model, head))
            {
                return reject(model, err);
            }
            model.table.select_range(anchor, head);
            None
        }

        TableMsg::AddColumn { title, init } => {
            if let ColumnInit::Duplicate(src) = init {
                if src >= model.table.column_count() {
                    return reject(model, format!("no column {} to copy", column_letter(src)));
                }
            }
            let col = model.table.add_column_with(&title, init);
            model.set_status(format!("Added column {} \"{}\"", column_letter(col), title));
            None
        }

        TableMsg::AddRow(values) => {
            if model.table.column_count() == 0 {
                return reject(model, "add a column before adding rows".to_string());
            }
            let row = model.table.add_row(values);
            model.set_status(format!("Added row {}", row + 1));
            None
        }

        TableMsg::Copy => {
            let grid = model.table.copy();
            if grid.is_empty() {
                model.set_status("Nothing to copy");
                return None;
            }
            let text = match format_grid(&grid) {
                Ok(text) => text,
                Err(e) => return reject(model, e.to_string()),
            };
            model.clipboard = Some(text.clone());
            model.set_status(format!(
                "Copied {}",
                format_range(&model.table.selection().primary_range())
            ));
            Some(Cmd::SetClipboard(text))
        }

        TableMsg::Cut => {
            let range = model.table.selection().primary_range();
            let grid = model.table.copy();
            if grid.is_empty() {
                model.set_status("Nothing to cut");
                return None;
            }
            // Format before clearing so a failure leaves the grid untouched
            let text = match format_grid(&grid) {
                Ok(text) => text,
                Err(e) => return reject(model, e.to_string()),
            };
            model.table.cut();
            model.clipboard = Some(text.clone());
            model.set_status(format!("Cut {}", format_range(&range)));
            Some(Cmd::SetClipboard(text))
        }

        TableMsg::Paste(None) => Some(Cmd::ReadClipboard),

        TableMsg::Paste(Some(text)) => {
            let grid = match parse_grid(&text) {
                Ok(grid) => grid,
                Err(e) => return reject(model, e.to_string()),
            };
            if grid.is_empty() {
                model.set_status("Clipboard is empty");
                return None;
            }
            if model.table.column_count() == 0 || model.table.row_count() == 0 {
                return reject(model, "nothing to paste into".to_string());
            }
            model.table.paste(&grid);
            model.set_status(format!(
                "Pasted into {}",
                format_range(&model.table.selection().primary_range())
            ));
            None
        }

        TableMsg::Clear => {
            model.table.clear();
            None
        }

        TableMsg::Begin(name) => {
            model.table.begin_transaction(&name);
            None
        }

        TableMsg::Commit => {
            if !model.table.history().is_open() {
                return reject(model, "no open transaction".to_string());
            }
            model.table.commit_transaction();
            None
        }

        TableMsg::Undo => {
            let name = model.table.history().undo_name().map(str::to_string);
            if model.table.undo() {
                model.set_status(format!("Undo {}", name.unwrap_or_default()));
            } else if model.table.history().is_open() {
                model.set_status("Cannot undo while a transaction is open");
            } else {
                model.set_status("Nothing to undo");
            }
            None
        }

        TableMsg::Redo => {
            let name = model.table.history().redo_name().map(str::to_string);
            if model.table.redo() {
                model.set_status(format!("Redo {}", name.unwrap_or_default()));
            } else if model.table.history().is_open() {
                model.set_status("Cannot redo while a transaction is open");
            } else {
                model.set_status("Nothing to redo");
            }
            None
        }
    }
}
