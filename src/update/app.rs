//! App message handlers (file operations, output, lifecycle)

use std::path::PathBuf;

use serde::Serialize;

use crate::commands::Cmd;
use crate::grid::{parse_table, write_table};
use crate::history::{Command, SelectionSnapshot};
use crate::messages::{AppMsg, HELP};
use crate::model::{AppModel, Document};
use crate::render::{format_cell, render_grid};

/// One history entry in the `history --json` dump
#[derive(Debug, Serialize)]
struct HistoryEntry<'a> {
    index: usize,
    name: &'a str,
    applied: bool,
    commands: &'a [Command],
    selection_before: &'a SelectionSnapshot,
    selection_after: &'a SelectionSnapshot,
}

#[derive(Debug, Serialize)]
struct HistoryDump<'a> {
    cursor: usize,
    open_transactions: usize,
    entries: Vec<HistoryEntry<'a>>,
}

/// Handle app messages (file operations, output, lifecycle)
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::NewFile => {
            model.table.reset();
            model.document = Document::new(model.document.delimiter, model.document.has_header_row);
            model.set_status("New file");
            None
        }

        AppMsg::OpenFile(path) => {
            let path = model.preferences.resolve(&path);
            Some(Cmd::LoadFile { path })
        }

        AppMsg::FileLoaded { path, result } => match result {
            Ok(content) => file_loaded(model, path, &content),
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", path.display(), e);
                model.set_status(format!("Error: {}", e));
                None
            }
        },

        AppMsg::SaveFile(path) => {
            if model.table.history().is_open() {
                model.set_status("Cannot save while a transaction is open");
                return None;
            }
            let path = match path {
                Some(path) => model.preferences.resolve(&path),
                None => match model.document.file_path.clone() {
                    Some(path) => path,
                    None => {
                        model.set_status("No file path - use 'save PATH'");
                        return None;
                    }
                },
            };

            let delimiter = model.delimiter_for(&path, None);
            match write_table(
                &model.table.to_table(),
                delimiter,
                model.document.has_header_row,
            ) {
                Ok(content) => {
                    model.document.delimiter = delimiter;
                    Some(Cmd::SaveFile { path, content })
                }
                Err(e) => {
                    model.set_status(format!("Error: {}", e));
                    None
                }
            }
        }

        AppMsg::SaveCompleted { path, result } => match result {
            Ok(()) => {
                model.document.is_modified = false;
                model.set_status(format!("Saved: {}", path.display()));
                let changed = model.preferences.remember_file(&path);
                model.document.file_path = Some(path);
                changed.then_some(Cmd::SavePreferences)
            }
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", path.display(), e);
                model.set_status(format!("Error: {}", e));
                None
            }
        },

        AppMsg::Show => Some(Cmd::Print(render_grid(&model.table))),

        AppMsg::History { json } => {
            if json {
                match history_json(model) {
                    Ok(text) => Some(Cmd::Print(text)),
                    Err(e) => {
                        model.set_status(format!("Error: {}", e));
                        None
                    }
                }
            } else {
                Some(Cmd::Print(history_text(model)))
            }
        }

        AppMsg::Status => {
            let history = model.table.history();
            let mut text = format!(
                "{}\n{} rows x {} columns, current cell {}\ndelimiter '{}', header row {}\nhistory {}/{}",
                model.title(),
                model.table.row_count(),
                model.table.column_count(),
                format_cell(model.table.selection().current()),
                model.document.delimiter.char().escape_default(),
                if model.document.has_header_row { "on" } else { "off" },
                history.cursor(),
                history.len()
            );
            if history.is_open() {
                text.push_str(&format!(", {} open transaction(s)", history.depth()));
            }
            text.push('\n');
            Some(Cmd::Print(text))
        }

        AppMsg::Help => Some(Cmd::Print(format!("{}\n", HELP))),

        AppMsg::Quit => {
            let open = model.table.commit_all();
            if open > 0 {
                tracing::warn!("Committed {} open transaction(s) on quit", open);
                model.sync_history_events();
            }
            if model.document.is_modified {
                tracing::info!("Quitting with unsaved changes");
            }
            Some(Cmd::Quit)
        }
    }
}

fn file_loaded(model: &mut AppModel, path: PathBuf, content: &str) -> Option<Cmd> {
    let delimiter = model.delimiter_for(&path, Some(content));
    let table = match parse_table(content, delimiter, model.document.has_header_row) {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!("Failed to parse {}: {}", path.display(), e);
            model.set_status(format!("Error: {}", e));
            return None;
        }
    };

    model.table.load(table);
    model.document.delimiter = delimiter;
    model.document.is_modified = false;
    model.set_status(format!(
        "Loaded: {} ({} rows x {} columns)",
        path.display(),
        model.table.row_count(),
        model.table.column_count()
    ));

    let changed = model.preferences.remember_file(&path);
    model.document.file_path = Some(path);
    changed.then_some(Cmd::SavePreferences)
}

fn history_text(model: &AppModel) -> String {
    let history = model.table.history();
    if history.is_empty() {
        return "(no history)\n".to_string();
    }

    let mut out = String::new();
    for (index, group) in history.groups().iter().enumerate() {
        let marker = if index < history.cursor() { ' ' } else { '~' };
        out.push_str(&format!(
            "{}{:>3}  {} ({} command{})\n",
            marker,
            index + 1,
            group.label(),
            group.commands().len(),
            if group.commands().len() == 1 { "" } else { "s" }
        ));
    }
    out
}

fn history_json(model: &AppModel) -> Result<String, serde_json::Error> {
    let history = model.table.history();
    let dump = HistoryDump {
        cursor: history.cursor(),
        open_transactions: history.depth(),
        entries: history
            .groups()
            .iter()
            .enumerate()
            .map(|(index, group)| HistoryEntry {
                index,
                name: group.label(),
                applied: index < history.cursor(),
                commands: group.commands(),
                selection_before: group.pre_selection(),
                selection_after: group.post_selection(),
            })
            .collect(),
    };
    let mut text = serde_json::to_string_pretty(&dump)?;
    text.push('\n');
    Ok(text)
}
