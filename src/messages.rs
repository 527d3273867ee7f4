//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types. Script lines and
//! interactive input are parsed into messages with [`Msg::parse`].
//!
//! Cells are addressed spreadsheet-style: `A1` is row 0, column 0.

use std::fmt;
use std::path::PathBuf;

use crate::grid::CellPosition;
use crate::table::ColumnInit;

/// Grid editing messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableMsg {
    /// Set one cell's text
    SetCell { pos: CellPosition, value: String },
    /// Select a rectangle (a single cell when anchor == head)
    Select {
        anchor: CellPosition,
        head: CellPosition,
    },
    /// Append a column
    AddColumn { title: String, init: ColumnInit },
    /// Append a row
    AddRow(Vec<String>),
    /// Copy the selection to the clipboard
    Copy,
    /// Cut the selection to the clipboard
    Cut,
    /// Paste clipboard text; `None` asks the runtime to read the clipboard
    Paste(Option<String>),
    /// Empty the selected cells
    Clear,
    /// Open a named transaction
    Begin(String),
    /// Close the innermost transaction
    Commit,
    Undo,
    Redo,
}

/// Application messages (file operations, output, lifecycle)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMsg {
    /// Start a new empty document
    NewFile,
    /// Open a file
    OpenFile(PathBuf),
    /// Save to the given path, or the current one
    SaveFile(Option<PathBuf>),
    /// File read finished
    FileLoaded {
        path: PathBuf,
        result: Result<String, String>,
    },
    /// File write finished
    SaveCompleted {
        path: PathBuf,
        result: Result<(), String>,
    },
    /// Print the grid
    Show,
    /// Print the undo history
    History { json: bool },
    /// Print title and history position
    Status,
    Help,
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Table(TableMsg),
    App(AppMsg),
}

/// A line of input that could not be understood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError {
    pub message: String,
}

impl ParseCommandError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseCommandError {}

/// Command reference shown by `help`
pub const HELP: &str = "\
set A1 TEXT          set a cell (\\t and \\n escapes allowed)
select A1[:B2]       select a cell or range
addcol TITLE [--from B]
                     append a column, optionally copying column B
addrow V1\\tV2...     append a row
copy | cut | paste [TEXT] | clear
begin NAME | commit  group following edits into one undo step
undo | redo
new | open PATH | save [PATH]
show | history [--json] | status | help | quit";

impl Msg {
    /// Parse one input line
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    pub fn parse(line: &str) -> Result<Option<Msg>, ParseCommandError> {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line, ""),
        };
        let rest_trimmed = rest.trim_end();

        let msg = match word.to_lowercase().as_str() {
            "set" => {
                let (cell, value) = match rest.split_once(char::is_whitespace) {
                    Some((cell, value)) => (cell, value),
                    None => (rest_trimmed, ""),
                };
                Msg::Table(TableMsg::SetCell {
                    pos: require_cell(cell)?,
                    value: unescape(value.trim_end_matches(['\r', '\n'])),
                })
            }
            "select" => {
                let (anchor, head) = match rest_trimmed.split_once(':') {
                    Some((a, b)) => (require_cell(a)?, require_cell(b)?),
                    None => {
                        let pos = require_cell(rest_trimmed)?;
                        (pos, pos)
                    }
                };
                Msg::Table(TableMsg::Select { anchor, head })
            }
            "addcol" => {
                let (title, init) = match rest_trimmed.rsplit_once("--from") {
                    Some((title, src)) => {
                        let src = parse_column_ref(src.trim()).ok_or_else(|| {
                            ParseCommandError::new(format!("invalid column: {}", src.trim()))
                        })?;
                        (title.trim_end(), ColumnInit::Duplicate(src))
                    }
                    None => (rest_trimmed, ColumnInit::Empty),
                };
                Msg::Table(TableMsg::AddColumn {
                    title: unescape(title),
                    init,
                })
            }
            "addrow" => Msg::Table(TableMsg::AddRow(
                unescape(rest_trimmed)
                    .split('\t')
                    .map(|s| s.to_string())
                    .collect(),
            )),
            "copy" => Msg::Table(TableMsg::Copy),
            "cut" => Msg::Table(TableMsg::Cut),
            "paste" if rest_trimmed.is_empty() => Msg::Table(TableMsg::Paste(None)),
            "paste" => Msg::Table(TableMsg::Paste(Some(unescape(rest_trimmed)))),
            "clear" => Msg::Table(TableMsg::Clear),
            "begin" => Msg::Table(TableMsg::Begin(rest_trimmed.to_string())),
            "commit" => Msg::Table(TableMsg::Commit),
            "undo" => Msg::Table(TableMsg::Undo),
            "redo" => Msg::Table(TableMsg::Redo),
            "new" => Msg::App(AppMsg::NewFile),
            "open" if rest_trimmed.is_empty() => {
                return Err(ParseCommandError::new("open needs a path"))
            }
            "open" => Msg::App(AppMsg::OpenFile(PathBuf::from(rest_trimmed))),
            "save" if rest_trimmed.is_empty() => Msg::App(AppMsg::SaveFile(None)),
            "save" => Msg::App(AppMsg::SaveFile(Some(PathBuf::from(rest_trimmed)))),
            "show" => Msg::App(AppMsg::Show),
            "history" => Msg::App(AppMsg::History {
                json: rest_trimmed == "--json",
            }),
            "status" => Msg::App(AppMsg::Status),
            "help" | "?" => Msg::App(AppMsg::Help),
            "quit" | "exit" => Msg::App(AppMsg::Quit),
            other => {
                return Err(ParseCommandError::new(format!(
                    "unknown command: {} (try 'help')",
                    other
                )))
            }
        };

        Ok(Some(msg))
    }
}

fn require_cell(text: &str) -> Result<CellPosition, ParseCommandError> {
    parse_cell_ref(text)
        .ok_or_else(|| ParseCommandError::new(format!("invalid cell reference: {:?}", text)))
}

/// Parse a column reference such as `A` or `AB` into a 0-based index
pub fn parse_column_ref(text: &str) -> Option<usize> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    text.chars().try_fold(0usize, |acc, c| {
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
    .map(|n| n - 1)
}

/// Parse a cell reference such as `B3` into a 0-based position
pub fn parse_cell_ref(text: &str) -> Option<CellPosition> {
    let text = text.trim();
    let split = text.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = text.split_at(split);
    let col = parse_column_ref(letters)?;
    let row: usize = digits.parse().ok()?;
    Some(CellPosition::new(row.checked_sub(1)?, col))
}

/// Expand `\t`, `\n` and `\\` escapes
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
