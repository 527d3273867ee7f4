//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The runtime executes them and may feed results back as messages.

use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Write text to the output stream
    Print(String),
    /// Read a file; the runtime answers with `AppMsg::FileLoaded`
    LoadFile { path: PathBuf },
    /// Write a file; the runtime answers with `AppMsg::SaveCompleted`
    SaveFile { path: PathBuf, content: String },
    /// Put text on the system clipboard
    SetClipboard(String),
    /// Read the system clipboard; the runtime answers with `TableMsg::Paste`
    ReadClipboard,
    /// Persist user preferences
    SavePreferences,
    /// Request application exit
    Quit,
}

impl Cmd {
    /// Check if this command ends the session
    pub fn is_quit(&self) -> bool {
        matches!(self, Cmd::Quit)
    }
}
