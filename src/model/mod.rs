//! Application model - the complete state of the editor
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod document;

pub use document::Document;

use std::path::Path;

use crate::config::Preferences;
use crate::grid::{detect_delimiter, Delimiter};
use crate::history::HistoryEvent;
use crate::table::TableController;

/// The complete application model
#[derive(Debug, Default)]
pub struct AppModel {
    /// The grid, its selection and history
    pub table: TableController,
    /// File metadata for the open grid
    pub document: Document,
    /// Persisted user preferences
    pub preferences: Preferences,
    /// Last copied block, used when the system clipboard is unavailable
    pub clipboard: Option<String>,
    /// Last status message
    pub status: Option<String>,
    /// Delimiter given on the command line; wins over extension and detection
    pub forced_delimiter: Option<Delimiter>,
}

impl AppModel {
    /// Create a model with an empty grid, using preference defaults
    pub fn new(preferences: Preferences) -> Self {
        let document = Document::new(preferences.default_delimiter, preferences.header_row);
        Self {
            table: TableController::new(),
            document,
            preferences,
            clipboard: None,
            status: None,
            forced_delimiter: None,
        }
    }

    /// Override how files are read and written
    pub fn with_format(mut self, delimiter: Option<Delimiter>, has_header_row: bool) -> Self {
        if let Some(delimiter) = delimiter {
            self.document.delimiter = delimiter;
        }
        self.forced_delimiter = delimiter;
        self.document.has_header_row = has_header_row;
        self
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(target: "status", "{}", message);
        self.status = Some(message);
    }

    /// Consume queued history events; any of them marks the document modified
    ///
    /// Returns the events so the caller can report them.
    pub fn sync_history_events(&mut self) -> Vec<HistoryEvent> {
        let events = self.table.drain_events();
        if !events.is_empty() {
            self.document.is_modified = true;
        }
        events
    }

    pub fn title(&self) -> String {
        self.document.title()
    }

    /// Delimiter for reading or writing `path`
    ///
    /// A forced delimiter wins, then a known extension, then detection from
    /// `content` when there is some, then the current document delimiter.
    pub fn delimiter_for(&self, path: &Path, content: Option<&str>) -> Delimiter {
        if let Some(delimiter) = self.forced_delimiter {
            return delimiter;
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some(ext @ ("csv" | "tsv" | "psv")) => Delimiter::from_extension(ext),
            _ => content
                .map(detect_delimiter)
                .unwrap_or(self.document.delimiter),
        }
    }
}
