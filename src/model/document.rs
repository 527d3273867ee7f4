//! Document model - file metadata around the grid

use std::path::{Path, PathBuf};

use crate::grid::Delimiter;

/// File state for the open grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path to the file on disk (None for new/unsaved files)
    pub file_path: Option<PathBuf>,
    /// Delimiter used when loading and saving
    pub delimiter: Delimiter,
    /// Whether the first record holds column headers
    pub has_header_row: bool,
    /// Whether the grid has unsaved changes
    pub is_modified: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Delimiter::default(), true)
    }
}

impl Document {
    /// Create a new untitled document
    pub fn new(delimiter: Delimiter, has_header_row: bool) -> Self {
        Self {
            file_path: None,
            delimiter,
            has_header_row,
            is_modified: false,
        }
    }

    /// File name for display, or "Untitled"
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Window-style title, with `*` marking unsaved changes
    pub fn title(&self) -> String {
        let marker = if self.is_modified { "*" } else { "" };
        format!("{}{} - gridedit", self.display_name(), marker)
    }
}
