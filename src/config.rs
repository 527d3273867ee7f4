//! User preference persistence
//!
//! Stores preferences in `~/.config/gridedit/config.yaml`. Loaded once at
//! startup; the runtime writes them back whenever a preference changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::grid::Delimiter;

/// Preferences that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Directory of the most recently opened or saved file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_directory: Option<PathBuf>,
    /// Delimiter used for files whose extension says nothing
    #[serde(default)]
    pub default_delimiter: Delimiter,
    /// Treat the first record of a file as column headers
    #[serde(default = "default_header_row")]
    pub header_row: bool,
}

fn default_header_row() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            last_directory: None,
            default_delimiter: Delimiter::default(),
            header_row: default_header_row(),
        }
    }
}

impl Preferences {
    /// Load preferences from the config directory, or defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load preferences from `path`, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(prefs) => {
                    tracing::info!("Loaded config from {}", path.display());
                    prefs
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save preferences to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Remember the directory containing `file`
    ///
    /// Returns true if the stored directory changed and should be saved.
    pub fn remember_file(&mut self, file: &Path) -> bool {
        let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) else {
            return false;
        };
        if self.last_directory.as_deref() == Some(dir) {
            return false;
        }
        self.last_directory = Some(dir.to_path_buf());
        true
    }

    /// Resolve a relative file name against the last directory
    pub fn resolve(&self, file: &Path) -> PathBuf {
        match &self.last_directory {
            Some(dir) if file.is_relative() && file.parent() == Some(Path::new("")) => {
                dir.join(file)
            }
            _ => file.to_path_buf(),
        }
    }
}
