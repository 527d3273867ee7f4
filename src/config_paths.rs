//! Where gridedit keeps its preferences and logs
//!
//! `$XDG_CONFIG_HOME/gridedit` (or `~/.config/gridedit`) on Unix and macOS,
//! the roaming app data folder on Windows.

use std::{fs, path::PathBuf};

const APP_DIR: &str = "gridedit";

pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = dirs::config_dir();

    #[cfg(not(target_os = "windows"))]
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

    base.map(|dir| dir.join(APP_DIR))
}

/// Preferences file
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "no config directory available".to_string())?;
    fs::create_dir_all(&logs)
        .map_err(|e| format!("failed to create {}: {}", logs.display(), e))?;
    Ok(logs)
}
