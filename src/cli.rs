//! Command-line argument parsing
//!
//! Supports:
//! - Opening a delimited file at startup
//! - Forcing the delimiter and header-row handling
//! - Running a script of editing commands instead of reading stdin

use clap::Parser;
use std::path::PathBuf;

use crate::grid::Delimiter;

/// A spreadsheet grid editor with transactional undo/redo
#[derive(Parser, Debug)]
#[command(
    name = "gridedit",
    version,
    about = "A spreadsheet grid editor with transactional undo/redo"
)]
pub struct CliArgs {
    /// File to open
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Start with an empty grid even if a path is given
    #[arg(short = 'n', long)]
    pub new: bool,

    /// Field delimiter: comma, tab, pipe or semicolon
    #[arg(short = 'd', long, value_name = "NAME")]
    pub delimiter: Option<String>,

    /// Treat the first record as data rather than column headers
    #[arg(long)]
    pub no_header: bool,

    /// Read commands from this file instead of stdin
    #[arg(short = 's', long, value_name = "FILE")]
    pub script: Option<PathBuf>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// File to load before running commands
    pub file: Option<PathBuf>,
    /// Delimiter override, if one was given
    pub delimiter: Option<Delimiter>,
    /// Header-row override; `None` defers to preferences
    pub header_row: Option<bool>,
    /// Command script; `None` reads stdin
    pub script: Option<PathBuf>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let delimiter = match self.delimiter.as_deref() {
            Some(name) => Some(
                Delimiter::from_name(name)
                    .ok_or_else(|| format!("Unknown delimiter: {}", name))?,
            ),
            None => None,
        };

        if let Some(path) = &self.path {
            if path.is_dir() {
                return Err(format!("{} is a directory", path.display()));
            }
        }

        Ok(StartupConfig {
            file: if self.new { None } else { self.path },
            delimiter,
            header_row: self.no_header.then_some(false),
            script: self.script,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            path: None,
            new: false,
            delimiter: None,
            no_header: false,
            script: None,
        }
    }

    #[test]
    fn test_empty_args() {
        let config = args().into_config().unwrap();
        assert_eq!(config.file, None);
        assert_eq!(config.delimiter, None);
        assert_eq!(config.header_row, None);
    }

    #[test]
    fn test_new_flag_ignores_path() {
        let config = CliArgs {
            path: Some(PathBuf::from("people.csv")),
            new: true,
            ..args()
        }
        .into_config()
        .unwrap();
        assert_eq!(config.file, None);
    }

    #[test]
    fn test_single_file() {
        let config = CliArgs {
            path: Some(PathBuf::from("people.csv")),
            ..args()
        }
        .into_config()
        .unwrap();
        assert_eq!(config.file, Some(PathBuf::from("people.csv")));
    }

    #[test]
    fn test_delimiter_names() {
        let config = CliArgs {
            delimiter: Some("tab".into()),
            ..args()
        }
        .into_config()
        .unwrap();
        assert_eq!(config.delimiter, Some(Delimiter::Tab));

        let err = CliArgs {
            delimiter: Some("colon".into()),
            ..args()
        }
        .into_config();
        assert!(err.is_err());
    }

    #[test]
    fn test_no_header() {
        let config = CliArgs {
            no_header: true,
            ..args()
        }
        .into_config()
        .unwrap();
        assert_eq!(config.header_row, Some(false));
    }

    #[test]
    fn test_parse_from_argv() {
        let parsed = CliArgs::try_parse_from([
            "gridedit",
            "data.tsv",
            "--delimiter",
            "pipe",
            "--script",
            "edits.txt",
        ])
        .unwrap();
        assert_eq!(parsed.path, Some(PathBuf::from("data.tsv")));
        assert_eq!(parsed.delimiter.as_deref(), Some("pipe"));
        assert_eq!(parsed.script, Some(PathBuf::from("edits.txt")));
    }
}
