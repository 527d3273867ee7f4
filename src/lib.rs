//! gridedit - spreadsheet grid editing with transactional undo/redo
//!
//! This crate provides the grid store, the transaction engine and the
//! table controller, plus an Elm-style host (messages, update, commands)
//! used by the `gridedit` binary.

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod grid;
pub mod history;
pub mod messages;
pub mod model;
pub mod render;
pub mod runtime;
pub mod table;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::Preferences;
pub use grid::{CellPosition, GridStore};
pub use history::{Command, TransactionManager};
pub use messages::Msg;
pub use model::AppModel;
pub use table::TableController;
