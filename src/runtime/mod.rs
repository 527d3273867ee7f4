//! Runtime module - command execution and the input loop
//!
//! This module connects the pure update functions to the outside world:
//! - `app` - the [`Runtime`] that feeds messages through `update` and
//!   executes the resulting commands (file I/O, clipboard, output)

pub mod app;

pub use app::Runtime;
