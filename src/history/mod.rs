//! Undo/redo engine
//!
//! ```text
//! TransactionManager
//! ├── history: Vec<TransactionGroup>
//! │       └── commands: Vec<Command>, pre/post SelectionSnapshot
//! ├── cursor
//! └── stack: open transaction names
//! ```

mod command;
mod selection;
mod transaction;

pub use command::Command;
pub use selection::{CellRange, GridSelection, SelectionSnapshot, SelectionTracker};
pub use transaction::{HistoryEvent, TransactionGroup, TransactionManager};
