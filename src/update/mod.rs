//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod table;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use table::update_table;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let result = match msg {
        Msg::Table(m) => table::update_table(model, m),
        Msg::App(m) => app::update_app(model, m),
    };

    for event in model.sync_history_events() {
        tracing::debug!(target: "history", ?event, "history changed");
    }
    result
}

/// Traced update wrapper (debug builds only)
///
/// Logs each message and the history position it leaves behind.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    debug!(target: "message", msg = %msg_name, "processing");
    let before = (model.table.cursor(), model.table.history_length());

    let result = update_inner(model, msg);

    let after = (model.table.cursor(), model.table.history_length());
    if before != after {
        debug!(
            target: "history",
            cursor = after.0,
            len = after.1,
            "position {}/{} -> {}/{}",
            before.0,
            before.1,
            after.0,
            after.1
        );
    }

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Table::Undo`
/// - `App::OpenFile("people.csv")`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Table(m) => format!("Table::{:?}", m),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
