//! Transaction log with nested grouping and a replay cursor.
//!
//! ```text
//! history: [g0, g1, g2, g3]
//!                   ^ cursor = 2
//! g0, g1  applied
//! g2, g3  available to redo (only right after undo)
//! ```
//!
//! Commands are applied the moment they are added; the group they belong to is
//! finalized when the outermost transaction commits.

use serde::Serialize;

use super::command::Command;
use super::selection::{SelectionSnapshot, SelectionTracker};
use crate::grid::GridStore;

/// Notification queued for the host after history moves
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HistoryEvent {
    Committed { name: String },
    Undone { name: String },
    Redone { name: String },
}

/// One history entry: the commands of an outermost transaction
#[derive(Debug, Clone, Serialize)]
pub struct TransactionGroup {
    name: String,
    commands: Vec<Command>,
    pre_selection: SelectionSnapshot,
    post_selection: SelectionSnapshot,
}

impl TransactionGroup {
    fn new(name: &str, pre_selection: SelectionSnapshot) -> Self {
        Self {
            name: name.to_string(),
            commands: Vec::new(),
            pre_selection,
            post_selection: SelectionSnapshot::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name for display; unnamed groups fall back to their first command's kind
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            self.commands.first().map(Command::name).unwrap_or("")
        } else {
            &self.name
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn pre_selection(&self) -> &SelectionSnapshot {
        &self.pre_selection
    }

    pub fn post_selection(&self) -> &SelectionSnapshot {
        &self.post_selection
    }
}

/// Owns the history log, the replay cursor and the open-transaction stack
#[derive(Debug, Clone, Default)]
pub struct TransactionManager {
    history: Vec<TransactionGroup>,
    cursor: usize,
    stack: Vec<String>,
    events: Vec<HistoryEvent>,
}

impl TransactionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a transaction; nested calls join the outermost group
    pub fn begin(&mut self, name: &str, selection: &dyn SelectionTracker) {
        if self.stack.is_empty() {
            if self.history.len() > self.cursor {
                tracing::debug!(
                    "Discarding {} redo entries",
                    self.history.len() - self.cursor
                );
                self.history.truncate(self.cursor);
            }
            self.history
                .push(TransactionGroup::new(name, selection.capture()));
            tracing::debug!(transaction = name, cursor = self.cursor, "begin");
        } else {
            tracing::trace!(transaction = name, depth = self.stack.len(), "begin nested");
        }

        self.stack.push(name.to_string());
    }

    /// Apply `cmd` and record it in the open group
    ///
    /// Outside a transaction the command is wrapped in an unnamed one of its own.
    pub fn add_command(
        &mut self,
        cmd: Command,
        store: &mut GridStore,
        selection: &dyn SelectionTracker,
    ) {
        if self.stack.is_empty() {
            self.begin("", selection);
            self.add_command(cmd, store, selection);
            self.commit(selection);
            return;
        }

        tracing::trace!(command = cmd.name(), "apply");
        cmd.redo(store);
        if let Some(group) = self.history.last_mut() {
            group.commands.push(cmd);
        }
    }

    /// Close the innermost transaction
    ///
    /// Closing the outermost one finalizes the group. A group without
    /// commands is dropped and leaves no trace.
    pub fn commit(&mut self, selection: &dyn SelectionTracker) {
        if self.stack.pop().is_none() {
            tracing::trace!("commit without open transaction ignored");
            return;
        }

        if !self.stack.is_empty() {
            return;
        }

        let Some(group) = self.history.last_mut() else {
            return;
        };

        if group.commands.is_empty() {
            tracing::debug!(transaction = %group.name, "dropping empty transaction");
            self.history.pop();
            return;
        }

        group.post_selection = selection.capture();
        let name = group.name.clone();
        self.cursor += 1;
        tracing::debug!(
            transaction = %name,
            cursor = self.cursor,
            commands = group.commands.len(),
            "commit"
        );
        self.events.push(HistoryEvent::Committed { name });
    }

    /// Revert the last applied group; returns false when there is nothing to undo
    pub fn undo(&mut self, store: &mut GridStore, selection: &mut dyn SelectionTracker) -> bool {
        if self.cursor == 0 {
            return false;
        }
        if self.is_open() {
            tracing::warn!("undo refused while a transaction is open");
            return false;
        }

        let group = &self.history[self.cursor - 1];
        for cmd in group.commands.iter().rev() {
            cmd.undo(store);
        }
        selection.restore(&group.pre_selection);
        let name = group.name.clone();

        self.cursor -= 1;
        tracing::debug!(transaction = %name, cursor = self.cursor, "undo");
        self.events.push(HistoryEvent::Undone { name });
        true
    }

    /// Re-apply the next undone group; returns false when there is nothing to redo
    pub fn redo(&mut self, store: &mut GridStore, selection: &mut dyn SelectionTracker) -> bool {
        if self.cursor >= self.history.len() {
            return false;
        }
        if self.is_open() {
            tracing::warn!("redo refused while a transaction is open");
            return false;
        }

        let group = &self.history[self.cursor];
        for cmd in &group.commands {
            cmd.redo(store);
        }
        selection.restore(&group.post_selection);
        let name = group.name.clone();

        self.cursor += 1;
        tracing::debug!(transaction = %name, cursor = self.cursor, "redo");
        self.events.push(HistoryEvent::Redone { name });
        true
    }

    /// Forget everything, e.g. on document reload. Emits no events.
    pub fn clear(&mut self) {
        self.history.clear();
        self.cursor = 0;
        self.stack.clear();
    }

    /// Number of history entries, including the redo suffix
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Nesting depth of open transactions
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_open(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0 && !self.is_open()
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.history.len() && !self.is_open()
    }

    /// Label of the group `undo` would revert
    pub fn undo_name(&self) -> Option<&str> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.history.get(i))
            .map(|g| g.label())
    }

    /// Label of the group `redo` would re-apply
    pub fn redo_name(&self) -> Option<&str> {
        self.history.get(self.cursor).map(|g| g.label())
    }

    pub fn groups(&self) -> &[TransactionGroup] {
        &self.history
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<HistoryEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellPosition;
    use crate::history::selection::GridSelection;

    fn grid(rows: usize, cols: usize) -> GridStore {
        GridStore::from_table(
            (0..cols).map(|c| format!("h{}", c)).collect(),
            vec![vec![String::new(); cols]; rows],
        )
    }

    fn set(store: &GridStore, row: usize, col: usize, value: &str) -> Command {
        Command::set_cell(store, row, col, value)
    }

    #[test]
    fn test_single_transaction_undo_redo() {
        let mut store = grid(1, 2);
        let mut sel = GridSelection::new();
        let mut tm = TransactionManager::new();

        tm.begin("edit", &sel);
        let cmd = set(&store, 0, 0, "A");
        tm.add_command(cmd, &mut store, &sel);
        let cmd = set(&store, 0, 1, "B");
        tm.add_command(cmd, &mut store, &sel);
        tm.commit(&sel);

        assert_eq!(tm.len(), 1);
        assert_eq!(tm.cursor(), 1);

        assert!(tm.undo(&mut store, &mut sel));
        assert_eq!(store.row(0), &["", ""]);
        assert_eq!(tm.cursor(), 0);

        assert!(tm.redo(&mut store, &mut sel));
        assert_eq!(store.row(0), &["A", "B"]);
        assert_eq!(tm.cursor(), 1);
    }

    #[test]
    fn test_empty_transaction_leaves_no_trace() {
        let sel = GridSelection::new();
        let mut tm = TransactionManager::new();

        tm.begin("nothing", &sel);
        tm.commit(&sel);

        assert_eq!(tm.len(), 0);
        assert_eq!(tm.cursor(), 0);
        assert!(tm.drain_events().is_empty());
    }

    #[test]
    fn test_nested_transactions_coalesce() {
        let mut store = grid(1, 2);
        let sel = GridSelection::new();
        let mut tm = TransactionManager::new();

        tm.begin("a", &sel);
        tm.begin("b", &sel);
        let c1 = set(&store, 0, 0, "1");
        tm.add_command(c1.clone(), &mut store, &sel);
        tm.commit(&sel);
        assert_eq!(tm.cursor(), 0, "inner commit must not finalize");
        let c2 = set(&store, 0, 1, "2");
        tm.add_command(c2.clone(), &mut store, &sel);
        tm.commit(&sel);

        assert_eq!(tm.len(), 1);
        assert_eq!(tm.groups()[0].name(), "a");
        assert_eq!(tm.groups()[0].commands(), &[c1, c2]);
        assert_eq!(
            tm.drain_events(),
            vec![HistoryEvent::Committed { name: "a".into() }]
        );
    }

    #[test]
    fn test_add_command_outside_transaction_auto_wraps() {
        let mut store = grid(1, 1);
        let sel = GridSelection::new();
        let mut tm = TransactionManager::new();

        let cmd = set(&store, 0, 0, "x");
        tm.add_command(cmd, &mut store, &sel);

        assert_eq!(store.text(0, 0), "x");
        assert_eq!(tm.len(), 1);
        assert_eq!(tm.cursor(), 1);
        assert_eq!(tm.groups()[0].name(), "");
        assert!(!tm.is_open());
    }

    #[test]
    fn test_commit_without_begin_is_noop() {
        let sel = GridSelection::new();
        let mut tm = TransactionManager::new();
        tm.commit(&sel);
        tm.commit(&sel);
        assert_eq!(tm.len(), 0);
        assert_eq!(tm.depth(), 0);
    }

    #[test]
    fn test_undo_redo_at_bounds_are_noops() {
        let mut store = grid(1, 1);
        let mut sel = GridSelection::new();
        let mut tm = TransactionManager::new();

        assert!(!tm.undo(&mut store, &mut sel));
        assert!(!tm.redo(&mut store, &mut sel));
        assert!(tm.drain_events().is_empty());

        let cmd = set(&store, 0, 0, "x");
        tm.add_command(cmd, &mut store, &sel);
        assert!(!tm.redo(&mut store, &mut sel));
        assert!(tm.undo(&mut store, &mut sel));
        assert!(!tm.undo(&mut store, &mut sel));
        assert_eq!(tm.cursor(), 0);
    }

    #[test]
    fn test_redo_suffix_survives_until_next_begin() {
        let mut store = grid(1, 1);
        let mut sel = GridSelection::new();
        let mut tm = TransactionManager::new();

        for value in ["1", "2", "3"] {
            let cmd = set(&store, 0, 0, value);
            tm.add_command(cmd, &mut store, &sel);
        }
        tm.undo(&mut store, &mut sel);
        tm.undo(&mut store, &mut sel);
        assert_eq!(tm.len(), 3);
        assert_eq!(tm.redo_name(), Some("set_cell"));

        // An empty transaction still truncates the redo suffix
        tm.begin("empty", &sel);
        assert_eq!(tm.len(), 2);
        tm.commit(&sel);
        assert_eq!(tm.len(), 1);

        let cmd = set(&store, 0, 0, "9");
        tm.add_command(cmd, &mut store, &sel);
        assert_eq!(tm.len(), 2);
        assert_eq!(tm.cursor(), 2);
        assert!(!tm.can_redo());
    }

    #[test]
    fn test_selection_restored_on_undo_and_redo() {
        let mut store = grid(3, 3);
        let mut sel = GridSelection::new();
        let mut tm = TransactionManager::new();

        sel.select_cell(CellPosition::new(0, 0));
        tm.begin("edit", &sel);
        let cmd = set(&store, 2, 2, "x");
        tm.add_command(cmd, &mut store, &sel);
        sel.select_cell(CellPosition::new(2, 2));
        tm.commit(&sel);

        sel.select_cell(CellPosition::new(1, 1));
        tm.undo(&mut store, &mut sel);
        assert_eq!(sel.current(), CellPosition::new(0, 0));

        tm.redo(&mut store, &mut sel);
        assert_eq!(sel.current(), CellPosition::new(2, 2));
    }

    #[test]
    fn test_undo_refused_while_open() {
        let mut store = grid(1, 1);
        let mut sel = GridSelection::new();
        let mut tm = TransactionManager::new();

        let cmd = set(&store, 0, 0, "x");
        tm.add_command(cmd, &mut store, &sel);
        tm.begin("open", &sel);
        assert!(!tm.can_undo());
        assert!(!tm.undo(&mut store, &mut sel));
        assert_eq!(store.text(0, 0), "x");
        tm.commit(&sel);
        assert!(tm.undo(&mut store, &mut sel));
    }

    #[test]
    fn test_events_in_order() {
        let mut store = grid(1, 1);
        let mut sel = GridSelection::new();
        let mut tm = TransactionManager::new();

        tm.begin("edit", &sel);
        let cmd = set(&store, 0, 0, "x");
        tm.add_command(cmd, &mut store, &sel);
        tm.commit(&sel);
        tm.undo(&mut store, &mut sel);
        tm.redo(&mut store, &mut sel);

        assert_eq!(
            tm.drain_events(),
            vec![
                HistoryEvent::Committed { name: "edit".into() },
                HistoryEvent::Undone { name: "edit".into() },
                HistoryEvent::Redone { name: "edit".into() },
            ]
        );
        assert!(tm.drain_events().is_empty());
    }

    #[test]
    fn test_clear_resets_everything_silently() {
        let mut store = grid(1, 1);
        let sel = GridSelection::new();
        let mut tm = TransactionManager::new();

        let cmd = set(&store, 0, 0, "x");
        tm.add_command(cmd, &mut store, &sel);
        tm.drain_events();
        tm.begin("dangling", &sel);
        tm.clear();

        assert_eq!(tm.len(), 0);
        assert_eq!(tm.cursor(), 0);
        assert_eq!(tm.depth(), 0);
        assert!(tm.drain_events().is_empty());
    }
}
