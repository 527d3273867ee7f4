//! Transaction engine tests
//!
//! Tests for grouping, nesting, the history cursor and undo/redo replay.

mod common;

use common::{cells, rows, test_controller};
use gridedit::grid::{CellPosition, GridStore};
use gridedit::history::{CellRange, Command, GridSelection, HistoryEvent, TransactionManager};
use gridedit::table::TableController;

// ========================================================================
// Round trip
// ========================================================================

#[test]
fn test_undo_then_redo_reproduces_grid() {
    let mut table = test_controller(&["A", "B"], &[&["1", "2"], &["3", "4"]]);

    table.with_transaction("Mixed", |t| {
        t.set_text(0, 0, "x");
        t.add_column("C");
        t.set_text(1, 2, "y");
        t.add_row(vec!["5".into()]);
        t.set_text(2, 1, "z");
    });
    let after = table.store().clone();

    assert!(table.undo());
    assert_eq!(cells(&table), rows(&[&["1", "2"], &["3", "4"]]));
    assert_eq!(table.store().headers(), ["A", "B"]);

    assert!(table.redo());
    assert_eq!(table.store(), &after);
    assert_eq!(
        cells(&table),
        rows(&[&["x", "2", ""], &["3", "4", "y"], &["5", "z", ""]])
    );
}

#[test]
fn test_repeated_cycles_are_stable() {
    let mut table = test_controller(&["A"], &[&["a"]]);
    table.set_text(0, 0, "b");
    table.set_text(0, 0, "c");

    for _ in 0..3 {
        assert!(table.undo());
        assert!(table.undo());
        assert_eq!(table.text(0, 0), "a");
        assert!(table.redo());
        assert!(table.redo());
        assert_eq!(table.text(0, 0), "c");
    }
}

// ========================================================================
// Grouping
// ========================================================================

#[test]
fn test_empty_transaction_leaves_no_trace() {
    let mut table = test_controller(&["A"], &[&["a"]]);
    table.set_text(0, 0, "b");
    table.drain_events();

    table.begin_transaction("Nothing");
    table.commit_transaction();

    assert_eq!(table.history_length(), 1);
    assert_eq!(table.cursor(), 1);
    assert!(table.drain_events().is_empty());
}

#[test]
fn test_nested_transactions_coalesce_under_outer_name() {
    let mut store = GridStore::from_table(vec!["A".into(), "B".into()], vec![vec![
        String::new(),
        String::new(),
    ]]);
    let selection = GridSelection::new();
    let mut tm = TransactionManager::new();

    let c1 = Command::set_cell(&store, 0, 0, "1");
    let c2 = Command::set_cell(&store, 0, 1, "2");

    tm.begin("a", &selection);
    tm.begin("b", &selection);
    tm.add_command(c1.clone(), &mut store, &selection);
    tm.commit(&selection);
    tm.add_command(c2.clone(), &mut store, &selection);
    tm.commit(&selection);

    assert_eq!(tm.len(), 1);
    assert_eq!(tm.groups()[0].name(), "a");
    assert_eq!(tm.groups()[0].commands(), &[c1, c2]);
    assert_eq!(
        tm.drain_events(),
        vec![HistoryEvent::Committed { name: "a".into() }]
    );
}

#[test]
fn test_ad_hoc_edit_gets_its_own_entry() {
    let mut table = test_controller(&["A"], &[&["a"], &["b"]]);
    table.set_text(0, 0, "x");
    table.set_text(1, 0, "y");

    assert_eq!(table.history_length(), 2);
    assert_eq!(table.history().groups()[0].name(), "");
    table.undo();
    assert_eq!(cells(&table), rows(&[&["x"], &["b"]]));
}

#[test]
fn test_edits_apply_before_commit() {
    let mut table = test_controller(&["A"], &[&["a"]]);
    table.begin_transaction("Pending");
    table.set_text(0, 0, "b");
    assert_eq!(table.text(0, 0), "b");
    assert_eq!(table.cursor(), 0);
    table.commit_transaction();
    assert_eq!(table.cursor(), 1);
}

#[test]
fn test_guard_commits_on_panic() {
    let mut table = test_controller(&["A"], &[&["a"]]);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut tx = table.transaction("Explodes");
        tx.set_text(0, 0, "b");
        panic!("boom");
    }));

    assert!(result.is_err());
    assert!(!table.history().is_open());
    assert_eq!(table.history_length(), 1);
    assert!(table.undo());
    assert_eq!(table.text(0, 0), "a");
}

// ========================================================================
// Cursor
// ========================================================================

#[test]
fn test_cursor_moves_by_one_and_stays_in_bounds() {
    let mut table = test_controller(&["A"], &[&["0"]]);
    for i in 1..=3 {
        table.set_text(0, 0, &i.to_string());
    }
    let len = table.history_length();

    let mut previous = table.cursor();
    for _ in 0..5 {
        table.undo();
        let cursor = table.cursor();
        assert!(previous - cursor <= 1);
        assert!(cursor <= len);
        previous = cursor;
    }
    assert_eq!(table.cursor(), 0);
    assert!(!table.undo());

    for _ in 0..5 {
        table.redo();
        let cursor = table.cursor();
        assert!(cursor - previous <= 1);
        assert!(cursor <= len);
        previous = cursor;
    }
    assert_eq!(table.cursor(), len);
    assert!(!table.redo());
}

#[test]
fn test_fresh_begin_discards_redo_suffix() {
    let mut table = test_controller(&["A"], &[&["0"]]);
    table.set_text(0, 0, "1");
    table.set_text(0, 0, "2");
    table.set_text(0, 0, "3");

    table.undo();
    table.undo();
    assert_eq!(table.cursor(), 1);
    assert_eq!(table.history_length(), 3);

    table.with_transaction("New", |t| t.set_text(0, 0, "n"));

    assert_eq!(table.history_length(), 2);
    assert_eq!(table.cursor(), 2);
    assert!(!table.redo());
    assert_eq!(table.text(0, 0), "n");
}

#[test]
fn test_undo_refused_while_transaction_open() {
    let mut table = test_controller(&["A"], &[&["a"]]);
    table.set_text(0, 0, "b");

    table.begin_transaction("Open");
    assert!(!table.undo());
    assert_eq!(table.text(0, 0), "b");
    table.commit_transaction();

    assert!(table.undo());
}

// ========================================================================
// Scenarios
// ========================================================================

#[test]
fn test_add_column_to_empty_grid_and_undo() {
    let mut table = TableController::new();
    table.add_column("Name");

    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_count(), 1);
    assert_eq!(table.header(0), "Name");

    table.undo();
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.column_count(), 0);
}

#[test]
fn test_edit_two_cells_in_one_transaction() {
    let mut table = test_controller(&["A", "B"], &[&["", ""]]);

    table.begin_transaction("edit");
    table.set_text(0, 0, "A");
    table.set_text(0, 1, "B");
    table.commit_transaction();
    assert_eq!(table.history_length(), 1);
    assert_eq!(table.cursor(), 1);

    table.undo();
    assert_eq!(cells(&table), rows(&[&["", ""]]));
    assert_eq!(table.cursor(), 0);

    table.redo();
    assert_eq!(cells(&table), rows(&[&["A", "B"]]));
    assert_eq!(table.cursor(), 1);
}

#[test]
fn test_single_cell_paste_fills_selection() {
    let mut table = test_controller(&["A", "B"], &[&["1", "2"], &["3", "4"]]);
    table.select_range(CellPosition::new(0, 0), CellPosition::new(1, 1));

    table.paste(&[vec!["Z".to_string()]]);
    assert_eq!(cells(&table), rows(&[&["Z", "Z"], &["Z", "Z"]]));
    assert_eq!(table.history_length(), 1);

    table.undo();
    assert_eq!(cells(&table), rows(&[&["1", "2"], &["3", "4"]]));
}

#[test]
fn test_added_column_undone_out_of_order() {
    let mut table = test_controller(&["A"], &[&["a"]]);
    table.add_column("B");
    table.set_text(0, 1, "b");
    table.add_column("C");

    // Undo C, then the edit, then B; each removes only what it added
    table.undo();
    assert_eq!(table.store().headers(), ["A", "B"]);
    table.undo();
    table.undo();
    assert_eq!(table.store().headers(), ["A"]);
    assert_eq!(cells(&table), rows(&[&["a"]]));

    table.redo();
    table.redo();
    table.redo();
    assert_eq!(table.store().headers(), ["A", "B", "C"]);
    assert_eq!(cells(&table), rows(&[&["a", "b", ""]]));
}

#[test]
fn test_selection_restored_around_replay() {
    let mut table = test_controller(&["A", "B"], &[&["1", "2"], &["3", "4"]]);
    table.select_cell(0, 0);

    let mut tx = table.transaction("Fill");
    tx.set_text(1, 1, "x");
    tx.select_cell(1, 1);
    drop(tx);

    let group = &table.history().groups()[0];
    assert_eq!(group.pre_selection().current(), CellPosition::new(0, 0));
    assert_eq!(group.post_selection().current(), CellPosition::new(1, 1));
    assert_eq!(
        group.post_selection().ranges(),
        [CellRange::cell(CellPosition::new(1, 1))]
    );

    table.select_cell(0, 1);
    table.undo();
    assert_eq!(table.selection().current(), CellPosition::new(0, 0));
    assert!(table.selection().primary_range().contains(CellPosition::new(0, 0)));
    table.redo();
    assert_eq!(table.selection().current(), CellPosition::new(1, 1));
}

#[test]
fn test_events_report_each_step() {
    let mut table = test_controller(&["A"], &[&["a"]]);
    table.with_transaction("Edit", |t| t.set_text(0, 0, "b"));
    table.undo();
    table.redo();

    assert_eq!(
        table.drain_events(),
        vec![
            HistoryEvent::Committed {
                name: "Edit".into()
            },
            HistoryEvent::Undone {
                name: "Edit".into()
            },
            HistoryEvent::Redone {
                name: "Edit".into()
            },
        ]
    );
}
