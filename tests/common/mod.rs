//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use gridedit::grid::Table;
use gridedit::model::AppModel;
use gridedit::runtime::Runtime;
use gridedit::table::TableController;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Build a table from literal headers and rows
pub fn test_table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table {
        headers: strings(headers),
        rows: rows.iter().map(|r| strings(r)).collect(),
    }
}

/// Controller over the given grid, with empty history
pub fn test_controller(headers: &[&str], rows: &[&[&str]]) -> TableController {
    TableController::from_table(test_table(headers, rows))
}

/// Model whose table holds the given grid
pub fn test_model(headers: &[&str], rows: &[&[&str]]) -> AppModel {
    AppModel {
        table: test_controller(headers, rows),
        ..AppModel::default()
    }
}

/// All cell texts, row by row
pub fn cells(table: &TableController) -> Vec<Vec<String>> {
    table.store().rows().to_vec()
}

/// Literal rows as owned strings, for comparing with [`cells`]
pub fn rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter().map(|r| strings(r)).collect()
}

/// Run a command script against `model` without touching the system
/// clipboard or the user's config; returns the model and everything printed
pub fn run_script(model: AppModel, script: &str) -> (AppModel, String) {
    let mut runtime = Runtime::headless(model, Vec::new());
    runtime
        .run(script.as_bytes())
        .expect("script should run without I/O errors");
    let (model, out) = runtime.into_parts();
    (model, String::from_utf8(out).expect("output should be UTF-8"))
}
