//! Selection bookkeeping for undo/redo.
//!
//! A transaction remembers the selection before it started and after it
//! committed, so replaying it highlights the region it touched. Selection is
//! never itself recorded as a command.

use serde::Serialize;

use crate::grid::CellPosition;

/// Rectangular cell range, inclusive on all sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellRange {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl CellRange {
    /// Build a range from two corners in any order
    pub fn new(a: CellPosition, b: CellPosition) -> Self {
        Self {
            top: a.row.min(b.row),
            left: a.col.min(b.col),
            bottom: a.row.max(b.row),
            right: a.col.max(b.col),
        }
    }

    /// Single-cell range
    pub fn cell(pos: CellPosition) -> Self {
        Self::new(pos, pos)
    }

    pub fn top_left(&self) -> CellPosition {
        CellPosition::new(self.top, self.left)
    }

    pub fn row_count(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn column_count(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        (self.top..=self.bottom).contains(&pos.row) && (self.left..=self.right).contains(&pos.col)
    }

    /// Iterate positions row by row
    pub fn positions(&self) -> impl Iterator<Item = CellPosition> + '_ {
        (self.top..=self.bottom)
            .flat_map(move |row| (self.left..=self.right).map(move |col| CellPosition::new(row, col)))
    }

    /// Shrink to a grid of `rows` × `cols`; `None` if nothing is left
    pub fn clamped(&self, rows: usize, cols: usize) -> Option<Self> {
        if self.top >= rows || self.left >= cols {
            return None;
        }
        Some(Self {
            top: self.top,
            left: self.left,
            bottom: self.bottom.min(rows - 1),
            right: self.right.min(cols - 1),
        })
    }
}

/// Opaque copy of the selection state taken at a transaction boundary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    current: CellPosition,
    ranges: Vec<CellRange>,
}

impl SelectionSnapshot {
    pub fn current(&self) -> CellPosition {
        self.current
    }

    pub fn ranges(&self) -> &[CellRange] {
        &self.ranges
    }
}

/// Source and sink of selection snapshots
///
/// The transaction manager captures at `begin`/`commit` and restores on
/// `undo`/`redo`; it never inspects the snapshot.
pub trait SelectionTracker {
    fn capture(&self) -> SelectionSnapshot;
    fn restore(&mut self, snapshot: &SelectionSnapshot);
}

/// The grid's active selection: a current cell plus selected ranges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridSelection {
    current: CellPosition,
    ranges: Vec<CellRange>,
}

impl GridSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> CellPosition {
        self.current
    }

    pub fn ranges(&self) -> &[CellRange] {
        &self.ranges
    }

    /// First selected range, falling back to the current cell
    pub fn primary_range(&self) -> CellRange {
        self.ranges
            .first()
            .copied()
            .unwrap_or_else(|| CellRange::cell(self.current))
    }

    /// Collapse the selection to a single cell
    pub fn select_cell(&mut self, pos: CellPosition) {
        self.current = pos;
        self.ranges = vec![CellRange::cell(pos)];
    }

    /// Select a rectangle; the current cell moves to `anchor`
    pub fn select_range(&mut self, anchor: CellPosition, head: CellPosition) {
        self.current = anchor;
        self.ranges = vec![CellRange::new(anchor, head)];
    }

    pub fn clear(&mut self) {
        self.current = CellPosition::default();
        self.ranges.clear();
    }

    /// Drop or shrink ranges that fall outside a grid of `rows` × `cols`
    pub fn clamp_to(&mut self, rows: usize, cols: usize) {
        self.ranges = self
            .ranges
            .iter()
            .filter_map(|r| r.clamped(rows, cols))
            .collect();
        self.current.row = self.current.row.min(rows.saturating_sub(1));
        self.current.col = self.current.col.min(cols.saturating_sub(1));
    }
}

impl SelectionTracker for GridSelection {
    fn capture(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            current: self.current,
            ranges: self.ranges.clone(),
        }
    }

    fn restore(&mut self, snapshot: &SelectionSnapshot) {
        self.clear();
        self.current = snapshot.current;
        self.ranges.extend_from_slice(&snapshot.ranges);
    }
}
