//! Threshold checks on a watched column.
//!
//! The check is stateless: each call looks at one row and either produces an
//! [`AlertEvent`] or nothing. No record of earlier alerts is kept, so a value
//! that is edited above the threshold again fires again.

use crate::engine::{Cell, CellRef, format_number_exact};

/// A threshold breach for one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct AlertEvent {
    /// Grid row index (the header is row 0).
    pub row: usize,
    pub column: usize,
    pub value: f64,
    pub threshold: f64,
}

impl AlertEvent {
    pub fn cell_ref(&self) -> CellRef {
        CellRef::new(self.column, self.row)
    }

    pub fn subject(&self, sheet: &str) -> String {
        format!("Threshold alert: {} {}", sheet, self.cell_ref())
    }

    pub fn body(&self, sheet: &str, column_name: &str) -> String {
        format!(
            "Value {} in sheet '{}', cell {} ({}) exceeds the threshold of {}.",
            format_number_exact(self.value),
            sheet,
            self.cell_ref(),
            column_name,
            format_number_exact(self.threshold),
        )
    }
}

/// Check one row's watched cell against a threshold.
///
/// Fires only for data rows (`row_index > 0`) whose watched cell is a number
/// strictly greater than `threshold`.
pub fn check(
    row_index: usize,
    row: &[Cell],
    watched_column: usize,
    threshold: f64,
) -> Option<AlertEvent> {
    if row_index == 0 {
        return None;
    }
    let value = row.get(watched_column)?.as_number()?;
    (value > threshold).then_some(AlertEvent {
        row: row_index,
        column: watched_column,
        value,
        threshold,
    })
}
