//! Grid data model.
//!
//! - [`Cell`], [`CellKind`] - Typed cell values as loaded from a sheet
//! - [`Grid`], [`Row`] - A header row followed by data rows
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`format_number`] - Format values for display

mod cell;
mod cell_ref;
mod format;
mod grid;

pub use cell::{Cell, CellKind, Number};
pub use cell_ref::CellRef;
pub use format::{format_number, format_number_exact, round2};
pub use grid::{Grid, Row};
