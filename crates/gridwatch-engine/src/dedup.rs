//! Duplicate row removal.
//!
//! Rows are compared by a [`RowKey`]. The default key is structural: each cell
//! contributes its type tag and value, so the text `"10"` and the number `10`
//! never collide. [`KeyMode::Joined`] flattens stored field strings with a separator
//! instead, which matches older sheets that were deduplicated that way.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::engine::{Cell, Grid};

/// Separator used by [`KeyMode::Joined`] (ASCII unit separator).
pub const JOINED_KEY_SEPARATOR: char = '\u{1f}';

/// How rows are keyed when looking for duplicates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    #[default]
    Structural,
    Joined,
}

/// One cell's contribution to a structural key.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum KeyPart {
    Empty,
    Text(String),
    /// Bit pattern of the value, with -0.0 folded into 0.0. Numbers are only
    /// typed when their decimal text fits an `f64` exactly, so equal bits mean
    /// equal decimals.
    Number(u64),
    Boolean(bool),
    Date(NaiveDate),
}

impl From<&Cell> for KeyPart {
    fn from(cell: &Cell) -> Self {
        match cell {
            Cell::Empty => KeyPart::Empty,
            Cell::Text(s) => KeyPart::Text(s.clone()),
            Cell::Number(n) => {
                let value = if n.value() == 0.0 { 0.0 } else { n.value() };
                KeyPart::Number(value.to_bits())
            }
            Cell::Boolean(b) => KeyPart::Boolean(*b),
            Cell::Date(d) => KeyPart::Date(*d),
        }
    }
}

/// Identity of a row for duplicate detection.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum RowKey {
    Structural(Vec<KeyPart>),
    Joined(String),
}

/// Compute the key of a row.
pub fn row_key(row: &[Cell], mode: KeyMode) -> RowKey {
    match mode {
        KeyMode::Structural => RowKey::Structural(row.iter().map(KeyPart::from).collect()),
        KeyMode::Joined => {
            let mut key = String::new();
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    key.push(JOINED_KEY_SEPARATOR);
                }
                key.push_str(&cell.to_field());
            }
            RowKey::Joined(key)
        }
    }
}

/// Drop data rows whose key was already seen, keeping first occurrences in order.
///
/// The header is kept unconditionally and never enters the seen set.
/// Returns the filtered grid and the number of rows removed.
pub fn deduplicate(grid: &Grid, mode: KeyMode) -> (Grid, usize) {
    let mut seen: HashSet<RowKey> = HashSet::new();
    let mut kept = Vec::with_capacity(grid.row_count());
    kept.push(grid.header().to_vec());

    let mut removed = 0;
    for (_, row) in grid.data_rows() {
        if seen.insert(row_key(row, mode)) {
            kept.push(row.clone());
        } else {
            removed += 1;
        }
    }

    let filtered = Grid::from_rows(kept).unwrap_or_else(|| grid.clone());
    (filtered, removed)
}
