//! Grid-level operations with their error semantics.
//!
//! These sit between the pure engine functions and the collaborators: they load
//! sheets, decide when "nothing to do" is an informational error, and write back.

use crate::error::{GridwatchError, Result};
use crate::traits::DataSource;
use gridwatch_engine::dedup::{self, KeyMode};
use gridwatch_engine::engine::{Cell, CellRef, Grid};
use gridwatch_engine::monitor::{self, AlertEvent};
use gridwatch_engine::stats::{self, ColumnStat};

/// Load a sheet with at least one data row.
pub fn load<S: DataSource + ?Sized>(source: &S, name: &str) -> Result<Grid> {
    let grid = load_sheet(source, name)?;
    if !grid.has_data() {
        return Err(GridwatchError::EmptySource(name.to_string()));
    }
    tracing::debug!(sheet = name, rows = grid.row_count(), "loaded sheet");
    Ok(grid)
}

/// Load a sheet that may consist of only a header row.
pub fn load_sheet<S: DataSource + ?Sized>(source: &S, name: &str) -> Result<Grid> {
    Grid::from_rows(source.get_grid(name)?)
        .ok_or_else(|| GridwatchError::EmptySource(name.to_string()))
}

/// Per-column statistics. Fails with `NoNumericColumns` when no column has numbers.
pub fn summarize(grid: &Grid) -> Result<Vec<ColumnStat>> {
    let stats = stats::column_stats(grid);
    if stats.is_empty() {
        return Err(GridwatchError::NoNumericColumns);
    }
    Ok(stats)
}

/// Remove duplicate data rows from a sheet and write it back in full.
///
/// A sheet with no rows at all is `EmptySource`; one without duplicates is
/// `NoDuplicatesFound` and is left untouched. Returns the number of removed rows.
pub fn deduplicate<S: DataSource + ?Sized>(
    source: &mut S,
    name: &str,
    mode: KeyMode,
) -> Result<usize> {
    let grid = load_sheet(&*source, name)?;
    let (deduped, removed) = dedup::deduplicate(&grid, mode);
    if removed == 0 {
        return Err(GridwatchError::NoDuplicatesFound(name.to_string()));
    }
    source.replace_grid(name, deduped.rows())?;
    tracing::info!(sheet = name, removed, kept = deduped.row_count(), "removed duplicate rows");
    Ok(removed)
}

/// Largest sheet an edit may grow to.
pub const MAX_ROWS: usize = 1_048_576;
pub const MAX_COLUMNS: usize = 16_384;

/// Write one cell and persist the sheet. The grid grows to fit the target cell,
/// up to [`MAX_ROWS`] by [`MAX_COLUMNS`]; targets past that are `InvalidCellRef`.
///
/// Returns the updated grid.
pub fn set_cell<S: DataSource + ?Sized>(
    source: &mut S,
    name: &str,
    target: CellRef,
    value: Cell,
) -> Result<Grid> {
    if target.row >= MAX_ROWS || target.col >= MAX_COLUMNS {
        return Err(GridwatchError::InvalidCellRef(target.to_string()));
    }
    let mut rows = source.get_grid(name)?;
    if rows.len() <= target.row {
        let width = rows.first().map_or(0, Vec::len).max(1);
        rows.resize(target.row + 1, vec![Cell::Empty; width]);
    }
    let row = &mut rows[target.row];
    if row.len() <= target.col {
        row.resize(target.col + 1, Cell::Empty);
    }
    row[target.col] = value;

    source.replace_grid(name, &rows)?;
    tracing::info!(sheet = name, cell = %target, "cell updated");
    Grid::from_rows(rows).ok_or_else(|| GridwatchError::EmptySource(name.to_string()))
}

/// Threshold check for one row of a loaded grid.
pub fn check_row(grid: &Grid, row: usize, watched_column: usize, threshold: f64) -> Option<AlertEvent> {
    let cells = grid.row(row)?;
    monitor::check(row, cells, watched_column, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwatch_engine::engine::Row;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemorySource {
        sheets: HashMap<String, Vec<Row>>,
        writes: usize,
    }

    impl MemorySource {
        fn with_sheet(name: &str, csv: &str) -> Self {
            let rows = csv
                .lines()
                .map(|line| line.split(',').map(Cell::from_field).collect())
                .collect();
            let mut source = MemorySource::default();
            source.sheets.insert(name.to_string(), rows);
            source
        }
    }

    impl DataSource for MemorySource {
        fn get_grid(&self, name: &str) -> Result<Vec<Row>> {
            self.sheets
                .get(name)
                .cloned()
                .ok_or_else(|| GridwatchError::SourceNotFound(name.to_string()))
        }

        fn replace_grid(&mut self, name: &str, rows: &[Row]) -> Result<()> {
            self.writes += 1;
            self.sheets.insert(name.to_string(), rows.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_load_requires_data_rows() {
        let source = MemorySource::with_sheet("Data", "a,b");
        assert!(matches!(load(&source, "Data"), Err(GridwatchError::EmptySource(_))));
        assert!(matches!(load(&source, "Other"), Err(GridwatchError::SourceNotFound(_))));
    }

    #[test]
    fn test_summarize_without_numbers() {
        let source = MemorySource::with_sheet("Data", "name\nx\ny");
        let grid = load(&source, "Data").unwrap();
        assert!(matches!(summarize(&grid), Err(GridwatchError::NoNumericColumns)));
    }

    #[test]
    fn test_deduplicate_rewrites_only_when_needed() {
        let mut source = MemorySource::with_sheet("Data", "k,v\na,1\nb,2\na,1\nc,3\nb,2");
        assert_eq!(deduplicate(&mut source, "Data", KeyMode::Structural).unwrap(), 2);
        assert_eq!(source.writes, 1);
        assert_eq!(source.sheets["Data"].len(), 4);

        let second = deduplicate(&mut source, "Data", KeyMode::Structural);
        assert!(matches!(second, Err(GridwatchError::NoDuplicatesFound(_))));
        assert_eq!(source.writes, 1);
    }

    #[test]
    fn test_deduplicate_empty_and_header_only() {
        let mut empty = MemorySource::default();
        empty.sheets.insert("Data".to_string(), Vec::new());
        assert!(matches!(
            deduplicate(&mut empty, "Data", KeyMode::Structural),
            Err(GridwatchError::EmptySource(_))
        ));

        let mut header_only = MemorySource::with_sheet("Data", "a,b");
        assert!(matches!(
            deduplicate(&mut header_only, "Data", KeyMode::Structural),
            Err(GridwatchError::NoDuplicatesFound(_))
        ));
    }

    #[test]
    fn test_set_cell_grows_grid() {
        let mut source = MemorySource::with_sheet("Data", "a,b\n1,2");
        let target: CellRef = "D4".parse().unwrap();
        let grid = set_cell(&mut source, "Data", target, Cell::new_number(7.0)).unwrap();
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.row(3).unwrap()[3], Cell::new_number(7.0));
        assert_eq!(source.sheets["Data"][3].len(), 4);
    }

    #[test]
    fn test_check_row() {
        let source = MemorySource::with_sheet("Data", "item,qty,amount\nx,1,150\ny,2,100");
        let grid = load(&source, "Data").unwrap();
        assert!(check_row(&grid, 1, 2, 100.0).is_some());
        assert!(check_row(&grid, 2, 2, 100.0).is_none());
        assert!(check_row(&grid, 9, 2, 100.0).is_none());
    }

    #[test]
    fn test_set_cell_rejects_targets_out_of_reach() {
        let mut source = MemorySource::with_sheet("Data", "a,b\n1,2");
        for cell in ["A4000000000", "ZZZZZZZ1"] {
            let target: CellRef = cell.parse().unwrap();
            let err = set_cell(&mut source, "Data", target, Cell::new_number(1.0)).unwrap_err();
            assert!(matches!(err, GridwatchError::InvalidCellRef(_)), "{cell}");
        }
        assert_eq!(source.writes, 0);
        assert_eq!(source.sheets["Data"].len(), 2);
    }
}
