//! Rectangular grid: one header row followed by data rows.

use super::cell::Cell;

/// One row of cells.
pub type Row = Vec<Cell>;

/// A header row plus zero or more data rows.
///
/// Rows shorter than the header are padded with [`Cell::Empty`] on construction.
/// Longer rows are kept as-is; column-wise operations only look at header columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// Build a grid from raw rows. Returns None when there is no header row.
    pub fn from_rows(mut rows: Vec<Row>) -> Option<Grid> {
        let width = rows.first()?.len();
        for row in rows.iter_mut().skip(1) {
            if row.len() < width {
                row.resize(width, Cell::Empty);
            }
        }
        Some(Grid { rows })
    }

    pub fn header(&self) -> &[Cell] {
        &self.rows[0]
    }

    /// Header labels as display strings.
    pub fn header_names(&self) -> Vec<String> {
        self.header().iter().map(|c| c.to_string()).collect()
    }

    /// Label for a column, falling back to its letter when the header cell is blank.
    pub fn column_name(&self, col: usize) -> String {
        match self.header().get(col) {
            Some(cell) if !cell.is_empty() => cell.to_string(),
            _ => super::CellRef::col_to_letters(col),
        }
    }

    /// Number of columns (the header width).
    pub fn width(&self) -> usize {
        self.header().len()
    }

    /// Number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_data(&self) -> bool {
        self.rows.len() > 1
    }

    /// Data rows paired with their grid row index (the first data row is index 1).
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows.iter().enumerate().skip(1)
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}
