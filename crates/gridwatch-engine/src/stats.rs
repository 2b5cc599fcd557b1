//! Column-wise summary statistics.

use crate::engine::{Cell, Grid, Row, round2};

/// Header of the rendered summary table.
pub const SUMMARY_HEADER: [&str; 6] = ["Column", "Count", "Sum", "Average", "Max", "Min"];

/// Aggregate over the numeric cells of one column.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnStat {
    pub name: String,
    pub column: usize,
    pub count: usize,
    pub sum: f64,
    pub average: f64,
    pub max: f64,
    pub min: f64,
}

impl ColumnStat {
    /// Build a statistic from a column's numeric values. Returns None if there are none.
    pub fn from_values(name: String, column: usize, nums: &[f64]) -> Option<ColumnStat> {
        let (first, rest) = nums.split_first()?;
        let (mut max, mut min, mut sum) = (*first, *first, *first);
        for &n in rest {
            max = max.max(n);
            min = min.min(n);
            sum += n;
        }
        let count = nums.len();
        Some(ColumnStat {
            name,
            column,
            count,
            sum,
            average: sum / count as f64,
            max,
            min,
        })
    }

    /// One summary table row. Sum and average are rounded to 2 places here only.
    pub fn to_row(&self) -> Row {
        vec![
            Cell::new_text(&self.name),
            Cell::new_number(self.count as f64),
            Cell::new_number(round2(self.sum)),
            Cell::new_number(round2(self.average)),
            Cell::new_number(self.max),
            Cell::new_number(self.min),
        ]
    }
}

/// Compute statistics for every header column that holds at least one number.
///
/// Columns without numeric cells are left out. Output follows column order.
pub fn column_stats(grid: &Grid) -> Vec<ColumnStat> {
    (0..grid.width())
        .filter_map(|col| {
            let nums: Vec<f64> = grid
                .data_rows()
                .filter_map(|(_, row)| row.get(col).and_then(Cell::as_number))
                .collect();
            ColumnStat::from_values(grid.column_name(col), col, &nums)
        })
        .collect()
}

/// Render statistics as a table with a header row.
pub fn summary_table(stats: &[ColumnStat]) -> Vec<Row> {
    let header: Row = SUMMARY_HEADER.iter().map(|h| Cell::new_text(h)).collect();
    std::iter::once(header)
        .chain(stats.iter().map(ColumnStat::to_row))
        .collect()
}
