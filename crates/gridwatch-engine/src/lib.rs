//! gridwatch_engine - Grid model and the pure data pipeline.

pub mod dedup;
pub mod engine;
pub mod monitor;
pub mod stats;
pub mod style;

#[cfg(test)]
mod tests {
    use crate::dedup::{KeyMode, deduplicate};
    use crate::engine::{Cell, Grid};
    use crate::monitor::check;
    use crate::stats::{column_stats, summary_table};

    fn sample() -> Grid {
        let rows = [
            "Item,Region,Amount,Approved",
            "bolts,north,40,TRUE",
            "nuts,south,120,FALSE",
            "bolts,north,40,TRUE",
            "washers,east,n/a,",
        ];
        let rows = rows
            .iter()
            .map(|line| line.split(',').map(Cell::from_field).collect())
            .collect();
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_pipeline_on_one_grid() {
        let grid = sample();

        let stats = column_stats(&grid);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].name, "Amount");
        assert_eq!(stats[0].count, 3);
        assert_eq!(stats[0].sum, 200.0);
        assert_eq!(summary_table(&stats).len(), 2);

        let (deduped, removed) = deduplicate(&grid, KeyMode::Structural);
        assert_eq!(removed, 1);
        assert_eq!(deduped.row_count(), 4);

        let alerts: Vec<_> = grid
            .data_rows()
            .filter_map(|(i, row)| check(i, row, 2, 100.0))
            .collect();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].row, 2);
    }
}
