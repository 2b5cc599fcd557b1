use super::Workbook;
use crate::error::{GridwatchError, Result};
use crate::storage::{read_sheet, read_styles, write_report, write_sheet, write_styles};
use crate::traits::{DataSource, ReportSink, StyleSink};
use gridwatch_engine::engine::Row;
use gridwatch_engine::style::RowStyle;
use std::collections::BTreeMap;

impl DataSource for Workbook {
    fn get_grid(&self, name: &str) -> Result<Vec<Row>> {
        let path = self.sheet_path(name)?;
        if !path.is_file() {
            return Err(GridwatchError::SourceNotFound(name.to_string()));
        }
        read_sheet(&path)
    }

    fn replace_grid(&mut self, name: &str, rows: &[Row]) -> Result<()> {
        let path = self.sheet_path(name)?;
        if !path.is_file() {
            return Err(GridwatchError::SourceNotFound(name.to_string()));
        }
        write_sheet(&path, rows)
    }
}

impl ReportSink for Workbook {
    fn write_table(&mut self, destination: &str, rows: &[Row]) -> Result<()> {
        let path = self.sheet_path(destination)?;
        write_report(&path, rows)
    }
}

impl StyleSink for Workbook {
    fn replace_row_styles(&mut self, name: &str, styles: &[(usize, RowStyle)]) -> Result<()> {
        let path = self.styles_path(name)?;
        let styles: BTreeMap<usize, RowStyle> = styles.iter().cloned().collect();
        write_styles(&path, &styles)
    }

    fn update_row_styles(&mut self, name: &str, styles: &[(usize, RowStyle)]) -> Result<()> {
        let path = self.styles_path(name)?;
        let mut current = read_styles(&path)?;
        current.extend(styles.iter().cloned());
        write_styles(&path, &current)
    }
}
