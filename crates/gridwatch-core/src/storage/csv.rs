//! CSV sheet storage

use crate::error::Result;
use gridwatch_engine::engine::{Cell, Row};
use std::io::{Read, Write};
use std::path::Path;

/// Read every record of a CSV file as typed cells.
pub fn read_sheet(path: &Path) -> Result<Vec<Row>> {
    let file = std::fs::File::open(path)?;
    read_rows(file)
}

pub(crate) fn read_rows<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::from_field).collect());
    }
    Ok(rows)
}

/// Write rows to a CSV file, replacing it as a whole.
///
/// The data goes to a sibling temporary file first and is then renamed over
/// the target, so readers never observe a half-written sheet.
pub fn write_sheet(path: &Path, rows: &[Row]) -> Result<()> {
    replace_file(path, rows, false)
}

/// Like [`write_sheet`], but text that a spreadsheet app would run as a
/// formula is prefixed with `'`. Used for generated reports.
pub fn write_report(path: &Path, rows: &[Row]) -> Result<()> {
    replace_file(path, rows, true)
}

fn replace_file(path: &Path, rows: &[Row], guard_formulas: bool) -> Result<()> {
    let tmp = path.with_extension("csv.tmp");
    {
        let file = std::fs::File::create(&tmp)?;
        write_rows(file, rows, guard_formulas)?;
    }
    std::fs::rename(&tmp, path)?;
    Ok(())
}

pub(crate) fn write_rows<W: Write>(writer: W, rows: &[Row], guard_formulas: bool) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(writer);
    for row in rows {
        writer.write_record(row.iter().map(|cell| storage_field(cell, guard_formulas)))?;
    }
    writer.flush()?;
    Ok(())
}

fn storage_field(cell: &Cell, guard_formulas: bool) -> String {
    match cell {
        Cell::Text(s) if guard_formulas => guard_formula(s),
        other => other.to_field(),
    }
}

/// Guard against CSV formula injection in spreadsheet apps.
fn guard_formula(field: &str) -> String {
    let first_non_space = field.trim_start_matches([' ', '\t']).chars().next();
    if matches!(first_non_space, Some('=' | '+' | '-' | '@')) {
        format!("'{}", field)
    } else {
        field.to_string()
    }
}
