//! Markdown export functionality

use gridwatch_engine::engine::Row;
use std::io::Write;
use std::path::Path;

/// Write a table to a markdown file. The first row becomes the table header.
pub fn write_markdown(path: &Path, title: &str, rows: &[Row]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    render_markdown(&mut file, title, rows)
}

pub(crate) fn render_markdown<W: Write>(out: &mut W, title: &str, rows: &[Row]) -> std::io::Result<()> {
    writeln!(out, "# {}", title)?;
    writeln!(out)?;

    let Some((header, body)) = rows.split_first() else {
        writeln!(out, "*Empty table*")?;
        return Ok(());
    };

    write!(out, "|")?;
    for cell in header {
        write!(out, " {} |", escape_markdown(&cell.to_string()))?;
    }
    writeln!(out)?;

    write!(out, "|")?;
    for _ in header {
        write!(out, "---|")?;
    }
    writeln!(out)?;

    for row in body {
        write!(out, "|")?;
        for col in 0..header.len() {
            let display = row.get(col).map(|c| c.to_string()).unwrap_or_default();
            write!(out, " {} |", escape_markdown(&display))?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
