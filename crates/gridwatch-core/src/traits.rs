//! Collaborator interfaces the commands are written against.
//!
//! [`crate::Workbook`] implements the storage-side traits on top of a
//! directory; [`crate::notify`] provides the [`Notifier`] backends.

use crate::error::Result;
use gridwatch_engine::engine::Row;
use gridwatch_engine::style::RowStyle;

/// Named, rectangular value grids.
pub trait DataSource {
    /// All rows of a sheet. Fails with `SourceNotFound` if the sheet is missing.
    fn get_grid(&self, name: &str) -> Result<Vec<Row>>;

    /// Replace a sheet's rows as a whole. Partial updates are not supported.
    fn replace_grid(&mut self, name: &str, rows: &[Row]) -> Result<()>;
}

/// Destination for generated tables.
pub trait ReportSink {
    /// Create or overwrite `destination` with `rows`.
    fn write_table(&mut self, destination: &str, rows: &[Row]) -> Result<()>;
}

/// Per-row visual styling of a sheet.
pub trait StyleSink {
    /// Replace all row styles of a sheet.
    fn replace_row_styles(&mut self, name: &str, styles: &[(usize, RowStyle)]) -> Result<()>;

    /// Set styles for the given rows, keeping the rest.
    fn update_row_styles(&mut self, name: &str, styles: &[(usize, RowStyle)]) -> Result<()>;
}

/// Installed edit observers, identified by handler name.
pub trait TriggerRegistry {
    /// Install `handler` for edit events. Returns false if it was already installed.
    fn install(&mut self, handler: &str) -> Result<bool>;

    /// Remove every trigger bound to `handler`. Returns how many were removed.
    fn remove(&mut self, handler: &str) -> Result<usize>;

    fn is_installed(&self, handler: &str) -> Result<bool>;
}

/// Outbound message delivery. Fire-and-forget: failures are the notifier's concern.
pub trait Notifier {
    fn notify(&self, recipient: &str, subject: &str, body: &str);
}
