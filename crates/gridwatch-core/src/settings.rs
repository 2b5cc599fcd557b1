//! Explicit configuration passed into every command.

use crate::error::{GridwatchError, Result};
use gridwatch_engine::dedup::KeyMode;
use gridwatch_engine::engine::CellRef;
use gridwatch_engine::style::Palette;
use serde::{Deserialize, Serialize};

/// Where alert notifications go.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    /// Log the alert as a warning.
    Log,
    /// Append the alert to `outbox.txt` in the workbook.
    #[default]
    Outbox,
    /// Drop alerts.
    None,
}

/// Settings recognized in `config.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Sheet holding the data to process.
    pub source_sheet: String,
    /// Sheet the summary report is written to.
    pub summary_sheet: String,
    /// Watched column, as letters ("C") or a 1-based number ("3").
    pub watch_column: String,
    pub threshold: f64,
    /// Alert recipient. Empty means the acting user.
    pub alert_recipient: String,
    pub notifier: NotifierKind,
    pub dedup_key: KeyMode,
    pub style: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            source_sheet: "Data".to_string(),
            summary_sheet: "Summary".to_string(),
            watch_column: "C".to_string(),
            threshold: 100.0,
            alert_recipient: String::new(),
            notifier: NotifierKind::default(),
            dedup_key: KeyMode::default(),
            style: Palette::default(),
        }
    }
}

impl Settings {
    /// Zero-based index of the watched column.
    pub fn watched_column(&self) -> Result<usize> {
        parse_column(&self.watch_column)
    }
}

/// Parse a column given as letters ("C", "aa") or a 1-based number ("3").
pub fn parse_column(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    let parsed = if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        trimmed.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
    } else {
        CellRef::letters_to_col(trimmed)
    };
    parsed.ok_or_else(|| GridwatchError::InvalidColumn(input.to_string()))
}
