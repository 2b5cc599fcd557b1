//! Storage for workbook sheets, reports, styles, and triggers

mod csv;
mod md;
mod styles;
mod triggers;

pub use self::csv::{read_sheet, write_report, write_sheet};
pub use md::write_markdown;
pub use styles::{read_styles, write_styles};
pub use triggers::{TriggerEntry, TriggerEvent, read_triggers, write_triggers};
