//! Command dispatch.
//!
//! Every user-facing action is a [`Command`]. Front ends map their own input
//! (CLI subcommands, menu identifiers) onto a command and call [`dispatch`],
//! which runs exactly one operation and returns one confirmation message.

use crate::error::{GridwatchError, Result};
use crate::notify::resolve_recipient;
use crate::pipeline;
use crate::settings::Settings;
use crate::storage::write_markdown;
use crate::traits::{DataSource, Notifier, ReportSink, StyleSink, TriggerRegistry};
use gridwatch_engine::engine::{Cell, CellRef};
use gridwatch_engine::stats::summary_table;
use gridwatch_engine::style::{grid_styles, row_style};
use std::path::PathBuf;

/// Handler name of the threshold alert edit trigger.
pub const ALERT_HANDLER: &str = "on_edit_threshold";

/// A menu entry: stable identifier plus display label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: &'static str,
}

pub const MENU: &[MenuItem] = &[
    MenuItem { id: "generate_summary", label: "Generate Summary Report" },
    MenuItem { id: "remove_duplicates", label: "Remove Duplicate Rows" },
    MenuItem { id: "format_rows", label: "Format All Rows" },
    MenuItem { id: "setup_alert", label: "Set Up Threshold Alert" },
    MenuItem { id: "remove_alert", label: "Remove Threshold Alert" },
    MenuItem { id: "about", label: "About" },
];

pub const ABOUT_TEXT: &str = concat!(
    "Gridwatch ",
    env!("CARGO_PKG_VERSION"),
    "\n\n",
    "Formats rows on edit, summarizes numeric columns, removes duplicate rows,\n",
    "and sends an alert when the watched column goes over the threshold.",
);

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    GenerateSummary { markdown: Option<PathBuf> },
    RemoveDuplicates,
    FormatRows,
    SetupAlert,
    RemoveAlert,
    AlertStatus,
    About,
    /// A single cell edit, followed by the edit observers.
    Edit {
        sheet: Option<String>,
        cell: CellRef,
        value: String,
    },
}

impl Command {
    /// Resolve a menu identifier to its command.
    pub fn from_menu_id(id: &str) -> Result<Command> {
        let command = match id.trim() {
            "generate_summary" => Command::GenerateSummary { markdown: None },
            "remove_duplicates" => Command::RemoveDuplicates,
            "format_rows" => Command::FormatRows,
            "setup_alert" => Command::SetupAlert,
            "remove_alert" => Command::RemoveAlert,
            "about" => Command::About,
            other => return Err(GridwatchError::UnknownMenuItem(other.to_string())),
        };
        Ok(command)
    }
}

/// Run one command against a workbook and return its confirmation message.
pub fn dispatch<W>(
    command: &Command,
    settings: &Settings,
    workbook: &mut W,
    notifier: &dyn Notifier,
) -> Result<String>
where
    W: DataSource + ReportSink + StyleSink + TriggerRegistry,
{
    match command {
        Command::GenerateSummary { markdown } => {
            generate_summary(settings, workbook, markdown.as_ref())
        }
        Command::RemoveDuplicates => {
            let removed = pipeline::deduplicate(workbook, &settings.source_sheet, settings.dedup_key)?;
            Ok(format!(
                "Removed {} duplicate row{} from '{}'",
                removed,
                plural(removed),
                settings.source_sheet
            ))
        }
        Command::FormatRows => {
            let grid = pipeline::load(&*workbook, &settings.source_sheet)?;
            let styles = grid_styles(grid.row_count(), &settings.style);
            workbook.replace_row_styles(&settings.source_sheet, &styles)?;
            Ok(format!(
                "Formatted {} row{} in '{}'",
                styles.len(),
                plural(styles.len()),
                settings.source_sheet
            ))
        }
        Command::SetupAlert => {
            let column = settings.watched_column()?;
            let watched = CellRef::col_to_letters(column);
            if workbook.install(ALERT_HANDLER)? {
                tracing::info!(handler = ALERT_HANDLER, "installed edit trigger");
                Ok(format!(
                    "Threshold alert enabled: column {} > {}",
                    watched, settings.threshold
                ))
            } else {
                Ok(format!(
                    "Threshold alert already enabled: column {} > {}",
                    watched, settings.threshold
                ))
            }
        }
        Command::RemoveAlert => {
            let removed = workbook.remove(ALERT_HANDLER)?;
            if removed == 0 {
                Ok("No threshold alert was enabled".to_string())
            } else {
                tracing::info!(handler = ALERT_HANDLER, removed, "removed edit trigger");
                Ok("Threshold alert removed".to_string())
            }
        }
        Command::AlertStatus => {
            if workbook.is_installed(ALERT_HANDLER)? {
                let watched = CellRef::col_to_letters(settings.watched_column()?);
                Ok(format!(
                    "Threshold alert enabled: column {} > {}, notifying {}",
                    watched,
                    settings.threshold,
                    resolve_recipient(&settings.alert_recipient)
                ))
            } else {
                Ok("Threshold alert disabled".to_string())
            }
        }
        Command::About => Ok(ABOUT_TEXT.to_string()),
        Command::Edit { sheet, cell, value } => {
            let sheet = sheet.as_deref().unwrap_or(&settings.source_sheet);
            on_edit(settings, workbook, notifier, sheet, *cell, value)
        }
    }
}

fn generate_summary<W>(settings: &Settings, workbook: &mut W, markdown: Option<&PathBuf>) -> Result<String>
where
    W: DataSource + ReportSink,
{
    let grid = pipeline::load(&*workbook, &settings.source_sheet)?;
    let stats = pipeline::summarize(&grid)?;
    let table = summary_table(&stats);
    // Export first: a failed export must not leave a fresh summary sheet behind.
    if let Some(path) = markdown {
        write_markdown(path, &settings.summary_sheet, &table)?;
    }
    workbook.write_table(&settings.summary_sheet, &table)?;
    tracing::info!(
        source = %settings.source_sheet,
        destination = %settings.summary_sheet,
        columns = stats.len(),
        "summary written"
    );

    let mut message = format!(
        "Summary of {} numeric column{} written to '{}'",
        stats.len(),
        plural(stats.len()),
        settings.summary_sheet
    );
    if let Some(path) = markdown {
        message.push_str(&format!(" and {}", path.display()));
    }
    Ok(message)
}

/// Edit handling: write the cell, restyle its row, then run the alert trigger.
fn on_edit<W>(
    settings: &Settings,
    workbook: &mut W,
    notifier: &dyn Notifier,
    sheet: &str,
    cell: CellRef,
    value: &str,
) -> Result<String>
where
    W: DataSource + StyleSink + TriggerRegistry,
{
    // Resolve the observer before writing, so a bad setting leaves the sheet untouched.
    let watched = if sheet == settings.source_sheet && workbook.is_installed(ALERT_HANDLER)? {
        Some(settings.watched_column()?)
    } else {
        None
    };

    let grid = pipeline::set_cell(workbook, sheet, cell, Cell::from_input(value))?;
    workbook.update_row_styles(sheet, &[(cell.row, row_style(cell.row, &settings.style))])?;
    let mut message = format!("Set {}!{}", sheet, cell);

    if let Some(watched) = watched
        && cell.col == watched
        && let Some(event) = pipeline::check_row(&grid, cell.row, watched, settings.threshold)
    {
        let recipient = resolve_recipient(&settings.alert_recipient);
        let body = event.body(sheet, &grid.column_name(watched));
        notifier.notify(&recipient, &event.subject(sheet), &body);
        tracing::info!(cell = %event.cell_ref(), value = event.value, "threshold exceeded");
        message.push_str(&format!("; alert sent to {}", recipient));
    }
    Ok(message)
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Workbook;
    use crate::settings::NotifierKind;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: RefCell<Vec<(String, String, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, recipient: &str, subject: &str, body: &str) {
            self.sent
                .borrow_mut()
                .push((recipient.to_string(), subject.to_string(), body.to_string()));
        }
    }

    fn setup(data: &str) -> (tempfile::TempDir, Workbook, Settings) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Data.csv"), data).unwrap();
        let wb = Workbook::open(dir.path()).unwrap();
        let settings = Settings {
            alert_recipient: "ops@example.com".to_string(),
            notifier: NotifierKind::None,
            ..Settings::default()
        };
        (dir, wb, settings)
    }

    fn run(command: Command, settings: &Settings, wb: &mut Workbook) -> Result<String> {
        dispatch(&command, settings, wb, &RecordingNotifier::default())
    }

    #[test]
    fn test_menu_ids_resolve() {
        for item in MENU {
            assert!(Command::from_menu_id(item.id).is_ok(), "{}", item.id);
        }
        assert!(matches!(
            Command::from_menu_id("explode"),
            Err(GridwatchError::UnknownMenuItem(_))
        ));
    }

    #[test]
    fn test_summary_written_and_stable() {
        let (dir, mut wb, settings) = setup("item,qty,price\nbolt,10,1.5\nnut,20,x\nwasher,30,\n");
        let message = run(Command::GenerateSummary { markdown: None }, &settings, &mut wb).unwrap();
        assert_eq!(message, "Summary of 2 numeric columns written to 'Summary'");

        let summary_path = dir.path().join("Summary.csv");
        let first = std::fs::read(&summary_path).unwrap();
        assert_eq!(
            String::from_utf8(first.clone()).unwrap(),
            "Column,Count,Sum,Average,Max,Min\nqty,3,60,20,30,10\nprice,1,1.5,1.5,1.5,1.5\n"
        );

        run(Command::GenerateSummary { markdown: None }, &settings, &mut wb).unwrap();
        assert_eq!(std::fs::read(&summary_path).unwrap(), first);
    }

    #[test]
    fn test_summary_markdown_export() {
        let (dir, mut wb, settings) = setup("a\n1\n2\n");
        let md = dir.path().join("summary.md");
        run(Command::GenerateSummary { markdown: Some(md.clone()) }, &settings, &mut wb).unwrap();
        let content = std::fs::read_to_string(md).unwrap();
        assert!(content.starts_with("# Summary\n"));
        assert!(content.contains("| a | 2 | 3 | 1.50 | 2 | 1 |"));
    }

    #[test]
    fn test_summary_informational_outcomes() {
        let (dir, mut wb, settings) = setup("name\nx\n");
        let err = run(Command::GenerateSummary { markdown: None }, &settings, &mut wb).unwrap_err();
        assert!(matches!(err, GridwatchError::NoNumericColumns));
        assert!(!dir.path().join("Summary.csv").exists());

        std::fs::write(dir.path().join("Data.csv"), "a,b\n").unwrap();
        let err = run(Command::GenerateSummary { markdown: None }, &settings, &mut wb).unwrap_err();
        assert!(matches!(err, GridwatchError::EmptySource(_)));
        assert!(err.is_informational());
    }

    #[test]
    fn test_missing_source_is_fatal() {
        let (_dir, mut wb, mut settings) = setup("a\n1\n");
        settings.source_sheet = "Nope".to_string();
        let err = run(Command::RemoveDuplicates, &settings, &mut wb).unwrap_err();
        assert!(matches!(err, GridwatchError::SourceNotFound(_)));
        assert!(!err.is_informational());
    }

    #[test]
    fn test_remove_duplicates() {
        let (dir, mut wb, settings) = setup("k,v\nA,1\nB,2\nA,1\nC,3\nB,2\n");
        let message = run(Command::RemoveDuplicates, &settings, &mut wb).unwrap();
        assert_eq!(message, "Removed 2 duplicate rows from 'Data'");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("Data.csv")).unwrap(),
            "k,v\nA,1\nB,2\nC,3\n"
        );

        let err = run(Command::RemoveDuplicates, &settings, &mut wb).unwrap_err();
        assert!(matches!(err, GridwatchError::NoDuplicatesFound(_)));
    }

    #[test]
    fn test_format_rows_is_idempotent() {
        let (dir, mut wb, settings) = setup("a\n1\n2\n3\n");
        let message = run(Command::FormatRows, &settings, &mut wb).unwrap();
        assert_eq!(message, "Formatted 4 rows in 'Data'");
        let styles_path = dir.path().join("Data.styles.toml");
        let first = std::fs::read_to_string(&styles_path).unwrap();
        run(Command::FormatRows, &settings, &mut wb).unwrap();
        assert_eq!(std::fs::read_to_string(&styles_path).unwrap(), first);
    }

    #[test]
    fn test_alert_setup_and_removal() {
        let (_dir, mut wb, settings) = setup("a\n1\n");
        assert_eq!(
            run(Command::SetupAlert, &settings, &mut wb).unwrap(),
            "Threshold alert enabled: column C > 100"
        );
        assert!(run(Command::SetupAlert, &settings, &mut wb).unwrap().contains("already"));
        assert!(run(Command::AlertStatus, &settings, &mut wb).unwrap().contains("ops@example.com"));
        assert_eq!(run(Command::RemoveAlert, &settings, &mut wb).unwrap(), "Threshold alert removed");
        assert_eq!(
            run(Command::RemoveAlert, &settings, &mut wb).unwrap(),
            "No threshold alert was enabled"
        );
    }

    fn edit(cell: &str, value: &str) -> Command {
        Command::Edit {
            sheet: None,
            cell: cell.parse().unwrap(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_edit_fires_only_above_threshold_when_installed() {
        let (dir, mut wb, settings) = setup("item,qty,amount\nbolt,1,10\nnut,2,20\n");
        let notifier = RecordingNotifier::default();

        // No trigger installed yet.
        dispatch(&edit("C2", "500"), &settings, &mut wb, &notifier).unwrap();
        assert!(notifier.sent.borrow().is_empty());

        dispatch(&Command::SetupAlert, &settings, &mut wb, &notifier).unwrap();

        dispatch(&edit("C2", "100"), &settings, &mut wb, &notifier).unwrap();
        assert!(notifier.sent.borrow().is_empty());

        let message = dispatch(&edit("C3", "101"), &settings, &mut wb, &notifier).unwrap();
        assert_eq!(message, "Set Data!C3; alert sent to ops@example.com");
        {
            let sent = notifier.sent.borrow();
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].0, "ops@example.com");
            assert_eq!(sent[0].1, "Threshold alert: Data C3");
            assert!(sent[0].2.contains("Value 101"));
            assert!(sent[0].2.contains("(amount)"));
        }

        // Same value again fires again; other columns never do.
        dispatch(&edit("C3", "101"), &settings, &mut wb, &notifier).unwrap();
        dispatch(&edit("B3", "999"), &settings, &mut wb, &notifier).unwrap();
        assert_eq!(notifier.sent.borrow().len(), 2);

        assert_eq!(
            std::fs::read_to_string(dir.path().join("Data.csv")).unwrap(),
            "item,qty,amount\nbolt,1,100\nnut,999,101\n"
        );
    }

    #[test]
    fn test_edit_header_never_fires_and_restyles_row() {
        let (dir, mut wb, settings) = setup("item,qty,amount\nbolt,1,10\n");
        let notifier = RecordingNotifier::default();
        dispatch(&Command::SetupAlert, &settings, &mut wb, &notifier).unwrap();

        dispatch(&edit("C1", "1000"), &settings, &mut wb, &notifier).unwrap();
        assert!(notifier.sent.borrow().is_empty());

        let styles = std::fs::read_to_string(dir.path().join("Data.styles.toml")).unwrap();
        assert!(styles.contains("index = 0"));
        assert!(styles.contains("bold = true"));
    }

    #[test]
    fn test_edit_reads_back_the_same_after_reload() {
        let (_dir, mut wb, settings) = setup("item,qty,amount\nbolt,1,10\n");
        let notifier = RecordingNotifier::default();
        dispatch(&Command::SetupAlert, &settings, &mut wb, &notifier).unwrap();
        dispatch(&edit("C2", "\"500\""), &settings, &mut wb, &notifier).unwrap();
        assert!(notifier.sent.borrow().is_empty());

        let rows = wb.get_grid("Data").unwrap();
        assert_eq!(rows[1][2], Cell::new_text("\"500\""));
        let message = run(Command::GenerateSummary { markdown: None }, &settings, &mut wb).unwrap();
        assert_eq!(message, "Summary of 1 numeric column written to 'Summary'");
    }

    #[test]
    fn test_remove_duplicates_keeps_distinct_long_ids() {
        let data = "id,name\n9007199254740993,alice\n9007199254740992,alice\n";
        let (dir, mut wb, settings) = setup(data);
        let err = run(Command::RemoveDuplicates, &settings, &mut wb).unwrap_err();
        assert!(matches!(err, GridwatchError::NoDuplicatesFound(_)));
        assert_eq!(std::fs::read_to_string(dir.path().join("Data.csv")).unwrap(), data);
    }

    #[test]
    fn test_rewrites_keep_untouched_fields_verbatim() {
        let (dir, mut wb, settings) = setup(
            "k,a,b,c\nx,1.50,true,2024-1-5\ny,+5,12345678901234567890,0.10\ny,+5,12345678901234567890,0.10\n",
        );
        let data_path = dir.path().join("Data.csv");
        assert_eq!(
            run(Command::RemoveDuplicates, &settings, &mut wb).unwrap(),
            "Removed 1 duplicate row from 'Data'"
        );
        assert_eq!(
            std::fs::read_to_string(&data_path).unwrap(),
            "k,a,b,c\nx,1.50,true,2024-1-5\ny,+5,12345678901234567890,0.10\n"
        );

        run(edit("D2", "7"), &settings, &mut wb).unwrap();
        assert_eq!(
            std::fs::read_to_string(&data_path).unwrap(),
            "k,a,b,c\nx,1.50,true,7\ny,+5,12345678901234567890,0.10\n"
        );
    }

    #[test]
    fn test_invalid_watch_column_fails_before_writing() {
        let (dir, mut wb, mut settings) = setup("a,b,c\n1,2,3\n");
        settings.watch_column = "0".to_string();
        wb.install(ALERT_HANDLER).unwrap();

        let err = run(edit("A2", "42"), &settings, &mut wb).unwrap_err();
        assert!(matches!(err, GridwatchError::InvalidColumn(_)));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("Data.csv")).unwrap(),
            "a,b,c\n1,2,3\n"
        );
        assert!(!dir.path().join("Data.styles.toml").exists());

        // Sheets nobody observes are still editable.
        std::fs::write(dir.path().join("Notes.csv"), "n\n").unwrap();
        let other = Command::Edit {
            sheet: Some("Notes".to_string()),
            cell: "A2".parse().unwrap(),
            value: "hi".to_string(),
        };
        assert_eq!(run(other, &settings, &mut wb).unwrap(), "Set Notes!A2");
    }

    #[test]
    fn test_edit_out_of_reach_is_rejected() {
        let (dir, mut wb, settings) = setup("a\n1\n");
        let err = run(edit("A4000000000", "1"), &settings, &mut wb).unwrap_err();
        assert!(matches!(err, GridwatchError::InvalidCellRef(_)));
        assert_eq!(std::fs::read_to_string(dir.path().join("Data.csv")).unwrap(), "a\n1\n");
    }

    #[test]
    fn test_format_header_only_is_informational() {
        let (dir, mut wb, settings) = setup("a,b\n");
        let err = run(Command::FormatRows, &settings, &mut wb).unwrap_err();
        assert!(matches!(err, GridwatchError::EmptySource(_)));
        assert!(err.is_informational());
        assert!(!dir.path().join("Data.styles.toml").exists());
    }

    #[test]
    fn test_failed_markdown_export_writes_no_summary() {
        let (dir, mut wb, settings) = setup("a\n1\n2\n");
        let md = dir.path().join("missing").join("summary.md");
        let err = run(Command::GenerateSummary { markdown: Some(md) }, &settings, &mut wb).unwrap_err();
        assert!(matches!(err, GridwatchError::Io(_)));
        assert!(!dir.path().join("Summary.csv").exists());
    }
}
