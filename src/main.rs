//! Gridwatch - sheet summaries, duplicate removal, and threshold alerts

mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gridwatch_core::command::ABOUT_TEXT;
use gridwatch_core::notify::notifier_for;
use gridwatch_core::{CellRef, Command, GridwatchError, MENU, Settings, Workbook, dispatch};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gridwatch", version, about = "Summaries, dedup, and alerts for CSV workbooks")]
struct Cli {
    /// Workbook directory holding one <sheet>.csv per sheet
    #[arg(short, long, env = "GRIDWATCH_WORKBOOK", default_value = ".", global = true)]
    workbook: PathBuf,

    /// Settings file (default: <config dir>/gridwatch/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Data sheet to process
    #[arg(long, global = true)]
    source: Option<String>,

    /// Sheet the summary report is written to
    #[arg(long, global = true)]
    summary: Option<String>,

    /// Watched column, as letters or a 1-based number
    #[arg(long, global = true)]
    watch_column: Option<String>,

    /// Alert threshold
    #[arg(long, global = true, allow_negative_numbers = true)]
    threshold: Option<f64>,

    /// Alert recipient (default: current user@host)
    #[arg(long, global = true)]
    recipient: Option<String>,

    /// More log output (-v info, -vv debug). GRIDWATCH_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Generate Summary Report
    Summary {
        /// Also export the summary table as markdown
        #[arg(long)]
        markdown: Option<PathBuf>,
    },
    /// Remove Duplicate Rows
    Dedupe,
    /// Format All Rows
    Format,
    /// Manage the threshold alert trigger
    Alerts {
        #[command(subcommand)]
        action: AlertAction,
    },
    /// Set one cell and run the edit triggers
    Edit {
        /// Cell in A1 notation
        cell: CellRef,
        /// New value, typed the same way as a field read from the sheet
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Sheet to edit (default: the source sheet)
        #[arg(long)]
        sheet: Option<String>,
    },
    /// Show the about text
    About,
    /// List menu items
    Menu,
    /// Run a menu item by its identifier
    Run { id: String },
}

#[derive(Subcommand, Debug)]
enum AlertAction {
    /// Install the edit trigger
    Setup,
    /// Remove the edit trigger
    Remove,
    /// Show whether the trigger is installed
    Status,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env("GRIDWATCH_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn settings_for(cli: &Cli) -> Settings {
    let (mut settings, warnings) = config::load_settings(cli.config.as_deref());
    for warning in warnings {
        tracing::warn!("{}", warning);
    }
    if let Some(source) = &cli.source {
        settings.source_sheet = source.clone();
    }
    if let Some(summary) = &cli.summary {
        settings.summary_sheet = summary.clone();
    }
    if let Some(column) = &cli.watch_column {
        settings.watch_column = column.clone();
    }
    if let Some(threshold) = cli.threshold {
        settings.threshold = threshold;
    }
    if let Some(recipient) = &cli.recipient {
        settings.alert_recipient = recipient.clone();
    }
    settings
}

fn to_command(cmd: Cmd) -> anyhow::Result<Option<Command>> {
    let command = match cmd {
        Cmd::Summary { markdown } => Command::GenerateSummary { markdown },
        Cmd::Dedupe => Command::RemoveDuplicates,
        Cmd::Format => Command::FormatRows,
        Cmd::Alerts { action } => match action {
            AlertAction::Setup => Command::SetupAlert,
            AlertAction::Remove => Command::RemoveAlert,
            AlertAction::Status => Command::AlertStatus,
        },
        Cmd::Edit { cell, value, sheet } => Command::Edit { sheet, cell, value },
        Cmd::About => Command::About,
        Cmd::Menu => return Ok(None),
        Cmd::Run { id } => Command::from_menu_id(&id)?,
    };
    Ok(Some(command))
}

fn menu_listing() -> String {
    let width = MENU.iter().map(|item| item.id.len()).max().unwrap_or(0);
    MENU.iter()
        .map(|item| format!("{:width$}  {}", item.id, item.label, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let settings = settings_for(&cli);
    let Some(command) = to_command(cli.command)? else {
        return Ok(menu_listing());
    };
    if command == Command::About {
        return Ok(ABOUT_TEXT.to_string());
    }

    let mut workbook = Workbook::open(&cli.workbook)?;
    let notifier = notifier_for(&settings, workbook.outbox_path());
    tracing::debug!(workbook = %workbook.dir().display(), ?command, "dispatching");
    let message = dispatch(&command, &settings, &mut workbook, notifier.as_ref())
        .with_context(|| format!("in workbook {}", workbook.dir().display()))?;
    Ok(message)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(message) => {
            println!("{}", message);
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Some(e) = err.downcast_ref::<GridwatchError>()
                && e.is_informational()
            {
                println!("{}", e);
                return ExitCode::SUCCESS;
            }
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
