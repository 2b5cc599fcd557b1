//! Directory-backed workbook.
//!
//! Layout of a workbook directory:
//!
//! - `<sheet>.csv` - one file per sheet
//! - `<sheet>.styles.toml` - row styles for a sheet
//! - `triggers.toml` - installed edit triggers
//! - `outbox.txt` - alerts queued by the outbox notifier

mod io;
mod triggers;

use crate::error::{GridwatchError, Result};
use std::path::{Path, PathBuf};

const TRIGGERS_FILE: &str = "triggers.toml";
const OUTBOX_FILE: &str = "outbox.txt";

/// A workbook stored as a directory of CSV sheets.
#[derive(Clone, Debug)]
pub struct Workbook {
    dir: PathBuf,
}

impl Workbook {
    /// Open an existing workbook directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(GridwatchError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Workbook directory not found: {}", dir.display()),
            )));
        }
        Ok(Workbook { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn sheet_path(&self, name: &str) -> Result<PathBuf> {
        validate_sheet_name(name)?;
        Ok(self.dir.join(format!("{}.csv", name)))
    }

    pub fn styles_path(&self, name: &str) -> Result<PathBuf> {
        validate_sheet_name(name)?;
        Ok(self.dir.join(format!("{}.styles.toml", name)))
    }

    pub fn triggers_path(&self) -> PathBuf {
        self.dir.join(TRIGGERS_FILE)
    }

    pub fn outbox_path(&self) -> PathBuf {
        self.dir.join(OUTBOX_FILE)
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet_path(name).is_ok_and(|p| p.is_file())
    }
}

/// Sheet names become file names, so they must stay inside the workbook.
fn validate_sheet_name(name: &str) -> Result<()> {
    let bad = name.trim().is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(GridwatchError::InvalidSheetName(name.to_string()));
    }
    Ok(())
}
