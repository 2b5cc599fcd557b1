//! Error types for Gridwatch core.

use thiserror::Error;

/// Errors that can occur while running a Gridwatch command
#[derive(Error, Debug)]
pub enum GridwatchError {
    #[error("Sheet '{0}' not found")]
    SourceNotFound(String),

    #[error("Sheet '{0}' has no data rows")]
    EmptySource(String),

    #[error("No numeric columns to summarize")]
    NoNumericColumns,

    #[error("No duplicate rows found in '{0}'")]
    NoDuplicatesFound(String),

    #[error("Invalid sheet name: {0:?}")]
    InvalidSheetName(String),

    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    #[error("Invalid column: {0:?}")]
    InvalidColumn(String),

    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse {path}: {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize {path}: {source}")]
    TomlWrite {
        path: String,
        #[source]
        source: toml::ser::Error,
    },
}

impl GridwatchError {
    /// Informational outcomes: nothing was done, but nothing went wrong either.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            GridwatchError::EmptySource(_)
                | GridwatchError::NoNumericColumns
                | GridwatchError::NoDuplicatesFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GridwatchError>;
