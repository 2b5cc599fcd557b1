//! Installed trigger list (`triggers.toml`)

use crate::error::{GridwatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Event a trigger observes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerEvent {
    Edit,
}

/// One installed trigger: an event bound to a handler name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerEntry {
    pub handler: String,
    pub event: TriggerEvent,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TriggersFile {
    #[serde(default)]
    triggers: Vec<TriggerEntry>,
}

/// Read installed triggers. A missing file means none are installed.
pub fn read_triggers(path: &Path) -> Result<Vec<TriggerEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)?;
    let file: TriggersFile = toml::from_str(&content).map_err(|source| GridwatchError::TomlParse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(file.triggers)
}

pub fn write_triggers(path: &Path, triggers: &[TriggerEntry]) -> Result<()> {
    let file = TriggersFile {
        triggers: triggers.to_vec(),
    };
    let content = toml::to_string(&file).map_err(|source| GridwatchError::TomlWrite {
        path: path.display().to_string(),
        source,
    })?;
    std::fs::write(path, content)?;
    Ok(())
}
