//! Row style sidecar files (`<sheet>.styles.toml`)

use crate::error::{GridwatchError, Result};
use gridwatch_engine::style::RowStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StylesFile {
    #[serde(default)]
    rows: Vec<StyledRow>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct StyledRow {
    index: usize,
    bold: bool,
    background: String,
    font_color: String,
}

/// Read row styles keyed by row index. A missing file means no styles.
pub fn read_styles(path: &Path) -> Result<BTreeMap<usize, RowStyle>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = std::fs::read_to_string(path)?;
    let file: StylesFile = toml::from_str(&content).map_err(|source| GridwatchError::TomlParse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(file
        .rows
        .into_iter()
        .map(|r| {
            let style = RowStyle {
                bold: r.bold,
                background: r.background,
                font_color: r.font_color,
            };
            (r.index, style)
        })
        .collect())
}

/// Write row styles, replacing the file.
pub fn write_styles(path: &Path, styles: &BTreeMap<usize, RowStyle>) -> Result<()> {
    let file = StylesFile {
        rows: styles
            .iter()
            .map(|(&index, style)| StyledRow {
                index,
                bold: style.bold,
                background: style.background.clone(),
                font_color: style.font_color.clone(),
            })
            .collect(),
    };
    let content = toml::to_string(&file).map_err(|source| GridwatchError::TomlWrite {
        path: path.display().to_string(),
        source,
    })?;
    std::fs::write(path, content)?;
    Ok(())
}
