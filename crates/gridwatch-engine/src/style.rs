//! Row styling.
//!
//! A row's style depends only on its index: the header is bold on its own
//! background, data rows alternate between two band colors.

use serde::{Deserialize, Serialize};

/// Visual attributes applied to a whole row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowStyle {
    pub bold: bool,
    pub background: String,
    pub font_color: String,
}

/// Colors used by [`row_style`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub header_background: String,
    pub header_font_color: String,
    pub band_even: String,
    pub band_odd: String,
    pub font_color: String,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            header_background: "#4285F4".to_string(),
            header_font_color: "#FFFFFF".to_string(),
            band_even: "#FFFFFF".to_string(),
            band_odd: "#F3F3F3".to_string(),
            font_color: "#000000".to_string(),
        }
    }
}

/// Style for the row at `index` (row 0 is the header).
pub fn row_style(index: usize, palette: &Palette) -> RowStyle {
    if index == 0 {
        return RowStyle {
            bold: true,
            background: palette.header_background.clone(),
            font_color: palette.header_font_color.clone(),
        };
    }
    let background = if index % 2 == 0 {
        &palette.band_even
    } else {
        &palette.band_odd
    };
    RowStyle {
        bold: false,
        background: background.clone(),
        font_color: palette.font_color.clone(),
    }
}

/// Styles for every row of a grid with `row_count` rows.
pub fn grid_styles(row_count: usize, palette: &Palette) -> Vec<(usize, RowStyle)> {
    (0..row_count).map(|i| (i, row_style(i, palette))).collect()
}
