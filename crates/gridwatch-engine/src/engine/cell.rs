//! Cell values for the grid.
//!
//! A sheet is loaded as untyped text; [`Cell::from_field`] classifies each field
//! into one of the semantic types the pipeline understands.

use chrono::NaiveDate;
use std::fmt;

use super::format::{format_number, format_number_exact};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest digit run (integer part without leading zeros plus fraction part
/// without trailing zeros) that is still read as a number. Any decimal of up to
/// 15 significant digits maps to a distinct `f64`.
const MAX_EXACT_DIGITS: usize = 15;

/// A typed cell value.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(Number),
    Boolean(bool),
    Date(NaiveDate),
}

/// Type tag of a [`Cell`], without its payload.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum CellKind {
    Empty,
    Text,
    Number,
    Boolean,
    Date,
}

/// A numeric value together with the text it is stored as.
///
/// Numbers read from a sheet keep their field text (`"1.50"`, `"+5"`) so that
/// rewriting the sheet leaves them untouched. Equality compares values only.
#[derive(Clone, Debug)]
pub struct Number {
    value: f64,
    text: String,
}

impl Number {
    pub fn new(value: f64) -> Number {
        Number {
            value,
            text: format_number_exact(value),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Stored text of the number.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Parse plain decimal notation: optional sign, digits, optional fraction.
/// Exponents and values that an `f64` cannot hold exactly are rejected.
fn parse_decimal(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    if !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = int.trim_start_matches('0').len() + frac.trim_end_matches('0').len();
    if digits > MAX_EXACT_DIGITS {
        return None;
    }
    text.parse::<f64>().ok()
}

impl Cell {
    pub fn new_text(text: &str) -> Cell {
        Cell::Text(text.to_string())
    }

    pub fn new_number(n: f64) -> Cell {
        Cell::Number(Number::new(n))
    }

    /// Classify a raw field read from storage.
    ///
    /// Typing never loses the field: `to_field` gives back exactly `field`.
    /// - Empty string -> Empty
    /// - Surrounding whitespace -> Text, kept verbatim
    /// - TRUE / FALSE -> Boolean
    /// - YYYY-MM-DD (zero padded) -> Date
    /// - Plain decimal without leading zeros like "007" -> Number
    /// - Otherwise -> Text, including long IDs and exponent forms
    pub fn from_field(field: &str) -> Cell {
        if field.is_empty() {
            return Cell::Empty;
        }
        if field != field.trim() {
            return Cell::new_text(field);
        }

        match field {
            "TRUE" => return Cell::Boolean(true),
            "FALSE" => return Cell::Boolean(false),
            _ => {}
        }

        if let Ok(date) = NaiveDate::parse_from_str(field, DATE_FORMAT)
            && date.format(DATE_FORMAT).to_string() == field
        {
            return Cell::Date(date);
        }

        // "007" and "00123" are identifiers, not numbers. "0" and "0.5" are numbers.
        if field.starts_with('0')
            && field.chars().nth(1).is_some_and(|c| c.is_ascii_digit())
        {
            return Cell::new_text(field);
        }

        match parse_decimal(field) {
            Some(value) => Cell::Number(Number {
                value,
                text: field.to_string(),
            }),
            None => Cell::new_text(field),
        }
    }

    /// Parse user input for a single cell edit: trimmed, then typed like a
    /// stored field, so the edited cell reads back the same after a reload.
    pub fn from_input(input: &str) -> Cell {
        Cell::from_field(input.trim())
    }

    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Empty => CellKind::Empty,
            Cell::Text(_) => CellKind::Text,
            Cell::Number(_) => CellKind::Number,
            Cell::Boolean(_) => CellKind::Boolean,
            Cell::Date(_) => CellKind::Date,
        }
    }

    /// Numeric value of the cell, if it takes part in aggregation.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.value.is_finite() => Some(n.value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// String form used when writing the cell back to storage.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Number(n) => n.text.clone(),
            other => other.to_string(),
        }
    }
}

/// Display form, with numbers rounded for reports.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => f.write_str(&format_number(n.value)),
            Cell::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            Cell::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}
