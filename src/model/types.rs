//! Plain data shared by the sources, the grid and the session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SearchError;
use crate::search::normalize::normalize;

/// Smallest number of companies a search may ask for.
pub const MIN_COUNT: u32 = 1;

/// Largest number of companies a search may ask for.
pub const MAX_COUNT: u32 = 50;

/// A company name in display form.
///
/// The normalized form is derived on demand and never stored, so the display
/// string is always what gets written back to the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyName(String);

impl CompanyName {
    pub fn new(display: impl Into<String>) -> Self {
        Self(display.into())
    }

    pub fn display(&self) -> &str {
        &self.0
    }

    pub fn normalized(&self) -> String {
        normalize(&self.0)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CompanyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompanyName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CompanyName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Validated search input.
///
/// Construction is the validation step: a `SearchCriteria` always has
/// non-empty text and a count in `MIN_COUNT..=MAX_COUNT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    text: String,
    count: u32,
}

impl SearchCriteria {
    pub fn new(text: &str, count: u32) -> Result<Self, SearchError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SearchError::Validation(
                "Please enter search criteria".to_string(),
            ));
        }
        if !(MIN_COUNT..=MAX_COUNT).contains(&count) {
            return Err(SearchError::Validation(format!(
                "Please enter a valid number of companies ({MIN_COUNT}-{MAX_COUNT})"
            )));
        }
        Ok(Self {
            text: text.to_string(),
            count,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Raw value of a sheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Text content of a non-blank text cell.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Text(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Formatting applied to a written cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellStyle {
    pub fill_color: String,
    pub bold: bool,
}

/// Light green fill used to flag freshly added companies.
pub const DEFAULT_HIGHLIGHT: &str = "#90EE90";

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fill_color: DEFAULT_HIGHLIGHT.to_string(),
            bold: true,
        }
    }
}

/// A1-style cell address with a 1-based row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub column: String,
    pub row: u32,
}

impl CellRef {
    pub fn new(column: impl Into<String>, row: u32) -> Self {
        Self {
            column: column.into(),
            row,
        }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

/// Lifecycle of a search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Loading,
    ResultsReady,
    Error,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::ResultsReady => write!(f, "results ready"),
            Self::Error => write!(f, "error"),
        }
    }
}
