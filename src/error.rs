//! Error types for the search pipeline.

use thiserror::Error;

/// Failures of a candidate source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The completion endpoint answered with a non-success status. A rejected
    /// or missing credential lands here too.
    #[error("completion API error: {status}")]
    Http { status: u16 },

    #[error("request to completion API failed: {0}")]
    Transport(String),

    #[error("unexpected completion response: {0}")]
    Format(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Format(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Http {
                status: status.as_u16(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Failures of the sheet collaborator.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("sheet I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("sheet is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not write {cell}: {reason}")]
    Write { cell: String, reason: String },

    #[error("{0}")]
    Other(String),
}

/// Errors surfaced by [`crate::session::SearchSession`] commands.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("{0}")]
    Validation(String),

    #[error("AI search failed: {0}")]
    Source(#[from] SourceError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("a search is already in progress")]
    Busy,

    #[error("No companies to add")]
    NothingToCommit,
}

impl SearchError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
