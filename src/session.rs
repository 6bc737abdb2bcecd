//! Search session state machine.
//!
//! ```text
//!            search (valid)                 found > 0
//!   Idle ───────────────────▶ Loading ─────────────────▶ ResultsReady
//!    ▲  ▲                        │  │                        │   │
//!    │  │      found == 0        │  │ read/fetch failure     │   │ commit ok
//!    │  └────────────────────────┘  ▼                        │   │ or clear
//!    │                            Error ◀────────────────────┘   │
//!    │          dismiss             │     commit failure         │
//!    └──────────────────────────────┴────────────────────────────┘
//! ```
//!
//! Each search reads the name column once, asks the selected source for
//! candidates, and keeps the ones not already present. Nothing reaches the
//! sheet until [`SearchSession::commit`].

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::SearchError;
use crate::grid::{GridIo, NAME_COLUMN, append_rows, used_row_count};
use crate::model::types::{CompanyName, SearchCriteria, SessionState};
use crate::search::{dedupe, existing_names_from_cells};
use crate::sources::{CandidateSource, SourceKind};

pub const STATUS_READING: &str = "Reading existing companies from the sheet...";
pub const STATUS_SEARCHING: &str = "Searching for companies using AI...";
pub const STATUS_ADDING: &str = "Adding companies to the sheet...";
pub const STATUS_NO_NEW: &str = "No new companies found that match your criteria";

/// How a successful search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// New companies are held for commit.
    Found(usize),
    /// Every candidate was already in the sheet (or the source returned none).
    NoNewResults,
}

/// Read-only view of a session for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub status: Option<String>,
    pub error: Option<String>,
    pub results: Vec<String>,
}

/// One user's search session against one sheet.
#[derive(Debug)]
pub struct SearchSession<G> {
    grid: G,
    config: Config,
    state: SessionState,
    status: Option<String>,
    error: Option<String>,
    existing: Vec<String>,
    results: Vec<CompanyName>,
}

impl<G: GridIo> SearchSession<G> {
    pub fn new(grid: G, config: Config) -> Self {
        Self {
            grid,
            config,
            state: SessionState::Idle,
            status: None,
            error: None,
            existing: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn results(&self) -> &[CompanyName] {
        &self.results
    }

    /// Normalized names read by the last search.
    pub fn existing_names(&self) -> &[String] {
        &self.existing
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            status: self.status.clone(),
            error: self.error.clone(),
            results: self
                .results
                .iter()
                .map(|name| name.display().to_string())
                .collect(),
        }
    }

    /// Search with the source implied by `credential`: the AI endpoint when a
    /// non-blank key is given, the canned fallback otherwise.
    pub async fn search(
        &mut self,
        criteria: &str,
        count: u32,
        credential: Option<&str>,
    ) -> Result<SearchOutcome, SearchError> {
        let criteria = self.validate(criteria, count)?;
        match SourceKind::select(credential, &self.config) {
            Ok(source) => {
                info!(source = source.name(), "source selected");
                self.run_search(&source, criteria).await
            }
            Err(e) => {
                self.enter_loading();
                Err(self.fail_search(e.into()))
            }
        }
    }

    /// Search with an explicit source.
    pub async fn search_with<S: CandidateSource>(
        &mut self,
        source: &S,
        criteria: &str,
        count: u32,
    ) -> Result<SearchOutcome, SearchError> {
        let criteria = self.validate(criteria, count)?;
        self.run_search(source, criteria).await
    }

    /// Write the held results below the last used row of the name column.
    ///
    /// Cells are written one at a time and a failed write does not undo the
    /// ones before it. The results are kept so the commit can be retried, and
    /// a retry appends below whatever the failed attempt already wrote, so
    /// those names appear twice in the sheet.
    pub async fn commit(&mut self) -> Result<usize, SearchError> {
        if self.state == SessionState::Loading {
            return Err(SearchError::Busy);
        }
        if self.results.is_empty() {
            return Err(self.reject(SearchError::NothingToCommit));
        }

        self.state = SessionState::Loading;
        self.error = None;
        self.status = Some(STATUS_ADDING.to_string());

        let style = self.config.highlight_style();
        let written = match self.grid.read_first_column().await {
            Ok(cells) => {
                let used = used_row_count(&cells);
                let start_row = u32::try_from(used).unwrap_or(u32::MAX).saturating_add(1);
                debug!(start_row, count = self.results.len(), "appending results");
                let values: Vec<&str> = self.results.iter().map(CompanyName::display).collect();
                append_rows(&mut self.grid, NAME_COLUMN, start_row, &values, &style).await
            }
            Err(e) => Err(e),
        };

        match written {
            Ok(n) => {
                info!(added = n, "results committed");
                self.results.clear();
                self.state = SessionState::Idle;
                self.status = Some(format!("Successfully added {n} companies"));
                Ok(n)
            }
            Err(e) => {
                warn!(error = %e, "commit failed");
                let err = SearchError::from(e);
                self.state = SessionState::Error;
                self.status = None;
                self.error = Some(format!("Error adding to the sheet: {err}"));
                Err(err)
            }
        }
    }

    /// Drop held results and return to idle. Also recovers a session left in
    /// `Loading` by an abandoned search.
    pub fn clear(&mut self) {
        self.results.clear();
        self.error = None;
        self.state = SessionState::Idle;
        debug!("results cleared");
    }

    /// Hide the current error. Results kept after a failed commit become
    /// committable again; otherwise the session is idle. An input error shown
    /// outside the `Error` state is hidden without a state change.
    pub fn dismiss_error(&mut self) {
        self.error = None;
        if self.state != SessionState::Error {
            return;
        }
        self.state = if self.results.is_empty() {
            SessionState::Idle
        } else {
            SessionState::ResultsReady
        };
    }

    fn validate(&mut self, criteria: &str, count: u32) -> Result<SearchCriteria, SearchError> {
        if self.state == SessionState::Loading {
            return Err(SearchError::Busy);
        }
        SearchCriteria::new(criteria, count).map_err(|e| {
            debug!(error = %e, "search input rejected");
            self.reject(e)
        })
    }

    /// Show `err` in place of any earlier error without leaving the current
    /// state.
    fn reject(&mut self, err: SearchError) -> SearchError {
        self.status = None;
        self.error = Some(err.to_string());
        err
    }

    fn enter_loading(&mut self) {
        self.state = SessionState::Loading;
        self.error = None;
        self.results.clear();
    }

    async fn run_search<S: CandidateSource>(
        &mut self,
        source: &S,
        criteria: SearchCriteria,
    ) -> Result<SearchOutcome, SearchError> {
        self.enter_loading();

        self.status = Some(STATUS_READING.to_string());
        let cells = match self.grid.read_first_column().await {
            Ok(cells) => cells,
            Err(e) => return Err(self.fail_search(e.into())),
        };
        self.existing = existing_names_from_cells(&cells);
        debug!(existing = self.existing.len(), "existing companies read");

        self.status = Some(STATUS_SEARCHING.to_string());
        let candidates = match source.fetch(&criteria).await {
            Ok(names) => names,
            Err(e) => return Err(self.fail_search(e.into())),
        };
        debug!(source = source.name(), candidates = candidates.len(), "candidates fetched");

        let unique = dedupe(candidates, &self.existing);
        if unique.is_empty() {
            info!("no new companies after dedup");
            self.state = SessionState::Idle;
            self.status = Some(STATUS_NO_NEW.to_string());
            return Ok(SearchOutcome::NoNewResults);
        }

        let found = unique.len();
        self.results = unique.into_iter().map(CompanyName::from).collect();
        self.state = SessionState::ResultsReady;
        self.status = Some(format!("Found {found} new companies"));
        info!(found, "search finished");
        Ok(SearchOutcome::Found(found))
    }

    fn fail_search(&mut self, err: SearchError) -> SearchError {
        warn!(error = %err, "search failed");
        self.results.clear();
        self.state = SessionState::Error;
        self.status = None;
        self.error = Some(format!("Error searching companies: {err}"));
        err
    }
}
