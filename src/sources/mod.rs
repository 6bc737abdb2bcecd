//! Candidate sources.
//!
//! A source turns validated [`SearchCriteria`] into an ordered list of company
//! names in display form. Two implementations exist:
//!
//! - **[`primary`]**: chat-completion request to the configured AI endpoint,
//!   used whenever a credential is supplied.
//! - **[`fallback`]**: fixed keyword heuristic over canned lists, used when no
//!   credential is supplied.
//!
//! The session never branches on the variant itself: [`SourceKind::select`]
//! picks one per search and everything downstream goes through
//! [`CandidateSource::fetch`].
//!
//! # Example
//!
//! ```rust,ignore
//! use company_search::config::Config;
//! use company_search::sources::{CandidateSource, SourceKind};
//!
//! let cfg = Config::load(None)?;
//! let source = SourceKind::select(cfg.credential(), &cfg)?;
//! let names = source.fetch(&criteria).await?;
//! ```

pub mod fallback;
pub mod primary;

use std::fmt;

use crate::config::Config;
use crate::error::SourceError;
use crate::model::types::SearchCriteria;

pub use fallback::{Category, FallbackHeuristicClient};
pub use primary::{MAX_COMPLETION_RESULTS, PrimaryAiClient, parse_completion};

/// Produces candidate company names for a search.
#[allow(async_fn_in_trait)]
pub trait CandidateSource {
    /// Short label for logs and status output.
    fn name(&self) -> &'static str;

    async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<String>, SourceError>;
}

/// Instruction text sent to the completion endpoint and scanned by the
/// fallback heuristic.
pub fn build_prompt(criteria: &SearchCriteria) -> String {
    format!(
        "Find {count} real companies that match the following criteria: \"{text}\". \
         Return only the company names, one per line, without any additional text, numbers, or formatting. \
         Focus on well-known, legitimate companies that would be suitable for business research.",
        count = criteria.count(),
        text = criteria.text(),
    )
}

/// The source chosen for one search.
pub enum SourceKind {
    Primary(PrimaryAiClient),
    Fallback(FallbackHeuristicClient),
}

impl SourceKind {
    /// Primary when a non-blank credential is given, fallback otherwise.
    pub fn select(credential: Option<&str>, cfg: &Config) -> Result<Self, SourceError> {
        match credential.map(str::trim).filter(|key| !key.is_empty()) {
            Some(key) => Ok(Self::Primary(PrimaryAiClient::new(key, cfg)?)),
            None => Ok(Self::Fallback(FallbackHeuristicClient::new(
                cfg.fallback_delay(),
            ))),
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Primary(_))
    }
}

impl CandidateSource for SourceKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Primary(client) => client.name(),
            Self::Fallback(client) => client.name(),
        }
    }

    async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<String>, SourceError> {
        match self {
            Self::Primary(client) => client.fetch(criteria).await,
            Self::Fallback(client) => client.fetch(criteria).await,
        }
    }
}

impl fmt::Debug for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceKind({})", self.name())
    }
}
