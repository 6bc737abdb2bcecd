//! Canned candidate source used when no credential is available.
//!
//! Picks a category from keywords in the instruction text and returns the head
//! of a fixed list. The delay stands in for network latency so the session
//! goes through the same loading path either way.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use super::{CandidateSource, build_prompt};
use crate::error::SourceError;
use crate::model::types::SearchCriteria;

const TECHNOLOGY: &[&str] = &[
    "Apple Inc.",
    "Microsoft Corporation",
    "Google LLC",
    "Amazon.com Inc.",
    "Meta Platforms Inc.",
    "Netflix Inc.",
    "Tesla Inc.",
    "Salesforce Inc.",
    "Adobe Inc.",
    "Oracle Corporation",
];

const MANUFACTURING: &[&str] = &[
    "General Electric",
    "Boeing Company",
    "Ford Motor Company",
    "General Motors",
    "Caterpillar Inc.",
    "3M Company",
    "Honeywell International",
    "United Technologies",
    "Lockheed Martin",
    "Raytheon Technologies",
];

const HEALTHCARE: &[&str] = &[
    "Johnson & Johnson",
    "Pfizer Inc.",
    "UnitedHealth Group",
    "Merck & Co.",
    "Abbott Laboratories",
    "Medtronic plc",
    "Amgen Inc.",
    "Gilead Sciences",
    "Bristol-Myers Squibb",
    "Eli Lilly and Company",
];

const FINANCE: &[&str] = &[
    "JPMorgan Chase & Co.",
    "Bank of America",
    "Wells Fargo & Company",
    "Citigroup Inc.",
    "Goldman Sachs Group",
    "Morgan Stanley",
    "American Express",
    "BlackRock Inc.",
    "Charles Schwab",
    "Visa Inc.",
];

const RETAIL: &[&str] = &[
    "Walmart Inc.",
    "Target Corporation",
    "Costco Wholesale",
    "Home Depot Inc.",
    "Lowe's Companies",
    "Best Buy Co.",
    "Starbucks Corporation",
    "McDonald's Corporation",
    "Nike Inc.",
    "Coca-Cola Company",
];

/// Industry bucket of the canned lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Technology,
    Manufacturing,
    Healthcare,
    Finance,
    Retail,
}

impl Category {
    /// Keyword match in priority order; anything unmatched is technology.
    pub fn detect(text: &str) -> Self {
        let text = text.to_lowercase();

        if mentions(&text, &["manufacturing", "industrial"]) {
            Self::Manufacturing
        } else if mentions(&text, &["health", "medical", "pharma"]) {
            Self::Healthcare
        } else if mentions(&text, &["finance", "bank", "financial"]) {
            Self::Finance
        } else if mentions(&text, &["retail", "consumer", "shopping"]) {
            Self::Retail
        } else {
            Self::Technology
        }
    }

    pub fn companies(self) -> &'static [&'static str] {
        match self {
            Self::Technology => TECHNOLOGY,
            Self::Manufacturing => MANUFACTURING,
            Self::Healthcare => HEALTHCARE,
            Self::Finance => FINANCE,
            Self::Retail => RETAIL,
        }
    }
}

fn mentions(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Technology => write!(f, "technology"),
            Self::Manufacturing => write!(f, "manufacturing"),
            Self::Healthcare => write!(f, "healthcare"),
            Self::Finance => write!(f, "finance"),
            Self::Retail => write!(f, "retail"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FallbackHeuristicClient {
    delay: Duration,
}

impl FallbackHeuristicClient {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Synchronous core: category detection and truncation, no delay.
    pub fn candidates(criteria: &SearchCriteria) -> Vec<String> {
        let category = Category::detect(&build_prompt(criteria));
        let take = usize::try_from(criteria.count()).unwrap_or(usize::MAX);
        debug!(%category, requested = criteria.count(), "fallback category selected");
        category
            .companies()
            .iter()
            .take(take)
            .map(|name| (*name).to_string())
            .collect()
    }
}

impl CandidateSource for FallbackHeuristicClient {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<String>, SourceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Self::candidates(criteria))
    }
}
