//! Reconciliation of candidate names against names already in the sheet.
//!
//! A candidate is considered already present when its normalized form contains
//! an existing name or an existing name contains it. This catches variants such
//! as "Apple" vs "Apple Inc." but over-matches short names: an existing "ge"
//! drops "General Electric", and a candidate "GE" would be dropped by any
//! existing name containing "ge". Callers get fewer, never more, results.

use super::normalize::normalize;

/// Whether `candidate` (normalized) collides with any of `existing` (normalized).
pub fn is_known(candidate: &str, existing: &[String]) -> bool {
    existing
        .iter()
        .any(|known| known.contains(candidate) || candidate.contains(known.as_str()))
}

/// Keep the candidates that are not already represented in `existing`.
///
/// `existing` must already be normalized and free of empty entries. The
/// survivors keep their relative order. Repeats within `candidates` are not
/// collapsed.
pub fn dedupe<T: AsRef<str>>(candidates: Vec<T>, existing: &[String]) -> Vec<T> {
    if existing.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|candidate| !is_known(&normalize(candidate.as_ref()), existing))
        .collect()
}
