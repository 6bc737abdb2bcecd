//! Canonical form of company names for comparison.
//!
//! Normalization is deliberately minimal: trim surrounding whitespace and
//! lower-case. It is pure and idempotent, and the result is only ever used for
//! comparisons, never written back to the sheet.

use crate::model::types::CellValue;

/// Trim and lower-case a company name.
///
/// Whitespace-only input yields an empty string; callers building an existing
/// name set must drop those (see [`existing_names_from_cells`]).
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Build the existing-name set from a raw sheet column.
///
/// Non-text and blank cells are skipped silently. Order follows the column.
pub fn existing_names_from_cells(cells: &[CellValue]) -> Vec<String> {
    cells
        .iter()
        .filter_map(CellValue::as_name)
        .map(normalize)
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize("  Apple Inc.\t"), "apple inc.");
        assert_eq!(normalize("JPMorgan Chase & Co."), "jpmorgan chase & co.");
    }

    #[test]
    fn blank_input_normalizes_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn inner_whitespace_is_preserved() {
        assert_eq!(normalize("Bank  of America"), "bank  of america");
    }

    #[test]
    fn reader_skips_blank_and_non_text_cells() {
        let cells = vec![
            CellValue::from("Company"),
            CellValue::from(" Microsoft "),
            CellValue::Empty,
            CellValue::Number(12.0),
            CellValue::from("   "),
            CellValue::Bool(false),
            CellValue::from("Apple"),
        ];
        assert_eq!(
            existing_names_from_cells(&cells),
            vec!["company", "microsoft", "apple"]
        );
    }
}
