//! Name comparison layer.
//!
//! - **[`normalize`]**: canonical form used for every comparison.
//! - **[`dedupe`]**: drops candidates already represented in the sheet.

pub mod dedupe;
pub mod normalize;

pub use dedupe::dedupe;
pub use normalize::{existing_names_from_cells, normalize};
