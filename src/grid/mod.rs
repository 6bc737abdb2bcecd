//! Sheet collaborator.
//!
//! The session only needs two operations from the host sheet: read the first
//! column, and write a single styled cell. [`append_rows`] builds the
//! append-below-last-row behaviour on top of the latter.
//!
//! - **[`memory`]**: in-process grid with optional failure injection.
//! - **[`sheet_file`]**: JSON sheet document on disk, used by the CLI.

pub mod memory;
pub mod sheet_file;

use tracing::debug;

use crate::error::GridError;
use crate::model::types::{CellRef, CellStyle, CellValue};

pub use memory::MemoryGrid;
pub use sheet_file::SheetFile;

/// Column holding company names.
pub const NAME_COLUMN: &str = "A";

#[allow(async_fn_in_trait)]
pub trait GridIo {
    /// Values of the name column from row 1 to the last used row.
    async fn read_first_column(&mut self) -> Result<Vec<CellValue>, GridError>;

    /// Write one text cell and apply `style` to it.
    async fn write_cell(
        &mut self,
        cell: &CellRef,
        value: &str,
        style: &CellStyle,
    ) -> Result<(), GridError>;
}

/// Rows up to and including the last non-empty cell. Trailing empty cells
/// are not part of the used range.
pub fn used_row_count(cells: &[CellValue]) -> usize {
    cells
        .iter()
        .rposition(|cell| *cell != CellValue::Empty)
        .map_or(0, |idx| idx + 1)
}

/// Write `values` into `column`, one row each, starting at `start_row`.
///
/// Stops at the first failed write and returns that error; rows written
/// before it stay written.
pub async fn append_rows<G, S>(
    grid: &mut G,
    column: &str,
    start_row: u32,
    values: &[S],
    style: &CellStyle,
) -> Result<usize, GridError>
where
    G: GridIo,
    S: AsRef<str>,
{
    let mut row = start_row;
    for value in values {
        let value: &str = value.as_ref();
        let cell = CellRef::new(column, row);
        grid.write_cell(&cell, value, style).await?;
        debug!(%cell, value, "wrote cell");
        row += 1;
    }
    Ok(values.len())
}
