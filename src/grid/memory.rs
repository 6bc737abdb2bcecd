//! In-memory sheet column.

use crate::error::GridError;
use crate::model::types::{CellRef, CellStyle, CellValue};

use super::{GridIo, NAME_COLUMN};

/// One cell of the name column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub value: CellValue,
    pub style: Option<CellStyle>,
}

/// Name column kept in memory, with switches to simulate host failures.
#[derive(Debug, Default)]
pub struct MemoryGrid {
    cells: Vec<Cell>,
    fail_reads: Option<String>,
    fail_write_row: Option<u32>,
    write_calls: usize,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: Vec<CellValue>) -> Self {
        Self {
            cells: values
                .into_iter()
                .map(|value| Cell { value, style: None })
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_names(names: &[&str]) -> Self {
        Self::with_values(names.iter().map(|n| CellValue::from(*n)).collect())
    }

    /// Make every read fail with `reason`.
    pub fn fail_reads(&mut self, reason: impl Into<String>) {
        self.fail_reads = Some(reason.into());
    }

    /// Make the write to `row` (1-based) fail.
    pub fn fail_writes_at(&mut self, row: u32) {
        self.fail_write_row = Some(row);
    }

    pub fn heal(&mut self) {
        self.fail_reads = None;
        self.fail_write_row = None;
    }

    /// Cell at 1-based `row`.
    pub fn cell(&self, row: u32) -> Option<&Cell> {
        let idx = usize::try_from(row).ok()?.checked_sub(1)?;
        self.cells.get(idx)
    }

    pub fn used_rows(&self) -> usize {
        self.cells.len()
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls
    }

    /// Text of every text cell, in row order.
    pub fn names(&self) -> Vec<&str> {
        self.cells
            .iter()
            .filter_map(|c| match &c.value {
                CellValue::Text(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl GridIo for MemoryGrid {
    async fn read_first_column(&mut self) -> Result<Vec<CellValue>, GridError> {
        if let Some(reason) = &self.fail_reads {
            return Err(GridError::Other(reason.clone()));
        }
        Ok(self.cells.iter().map(|c| c.value.clone()).collect())
    }

    async fn write_cell(
        &mut self,
        cell: &CellRef,
        value: &str,
        style: &CellStyle,
    ) -> Result<(), GridError> {
        self.write_calls += 1;
        if cell.column != NAME_COLUMN {
            return Err(GridError::Write {
                cell: cell.to_string(),
                reason: "only the name column is stored".to_string(),
            });
        }
        if self.fail_write_row == Some(cell.row) || cell.row == 0 {
            return Err(GridError::Write {
                cell: cell.to_string(),
                reason: "write rejected".to_string(),
            });
        }
        let idx = (cell.row - 1) as usize;
        if self.cells.len() <= idx {
            self.cells.resize_with(idx + 1, Cell::default);
        }
        self.cells[idx] = Cell {
            value: CellValue::from(value),
            style: Some(style.clone()),
        };
        Ok(())
    }
}
