//! Sheet stored as a JSON document.
//!
//! ```json
//! { "rows": [ { "value": "Acme Corp" }, { "value": 42 },
//!             { "value": "Globex", "style": { "fill_color": "#90EE90", "bold": true } } ] }
//! ```
//!
//! Only the name column is modelled. A missing file is an empty sheet and is
//! created on the first write.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GridError;
use crate::model::types::{CellRef, CellStyle, CellValue};

use super::{GridIo, NAME_COLUMN};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    #[serde(default)]
    pub value: CellValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetDocument {
    #[serde(default)]
    pub rows: Vec<SheetRow>,
}

/// File-backed sheet. Every operation goes to disk so external edits between
/// commands are picked up.
#[derive(Debug, Clone)]
pub struct SheetFile {
    path: PathBuf,
}

impl SheetFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<SheetDocument, GridError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(SheetDocument::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SheetDocument::default()),
            Err(e) => Err(GridError::Io(e)),
        }
    }

    pub async fn save(&self, doc: &SheetDocument) -> Result<(), GridError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(doc)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

impl GridIo for SheetFile {
    async fn read_first_column(&mut self) -> Result<Vec<CellValue>, GridError> {
        let doc = self.load().await?;
        debug!(path = %self.path.display(), rows = doc.rows.len(), "read sheet");
        Ok(doc.rows.into_iter().map(|row| row.value).collect())
    }

    async fn write_cell(
        &mut self,
        cell: &CellRef,
        value: &str,
        style: &CellStyle,
    ) -> Result<(), GridError> {
        if cell.column != NAME_COLUMN || cell.row == 0 {
            return Err(GridError::Write {
                cell: cell.to_string(),
                reason: "outside the name column".to_string(),
            });
        }
        let mut doc = self.load().await?;
        let idx = (cell.row - 1) as usize;
        if doc.rows.len() <= idx {
            doc.rows.resize_with(idx + 1, SheetRow::default);
        }
        doc.rows[idx] = SheetRow {
            value: CellValue::from(value),
            style: Some(style.clone()),
        };
        self.save(&doc).await.map_err(|e| GridError::Write {
            cell: cell.to_string(),
            reason: e.to_string(),
        })
    }
}
