//! Grid layouts loaded from JSON files.

use std::path::Path;

use gridcanvas::GridCell;
use serde::{Deserialize, Serialize};

use crate::column::ColumnDef;
use crate::config::{DataMatrix, GridEngineConfig, GridOptions};
use crate::error::LayoutError;

/// A cell value as written in a layout file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutCell {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<LayoutCell> for GridCell {
    fn from(cell: LayoutCell) -> Self {
        match cell {
            LayoutCell::Bool(value) => GridCell::Boolean(Some(value)),
            LayoutCell::Number(value) => GridCell::number(value),
            LayoutCell::Text(text) => GridCell::text(text),
        }
    }
}

/// Columns, options and optional data for a grid.
///
/// ```json
/// {
///   "columns": [
///     { "id": "first", "title": "First", "width": 100, "groupPath": ["A", "B"] }
///   ],
///   "options": { "freezeColumns": 1 },
///   "data": [["x", 1, true, null]]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub options: GridOptions,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<Vec<Option<LayoutCell>>>,
}

impl GridLayout {
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Layout data as grid cells; `null` becomes the empty cell.
    pub fn data_matrix(&self) -> DataMatrix {
        self.data
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.clone().map(GridCell::from).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    pub fn into_config(self) -> GridEngineConfig {
        let data = self.data_matrix();
        GridEngineConfig::new(self.columns, data).options(self.options)
    }
}
