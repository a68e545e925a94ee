//! Row records from the `get-rows` command

use serde::Deserialize;

/// One page of rows, with the engine's filter counts
#[derive(Debug, Clone, Deserialize)]
pub struct RowsResponse {
    #[serde(default)]
    pub rows: Vec<Row>,

    /// Index of the first returned row
    #[serde(default)]
    pub start: u64,

    /// Requested page size
    #[serde(default)]
    pub limit: u64,

    /// Rows matching the active engine facets
    #[serde(default)]
    pub filtered: u64,

    /// Rows in the whole project
    #[serde(default)]
    pub total: u64,
}

/// A single data row
#[derive(Debug, Clone, Deserialize)]
pub struct Row {
    /// Zero-based row index within the project
    #[serde(rename = "i")]
    pub index: u64,

    #[serde(default)]
    pub flagged: bool,

    #[serde(default)]
    pub starred: bool,

    /// Cells in column order; null for empty cells
    #[serde(default)]
    pub cells: Vec<Option<Cell>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cell {
    /// Cell value; string, number, or boolean depending on the column
    #[serde(default, rename = "v")]
    pub value: serde_json::Value,
}

impl Row {
    /// Cell value at `cell_index`, rendered as text; empty cells render as ""
    pub fn cell_text(&self, cell_index: usize) -> String {
        match self.cells.get(cell_index) {
            Some(Some(cell)) => match &cell.value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            },
            _ => String::new(),
        }
    }
}
