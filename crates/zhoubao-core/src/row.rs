use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// A cell's stored value: a single option id / text string, a list of them
/// (multiSelect), or whatever else the service put there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    One(String),
    Many(Vec<String>),
    Other(serde_json::Value),
}

/// One cell of a row. Live data is uneven; anything that is not a
/// `{ "value": ... }` object is kept as-is and ignored by the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Value { value: CellValue },
    Other(serde_json::Value),
}

/// One task record, keyed by column id. `updatedAt` rides alongside the
/// cells in the same JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub cells: HashMap<String, Cell>,
}

impl Row {
    /// The single-string value of a cell, or None for missing cells and
    /// non-string shapes.
    pub fn text_value(&self, column_id: &str) -> Option<&str> {
        match self.cells.get(column_id)? {
            Cell::Value {
                value: CellValue::One(s),
            } => Some(s),
            _ => None,
        }
    }

    /// `updatedAt` parsed as an RFC 3339 timestamp.
    pub fn updated_at_ts(&self) -> Option<OffsetDateTime> {
        let raw = self.updated_at.as_deref()?;
        OffsetDateTime::parse(raw, &Rfc3339).ok()
    }
}
