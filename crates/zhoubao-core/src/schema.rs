use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known column names the report keys on. These are the literal
/// header labels in the table document, not configurable ids.
pub mod column_name {
    /// Task progress column, drives bucket classification.
    pub const PROGRESS: &str = "进度";
    /// Task handler column, matched against the configured reporters.
    pub const HANDLER: &str = "经办人";
    /// Iteration version column, gates not-started rows.
    pub const ITERATION_VERSION: &str = "迭代版本";
}

/// Column type strings as the table service reports them.
pub mod column_type {
    pub const TEXT: &str = "text";
    pub const SELECT: &str = "select";
    pub const MULTI_SELECT: &str = "multiSelect";
}

/// Status labels of the progress column that get special treatment.
/// Any other label classifies as in-progress.
pub mod status_label {
    pub const COMPLETED: &str = "已完成";
    pub const NOT_STARTED: &str = "未开始";
    pub const IN_PROGRESS: &str = "进行中";
}

/// One choice of a select/multiSelect column: stored id plus display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOption {
    pub id: String,
    #[serde(default)]
    pub value: String,
}

/// A column definition from the document's schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub column_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ColumnOption>,
}

impl Column {
    pub fn is_text(&self) -> bool {
        self.column_type == column_type::TEXT
    }

    pub fn is_select(&self) -> bool {
        self.column_type == column_type::SELECT
    }

    pub fn is_multi_select(&self) -> bool {
        self.column_type == column_type::MULTI_SELECT
    }

    /// Resolve a stored option id to its display label.
    pub fn option_label(&self, option_id: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.id == option_id)
            .map(|o| o.value.as_str())
    }
}

/// Resolved lookup index over a fetched schema, built once per report
/// generation. Rows reference columns by id; the three well-known columns
/// are addressed by name. Duplicate ids/names keep the first occurrence.
pub struct SchemaIndex {
    columns: Vec<Column>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl SchemaIndex {
    pub fn new(columns: Vec<Column>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_name = HashMap::new();
        for (i, col) in columns.iter().enumerate() {
            by_id.entry(col.id.clone()).or_insert(i);
            by_name.entry(col.name.clone()).or_insert(i);
        }
        Self {
            columns,
            by_id,
            by_name,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn by_id(&self, id: &str) -> Option<&Column> {
        self.by_id.get(id).map(|&i| &self.columns[i])
    }

    pub fn by_name(&self, name: &str) -> Option<&Column> {
        self.by_name.get(name).map(|&i| &self.columns[i])
    }

    /// The progress column (`进度`), if the schema has one.
    pub fn progress(&self) -> Option<&Column> {
        self.by_name(column_name::PROGRESS)
    }

    /// The handler column (`经办人`), if the schema has one.
    pub fn handler(&self) -> Option<&Column> {
        self.by_name(column_name::HANDLER)
    }

    /// The iteration version column (`迭代版本`), if the schema has one.
    pub fn iteration_version(&self) -> Option<&Column> {
        self.by_name(column_name::ITERATION_VERSION)
    }
}
