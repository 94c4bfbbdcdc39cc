pub mod config;
pub mod row;
pub mod schema;

pub use config::{ReportConfig, ReportWindow};
pub use row::{Cell, CellValue, Row};
pub use schema::{Column, ColumnOption, SchemaIndex};
