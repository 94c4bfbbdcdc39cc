use zhoubao_core::schema::status_label;
use zhoubao_core::{ReportConfig, Row, SchemaIndex};

/// Which report bucket(s) a row belongs to.
///
/// Completed rows land in this week, not-started rows in next week, and
/// in-progress rows in both. Excluded rows contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Completed,
    NotStarted,
    InProgress,
    Excluded,
}

/// Classify a row by its progress label.
///
/// - `已完成` is kept only when `updatedAt` falls inside the report window
///   (inclusive on both ends).
/// - `未开始` is kept only when the row's iteration version is one of the
///   configured next-week versions.
/// - Any other resolved label counts as in-progress.
/// - A missing progress column, cell value, or option mapping excludes the
///   row, as does a missing window or empty version set. Absent
///   configuration never widens the report.
pub fn classify_row(row: &Row, schema: &SchemaIndex, config: &ReportConfig) -> RowStatus {
    let Some(progress) = schema.progress() else {
        return RowStatus::Excluded;
    };
    let Some(value) = row.text_value(&progress.id) else {
        return RowStatus::Excluded;
    };
    let Some(label) = progress.option_label(value) else {
        return RowStatus::Excluded;
    };

    match label {
        status_label::COMPLETED => {
            let Some(window) = config.window else {
                return RowStatus::Excluded;
            };
            let Some(ts) = row.updated_at_ts() else {
                return RowStatus::Excluded;
            };
            if window.contains(ts) {
                RowStatus::Completed
            } else {
                RowStatus::Excluded
            }
        }
        status_label::NOT_STARTED => {
            let version = schema
                .iteration_version()
                .and_then(|col| row.text_value(&col.id));
            match version {
                Some(v) if config.next_week_versions.contains(v) => RowStatus::NotStarted,
                _ => RowStatus::Excluded,
            }
        }
        _ => RowStatus::InProgress,
    }
}
