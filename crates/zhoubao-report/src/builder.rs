use crate::classify::RowStatus;
use crate::fragment::{Bucket, Chain, Fragment};
use zhoubao_core::{ReportConfig, Row, SchemaIndex};

/// Inserted before the detail line break on the this-week copy of an
/// in-progress row.
const IN_PROGRESS_SUFFIX: &str = "(进行中)";

/// Derive a row's fragment chains for its classified bucket(s).
///
/// Resolution short-circuits: a row whose handler is not a configured
/// reporter, or whose reporter/task-type value has no option mapping,
/// produces no chains at all. An in-progress row produces two chains: the
/// next-week copy first, then the this-week copy with the annotated
/// detail line.
pub fn build_chains(
    row: &Row,
    schema: &SchemaIndex,
    config: &ReportConfig,
    status: RowStatus,
) -> Vec<Chain> {
    if status == RowStatus::Excluded {
        return Vec::new();
    }
    let Some(reporter) = reporter_heading(row, schema, config) else {
        tracing::debug!("dropping row: handler missing or not a configured reporter");
        return Vec::new();
    };
    let Some(task) = task_bullet(row, schema, config) else {
        tracing::debug!("dropping row: task type missing or unmapped");
        return Vec::new();
    };
    let detail = detail_bullet(row, schema, config);

    match status {
        RowStatus::Completed => vec![chain(Bucket::ThisWeek, reporter, task, detail)],
        RowStatus::NotStarted => vec![chain(Bucket::NextWeek, reporter, task, detail)],
        RowStatus::InProgress => {
            let annotated = annotate_in_progress(&detail);
            vec![
                chain(Bucket::NextWeek, reporter.clone(), task.clone(), detail),
                chain(Bucket::ThisWeek, reporter, task, annotated),
            ]
        }
        RowStatus::Excluded => Vec::new(),
    }
}

fn chain(bucket: Bucket, reporter: Fragment, task: Fragment, detail: Fragment) -> Chain {
    vec![Fragment::section(bucket), reporter, task, detail]
}

/// The handler's display label, only when the handler is a configured
/// reporter.
fn reporter_heading(row: &Row, schema: &SchemaIndex, config: &ReportConfig) -> Option<Fragment> {
    let handler = schema.handler()?;
    let value = row.text_value(&handler.id)?;
    if !config.reporters.contains(value) {
        return None;
    }
    let label = handler.option_label(value)?;
    Some(Fragment::reporter_heading(label))
}

fn task_bullet(row: &Row, schema: &SchemaIndex, config: &ReportConfig) -> Option<Fragment> {
    let column = schema.by_id(&config.task_type_column)?;
    let value = row.text_value(&column.id)?;
    let label = column.option_label(value)?;
    Some(Fragment::task_bullet(label))
}

/// Join the configured detail columns into one line. Select columns map
/// through their options, text columns use the raw string, anything else
/// is skipped; each contributed value keeps a trailing space.
fn detail_bullet(row: &Row, schema: &SchemaIndex, config: &ReportConfig) -> Fragment {
    let mut body = String::new();
    for column_id in &config.detail_columns {
        let Some(column) = schema.by_id(column_id) else {
            continue;
        };
        if column.is_select() {
            if let Some(label) = row
                .text_value(column_id)
                .and_then(|v| column.option_label(v))
            {
                body.push_str(label);
                body.push(' ');
            }
        } else if column.is_text() {
            if let Some(value) = row.text_value(column_id) {
                body.push_str(value);
                body.push(' ');
            }
        }
    }
    Fragment::detail_bullet(&body)
}

fn annotate_in_progress(detail: &Fragment) -> Fragment {
    Fragment {
        kind: detail.kind,
        text: detail
            .text
            .replacen('\n', &format!("{IN_PROGRESS_SUFFIX}\n"), 1),
    }
}
