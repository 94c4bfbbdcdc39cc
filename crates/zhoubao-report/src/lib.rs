pub mod builder;
pub mod classify;
pub mod fragment;
pub mod tree;

pub use builder::build_chains;
pub use classify::{classify_row, RowStatus};
pub use fragment::{Bucket, Chain, Fragment, FragmentKind};
pub use tree::{flatten, merge_chains, normalize_sections, TreeNode};

use zhoubao_core::{ReportConfig, Row, SchemaIndex};

/// Render the full weekly report for a fetched row set.
///
/// Rows are classified and expanded into fragment chains in input order,
/// then merged into the section/reporter/task/detail tree and flattened
/// with the this-week section first. A row set where everything drops
/// still yields a valid (empty) document.
pub fn render_report(schema: &SchemaIndex, rows: &[Row], config: &ReportConfig) -> String {
    let mut chains: Vec<Chain> = Vec::new();
    for row in rows {
        let status = classify_row(row, schema, config);
        chains.extend(build_chains(row, schema, config, status));
    }
    tracing::debug!(
        rows = rows.len(),
        chains = chains.len(),
        "assembled fragment chains"
    );
    let roots = normalize_sections(merge_chains(&chains));
    flatten(&roots)
}
