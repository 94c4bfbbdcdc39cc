use time::OffsetDateTime;
use zhoubao_client::YuqueClient;
use zhoubao_core::{ReportConfig, ReportWindow, SchemaIndex};
use zhoubao_store::ConfigStore;

/// `zhoubao generate`: fetch schema and rows, render the report, write it
/// out. An unset report window defaults to the current ISO week.
pub fn execute(store: &ConfigStore, out: &str, to_stdout: bool) -> anyhow::Result<()> {
    let mut config = ReportConfig::from_map(&store.load())?;
    config.require_doc()?;
    let doc_id = config.doc_id.clone();
    let sheet_id = config.sheet_id.clone();

    if config.window.is_none() {
        config.window = Some(ReportWindow::current_week(OffsetDateTime::now_utc().date()));
    }

    let client = YuqueClient::new(config.cookie.clone());
    let columns = client.fetch_columns(&doc_id, &sheet_id)?;
    let schema = SchemaIndex::new(columns);
    let rows = client.fetch_rows(&doc_id, &sheet_id)?;

    let report = zhoubao_report::render_report(&schema, &rows, &config);

    if to_stdout {
        print!("{report}");
    } else {
        std::fs::write(out, report.as_bytes())?;
        println!("wrote {out} ({} rows fetched)", rows.len());
    }
    Ok(())
}
