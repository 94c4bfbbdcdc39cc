use zhoubao_client::YuqueClient;
use zhoubao_core::ReportConfig;
use zhoubao_store::ConfigStore;

/// `zhoubao columns`: dump the table schema so the user can pick the ids
/// that go into `task_type`, `detail_columns`, `reporters` and
/// `next_week_versions`.
pub fn execute(store: &ConfigStore, select_only: bool) -> anyhow::Result<()> {
    let config = ReportConfig::from_map(&store.load())?;
    let (doc_id, sheet_id) = config.require_doc()?;

    let client = YuqueClient::new(config.cookie.clone());
    let columns = client.fetch_columns(doc_id, sheet_id)?;
    if columns.is_empty() {
        println!("(no columns; check doc_id/sheet_id and cookie)");
        return Ok(());
    }

    for col in &columns {
        if select_only && !(col.is_select() || col.is_multi_select()) {
            continue;
        }
        println!("{}  [{}]  {}", col.id, col.column_type, col.name);
        for opt in &col.options {
            println!("    {}  {}", opt.id, opt.value);
        }
    }
    Ok(())
}
