use serde::Deserialize;
use std::time::Duration;
use zhoubao_core::{Column, Row};

/// Production endpoint of the table-doc service.
pub const DEFAULT_BASE_URL: &str = "https://www.yuque.com";

const SCHEMA_PATH: &str = "/api/modules/table/doc/TableController/show";
const RECORDS_PATH: &str = "/api/modules/table/doc/TableRecordController/show";
const DOC_TYPE: &str = "Doc";

/// One fetch, fixed page. Reports stay well under this.
const PAGE_LIMIT: &str = "1000";

const TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("unexpected response from {url}: {reason}")]
    Malformed { url: String, reason: String },
}

/// Synchronous client for the two table-doc endpoints. One request per
/// fetch, with no retry and no pagination past the fixed page; a failure
/// is fatal for the report-generation attempt.
///
/// The service authenticates by session cookie. The browser supplied it
/// from the active tab; here the caller passes the stored cookie string,
/// sent verbatim as the `Cookie` header.
pub struct YuqueClient {
    agent: ureq::Agent,
    base_url: String,
    cookie: Option<String>,
}

impl YuqueClient {
    pub fn new(cookie: Option<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, cookie)
    }

    pub fn with_base_url(base_url: impl Into<String>, cookie: Option<String>) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(TIMEOUT))
            .build()
            .new_agent();
        Self {
            agent,
            base_url: base_url.into(),
            cookie,
        }
    }

    /// Fetch the table's column definitions (`data.sheet[0].columns`).
    /// A document without sheets yields an empty schema.
    pub fn fetch_columns(&self, doc_id: &str, sheet_id: &str) -> Result<Vec<Column>, ClientError> {
        let query = [
            ("docType", DOC_TYPE),
            ("docId", doc_id),
            ("sheetId", sheet_id),
        ];
        let url = format!("{}{}", self.base_url, SCHEMA_PATH);
        let body = self.get(&url, &query)?;
        parse_columns_response(&body).map_err(|e| malformed(&url, &e))
    }

    /// Fetch the table's rows. Each record's `data` field is itself a JSON
    /// document; records whose payload does not parse are skipped.
    pub fn fetch_rows(&self, doc_id: &str, sheet_id: &str) -> Result<Vec<Row>, ClientError> {
        let query = [
            ("limit", PAGE_LIMIT),
            ("offset", "0"),
            ("docType", DOC_TYPE),
            ("docId", doc_id),
            ("sheetId", sheet_id),
        ];
        let url = format!("{}{}", self.base_url, RECORDS_PATH);
        let body = self.get(&url, &query)?;
        parse_rows_response(&body).map_err(|e| malformed(&url, &e))
    }

    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, ClientError> {
        tracing::debug!(url, "fetching");
        let mut request = self.agent.get(url);
        for (key, value) in query {
            request = request.query(*key, *value);
        }
        if let Some(cookie) = &self.cookie {
            request = request.header("Cookie", cookie);
        }
        let mut response = request.call().map_err(|e| ClientError::Request {
            url: url.to_string(),
            source: Box::new(e),
        })?;
        response
            .body_mut()
            .read_to_string()
            .map_err(|e| ClientError::Request {
                url: url.to_string(),
                source: Box::new(e),
            })
    }
}

fn malformed(url: &str, err: &serde_json::Error) -> ClientError {
    ClientError::Malformed {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

// ── Response envelopes ──

#[derive(Deserialize)]
struct SchemaEnvelope {
    #[serde(default)]
    data: SchemaData,
}

#[derive(Deserialize, Default)]
struct SchemaData {
    #[serde(default)]
    sheet: Vec<Sheet>,
}

#[derive(Deserialize)]
struct Sheet {
    #[serde(default)]
    columns: Vec<Column>,
}

#[derive(Deserialize)]
struct RecordsEnvelope {
    #[serde(default)]
    data: RecordsData,
}

#[derive(Deserialize, Default)]
struct RecordsData {
    #[serde(default)]
    records: Vec<Record>,
}

#[derive(Deserialize)]
struct Record {
    #[serde(default)]
    data: String,
}

fn parse_columns_response(body: &str) -> Result<Vec<Column>, serde_json::Error> {
    let envelope: SchemaEnvelope = serde_json::from_str(body)?;
    Ok(envelope
        .data
        .sheet
        .into_iter()
        .next()
        .map(|s| s.columns)
        .unwrap_or_default())
}

fn parse_rows_response(body: &str) -> Result<Vec<Row>, serde_json::Error> {
    let envelope: RecordsEnvelope = serde_json::from_str(body)?;
    let mut rows = Vec::with_capacity(envelope.data.records.len());
    for record in &envelope.data.records {
        match serde_json::from_str::<Row>(&record.data) {
            Ok(row) => rows.push(row),
            Err(e) => tracing::warn!("skipping record with malformed data payload: {e}"),
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_envelope_unwraps_first_sheet() {
        let body = serde_json::json!({
            "data": {
                "sheet": [
                    { "columns": [
                        { "id": "col_a", "name": "进度", "type": "select",
                          "options": [{ "id": "st_done", "value": "已完成" }] },
                        { "id": "col_b", "name": "任务名称", "type": "text" }
                    ]},
                    { "columns": [{ "id": "other_sheet", "name": "x", "type": "text" }] }
                ]
            }
        })
        .to_string();
        let columns = parse_columns_response(&body).unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].id, "col_a");
        assert_eq!(columns[0].option_label("st_done"), Some("已完成"));
    }

    #[test]
    fn schema_envelope_without_sheets_is_empty() {
        assert!(parse_columns_response("{\"data\":{}}").unwrap().is_empty());
        assert!(parse_columns_response("{}").unwrap().is_empty());
    }

    #[test]
    fn records_carry_stringified_row_payloads() {
        let row_payload = serde_json::json!({
            "updatedAt": "2026-08-05T09:00:00.000Z",
            "col_a": { "value": "st_done" }
        })
        .to_string();
        let body = serde_json::json!({
            "data": { "records": [{ "id": "rec_1", "data": row_payload }] }
        })
        .to_string();
        let rows = parse_rows_response(&body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text_value("col_a"), Some("st_done"));
        assert!(rows[0].updated_at_ts().is_some());
    }

    #[test]
    fn malformed_record_payloads_are_skipped() {
        let good = serde_json::json!({ "col_a": { "value": "x" } }).to_string();
        let body = serde_json::json!({
            "data": { "records": [
                { "data": "not json at all" },
                { "data": good },
                { "data": "" }
            ]}
        })
        .to_string();
        let rows = parse_rows_response(&body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text_value("col_a"), Some("x"));
    }

    #[test]
    fn envelope_that_is_not_json_is_an_error() {
        assert!(parse_rows_response("<html>login required</html>").is_err());
        assert!(parse_columns_response("<html>login required</html>").is_err());
    }
}
