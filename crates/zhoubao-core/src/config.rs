use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::BTreeSet;
use time::format_description::well_known::Rfc3339;
use time::macros::{format_description, time};
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

/// Store keys for the persisted report configuration. Each form field of
/// the report setup is one key, written individually on every edit.
pub mod config_key {
    pub const DOC_ID: &str = "doc_id";
    pub const SHEET_ID: &str = "sheet_id";
    pub const COOKIE: &str = "cookie";
    pub const TASK_TYPE: &str = "task_type";
    pub const DETAIL_COLUMNS: &str = "detail_columns";
    pub const REPORTERS: &str = "reporters";
    pub const WINDOW_START: &str = "window_start";
    pub const WINDOW_END: &str = "window_end";
    pub const NEXT_WEEK_VERSIONS: &str = "next_week_versions";
}

/// Keys whose values are stored as JSON arrays of ids.
pub const LIST_KEYS: &[&str] = &[
    config_key::DETAIL_COLUMNS,
    config_key::REPORTERS,
    config_key::NEXT_WEEK_VERSIONS,
];

/// Inclusive timestamp range a completed row's `updatedAt` must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl ReportWindow {
    pub fn contains(&self, ts: OffsetDateTime) -> bool {
        self.start <= ts && ts <= self.end
    }

    /// The ISO week containing `today`: Monday 00:00:00 UTC through the end
    /// of Sunday. Used when no window is configured.
    pub fn current_week(today: Date) -> Self {
        let monday = today - Duration::days(i64::from(today.weekday().number_days_from_monday()));
        let sunday = monday + Duration::days(6);
        Self {
            start: monday.midnight().assume_utc(),
            end: PrimitiveDateTime::new(sunday, time!(23:59:59.999)).assume_utc(),
        }
    }
}

/// User-chosen field mappings and filters, assembled from the flat store
/// map. Everything is optional at load time; `require_doc` gates the
/// commands that need to reach the service.
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    pub doc_id: String,
    pub sheet_id: String,
    pub cookie: Option<String>,
    pub task_type_column: String,
    pub detail_columns: Vec<String>,
    pub reporters: BTreeSet<String>,
    pub window: Option<ReportWindow>,
    pub next_week_versions: BTreeSet<String>,
}

impl ReportConfig {
    pub fn from_map(map: &serde_json::Map<String, Value>) -> Result<Self> {
        let window = match (
            bound(map, config_key::WINDOW_START)?,
            bound(map, config_key::WINDOW_END)?,
        ) {
            (Some(start), Some(end)) => {
                if start > end {
                    bail!("window_start is after window_end");
                }
                Some(ReportWindow { start, end })
            }
            (None, None) => None,
            _ => bail!("window_start and window_end must be set together"),
        };

        Ok(Self {
            doc_id: string_key(map, config_key::DOC_ID).unwrap_or_default(),
            sheet_id: string_key(map, config_key::SHEET_ID).unwrap_or_default(),
            cookie: string_key(map, config_key::COOKIE),
            task_type_column: string_key(map, config_key::TASK_TYPE).unwrap_or_default(),
            detail_columns: list_key(map, config_key::DETAIL_COLUMNS),
            reporters: list_key(map, config_key::REPORTERS).into_iter().collect(),
            window,
            next_week_versions: list_key(map, config_key::NEXT_WEEK_VERSIONS)
                .into_iter()
                .collect(),
        })
    }

    /// The document coordinates, or an error telling the user what to set.
    pub fn require_doc(&self) -> Result<(&str, &str)> {
        if self.doc_id.is_empty() || self.sheet_id.is_empty() {
            bail!("doc_id and sheet_id are not set. Run `zhoubao config set doc_id <id>` and `zhoubao config set sheet_id <id>` first.");
        }
        Ok((&self.doc_id, &self.sheet_id))
    }
}

/// Parse one window bound. Accepts RFC 3339 or a plain `YYYY-MM-DD` date;
/// a bare start date means midnight, a bare end date the end of that day.
pub fn parse_window_bound(raw: &str, is_end: bool) -> Result<OffsetDateTime> {
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(ts);
    }
    let date = Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .with_context(|| format!("cannot parse {raw:?} as RFC 3339 or YYYY-MM-DD"))?;
    let ts = if is_end {
        PrimitiveDateTime::new(date, time!(23:59:59.999))
    } else {
        date.midnight()
    };
    Ok(ts.assume_utc())
}

fn bound(
    map: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Option<OffsetDateTime>> {
    match string_key(map, key) {
        Some(raw) => Ok(Some(
            parse_window_bound(&raw, key == config_key::WINDOW_END)
                .with_context(|| format!("invalid {key}"))?,
        )),
        None => Ok(None),
    }
}

/// A scalar store value as a string. Numeric ids survive having been
/// coerced to JSON numbers by `config set`.
fn string_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_key(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(string_of)
}

/// A list-valued store key. Arrays are the stored form; a lone scalar is
/// accepted as a one-element list.
fn list_key(map: &serde_json::Map<String, Value>, key: &str) -> Vec<String> {
    match map.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(string_of).collect(),
        Some(other) => string_of(other).into_iter().collect(),
        None => Vec::new(),
    }
}
