use clap::Subcommand;
use serde_json::Value;
use zhoubao_core::config::{self, config_key};
use zhoubao_store::ConfigStore;

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Set a config value
    Set {
        /// Config key (doc_id, sheet_id, cookie, task_type, detail_columns,
        /// reporters, window_start, window_end, next_week_versions)
        key: String,
        /// Config value; list keys take comma-separated ids
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// Remove a config value
    Unset {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
}

// ── Dispatch ──

pub fn run(cmd: ConfigCmd, store: &ConfigStore) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Set { key, value } => set(store, &key, &value),
        ConfigCmd::Get { key } => get(store, &key),
        ConfigCmd::Unset { key } => unset(store, &key),
        ConfigCmd::List => list(store),
    }
}

// ── Command Implementations ──

/// Parse a raw CLI value for a key. List keys split on commas into JSON
/// arrays and everything else stores as a string. Window bounds must
/// parse before they are stored.
fn parse_value(key: &str, raw: &str) -> anyhow::Result<Value> {
    if config::LIST_KEYS.contains(&key) {
        let items: Vec<Value> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Value::String(s.to_string()))
            .collect();
        return Ok(Value::Array(items));
    }
    if key == config_key::WINDOW_START || key == config_key::WINDOW_END {
        config::parse_window_bound(raw, key == config_key::WINDOW_END)?;
    }
    Ok(Value::String(raw.to_string()))
}

/// `zhoubao config set <key> <value>`
fn set(store: &ConfigStore, key: &str, value: &str) -> anyhow::Result<()> {
    let parsed = parse_value(key, value)?;
    store.set(key, parsed)?;
    println!("{key} = {value}");
    Ok(())
}

/// `zhoubao config get <key>`
fn get(store: &ConfigStore, key: &str) -> anyhow::Result<()> {
    match store.get(key) {
        Some(val) => println!("{val}"),
        None => println!("(not set)"),
    }
    Ok(())
}

/// `zhoubao config unset <key>`
fn unset(store: &ConfigStore, key: &str) -> anyhow::Result<()> {
    if store.unset(key)? {
        println!("removed {key}");
    } else {
        println!("(not set)");
    }
    Ok(())
}

/// `zhoubao config list`
fn list(store: &ConfigStore) -> anyhow::Result<()> {
    let map = store.load();
    if map.is_empty() {
        println!("(no config set)");
    } else {
        for (k, v) in &map {
            println!("{k} = {v}");
        }
    }
    Ok(())
}
