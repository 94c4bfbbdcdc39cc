use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Return the per-user store root: `~/.config/zhoubao/` (platform
/// equivalent), falling back to `~/.zhoubao/`.
pub fn store_root() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("zhoubao")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".zhoubao")
    } else {
        PathBuf::from(".zhoubao")
    }
}

/// Atomic write: write to a temp file in the same dir, then rename.
pub fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("no parent dir for {}", path.display()))?;
    fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

/// Flat key/value configuration file, one JSON object. Every edit rewrites
/// the whole file atomically; last write wins. Edits come from a single
/// interactive session at a time, so there is no lock.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// A store whose `config.json` lives under `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join("config.json"),
        }
    }

    /// The per-user store.
    pub fn open_default() -> Self {
        Self::open(store_root())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole map. A missing or unreadable file is an empty map;
    /// the store never blocks startup on bad state.
    pub fn load(&self) -> Map<String, Value> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return Map::new(),
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.load().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: Value) -> anyhow::Result<()> {
        let mut map = self.load();
        map.insert(key.to_string(), value);
        self.write(&map)
    }

    /// Remove a key. Returns whether it was present.
    pub fn unset(&self, key: &str) -> anyhow::Result<bool> {
        let mut map = self.load();
        let removed = map.remove(key).is_some();
        if removed {
            self.write(&map)?;
        }
        Ok(removed)
    }

    fn write(&self, map: &Map<String, Value>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(map)?;
        write_atomic(&self.path, json.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_root_is_not_empty() {
        assert!(!store_root().as_os_str().is_empty());
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ConfigStore::open(tmp.path());
        assert!(store.load().is_empty());
        assert!(store.get("doc_id").is_none());
    }

    #[test]
    fn set_get_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ConfigStore::open(tmp.path());
        store.set("doc_id", Value::String("d1".into())).unwrap();
        store
            .set("reporters", serde_json::json!(["u_a", "u_b"]))
            .unwrap();

        assert_eq!(store.get("doc_id"), Some(Value::String("d1".into())));
        assert_eq!(store.load().len(), 2);

        // Reopening reads the same file.
        let reopened = ConfigStore::open(tmp.path());
        assert_eq!(reopened.get("reporters"), Some(serde_json::json!(["u_a", "u_b"])));
    }

    #[test]
    fn set_overwrites_previous_value() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ConfigStore::open(tmp.path());
        store.set("sheet_id", Value::String("s1".into())).unwrap();
        store.set("sheet_id", Value::String("s2".into())).unwrap();
        assert_eq!(store.get("sheet_id"), Some(Value::String("s2".into())));
    }

    #[test]
    fn unset_removes_key() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ConfigStore::open(tmp.path());
        store.set("cookie", Value::String("c".into())).unwrap();
        assert!(store.unset("cookie").unwrap());
        assert!(!store.unset("cookie").unwrap());
        assert!(store.get("cookie").is_none());
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ConfigStore::open(tmp.path());
        fs::create_dir_all(tmp.path()).unwrap();
        fs::write(store.path(), b"{ not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn write_atomic_creates_parent_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.json");
        write_atomic(&path, b"{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
