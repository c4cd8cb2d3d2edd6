use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

/// Key the serialized task collection lives under.
pub const TASKS_KEY: &str = "tasks";
/// Key the last-selected board name lives under, JSON-string-encoded.
pub const ACTIVE_BOARD_KEY: &str = "activeBoard";
/// Key for the sidebar visibility flag, `"true"` / `"false"`.
pub const SHOW_SIDEBAR_KEY: &str = "showSideBar";
/// Key for the theme flag, `"enabled"` / `"disabled"`.
pub const LIGHT_THEME_KEY: &str = "light-theme";

pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskdeck")
        .join("store.json")
}

/// File-backed key-value store: one JSON object mapping string keys to
/// string values. Reads are served from memory; every `save` rewrites the
/// whole file atomically, so writes are immediately visible to subsequent
/// reads within the process.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl Store {
    /// Opens the store at `path`. A missing file yields an empty store; a
    /// present but malformed file is a hard error naming the path.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("failed to read store file '{}'", path.display()))?;
            serde_json::from_str(&contents).with_context(|| {
                format!(
                    "store file '{}' is not a valid JSON object of string entries",
                    path.display()
                )
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never errors on a missing key.
    pub fn load(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn save(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.entries.insert(key.into(), value.into());
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| anyhow!("invalid store path '{}'", self.path.display()))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create store directory '{}'", parent.display()))?;

        let contents = serde_json::to_string_pretty(&self.entries)
            .context("failed to serialize store entries")?;

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| anyhow!("invalid store file name '{}'", self.path.display()))?
            .to_string_lossy()
            .to_string();
        let tmp_path = self.path.with_file_name(format!(".{file_name}.tmp"));

        fs::write(&tmp_path, contents).with_context(|| {
            format!("failed to write temporary store file '{}'", tmp_path.display())
        })?;
        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "failed to atomically rename store file '{}' to '{}'",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_path(dir: &TempDir) -> PathBuf {
        dir.path().join("taskdeck").join("store.json")
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = Store::open(store_path(&dir)).expect("missing file should open empty");
        assert_eq!(store.load("tasks"), None);
        assert!(!store.contains("tasks"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut store = Store::open(store_path(&dir)).expect("failed to open store");

        store.save("tasks", "[]").expect("failed to save");
        assert_eq!(store.load("tasks"), Some("[]"));
    }

    #[test]
    fn test_save_persists_across_reopen() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = store_path(&dir);

        let mut store = Store::open(&path).expect("failed to open store");
        store
            .save("showSideBar", "true")
            .expect("failed to save flag");
        store
            .save("activeBoard", "\"Launch\"")
            .expect("failed to save active board");
        drop(store);

        let reopened = Store::open(&path).expect("failed to reopen store");
        assert_eq!(reopened.load("showSideBar"), Some("true"));
        assert_eq!(reopened.load("activeBoard"), Some("\"Launch\""));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("deeply").join("nested").join("store.json");

        let mut store = Store::open(&path).expect("failed to open store");
        store.save("light-theme", "enabled").expect("failed to save");

        assert!(path.exists());
    }

    #[test]
    fn test_overwrite_is_visible_immediately() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut store = Store::open(store_path(&dir)).expect("failed to open store");

        store.save("light-theme", "enabled").expect("failed to save");
        store.save("light-theme", "disabled").expect("failed to save");
        assert_eq!(store.load("light-theme"), Some("disabled"));
    }

    #[test]
    fn test_malformed_store_file_fails_loudly() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = store_path(&dir);
        fs::create_dir_all(path.parent().expect("store path should have parent"))
            .expect("failed to create store dir");
        fs::write(&path, "{not json").expect("failed to write malformed store");

        let err = Store::open(&path).expect_err("malformed store should not open");
        assert!(err.to_string().contains("store.json"));
    }

    #[test]
    fn test_wrong_shape_store_file_fails_loudly() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = store_path(&dir);
        fs::create_dir_all(path.parent().expect("store path should have parent"))
            .expect("failed to create store dir");
        fs::write(&path, "[1, 2, 3]").expect("failed to write wrong-shape store");

        assert!(Store::open(&path).is_err());
    }
}
