//! Storage area persisted as a single JSON object on disk.

use async_trait::async_trait;
use dr_core::{DrError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::area::{Items, StorageArea};

const APP_DIR: &str = "dupstrip";
const FILE_NAME: &str = "storage.json";

pub struct JsonFileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles.
    lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    /// `<config dir>/dupstrip/storage.json`, falling back to the working directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Items> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Items::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Items::new());
        }
        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(map) => Ok(map),
            other => Err(DrError::Storage(format!(
                "{}: expected a JSON object, found {}",
                self.path.display(),
                type_name(&other)
            ))),
        }
    }

    async fn write_all(&self, items: &Items) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let body = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        tracing::debug!(path = %self.path.display(), keys = items.len(), "storage written");
        Ok(())
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl StorageArea for JsonFileStorage {
    async fn get(&self, keys: &[&str]) -> Result<Items> {
        let _guard = self.lock.lock().await;
        let all = self.read_all().await?;
        Ok(keys
            .iter()
            .filter_map(|k| all.get(*k).map(|v| (k.to_string(), v.clone())))
            .collect())
    }

    async fn set(&self, items: Items) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut all = self.read_all().await?;
        all.extend(items);
        self.write_all(&all).await
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut all = self.read_all().await?;
        for k in keys {
            all.remove(*k);
        }
        self.write_all(&all).await
    }

    async fn get_all(&self) -> Result<Items> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn items(v: Value) -> Items {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_file_missing_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStorage::new(tmp.path().join("nope.json"));
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_set_get() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStorage::new(tmp.path().join("nested/dir/storage.json"));
        store.set(items(json!({"urlPatterns": ["https://a.com/*"]}))).await.unwrap();
        store.set(items(json!({"completeDelayMs": 700}))).await.unwrap();

        let reopened = JsonFileStorage::new(store.path());
        let got = reopened.get(&["urlPatterns", "completeDelayMs"]).await.unwrap();
        assert_eq!(got["urlPatterns"], json!(["https://a.com/*"]));
        assert_eq!(got["completeDelayMs"], json!(700));
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("storage.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), "x").unwrap();

        let store = JsonFileStorage::new(path.clone());
        assert!(store.write_all(&items(json!({"completeDelayMs": 700}))).await.is_err());
        assert!(!tmp.path().join("storage.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_remove() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStorage::new(tmp.path().join("s.json"));
        store.set(items(json!({"a": 1, "b": 2}))).await.unwrap();
        store.remove(&["a"]).await.unwrap();
        let all = store.get_all().await.unwrap();
        assert!(!all.contains_key("a"));
        assert!(all.contains_key("b"));
    }

    #[tokio::test]
    async fn test_file_rejects_non_object() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("s.json");
        tokio::fs::write(&path, "[1, 2]").await.unwrap();
        let err = JsonFileStorage::new(&path).get_all().await.unwrap_err();
        assert!(matches!(err, DrError::Storage(_)));
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(JsonFileStorage::default_path().ends_with("dupstrip/storage.json"));
    }
}
