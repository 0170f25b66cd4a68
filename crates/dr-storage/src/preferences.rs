//! Typed access to preferences kept in a storage area.

use dr_core::config::keys;
use dr_core::{FloatPosition, Preferences, Result};
use serde_json::{json, Value};
use tracing::info;

use crate::area::{Items, StorageArea};

/// Values written on first install.
pub const INSTALL_URL_PATTERNS: &[&str] = &["https://www.pick2sell.kr/product/*"];
pub const INSTALL_TAG_TARGET_SELECTOR: &str = "input.sc-iafpwu.UboKk";

pub struct PreferencesStore<S> {
    area: S,
}

impl<S: StorageArea> PreferencesStore<S> {
    pub fn new(area: S) -> Self {
        Self { area }
    }

    pub fn area(&self) -> &S {
        &self.area
    }

    /// Load preferences. Missing keys fall back to defaults.
    pub async fn load(&self) -> Result<Preferences> {
        let items = self.area.get(keys::ALL).await?;
        Ok(serde_json::from_value(Value::Object(items))?)
    }

    pub async fn save(&self, prefs: &Preferences) -> Result<()> {
        let items = match serde_json::to_value(prefs)? {
            Value::Object(map) => map,
            _ => Items::new(),
        };
        self.area.set(items).await
    }

    pub async fn save_position(&self, pos: &FloatPosition) -> Result<()> {
        let mut items = Items::new();
        items.insert(keys::FLOAT_POS.into(), serde_json::to_value(pos)?);
        self.area.set(items).await
    }

    pub async fn load_position(&self) -> Result<Option<FloatPosition>> {
        let items = self.area.get(&[keys::FLOAT_POS]).await?;
        match items.get(keys::FLOAT_POS) {
            Some(v) => Ok(Some(serde_json::from_value(v.clone())?)),
            None => Ok(None),
        }
    }

    /// Seed first-run defaults. Leaves existing settings alone.
    /// Returns whether anything was written.
    pub async fn install_defaults(&self) -> Result<bool> {
        let existing = self.area.get(&[keys::URL_PATTERNS]).await?;
        if existing.contains_key(keys::URL_PATTERNS) {
            return Ok(false);
        }
        let mut items = Items::new();
        items.insert(keys::URL_PATTERNS.into(), json!(INSTALL_URL_PATTERNS));
        items.insert(keys::DICTIONARY.into(), json!([]));
        items.insert(keys::TAG_TARGET_SELECTOR.into(), json!(INSTALL_TAG_TARGET_SELECTOR));
        self.area.set(items).await?;
        info!("installed default preferences");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::MemoryStorage;

    #[tokio::test]
    async fn test_load_empty_gives_defaults() {
        let store = PreferencesStore::new(MemoryStorage::new());
        assert_eq!(store.load().await.unwrap(), Preferences::default());
    }

    #[tokio::test]
    async fn test_save_load_roundtrip_keys() {
        let store = PreferencesStore::new(MemoryStorage::new());
        let prefs = Preferences {
            url_patterns: vec!["https://a.com/*".into()],
            dictionary: vec!["고양이".into()],
            tag_target_selector: "input.t".into(),
            complete_delay_ms: 900,
            float_pos: None,
        };
        store.save(&prefs).await.unwrap();
        let raw = store.area().get_all().await.unwrap();
        assert_eq!(raw["inputCSelector"], json!("input.t"));
        assert_eq!(raw["completeDelayMs"], json!(900));
        assert_eq!(store.load().await.unwrap(), prefs);
    }

    #[tokio::test]
    async fn test_load_tolerates_odd_stored_delay() {
        let store = PreferencesStore::new(MemoryStorage::new());
        let mut items = Items::new();
        items.insert(keys::COMPLETE_DELAY_MS.into(), json!(-5));
        store.area().set(items).await.unwrap();
        assert_eq!(store.load().await.unwrap().complete_delay_ms, 100);

        let mut items = Items::new();
        items.insert(keys::COMPLETE_DELAY_MS.into(), Value::Null);
        store.area().set(items).await.unwrap();
        assert_eq!(store.load().await.unwrap().complete_delay_ms, 400);
    }

    #[tokio::test]
    async fn test_position() {
        let store = PreferencesStore::new(MemoryStorage::new());
        assert!(store.load_position().await.unwrap().is_none());
        let pos = FloatPosition::from_pixels(30, 40);
        store.save_position(&pos).await.unwrap();
        assert_eq!(store.load_position().await.unwrap(), Some(pos.clone()));
        assert_eq!(store.load().await.unwrap().float_pos, Some(pos));
    }

    #[tokio::test]
    async fn test_install_defaults_once() {
        let store = PreferencesStore::new(MemoryStorage::new());
        assert!(store.install_defaults().await.unwrap());
        let prefs = store.load().await.unwrap();
        assert_eq!(prefs.url_patterns, vec!["https://www.pick2sell.kr/product/*"]);
        assert_eq!(prefs.tag_target_selector, INSTALL_TAG_TARGET_SELECTOR);

        let mut custom = prefs.clone();
        custom.url_patterns = vec!["https://b.com/*".into()];
        store.save(&custom).await.unwrap();
        assert!(!store.install_defaults().await.unwrap());
        assert_eq!(store.load().await.unwrap().url_patterns, vec!["https://b.com/*"]);
    }
}
