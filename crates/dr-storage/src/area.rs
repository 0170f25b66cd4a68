//! Key-value storage areas holding JSON values.

use async_trait::async_trait;
use dr_core::Result;
use parking_lot::RwLock;
use serde_json::{Map, Value};

pub type Items = Map<String, Value>;

#[async_trait]
pub trait StorageArea: Send + Sync {
    /// Fetch the given keys. Absent keys are simply missing from the result.
    async fn get(&self, keys: &[&str]) -> Result<Items>;

    /// Merge `items` into the area.
    async fn set(&self, items: Items) -> Result<()>;

    async fn remove(&self, keys: &[&str]) -> Result<()>;

    async fn get_all(&self) -> Result<Items>;
}

#[async_trait]
impl<T: StorageArea + ?Sized> StorageArea for std::sync::Arc<T> {
    async fn get(&self, keys: &[&str]) -> Result<Items> {
        (**self).get(keys).await
    }

    async fn set(&self, items: Items) -> Result<()> {
        (**self).set(items).await
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        (**self).remove(keys).await
    }

    async fn get_all(&self) -> Result<Items> {
        (**self).get_all().await
    }
}

/// In-memory storage area.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: RwLock<Items>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Items) -> Self {
        Self { data: RwLock::new(items) }
    }
}

#[async_trait]
impl StorageArea for MemoryStorage {
    async fn get(&self, keys: &[&str]) -> Result<Items> {
        let data = self.data.read();
        Ok(keys
            .iter()
            .filter_map(|k| data.get(*k).map(|v| (k.to_string(), v.clone())))
            .collect())
    }

    async fn set(&self, items: Items) -> Result<()> {
        self.data.write().extend(items);
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        let mut data = self.data.write();
        for k in keys {
            data.remove(*k);
        }
        Ok(())
    }

    async fn get_all(&self) -> Result<Items> {
        Ok(self.data.read().clone())
    }
}
