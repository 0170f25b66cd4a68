use async_trait::async_trait;
use dr_core::{DrError, FieldRole, Result};
use dr_dedup::TextField;
use std::sync::Arc;

use crate::adapter::FieldAdapter;
use crate::locator::FieldLocator;
use crate::page::{FieldHandle, Page};

/// A located field plus the adapter used to write it.
#[derive(Clone)]
pub struct BoundField {
    page: Arc<Page>,
    adapter: Arc<dyn FieldAdapter>,
    handle: FieldHandle,
    role: FieldRole,
}

impl BoundField {
    pub fn new(page: Arc<Page>, adapter: Arc<dyn FieldAdapter>, handle: FieldHandle, role: FieldRole) -> Self {
        Self { page, adapter, handle, role }
    }

    /// Locate and bind, or fail with `FieldNotFound`.
    pub fn locate(
        page: Arc<Page>,
        adapter: Arc<dyn FieldAdapter>,
        locator: &dyn FieldLocator,
        role: FieldRole,
    ) -> Result<Self> {
        let handle = locator.locate(&page).ok_or_else(|| {
            tracing::warn!(%role, locator = %locator.describe(), "field not found");
            DrError::field_not_found(role)
        })?;
        Ok(Self::new(page, adapter, handle, role))
    }

    pub fn handle(&self) -> FieldHandle {
        self.handle
    }

    pub fn role(&self) -> FieldRole {
        self.role
    }

    pub fn value(&self) -> Option<String> {
        self.adapter.read(&self.page, self.handle)
    }
}

#[async_trait]
impl TextField for BoundField {
    async fn read(&self) -> Result<String> {
        self.value().ok_or(DrError::field_not_found(self.role))
    }

    async fn write(&self, value: &str) -> Result<()> {
        if self.adapter.write(&self.page, self.handle, value) {
            Ok(())
        } else {
            Err(DrError::field_not_found(self.role))
        }
    }
}

impl std::fmt::Debug for BoundField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundField")
            .field("role", &self.role)
            .field("handle", &self.handle)
            .field("adapter", &self.adapter.name())
            .finish()
    }
}
