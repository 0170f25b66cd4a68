//! In-memory page: element list, event journal, and the framework's view of
//! each reactive field.

use dr_core::Result;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::element::{Element, EventKind, FieldEvent};
use crate::selector::Selector;

/// Index of an element in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldHandle(pub usize);

/// Serialized page state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub elements: Vec<Element>,
}

pub struct Page {
    url: String,
    elements: RwLock<Vec<Element>>,
    framework: RwLock<HashMap<usize, String>>,
    journal: RwLock<Vec<FieldEvent>>,
}

impl Page {
    pub fn new(url: impl Into<String>, elements: Vec<Element>) -> Self {
        let framework = elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.reactive)
            .map(|(i, el)| (i, el.read().to_string()))
            .collect();
        Self {
            url: url.into(),
            elements: RwLock::new(elements),
            framework: RwLock::new(framework),
            journal: RwLock::new(Vec::new()),
        }
    }

    pub fn from_snapshot(snapshot: PageSnapshot) -> Self {
        Self::new(snapshot.url, snapshot.elements)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: PageSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            url: self.url.clone(),
            elements: self.elements.read().clone(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn len(&self) -> usize {
        self.elements.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element(&self, handle: FieldHandle) -> Option<Element> {
        self.elements.read().get(handle.0).cloned()
    }

    pub fn query_selector_all(&self, selector: &Selector) -> Vec<FieldHandle> {
        self.elements
            .read()
            .iter()
            .enumerate()
            .filter(|(_, el)| selector.matches(el))
            .map(|(i, _)| FieldHandle(i))
            .collect()
    }

    pub fn query_selector(&self, selector: &Selector) -> Option<FieldHandle> {
        self.elements
            .read()
            .iter()
            .position(|el| selector.matches(el))
            .map(FieldHandle)
    }

    /// Plain value read: form value for inputs, rendered text otherwise.
    pub fn read(&self, handle: FieldHandle) -> Option<String> {
        self.elements.read().get(handle.0).map(|el| el.read().to_string())
    }

    /// Assign the value without notifying anyone. Returns false for a stale handle.
    pub fn native_set(&self, handle: FieldHandle, value: &str) -> bool {
        let mut elements = self.elements.write();
        let Some(el) = elements.get_mut(handle.0) else {
            return false;
        };
        if el.is_form_control() {
            el.value = value.to_string();
        } else {
            el.text = value.to_string();
        }
        drop(elements);
        self.record(handle, EventKind::NativeSet { value: value.to_string() }, false);
        true
    }

    /// Deliver a synthetic event. Input and change events let the framework
    /// pick up the current DOM value.
    pub fn dispatch(&self, handle: FieldHandle, kind: EventKind, bubbles: bool) -> bool {
        let Some(el) = self.element(handle) else {
            return false;
        };
        if el.reactive && !el.trusted_events_only && matches!(kind, EventKind::Input | EventKind::Change) {
            self.framework.write().insert(handle.0, el.read().to_string());
        }
        self.record(handle, kind, bubbles);
        true
    }

    /// Call the framework's handler through a private key. Only works when the
    /// element actually carries that key.
    pub fn invoke_hook(&self, handle: FieldHandle, key: &str, value: &str) -> bool {
        let Some(el) = self.element(handle) else {
            return false;
        };
        if !el.internal_keys.iter().any(|k| k == key) {
            return false;
        }
        self.framework.write().insert(handle.0, value.to_string());
        self.record(handle, EventKind::HookInvoked { key: key.to_string() }, false);
        true
    }

    /// What the framework believes the value is. `None` for non-reactive fields.
    pub fn framework_value(&self, handle: FieldHandle) -> Option<String> {
        self.framework.read().get(&handle.0).cloned()
    }

    /// DOM value and framework state agree (trivially true for non-reactive fields).
    pub fn in_sync(&self, handle: FieldHandle) -> bool {
        match self.framework_value(handle) {
            Some(fw) => self.read(handle).as_deref() == Some(fw.as_str()),
            None => true,
        }
    }

    pub fn events(&self) -> Vec<FieldEvent> {
        self.journal.read().clone()
    }

    pub fn events_for(&self, handle: FieldHandle) -> Vec<EventKind> {
        self.journal
            .read()
            .iter()
            .filter(|e| e.target == handle.0)
            .map(|e| e.kind.clone())
            .collect()
    }

    pub fn clear_events(&self) {
        self.journal.write().clear();
    }

    fn record(&self, handle: FieldHandle, kind: EventKind, bubbles: bool) {
        self.journal.write().push(FieldEvent { target: handle.0, kind, bubbles });
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("url", &self.url)
            .field("elements", &self.len())
            .finish()
    }
}
