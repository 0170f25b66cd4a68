use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One node of a page snapshot. Only what field lookup and value access need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Form value, for inputs and textareas.
    #[serde(default)]
    pub value: String,
    /// Rendered text, for everything else.
    #[serde(default)]
    pub text: String,
    /// A reactive framework mirrors this element's value.
    #[serde(default)]
    pub reactive: bool,
    /// The framework ignores synthetic (untrusted) events on this element.
    #[serde(default)]
    pub trusted_events_only: bool,
    /// Framework-private property keys attached to the node, e.g. `__reactProps$x1`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub internal_keys: Vec<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            value: String::new(),
            text: String::new(),
            reactive: false,
            trusted_events_only: false,
            internal_keys: Vec::new(),
        }
    }

    pub fn input() -> Self {
        Self::new("input")
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_classes(mut self, classes: &[&str]) -> Self {
        self.classes.extend(classes.iter().map(|c| c.to_string()));
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn reactive(mut self) -> Self {
        self.reactive = true;
        self
    }

    pub fn trusted_events_only(mut self) -> Self {
        self.trusted_events_only = true;
        self
    }

    pub fn with_internal_key(mut self, key: impl Into<String>) -> Self {
        self.internal_keys.push(key.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is_form_control(&self) -> bool {
        matches!(self.tag.to_ascii_lowercase().as_str(), "input" | "textarea")
    }

    /// What a plain read of the field returns.
    pub fn read(&self) -> &str {
        if self.is_form_control() {
            &self.value
        } else {
            &self.text
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Value assigned through the native setter; no listeners run.
    NativeSet { value: String },
    Input,
    Change,
    Focus,
    Blur,
    KeyDown { key: String },
    KeyUp { key: String },
    /// Framework handler invoked directly via a private key.
    HookInvoked { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEvent {
    pub target: usize,
    pub kind: EventKind,
    pub bubbles: bool,
}
