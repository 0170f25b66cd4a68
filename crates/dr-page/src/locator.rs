//! Field discovery strategies.

use dr_core::{Preferences, Result, SiteProfile};

use crate::page::{FieldHandle, Page};
use crate::selector::Selector;

pub trait FieldLocator: Send + Sync {
    fn locate(&self, page: &Page) -> Option<FieldHandle>;

    /// Human-readable form for logs.
    fn describe(&self) -> String;
}

/// First element matching a selector.
#[derive(Debug, Clone)]
pub struct SelectorLocator {
    selector: Selector,
}

impl SelectorLocator {
    pub fn new(selector: &str) -> Result<Self> {
        Ok(Self { selector: Selector::parse(selector)? })
    }
}

impl FieldLocator for SelectorLocator {
    fn locate(&self, page: &Page) -> Option<FieldHandle> {
        page.query_selector(&self.selector)
    }

    fn describe(&self) -> String {
        self.selector.to_string()
    }
}

/// The n-th (0-based) element matching a selector.
#[derive(Debug, Clone)]
pub struct IndexLocator {
    selector: Selector,
    index: usize,
}

impl IndexLocator {
    pub fn new(selector: &str, index: usize) -> Result<Self> {
        Ok(Self { selector: Selector::parse(selector)?, index })
    }
}

impl FieldLocator for IndexLocator {
    fn locate(&self, page: &Page) -> Option<FieldHandle> {
        page.query_selector_all(&self.selector).get(self.index).copied()
    }

    fn describe(&self) -> String {
        format!("{}[{}]", self.selector, self.index)
    }
}

/// First element whose attribute equals a value.
#[derive(Debug, Clone)]
pub struct AttributeLocator {
    pub name: String,
    pub value: String,
}

impl AttributeLocator {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

impl FieldLocator for AttributeLocator {
    fn locate(&self, page: &Page) -> Option<FieldHandle> {
        (0..page.len())
            .map(FieldHandle)
            .find(|&h| {
                page.element(h)
                    .is_some_and(|el| el.attribute(&self.name) == Some(self.value.as_str()))
            })
    }

    fn describe(&self) -> String {
        format!("[{}={:?}]", self.name, self.value)
    }
}

/// Locators for the three fields the actions touch.
pub struct SiteLocators {
    pub category: Box<dyn FieldLocator>,
    pub product_name: Box<dyn FieldLocator>,
    pub tag_target: Box<dyn FieldLocator>,
}

impl SiteLocators {
    /// A configured tag-target selector wins over the profile's index lookup.
    /// One that doesn't parse is ignored with a warning; only the profile's
    /// own selectors can fail here.
    pub fn resolve(site: &SiteProfile, prefs: &Preferences) -> Result<Self> {
        let configured = prefs.tag_target_override().and_then(|sel| match SelectorLocator::new(sel) {
            Ok(locator) => Some(locator),
            Err(e) => {
                tracing::warn!(selector = sel, error = %e, "ignoring configured tag target selector");
                None
            }
        });
        let tag_target: Box<dyn FieldLocator> = match configured {
            Some(locator) => Box::new(locator),
            None => Box::new(IndexLocator::new(&site.tag_target_selector, site.tag_target_index)?),
        };
        Ok(Self {
            category: Box::new(SelectorLocator::new(&site.category_selector)?),
            product_name: Box::new(SelectorLocator::new(&site.product_name_selector)?),
            tag_target,
        })
    }
}
