//! Page model and field access.
//!
//! The deduplication core never touches a document directly. It sees
//! `TextField`s, which this crate builds from a `FieldLocator` (how to find
//! the element) and a `FieldAdapter` (how to write it so the page's own
//! framework notices).

pub mod adapter;
pub mod bound;
pub mod element;
pub mod locator;
pub mod page;
pub mod selector;

pub use adapter::{adapter_by_name, FieldAdapter, HookFallbackAdapter, ReactiveAdapter, StrictAdapter};
pub use bound::BoundField;
pub use element::{Element, EventKind, FieldEvent};
pub use locator::{AttributeLocator, FieldLocator, IndexLocator, SelectorLocator, SiteLocators};
pub use page::{FieldHandle, Page, PageSnapshot};
pub use selector::Selector;
