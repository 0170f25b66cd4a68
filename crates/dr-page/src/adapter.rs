//! Writing values so that a reactive framework observing the field notices.

use tracing::{debug, warn};

use crate::element::EventKind;
use crate::page::{FieldHandle, Page};

pub trait FieldAdapter: Send + Sync {
    fn read(&self, page: &Page, handle: FieldHandle) -> Option<String> {
        page.read(handle)
    }

    /// Returns false when the handle no longer points at an element.
    fn write(&self, page: &Page, handle: FieldHandle, value: &str) -> bool;

    fn name(&self) -> &'static str;
}

/// Native setter, then bubbling `input` and `change`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactiveAdapter;

impl FieldAdapter for ReactiveAdapter {
    fn write(&self, page: &Page, handle: FieldHandle, value: &str) -> bool {
        if !page.native_set(handle, value) {
            return false;
        }
        page.dispatch(handle, EventKind::Input, true);
        page.dispatch(handle, EventKind::Change, true);
        true
    }

    fn name(&self) -> &'static str {
        "reactive"
    }
}

/// Full interaction sequence for hosts that validate focus and key activity.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictAdapter;

impl StrictAdapter {
    const KEY: &'static str = "Unidentified";
}

impl FieldAdapter for StrictAdapter {
    fn write(&self, page: &Page, handle: FieldHandle, value: &str) -> bool {
        if page.element(handle).is_none() {
            return false;
        }
        page.dispatch(handle, EventKind::Focus, false);
        page.dispatch(handle, EventKind::KeyDown { key: Self::KEY.into() }, true);
        page.native_set(handle, value);
        page.dispatch(handle, EventKind::KeyUp { key: Self::KEY.into() }, true);
        page.dispatch(handle, EventKind::Input, true);
        page.dispatch(handle, EventKind::Change, true);
        page.dispatch(handle, EventKind::Blur, false);
        true
    }

    fn name(&self) -> &'static str {
        "strict"
    }
}

pub const DEFAULT_HOOK_PREFIXES: &[&str] = &["__reactProps$", "__reactEventHandlers$"];

/// Wraps another adapter. If the framework still disagrees with the DOM after
/// the write, looks for a private framework key on the element and calls the
/// handler through it.
///
/// Depends on undocumented framework internals; key names change between
/// framework versions, so this can stop working without notice.
#[derive(Debug, Clone)]
pub struct HookFallbackAdapter<A> {
    inner: A,
    key_prefixes: Vec<String>,
}

impl<A: FieldAdapter> HookFallbackAdapter<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            key_prefixes: DEFAULT_HOOK_PREFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_prefixes(mut self, prefixes: &[&str]) -> Self {
        self.key_prefixes = prefixes.iter().map(|s| s.to_string()).collect();
        self
    }

    fn find_key(&self, page: &Page, handle: FieldHandle) -> Option<String> {
        let el = page.element(handle)?;
        el.internal_keys
            .into_iter()
            .find(|k| self.key_prefixes.iter().any(|p| k.starts_with(p.as_str())))
    }
}

impl<A: FieldAdapter> FieldAdapter for HookFallbackAdapter<A> {
    fn write(&self, page: &Page, handle: FieldHandle, value: &str) -> bool {
        if !self.inner.write(page, handle, value) {
            return false;
        }
        if page.in_sync(handle) {
            return true;
        }
        match self.find_key(page, handle) {
            Some(key) => {
                debug!(%key, "framework missed synthetic events, invoking hook");
                page.invoke_hook(handle, &key, value);
            }
            None => warn!(handle = handle.0, "framework state out of sync and no hook key found"),
        }
        true
    }

    fn name(&self) -> &'static str {
        "hook-fallback"
    }
}

/// Adapter by name, as used on the command line.
pub fn adapter_by_name(name: &str) -> Option<Box<dyn FieldAdapter>> {
    match name {
        "reactive" => Some(Box::new(ReactiveAdapter)),
        "strict" => Some(Box::new(StrictAdapter)),
        "hook-fallback" => Some(Box::new(HookFallbackAdapter::new(ReactiveAdapter))),
        _ => None,
    }
}
