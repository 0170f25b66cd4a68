use dr_core::{Preferences, UrlPatternSet};

/// Whether the tools should appear on `url`.
pub fn should_activate(url: &str, prefs: &Preferences) -> bool {
    let active = UrlPatternSet::lenient(&prefs.url_patterns).matches(url);
    if !active {
        tracing::info!(%url, "URL not matched, staying inactive");
    }
    active
}
