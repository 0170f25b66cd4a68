//! Category-triggered tag prefix.

use dr_core::SiteProfile;

/// Returns the tagged value, or `None` when the label doesn't trigger or the
/// value already carries the prefix.
pub fn apply_tag(
    category_label: &str,
    current_value: &str,
    trigger_phrase: &str,
    tag_prefix: &str,
) -> Option<String> {
    if !category_label.contains(trigger_phrase) || current_value.starts_with(tag_prefix) {
        return None;
    }
    Some(format!("{tag_prefix} {current_value}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRule {
    pub trigger_phrase: String,
    pub tag_prefix: String,
}

impl TagRule {
    pub fn new(trigger_phrase: impl Into<String>, tag_prefix: impl Into<String>) -> Self {
        Self {
            trigger_phrase: trigger_phrase.into(),
            tag_prefix: tag_prefix.into(),
        }
    }

    pub fn from_profile(site: &SiteProfile) -> Self {
        Self::new(site.trigger_phrase.clone(), site.tag_prefix.clone())
    }

    pub fn apply(&self, category_label: &str, current_value: &str) -> Option<String> {
        apply_tag(category_label, current_value, &self.trigger_phrase, &self.tag_prefix)
    }
}

impl Default for TagRule {
    fn default() -> Self {
        Self::from_profile(&SiteProfile::default())
    }
}
