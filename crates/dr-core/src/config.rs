use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::FloatPosition;

pub const MIN_DELAY_MS: u64 = 100;
pub const MAX_DELAY_MS: u64 = 3000;
pub const DEFAULT_DELAY_MS: u64 = 400;
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Storage keys, shared with the storage backends.
pub mod keys {
    pub const URL_PATTERNS: &str = "urlPatterns";
    pub const DICTIONARY: &str = "dictionary";
    pub const TAG_TARGET_SELECTOR: &str = "inputCSelector";
    pub const COMPLETE_DELAY_MS: &str = "completeDelayMs";
    pub const FLOAT_POS: &str = "floatPos";

    pub const ALL: &[&str] = &[
        URL_PATTERNS,
        DICTIONARY,
        TAG_TARGET_SELECTOR,
        COMPLETE_DELAY_MS,
        FLOAT_POS,
    ];
}

/// User preferences as persisted in the storage area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default = "default_url_patterns")]
    pub url_patterns: Vec<String>,
    /// Custom words. Stored and edited, not consulted by the deduplicator.
    #[serde(default)]
    pub dictionary: Vec<String>,
    /// Selector for the tag target. Empty means "use the site profile".
    #[serde(default, rename = "inputCSelector")]
    pub tag_target_selector: String,
    #[serde(default = "default_delay_ms", deserialize_with = "lenient_delay")]
    pub complete_delay_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float_pos: Option<FloatPosition>,
}

fn default_url_patterns() -> Vec<String> {
    vec!["https://www.pick2sell.kr/product/*?tab=basicInfo".into()]
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

/// Numbers and numeric strings are floored and clamped. Anything else,
/// `null` included, falls back to the default.
fn lenient_delay<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let ms = match &raw {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64)),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.floor() as i64),
        _ => None,
    };
    Ok(match ms {
        Some(ms) => Preferences::clamp_delay(ms),
        None => {
            tracing::warn!(value = %raw, "unusable stored delay, using default");
            DEFAULT_DELAY_MS
        }
    })
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            url_patterns: default_url_patterns(),
            dictionary: Vec::new(),
            tag_target_selector: String::new(),
            complete_delay_ms: DEFAULT_DELAY_MS,
            float_pos: None,
        }
    }
}

impl Preferences {
    /// Clamp a raw delay into `[MIN_DELAY_MS, MAX_DELAY_MS]`.
    pub fn clamp_delay(raw: i64) -> u64 {
        raw.clamp(MIN_DELAY_MS as i64, MAX_DELAY_MS as i64) as u64
    }

    /// Delay between convergence passes. Out-of-range stored values are clamped.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.complete_delay_ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS))
    }

    /// Custom tag target selector, if one is configured.
    pub fn tag_target_override(&self) -> Option<&str> {
        let s = self.tag_target_selector.trim();
        (!s.is_empty()).then_some(s)
    }
}

/// Markup conventions and rule constants for the supported site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteProfile {
    pub category_selector: String,
    pub product_name_selector: String,
    /// Fallback tag target: the n-th match of this selector.
    pub tag_target_selector: String,
    pub tag_target_index: usize,
    pub trigger_phrase: String,
    pub tag_prefix: String,
    pub max_iterations: usize,
}

impl SiteProfile {
    pub fn pick2sell() -> Self {
        Self {
            category_selector: "div.typo-text-md-medium".into(),
            product_name_selector: r#"input[data-testid="product-name-input"]"#.into(),
            tag_target_selector: "input.sc-cqnWLZ.hMxkNV".into(),
            // Third input of that class.
            tag_target_index: 2,
            trigger_phrase: "생활용품".into(),
            tag_prefix: "비브랜드".into(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self::pick2sell()
    }
}
