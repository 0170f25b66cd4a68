//! Parsing of the raw options form.

use dr_core::config::{MAX_DELAY_MS, MIN_DELAY_MS};
use dr_core::Preferences;

/// Raw text as entered in the options form.
#[derive(Debug, Clone, Default)]
pub struct OptionsForm {
    pub url_patterns: String,
    pub dictionary: String,
    pub tag_target_selector: String,
    pub complete_delay_ms: String,
}

fn lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Leading-integer parse; anything unparseable becomes the minimum.
pub fn parse_delay(text: &str) -> u64 {
    let t = text.trim();
    let end = t
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(t.len());
    let digits = &t[..end];
    match digits.parse::<i64>() {
        Ok(n) => Preferences::clamp_delay(n),
        // Out of i64 range: saturate toward the matching bound.
        Err(_) if digits.bytes().any(|b| b.is_ascii_digit()) && !digits.starts_with('-') => MAX_DELAY_MS,
        Err(_) => MIN_DELAY_MS,
    }
}

impl OptionsForm {
    /// Form contents for existing preferences.
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            url_patterns: prefs.url_patterns.join("\n"),
            dictionary: prefs.dictionary.join("\n"),
            tag_target_selector: prefs.tag_target_selector.clone(),
            complete_delay_ms: prefs.complete_delay_ms.to_string(),
        }
    }

    /// Apply the form onto `base`, keeping fields the form doesn't cover.
    pub fn apply(&self, base: &Preferences) -> Preferences {
        Preferences {
            url_patterns: lines(&self.url_patterns),
            dictionary: lines(&self.dictionary),
            tag_target_selector: self.tag_target_selector.trim().to_string(),
            complete_delay_ms: parse_delay(&self.complete_delay_ms),
            float_pos: base.float_pos.clone(),
        }
    }
}
