//! Glob-style URL allow-list. `*` matches any run of characters; everything
//! else is literal and the whole URL must match.

use regex::Regex;

use crate::error::{DrError, Result};

#[derive(Debug, Clone)]
pub struct UrlPattern {
    source: String,
    regex: Regex,
}

impl UrlPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let regex = Regex::new(&format!("^{body}$"))
            .map_err(|e| DrError::InvalidPattern(format!("{pattern}: {e}")))?;
        Ok(Self { source: pattern.to_string(), regex })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UrlPatternSet {
    patterns: Vec<UrlPattern>,
}

impl UrlPatternSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| UrlPattern::new(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Build a set, skipping patterns that fail to compile.
    pub fn lenient<S: AsRef<str>>(patterns: &[S]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|p| match UrlPattern::new(p.as_ref()) {
                Ok(pat) => Some(pat),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping URL pattern");
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    pub fn matches(&self, url: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(url))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
