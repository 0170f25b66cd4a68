//! "Run both" pipeline: deduplicate the name to convergence, then apply the tag rule.
//!
//! Each step runs only when its field is present. A missing field skips that
//! step and never stops the other one.

use std::time::Duration;

use dr_core::{Result, SiteProfile};
use tracing::{debug, info};

use crate::converge::{stabilize, StabilizeReport, Stabilizer};
use crate::field::TextField;
use crate::tag::TagRule;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineResult {
    /// `None` when there was no name field or it went away mid-run.
    pub dedup: Option<StabilizeReport>,
    /// The tag target was read and the rule evaluated.
    pub tag_checked: bool,
    /// New tag target value, if the rule fired.
    pub tagged: Option<String>,
}

impl PipelineResult {
    pub fn changed_anything(&self) -> bool {
        self.dedup.as_ref().is_some_and(|d| d.changed) || self.tagged.is_some()
    }
}

/// Maps "field not found" to `None`; other errors pass through.
fn skip_missing<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.is_not_found() => {
            debug!(error = %e, "field gone, skipping step");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    pub stabilizer: Stabilizer,
    pub tag_rule: TagRule,
}

impl Pipeline {
    pub fn new(stabilizer: Stabilizer, tag_rule: TagRule) -> Self {
        Self { stabilizer, tag_rule }
    }

    /// Iteration cap and tag constants from the profile, with the given pause.
    pub fn from_profile(site: &SiteProfile, delay: Duration) -> Self {
        Self::new(Stabilizer::new(site.max_iterations, delay), TagRule::from_profile(site))
    }

    /// Run on plain strings.
    pub fn run_text(&self, name: &str, category_label: &str, tag_value: &str) -> PipelineResult {
        PipelineResult {
            dedup: Some(stabilize(name, self.stabilizer.max_iterations)),
            tag_checked: true,
            tagged: self.tag_rule.apply(category_label, tag_value),
        }
    }

    /// Tag step alone. Writes the target only when the rule fires.
    pub async fn tag(&self, target: &dyn TextField, category_label: &str) -> Result<Option<String>> {
        let current = target.read().await?;
        let tagged = self.tag_rule.apply(category_label, &current);
        if let Some(value) = &tagged {
            target.write(value).await?;
        }
        Ok(tagged)
    }

    /// Run against live fields. Pass `None` for a field that isn't there;
    /// the tag step takes the target together with the category label.
    pub async fn run(
        &self,
        name: Option<&dyn TextField>,
        tag: Option<(&dyn TextField, &str)>,
    ) -> Result<PipelineResult> {
        let dedup = match name {
            Some(field) => skip_missing(self.stabilizer.run(field).await)?,
            None => None,
        };

        let (tag_checked, tagged) = match tag {
            Some((target, label)) => match skip_missing(self.tag(target, label).await)? {
                Some(tagged) => (true, tagged),
                None => (false, None),
            },
            None => (false, None),
        };

        info!(
            dedup_ran = dedup.is_some(),
            changed = dedup.as_ref().is_some_and(|d| d.changed),
            hit_limit = dedup.as_ref().is_some_and(|d| d.hit_limit),
            tag_checked,
            tagged = tagged.is_some(),
            "pipeline finished"
        );
        Ok(PipelineResult { dedup, tag_checked, tagged })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Stabilizer::default(), TagRule::default())
    }
}
