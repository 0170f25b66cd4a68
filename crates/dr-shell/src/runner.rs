//! Executes the three toolbar actions against a page.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dr_core::{FieldRole, NoticeKind, Preferences, Result, SiteProfile};
use dr_dedup::{Pipeline, PipelineResult, StabilizeReport, TextField};
use dr_page::{BoundField, FieldAdapter, FieldLocator, Page, SiteLocators};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::notice::NoticeBoard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Deduplicate,
    ApplyTag,
    RunAll,
}

impl Action {
    pub fn deduplicates(&self) -> bool {
        matches!(self, Self::Deduplicate | Self::RunAll)
    }

    pub fn tags(&self) -> bool {
        matches!(self, Self::ApplyTag | Self::RunAll)
    }

    /// Notice for a finished run of this action.
    fn notice(&self, result: &PipelineResult) -> NoticeKind {
        match self {
            Self::Deduplicate => match &result.dedup {
                None => NoticeKind::FieldNotFound,
                Some(r) if r.hit_limit => NoticeKind::MayStillContainDuplicates,
                Some(r) if r.changed => NoticeKind::Deduplicated,
                Some(_) => NoticeKind::NoDuplicates,
            },
            Self::ApplyTag if result.tag_checked => NoticeKind::Executed,
            Self::ApplyTag => NoticeKind::FieldNotFound,
            Self::RunAll => match &result.dedup {
                None if !result.tag_checked => NoticeKind::FieldNotFound,
                Some(r) if r.hit_limit => NoticeKind::MayStillContainDuplicates,
                _ => NoticeKind::Executed,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub action: Action,
    /// False when another action was still running and this one was dropped.
    pub ran: bool,
    pub dedup: Option<StabilizeReport>,
    /// New tag target value, when the tag rule fired.
    pub tagged: Option<String>,
    pub missing: Vec<FieldRole>,
    pub notice: Option<NoticeKind>,
}

impl ActionOutcome {
    fn new(action: Action) -> Self {
        Self { action, ran: true, dedup: None, tagged: None, missing: Vec::new(), notice: None }
    }

    fn ignored(action: Action) -> Self {
        Self { ran: false, ..Self::new(action) }
    }
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ActionRunner {
    page: Arc<Page>,
    adapter: Arc<dyn FieldAdapter>,
    locators: SiteLocators,
    pipeline: Pipeline,
    notices: NoticeBoard,
    busy: AtomicBool,
}

impl ActionRunner {
    /// Fails only when the site profile's own selectors don't parse.
    pub fn new(
        page: Arc<Page>,
        adapter: Arc<dyn FieldAdapter>,
        site: &SiteProfile,
        prefs: &Preferences,
    ) -> Result<Self> {
        Ok(Self {
            page,
            adapter,
            locators: SiteLocators::resolve(site, prefs)?,
            pipeline: Pipeline::from_profile(site, prefs.delay()),
            notices: NoticeBoard::new(),
            busy: AtomicBool::new(false),
        })
    }

    /// Override the pause between convergence passes.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.pipeline.stabilizer.delay = delay;
        self
    }

    pub fn page(&self) -> &Arc<Page> {
        &self.page
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Missing fields skip their step and show up in `missing`; they are not errors.
    pub async fn run(&self, action: Action) -> Result<ActionOutcome> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            info!(?action, "action already running, ignoring trigger");
            return Ok(ActionOutcome::ignored(action));
        }
        let _guard = BusyGuard(&self.busy);

        let mut outcome = ActionOutcome::new(action);
        let name = if action.deduplicates() {
            self.bind(self.locators.product_name.as_ref(), FieldRole::ProductName, &mut outcome.missing)
        } else {
            None
        };
        let tag = if action.tags() { self.tag_inputs(&mut outcome.missing).await? } else { None };

        let result = self
            .pipeline
            .run(
                name.as_ref().map(|f| f as &dyn TextField),
                tag.as_ref().map(|(target, label)| (target as &dyn TextField, label.as_str())),
            )
            .await?;

        if name.is_some() && result.dedup.is_none() {
            outcome.missing.push(FieldRole::ProductName);
        }
        if tag.is_some() && !result.tag_checked {
            outcome.missing.push(FieldRole::TagTarget);
        }
        if let Some(report) = result.dedup.as_ref().filter(|r| r.hit_limit) {
            warn!(iterations = report.iterations, "duplicates may remain");
        }

        let notice = action.notice(&result);
        self.notices.show(notice);
        outcome.notice = Some(notice);
        outcome.dedup = result.dedup;
        outcome.tagged = result.tagged;
        info!(?action, missing = ?outcome.missing, tagged = outcome.tagged.is_some(), "action finished");
        Ok(outcome)
    }

    fn bind(&self, locator: &dyn FieldLocator, role: FieldRole, missing: &mut Vec<FieldRole>) -> Option<BoundField> {
        match BoundField::locate(self.page.clone(), self.adapter.clone(), locator, role) {
            Ok(field) => Some(field),
            Err(_) => {
                missing.push(role);
                None
            }
        }
    }

    /// Tag target plus the category label, or `None` if either is missing.
    async fn tag_inputs(&self, missing: &mut Vec<FieldRole>) -> Result<Option<(BoundField, String)>> {
        let category = self.bind(self.locators.category.as_ref(), FieldRole::Category, missing);
        let target = self.bind(self.locators.tag_target.as_ref(), FieldRole::TagTarget, missing);
        let (Some(category), Some(target)) = (category, target) else {
            return Ok(None);
        };
        match category.read().await {
            Ok(label) => Ok(Some((target, label))),
            Err(e) if e.is_not_found() => {
                missing.push(FieldRole::Category);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
