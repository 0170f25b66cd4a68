use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Args, ValueEnum};
use dr_core::SiteProfile;
use dr_page::{adapter_by_name, FieldAdapter, Page, PageSnapshot};
use dr_shell::{should_activate, Action, ActionOutcome, ActionRunner};
use serde_json::{json, Value};

use super::file_store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActionArg {
    /// Deduplicate the product name
    Dedup,
    /// Apply the category tag
    Tag,
    /// Both, in that order
    All,
}

impl From<ActionArg> for Action {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Dedup => Action::Deduplicate,
            ActionArg::Tag => Action::ApplyTag,
            ActionArg::All => Action::RunAll,
        }
    }
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Page snapshot (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub page: PathBuf,

    /// Override the snapshot's URL
    #[arg(long)]
    pub url: Option<String>,

    #[arg(short, long, value_enum, default_value = "all")]
    pub action: ActionArg,

    /// Preferences file (default: user config dir)
    #[arg(long, value_name = "FILE")]
    pub prefs: Option<PathBuf>,

    /// Field adapter: reactive, strict or hook-fallback
    #[arg(long, default_value = "reactive")]
    pub adapter: String,

    /// Pause between passes, overriding the stored delay
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Write the modified snapshot back to FILE
    #[arg(short, long)]
    pub write: bool,
}

impl RunArgs {
    async fn load_page(&self) -> Result<Page> {
        let text = tokio::fs::read_to_string(&self.page)
            .await
            .with_context(|| format!("reading {}", self.page.display()))?;
        let mut snapshot: PageSnapshot =
            serde_json::from_str(&text).with_context(|| format!("parsing {}", self.page.display()))?;
        if let Some(url) = &self.url {
            snapshot.url = url.clone();
        }
        Ok(Page::from_snapshot(snapshot))
    }

    pub async fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let adapter: Arc<dyn FieldAdapter> = adapter_by_name(&self.adapter)
            .map(Arc::from)
            .ok_or_else(|| anyhow!("unknown adapter '{}'", self.adapter))?;
        let page = Arc::new(self.load_page().await?);
        let prefs = file_store(self.prefs.as_deref()).load().await?;

        if !should_activate(page.url(), &prefs) {
            let report = json!({ "active": false, "url": page.url() });
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            return Ok(());
        }

        let mut runner = ActionRunner::new(page.clone(), adapter, &SiteProfile::default(), &prefs)?;
        if let Some(ms) = self.delay_ms {
            runner = runner.with_delay(Duration::from_millis(ms));
        }
        let outcome = runner.run(self.action.into()).await?;
        writeln!(out, "{}", serde_json::to_string_pretty(&outcome_json(&outcome))?)?;

        if self.write {
            tokio::fs::write(&self.page, page.to_json_pretty()?)
                .await
                .with_context(|| format!("writing {}", self.page.display()))?;
            tracing::info!(path = %self.page.display(), "snapshot updated");
        }
        Ok(())
    }
}

fn outcome_json(outcome: &ActionOutcome) -> Value {
    json!({
        "active": true,
        "action": outcome.action,
        "ran": outcome.ran,
        "notice": outcome.notice.map(|n| n.message()),
        "dedup": outcome.dedup.as_ref().map(|r| json!({
            "output": r.final_text,
            "changed": r.changed,
            "iterations": r.iterations,
            "hitLimit": r.hit_limit,
        })),
        "tagged": outcome.tagged,
        "missing": outcome.missing,
    })
}
