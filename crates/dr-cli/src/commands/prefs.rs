use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use dr_core::UrlPattern;
use dr_storage::OptionsForm;

use super::file_store;

#[derive(Debug, Args)]
pub struct PrefsArgs {
    /// Preferences file (default: user config dir)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: PrefsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Print the effective preferences
    Show,

    /// Seed first-run defaults if nothing is configured yet
    InstallDefaults,

    /// Set the pause between passes in ms (clamped to 100..=3000)
    SetDelay { delay: String },

    /// Allow another URL pattern (`*` matches anything)
    AddUrl { pattern: String },

    /// Set the tag target selector; empty restores the built-in lookup
    SetSelector { selector: String },
}

impl PrefsArgs {
    pub async fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let store = file_store(self.file.as_deref());
        match &self.command {
            PrefsCommand::Show => {
                let prefs = store.load().await?;
                writeln!(out, "{}", serde_json::to_string_pretty(&prefs)?)?;
            }
            PrefsCommand::InstallDefaults => {
                let installed = store.install_defaults().await?;
                writeln!(out, "{}", if installed { "installed" } else { "already configured" })?;
            }
            PrefsCommand::SetDelay { delay } => {
                let prefs = store.load().await?;
                let form = OptionsForm {
                    complete_delay_ms: delay.clone(),
                    ..OptionsForm::from_preferences(&prefs)
                };
                let updated = form.apply(&prefs);
                store.save(&updated).await?;
                writeln!(out, "{}", updated.complete_delay_ms)?;
            }
            PrefsCommand::AddUrl { pattern } => {
                UrlPattern::new(pattern).with_context(|| format!("bad pattern '{pattern}'"))?;
                let mut prefs = store.load().await?;
                if prefs.url_patterns.iter().any(|p| p == pattern) {
                    writeln!(out, "already present")?;
                    return Ok(());
                }
                prefs.url_patterns.push(pattern.clone());
                store.save(&prefs).await?;
                writeln!(out, "{} patterns", prefs.url_patterns.len())?;
            }
            PrefsCommand::SetSelector { selector } => {
                let prefs = store.load().await?;
                let form = OptionsForm {
                    tag_target_selector: selector.clone(),
                    ..OptionsForm::from_preferences(&prefs)
                };
                let updated = form.apply(&prefs);
                if let Some(sel) = updated.tag_target_override() {
                    dr_page::Selector::parse(sel).with_context(|| format!("bad selector '{sel}'"))?;
                }
                store.save(&updated).await?;
                writeln!(out, "{}", updated.tag_target_override().unwrap_or("(site default)"))?;
            }
        }
        Ok(())
    }
}
