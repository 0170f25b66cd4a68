use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use dr_core::UrlPattern;

use super::file_store;

#[derive(Debug, Args)]
pub struct MatchesArgs {
    pub url: String,

    /// Preferences file (default: user config dir)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl MatchesArgs {
    /// Prints each matching pattern, or `no match`.
    pub async fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let prefs = file_store(self.file.as_deref()).load().await?;
        let mut hits = 0;
        for raw in &prefs.url_patterns {
            match UrlPattern::new(raw) {
                Ok(pattern) if pattern.matches(&self.url) => {
                    writeln!(out, "{}", pattern.as_str())?;
                    hits += 1;
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(pattern = %raw, error = %e, "skipping pattern"),
            }
        }
        if hits == 0 {
            writeln!(out, "no match")?;
        }
        Ok(())
    }
}
