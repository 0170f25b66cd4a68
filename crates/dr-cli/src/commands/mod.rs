//! Subcommands.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use dr_storage::{JsonFileStorage, PreferencesStore, StorageArea};

pub mod dedup;
pub mod matches;
pub mod prefs;
pub mod run;
pub mod tag;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Deduplicate a product name (reads stdin when TEXT is omitted)
    Dedup(dedup::DedupArgs),

    /// Apply the category tag rule to a value
    Tag(tag::TagArgs),

    /// Run a toolbar action against a page snapshot
    Run(run::RunArgs),

    /// Inspect or edit stored preferences
    Prefs(prefs::PrefsArgs),

    /// Check a URL against the allow-list
    Matches(matches::MatchesArgs),
}

impl Commands {
    pub async fn execute(&self, out: &mut dyn Write) -> Result<()> {
        match self {
            Self::Dedup(args) => args.execute(out),
            Self::Tag(args) => args.execute(out),
            Self::Run(args) => args.execute(out).await,
            Self::Prefs(args) => args.execute(out).await,
            Self::Matches(args) => args.execute(out).await,
        }
    }
}

pub(crate) type SharedArea = Arc<dyn StorageArea>;

/// Preferences backed by `file`, or the default config location.
pub(crate) fn file_store(file: Option<&Path>) -> PreferencesStore<SharedArea> {
    let path: PathBuf = file.map(Path::to_path_buf).unwrap_or_else(JsonFileStorage::default_path);
    tracing::debug!(path = %path.display(), "using preferences file");
    PreferencesStore::new(Arc::new(JsonFileStorage::new(path)))
}
