//! Preference storage: key-value areas, the typed preferences store, and
//! options-form parsing.

pub mod area;
pub mod file;
pub mod options;
pub mod preferences;

pub use area::{Items, MemoryStorage, StorageArea};
pub use file::JsonFileStorage;
pub use options::{parse_delay, OptionsForm};
pub use preferences::PreferencesStore;
