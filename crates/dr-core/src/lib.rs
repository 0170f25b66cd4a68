pub mod config;
pub mod error;
pub mod types;
pub mod url_pattern;

pub use config::{Preferences, SiteProfile};
pub use error::{DrError, Result};
pub use types::{FieldRole, FloatPosition, NoticeKind};
pub use url_pattern::{UrlPattern, UrlPatternSet};
