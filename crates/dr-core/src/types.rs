use serde::{Deserialize, Serialize};
use std::fmt;

/// Which page field an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// Read-only label holding the product category path.
    Category,
    /// The product name input that gets deduplicated.
    ProductName,
    /// The input that receives the tag prefix.
    TagTarget,
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRole::Category => write!(f, "category"),
            FieldRole::ProductName => write!(f, "product_name"),
            FieldRole::TagTarget => write!(f, "tag_target"),
        }
    }
}

/// Toolbar position, stored as CSS pixel strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatPosition {
    pub left: String,
    pub top: String,
}

impl FloatPosition {
    pub fn from_pixels(left: i64, top: i64) -> Self {
        Self {
            left: format!("{left}px"),
            top: format!("{top}px"),
        }
    }

    /// Parse back to pixel offsets. `None` if either side isn't `<n>px`.
    pub fn to_pixels(&self) -> Option<(i64, i64)> {
        let parse = |s: &str| s.trim().strip_suffix("px")?.trim().parse::<i64>().ok();
        Some((parse(&self.left)?, parse(&self.top)?))
    }
}

/// User-facing notice categories. The texts are the site's UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    FieldNotFound,
    Deduplicated,
    NoDuplicates,
    MayStillContainDuplicates,
    Executed,
}

impl NoticeKind {
    pub fn message(&self) -> &'static str {
        match self {
            Self::FieldNotFound => "입력 필드를 찾을 수 없습니다",
            Self::Deduplicated => "중복 제거 완료",
            Self::NoDuplicates => "중복된 단어가 없습니다",
            Self::MayStillContainDuplicates => "중복이 남아 있을 수 있습니다",
            Self::Executed => "실행했습니다",
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::FieldNotFound | Self::MayStillContainDuplicates)
    }
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
