//! Transient on-screen notices. One at a time; a new notice replaces the old.

use chrono::{DateTime, Duration, Utc};
use dr_core::NoticeKind;
use parking_lot::Mutex;

pub const SHOW_MS: i64 = 1000;
pub const FADE_MS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticePhase {
    Visible,
    Fading,
    Gone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub shown_at: DateTime<Utc>,
}

impl Notice {
    pub fn text(&self) -> &'static str {
        self.kind.message()
    }

    pub fn phase(&self, now: DateTime<Utc>) -> NoticePhase {
        let age = now - self.shown_at;
        if age < Duration::milliseconds(SHOW_MS) {
            NoticePhase::Visible
        } else if age < Duration::milliseconds(SHOW_MS + FADE_MS) {
            NoticePhase::Fading
        } else {
            NoticePhase::Gone
        }
    }
}

#[derive(Debug, Default)]
pub struct NoticeBoard {
    current: Mutex<Option<Notice>>,
    history: Mutex<Vec<NoticeKind>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, kind: NoticeKind) -> Notice {
        self.show_at(kind, Utc::now())
    }

    pub fn show_at(&self, kind: NoticeKind, now: DateTime<Utc>) -> Notice {
        let notice = Notice { kind, shown_at: now };
        *self.current.lock() = Some(notice.clone());
        self.history.lock().push(kind);
        if kind.is_warning() {
            tracing::warn!(notice = kind.message(), "notice");
        } else {
            tracing::info!(notice = kind.message(), "notice");
        }
        notice
    }

    /// The notice still on screen at `now`, if any.
    pub fn current(&self, now: DateTime<Utc>) -> Option<Notice> {
        let mut current = self.current.lock();
        if current.as_ref().is_some_and(|n| n.phase(now) == NoticePhase::Gone) {
            *current = None;
        }
        current.clone()
    }

    pub fn history(&self) -> Vec<NoticeKind> {
        self.history.lock().clone()
    }

    pub fn last(&self) -> Option<NoticeKind> {
        self.history.lock().last().copied()
    }
}
