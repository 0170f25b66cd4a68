//! Floating toolbar: three buttons and drag-to-move.

use dr_core::FloatPosition;
use serde::{Deserialize, Serialize};

use crate::runner::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Button {
    Remove,
    Brand,
    All,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Remove, Button::Brand, Button::All];

    pub fn dom_id(&self) -> &'static str {
        match self {
            Self::Remove => "btnRemove",
            Self::Brand => "btnBrand",
            Self::All => "btnAll",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Remove => "중복제거",
            Self::Brand => "비브랜드태그",
            Self::All => "전체실행",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.dom_id() == id)
    }

    pub fn action(&self) -> Action {
        match self {
            Self::Remove => Action::Deduplicate,
            Self::Brand => Action::ApplyTag,
            Self::All => Action::RunAll,
        }
    }
}

/// What the pointer is over inside the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Button(Button),
    Body,
}

#[derive(Debug, Clone, Default)]
pub struct Toolbar {
    left: i64,
    top: i64,
    /// Grab offset inside the box while dragging.
    drag: Option<(i64, i64)>,
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a saved position. Unparseable positions are ignored.
    pub fn restore(&mut self, pos: &FloatPosition) -> bool {
        match pos.to_pixels() {
            Some((left, top)) => {
                self.left = left;
                self.top = top;
                true
            }
            None => false,
        }
    }

    pub fn position(&self) -> FloatPosition {
        FloatPosition::from_pixels(self.left, self.top)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Mouse down. Buttons never start a drag.
    pub fn mouse_down(&mut self, target: PointerTarget, offset_x: i64, offset_y: i64) -> bool {
        if matches!(target, PointerTarget::Button(_)) {
            return false;
        }
        self.drag = Some((offset_x, offset_y));
        true
    }

    pub fn mouse_move(&mut self, page_x: i64, page_y: i64) {
        if let Some((ox, oy)) = self.drag {
            self.left = page_x - ox;
            self.top = page_y - oy;
        }
    }

    /// Ends a drag. Returns the position to persist.
    pub fn mouse_up(&mut self) -> Option<FloatPosition> {
        self.drag.take().map(|_| self.position())
    }

    pub fn click(&self, target: PointerTarget) -> Option<Action> {
        match target {
            PointerTarget::Button(b) => Some(b.action()),
            PointerTarget::Body => None,
        }
    }
}
