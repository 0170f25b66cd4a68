//! Per-page session: activation, the toolbar, and action dispatch.

use std::sync::Arc;

use dr_core::{Preferences, Result, SiteProfile};
use dr_page::{FieldAdapter, Page};
use dr_storage::{PreferencesStore, StorageArea};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::activation::should_activate;
use crate::runner::{Action, ActionOutcome, ActionRunner};
use crate::toolbar::{PointerTarget, Toolbar};

pub struct Shell<S> {
    store: PreferencesStore<S>,
    prefs: Preferences,
    toolbar: Mutex<Toolbar>,
    runner: ActionRunner,
}

impl<S: StorageArea> Shell<S> {
    /// Load preferences and attach to `page`. `None` when the URL isn't one
    /// the tools should appear on.
    pub async fn start(
        store: PreferencesStore<S>,
        page: Arc<Page>,
        adapter: Arc<dyn FieldAdapter>,
        site: &SiteProfile,
    ) -> Result<Option<Self>> {
        let prefs = store.load().await?;
        if !should_activate(page.url(), &prefs) {
            return Ok(None);
        }

        let mut toolbar = Toolbar::new();
        if let Some(pos) = &prefs.float_pos {
            if !toolbar.restore(pos) {
                warn!(?pos, "saved toolbar position unreadable, using default");
            }
        }

        let runner = ActionRunner::new(page, adapter, site, &prefs)?;
        info!(url = %runner.page().url(), tag_target = prefs.tag_target_override().unwrap_or("profile"), "shell attached");
        Ok(Some(Self { store, prefs, toolbar: Mutex::new(toolbar), runner }))
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn runner(&self) -> &ActionRunner {
        &self.runner
    }

    pub fn toolbar(&self) -> Toolbar {
        self.toolbar.lock().clone()
    }

    pub async fn trigger(&self, action: Action) -> Result<ActionOutcome> {
        self.runner.run(action).await
    }

    /// A click on the toolbar. Clicks outside the buttons do nothing.
    pub async fn click(&self, target: PointerTarget) -> Result<Option<ActionOutcome>> {
        let action = self.toolbar.lock().click(target);
        match action {
            Some(action) => Ok(Some(self.runner.run(action).await?)),
            None => Ok(None),
        }
    }

    pub fn mouse_down(&self, target: PointerTarget, offset_x: i64, offset_y: i64) -> bool {
        self.toolbar.lock().mouse_down(target, offset_x, offset_y)
    }

    pub fn mouse_move(&self, page_x: i64, page_y: i64) {
        self.toolbar.lock().mouse_move(page_x, page_y);
    }

    /// Ends a drag and persists where the toolbar was dropped.
    pub async fn mouse_up(&self) -> Result<()> {
        let dropped = self.toolbar.lock().mouse_up();
        if let Some(pos) = dropped {
            debug!(left = %pos.left, top = %pos.top, "saving toolbar position");
            self.store.save_position(&pos).await?;
        }
        Ok(())
    }
}
