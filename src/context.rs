//! Application Context
//!
//! Shared handles provided via Leptos Context API, plus the drop workflow
//! that ties the drag surface, the store and the status endpoint together.

use leptos::prelude::*;
use leptos::task::spawn_local;
use gloo_timers::future::TimeoutFuture;
use leptos_dragdrop::DropEvent;

use crate::commands;
use crate::config::BoardConfig;
use crate::models::ToastKind;
use crate::store::{self, BoardStore};
use crate::sync::Resolution;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: BoardStore,
    config: StoredValue<BoardConfig>,
}

impl AppContext {
    pub fn new(store: BoardStore, config: BoardConfig) -> Self {
        Self {
            store,
            config: StoredValue::new(config),
        }
    }

    /// Show a toast that dismisses itself after the configured delay
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let store = self.store;
        let id = store::store_push_toast(&store, kind, message.into());
        let delay = self.config.with_value(|c| c.toast_ms);
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            store::store_dismiss_toast(&store, id);
        });
    }

    /// Reload the whole board once the failure toast had time to show
    pub fn schedule_reload(&self) {
        let delay = self.config.with_value(|c| c.reload_delay_ms);
        log::warn!("[SYNC] resyncing board in {}ms", delay);
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            commands::reload_page();
        });
    }

    /// Handle a drop from the drag surface: move optimistically, then
    /// persist the new status and reconcile.
    pub fn card_dropped(&self, ev: DropEvent) {
        let Some(drop) = store::store_resolve_drop(&self.store, ev) else {
            log::warn!("[DND] drop references unknown columns: {:?}", ev);
            return;
        };
        log::debug!("[DND] card {} {} -> {} at {:?}", drop.card_id, drop.source, drop.target, drop.index);

        let applied = store::store_drop_card(&self.store, &drop);
        log::debug!("[DND] counts now {:?}", store::store_column_labels(&self.store));

        let update = match applied {
            Ok(Some(update)) => update,
            Ok(None) => return,
            Err(e) => {
                // Client board no longer matches the page; fetch the truth
                log::error!("[DND] could not apply drop: {}", e);
                self.schedule_reload();
                return;
            }
        };

        let ctx = *self;
        let endpoint = self.config.with_value(|c| c.update_endpoint.clone());
        spawn_local(async move {
            let outcome = commands::update_job_status(&endpoint, &update).await;
            let today = chrono::Local::now().date_naive();
            let resolution = store::store_resolve_update(&ctx.store, &update, outcome, today);

            let (kind, message) = resolution.toast();
            ctx.notify(kind, message);
            if let Resolution::Resync { .. } = resolution {
                ctx.schedule_reload();
            }
        });
    }

    /// Submit the delete form for a job
    pub fn delete_job(&self, job_id: u32) {
        let action = self.config.with_value(|c| c.delete_url(job_id));
        if let Err(e) = commands::delete_job(&action) {
            log::error!("[APP] delete of job {} failed: {}", job_id, e);
            self.notify(ToastKind::Error, "Failed to delete job. Please try again.");
        }
    }
}
