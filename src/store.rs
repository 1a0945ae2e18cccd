//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use chrono::NaiveDate;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::{Board, BoardError};
use crate::models::{Column, StatusUpdate, StatusUpdateResponse, Toast, ToastKind};
use crate::sync::{self, CardDrop, Resolution, SyncError};
use leptos_dragdrop::DropEvent;

/// Board plus notification state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// Authoritative column membership
    pub board: Board,
    /// Visible toasts, oldest first
    pub toasts: Vec<Toast>,
    pub next_toast_id: u32,
}

impl BoardState {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type BoardStore = Store<BoardState>;

// ========================
// Store Helper Functions
// ========================

pub fn store_column_count(store: &BoardStore) -> usize {
    store.board().read().columns().len()
}

/// Snapshot of one column, tracked
pub fn store_column(store: &BoardStore, index: usize) -> Option<Column> {
    store.board().read().columns().get(index).cloned()
}

/// Current header label of every column
pub fn store_column_labels(store: &BoardStore) -> Vec<(String, String)> {
    store.board().read_untracked().column_labels()
}

/// Resolve a drag surface event against the current board
pub fn store_resolve_drop(store: &BoardStore, ev: DropEvent) -> Option<CardDrop> {
    CardDrop::from_event(&store.board().read_untracked(), ev)
}

/// Optimistically apply a drop
pub fn store_drop_card(store: &BoardStore, drop: &CardDrop) -> Result<Option<StatusUpdate>, BoardError> {
    sync::on_card_dropped(&mut store.board().write(), drop)
}

/// Settle a card after its status update finished
pub fn store_resolve_update(
    store: &BoardStore,
    update: &StatusUpdate,
    outcome: Result<StatusUpdateResponse, SyncError>,
    today: NaiveDate,
) -> Resolution {
    sync::resolve_update(&mut store.board().write(), update, outcome, today)
}

pub fn store_toasts(store: &BoardStore) -> Vec<Toast> {
    store.toasts().get()
}

/// Add a toast, returning its id for later dismissal
pub fn store_push_toast(store: &BoardStore, kind: ToastKind, message: String) -> u32 {
    let id = store.next_toast_id().get_untracked();
    store.next_toast_id().set(id.wrapping_add(1));
    store.toasts().write().push(Toast { id, kind, message });
    id
}

/// Remove a toast by ID
pub fn store_dismiss_toast(store: &BoardStore, toast_id: u32) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}
