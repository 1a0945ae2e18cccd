//! Board Synchronizer
//!
//! Optimistic card moves and their reconciliation with the status update
//! endpoint. Failures are never rolled back locally: the caller reloads the
//! whole board from the server instead.
//!
//! Two in-flight updates for the same card are not ordered; whichever
//! response arrives last decides the card's final display fields.

use chrono::{Datelike, NaiveDate};
use leptos_dragdrop::DropEvent;
use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::models::{StatusUpdate, StatusUpdateResponse, SyncState, ToastKind, APPLIED};

pub const SUCCESS_MESSAGE: &str = "Job status updated successfully!";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Request never produced a usable HTTP response
    #[error("transport failure: {0}")]
    Transport(String),
    /// Response arrived with `success: false`
    #[error("server rejected the status update")]
    Rejected,
    #[error("malformed response: {0}")]
    Decode(String),
}

impl SyncError {
    /// Toast text shown before the board reloads
    pub fn user_message(&self) -> String {
        let base = match self {
            SyncError::Rejected => "Server error occurred",
            SyncError::Transport(_) | SyncError::Decode(_) => "Failed to update job status",
        };
        format!("{}. Please try again.", base)
    }
}

/// A drop expressed in status keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDrop {
    pub card_id: u32,
    pub source: String,
    pub target: String,
    pub index: Option<usize>,
}

impl CardDrop {
    /// Translate column positions from the drag surface into status keys
    pub fn from_event(board: &Board, ev: DropEvent) -> Option<Self> {
        Some(Self {
            card_id: ev.item_id,
            source: board.status_at(ev.source_column)?.to_string(),
            target: board.status_at(ev.target_column)?.to_string(),
            index: ev.index,
        })
    }
}

/// Outcome of a status update once its response is in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Confirmed,
    /// Discard client state and reload from the server
    Resync { message: String },
}

impl Resolution {
    pub fn toast(&self) -> (ToastKind, String) {
        match self {
            Resolution::Confirmed => (ToastKind::Success, SUCCESS_MESSAGE.to_string()),
            Resolution::Resync { message } => (ToastKind::Error, message.clone()),
        }
    }
}

/// Apply a drop optimistically.
///
/// Returns the request to send when the card changed column. A drop into
/// the same column only reorders; the card's sync state is left alone.
pub fn on_card_dropped(board: &mut Board, drop: &CardDrop) -> Result<Option<StatusUpdate>, BoardError> {
    board.move_card(drop.card_id, &drop.source, &drop.target, drop.index)?;

    if drop.source == drop.target {
        return Ok(None);
    }

    if let Some(card) = board.card_mut(drop.card_id) {
        card.sync = SyncState::Pending {
            from: drop.source.clone(),
            to: drop.target.clone(),
        };
    }

    Ok(Some(StatusUpdate {
        job_id: drop.card_id,
        status: drop.target.clone(),
    }))
}

/// Settle a card once its status update finished.
///
/// `today` is the client's local date, stamped as the applied date when the
/// card was confirmed into the applied column.
pub fn resolve_update(
    board: &mut Board,
    update: &StatusUpdate,
    outcome: Result<StatusUpdateResponse, SyncError>,
    today: NaiveDate,
) -> Resolution {
    let outcome = outcome.and_then(|resp| if resp.success { Ok(()) } else { Err(SyncError::Rejected) });

    let card = board.card_mut(update.job_id);
    if card.is_none() {
        log::warn!("[SYNC] card {} vanished before its update resolved", update.job_id);
    }

    match outcome {
        Ok(()) => {
            if let Some(card) = card {
                card.sync = SyncState::Settled;
                if update.status == APPLIED {
                    card.applied_date = Some(format_applied_date(today));
                }
            }
            Resolution::Confirmed
        }
        Err(err) => {
            log::error!("[SYNC] status update for card {} failed: {}", update.job_id, err);
            if let Some(card) = card {
                card.sync = SyncState::Settled;
            }
            Resolution::Resync { message: err.user_message() }
        }
    }
}

/// `M/D/YYYY`, no zero padding
pub fn format_applied_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::sample_board;
    use leptos_dragdrop::DropTarget;

    fn drop(card_id: u32, source: &str, target: &str) -> CardDrop {
        CardDrop {
            card_id,
            source: source.to_string(),
            target: target.to_string(),
            index: None,
        }
    }

    fn ok() -> Result<StatusUpdateResponse, SyncError> {
        Ok(StatusUpdateResponse { success: true, error: None })
    }

    fn march_7() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_success_path_stamps_applied_date() {
        let mut board = sample_board();

        let update = on_card_dropped(&mut board, &drop(42, "wishlist", "applied")).unwrap().unwrap();
        assert_eq!(update, StatusUpdate { job_id: 42, status: "applied".to_string() });
        assert!(board.card(42).unwrap().is_pending());

        let resolution = resolve_update(&mut board, &update, ok(), march_7());
        assert_eq!(resolution, Resolution::Confirmed);

        let card = board.card(42).unwrap();
        assert_eq!(card.applied_date.as_deref(), Some("3/7/2024"));
        assert_eq!(card.sync, SyncState::Settled);
        assert_eq!(board.locate(42).map(|(ci, _)| ci), board.column_index("applied"));
    }

    #[test]
    fn test_failure_path_keeps_card_in_target() {
        let mut board = sample_board();

        let update = on_card_dropped(&mut board, &drop(7, "applied", "interviewing")).unwrap().unwrap();
        let outcome = Err(SyncError::Transport("connection reset".to_string()));
        let resolution = resolve_update(&mut board, &update, outcome, march_7());

        assert_eq!(
            resolution,
            Resolution::Resync { message: "Failed to update job status. Please try again.".to_string() }
        );
        assert_eq!(resolution.toast().0, ToastKind::Error);

        let card = board.card(7).unwrap();
        assert_eq!(card.status, "interviewing");
        assert!(!card.is_pending());
        assert!(card.applied_date.is_none());
    }

    #[test]
    fn test_application_level_rejection() {
        let mut board = sample_board();

        let update = on_card_dropped(&mut board, &drop(1, "wishlist", "applied")).unwrap().unwrap();
        let outcome = Ok(StatusUpdateResponse { success: false, error: None });
        let resolution = resolve_update(&mut board, &update, outcome, march_7());

        assert_eq!(
            resolution,
            Resolution::Resync { message: "Server error occurred. Please try again.".to_string() }
        );
        assert!(board.card(1).unwrap().applied_date.is_none());
    }

    #[test]
    fn test_same_column_drop_sends_nothing() {
        let mut board = sample_board();
        let before = board.column_labels();

        let update = on_card_dropped(&mut board, &drop(3, "interviewing", "interviewing")).unwrap();
        assert!(update.is_none());
        assert!(!board.card(3).unwrap().is_pending());
        assert_eq!(board.column_labels(), before);
    }

    #[test]
    fn test_pending_only_while_in_flight() {
        let mut board = sample_board();
        assert!(!board.card(2).unwrap().is_pending());

        let update = on_card_dropped(&mut board, &drop(2, "wishlist", "offer")).unwrap().unwrap();
        assert_eq!(
            board.card(2).unwrap().sync,
            SyncState::Pending { from: "wishlist".to_string(), to: "offer".to_string() }
        );

        resolve_update(&mut board, &update, ok(), march_7());
        assert!(!board.card(2).unwrap().is_pending());
        // Not an applied move, so no date
        assert!(board.card(2).unwrap().applied_date.is_none());
    }

    #[test]
    fn test_repeated_confirmation_is_idempotent() {
        let mut board = sample_board();
        let update = on_card_dropped(&mut board, &drop(42, "wishlist", "applied")).unwrap().unwrap();

        resolve_update(&mut board, &update, ok(), march_7());
        let once = board.clone();
        resolve_update(&mut board, &update, ok(), march_7());

        assert_eq!(board, once);
        assert_eq!(board.column("applied").unwrap().display_count(), 3);
    }

    #[test]
    fn test_last_response_wins() {
        let mut board = sample_board();
        let first = on_card_dropped(&mut board, &drop(42, "wishlist", "applied")).unwrap().unwrap();
        let second = on_card_dropped(&mut board, &drop(42, "applied", "interviewing")).unwrap().unwrap();

        resolve_update(&mut board, &second, ok(), march_7());
        resolve_update(&mut board, &first, ok(), march_7());

        let card = board.card(42).unwrap();
        assert_eq!(card.status, "interviewing");
        assert_eq!(card.applied_date.as_deref(), Some("3/7/2024"));
        assert!(!card.is_pending());
    }

    #[test]
    fn test_drop_event_translation() {
        let board = sample_board();
        let ev = DropEvent::new(42, 0, DropTarget::Slot { column: 2, index: 1 });
        let drop = CardDrop::from_event(&board, ev).unwrap();
        assert_eq!(drop.source, "wishlist");
        assert_eq!(drop.target, "interviewing");
        assert_eq!(drop.index, Some(1));

        let bad = DropEvent::new(42, 0, DropTarget::Column(9));
        assert!(CardDrop::from_event(&board, bad).is_none());
    }

    #[test]
    fn test_format_applied_date() {
        assert_eq!(format_applied_date(march_7()), "3/7/2024");
        assert_eq!(format_applied_date(NaiveDate::from_ymd_opt(2023, 12, 25).unwrap()), "12/25/2023");
    }
}
