//! Frontend Models
//!
//! Board snapshot as embedded by the page, the client-side card/column
//! types built from it, and the status update wire types.

use serde::{Deserialize, Serialize};

/// Status key that stamps an applied date on confirmation
pub const APPLIED: &str = "applied";

/// One job card as rendered by the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardData {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub applied_date: Option<String>,
}

/// One status column as rendered by the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnData {
    pub status: String,
    pub header: String,
    #[serde(default)]
    pub cards: Vec<CardData>,
}

/// Initial board, embedded in the page as JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub columns: Vec<ColumnData>,
}

/// Client-side sync state of a card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SyncState {
    #[default]
    Settled,
    /// Optimistically moved, waiting for the server
    Pending { from: String, to: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: u32,
    pub status: String,
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub applied_date: Option<String>,
    pub sync: SyncState,
}

impl Card {
    pub fn from_data(data: CardData, status: &str) -> Self {
        Self {
            id: data.id,
            status: status.to_string(),
            title: data.title,
            company: data.company,
            location: data.location,
            url: data.url,
            applied_date: data.applied_date,
            sync: SyncState::Settled,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.sync, SyncState::Pending { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub status: String,
    /// Header text as rendered by the page, count group included
    pub header: String,
    pub cards: Vec<Card>,
}

impl Column {
    pub fn display_count(&self) -> usize {
        self.cards.len()
    }
}

/// Body of `POST /update_job_status`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub job_id: u32,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusUpdateResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    /// Bootstrap background class
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "bg-success",
            ToastKind::Error => "bg-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_parsing() {
        let json = r#"{
            "columns": [
                {"status": "wishlist", "header": "Wishlist (1)", "cards": [
                    {"id": 42, "title": "Backend Engineer", "company": "Acme"}
                ]},
                {"status": "applied", "header": "Applied (0)"}
            ]
        }"#;
        let snapshot: BoardSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.columns.len(), 2);
        assert_eq!(snapshot.columns[0].cards[0].id, 42);
        assert_eq!(snapshot.columns[0].cards[0].company.as_deref(), Some("Acme"));
        assert!(snapshot.columns[0].cards[0].applied_date.is_none());
        assert!(snapshot.columns[1].cards.is_empty());
    }

    #[test]
    fn test_status_update_wire_format() {
        let update = StatusUpdate { job_id: 42, status: "applied".to_string() };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"job_id": 42, "status": "applied"}));

        let resp: StatusUpdateResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_card_starts_settled() {
        let data = CardData {
            id: 7,
            title: "SRE".to_string(),
            company: None,
            location: None,
            url: None,
            applied_date: Some("1/2/2024".to_string()),
        };
        let card = Card::from_data(data, "applied");
        assert_eq!(card.status, "applied");
        assert!(!card.is_pending());
    }
}
