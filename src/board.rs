//! Board Model
//!
//! Authoritative client-side column membership. Rendering is a projection
//! of this state; every card lives in exactly one column.

use std::collections::HashSet;

use thiserror::Error;

use crate::models::{BoardSnapshot, Card, Column};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("duplicate column status: {0}")]
    DuplicateColumn(String),
    #[error("card {0} appears more than once")]
    DuplicateCard(u32),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("card {card} is not in column {column}")]
    CardNotInColumn { card: u32, column: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    columns: Vec<Column>,
}

impl Board {
    /// Build the board from the page snapshot, rejecting duplicate keys
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Result<Self, BoardError> {
        let mut statuses = HashSet::new();
        let mut card_ids = HashSet::new();
        let mut columns = Vec::with_capacity(snapshot.columns.len());

        for col in snapshot.columns {
            if !statuses.insert(col.status.clone()) {
                return Err(BoardError::DuplicateColumn(col.status));
            }
            let mut cards = Vec::with_capacity(col.cards.len());
            for data in col.cards {
                if !card_ids.insert(data.id) {
                    return Err(BoardError::DuplicateCard(data.id));
                }
                cards.push(Card::from_data(data, &col.status));
            }
            columns.push(Column {
                status: col.status,
                header: col.header,
                cards,
            });
        }

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, status: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.status == status)
    }

    pub fn column_index(&self, status: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.status == status)
    }

    /// Status key of the column at a board position
    pub fn status_at(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|c| c.status.as_str())
    }

    /// (column position, card position) of a card
    pub fn locate(&self, card_id: u32) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(ci, col)| {
            col.cards.iter().position(|c| c.id == card_id).map(|pos| (ci, pos))
        })
    }

    pub fn card(&self, card_id: u32) -> Option<&Card> {
        self.locate(card_id).map(|(ci, pos)| &self.columns[ci].cards[pos])
    }

    pub fn card_mut(&mut self, card_id: u32) -> Option<&mut Card> {
        let (ci, pos) = self.locate(card_id)?;
        Some(&mut self.columns[ci].cards[pos])
    }

    pub fn total_cards(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }

    /// Detach a card from `from` and insert it into `to`.
    ///
    /// `index` is the position in the target column before the move
    /// (`None` appends); it is clamped to the column length. The board is
    /// left untouched when any lookup fails.
    pub fn move_card(&mut self, card_id: u32, from: &str, to: &str, index: Option<usize>) -> Result<(), BoardError> {
        let from_idx = self
            .column_index(from)
            .ok_or_else(|| BoardError::UnknownColumn(from.to_string()))?;
        let to_idx = self
            .column_index(to)
            .ok_or_else(|| BoardError::UnknownColumn(to.to_string()))?;
        let pos = self.columns[from_idx]
            .cards
            .iter()
            .position(|c| c.id == card_id)
            .ok_or_else(|| BoardError::CardNotInColumn {
                card: card_id,
                column: from.to_string(),
            })?;

        let mut card = self.columns[from_idx].cards.remove(pos);
        card.status = to.to_string();

        let target = &mut self.columns[to_idx].cards;
        let index = match index {
            // Slots after the removed card shift up by one
            Some(i) if from_idx == to_idx && i > pos => i - 1,
            Some(i) => i,
            None => target.len(),
        };
        let index = index.min(target.len());
        target.insert(index, card);
        Ok(())
    }

    /// Header label for every column, derived from current lengths
    pub fn column_labels(&self) -> Vec<(String, String)> {
        self.columns
            .iter()
            .map(|c| (c.status.clone(), count_label(&c.header, c.display_count())))
            .collect()
    }
}

/// Replace the first `(<digits>)` group of a header with the new count,
/// keeping the rest of the text verbatim. Headers without a count group
/// are left as they are.
pub fn count_label(header: &str, count: usize) -> String {
    let mut from = 0;
    while let Some(offset) = header[from..].find('(') {
        let open = from + offset;
        let digits = header[open + 1..].bytes().take_while(|b| b.is_ascii_digit()).count();
        let close = open + 1 + digits;
        if digits > 0 && header[close..].starts_with(')') {
            return format!("{}({}){}", &header[..open], count, &header[close + 1..]);
        }
        from = open + 1;
    }
    header.to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{CardData, ColumnData};

    pub(crate) fn card(id: u32) -> CardData {
        CardData {
            id,
            title: format!("Job {}", id),
            company: None,
            location: None,
            url: None,
            applied_date: None,
        }
    }

    pub(crate) fn column(status: &str, header: &str, ids: &[u32]) -> ColumnData {
        ColumnData {
            status: status.to_string(),
            header: header.to_string(),
            cards: ids.iter().map(|&id| card(id)).collect(),
        }
    }

    pub(crate) fn sample_board() -> Board {
        Board::from_snapshot(BoardSnapshot {
            columns: vec![
                column("wishlist", "Wishlist (3)", &[42, 1, 2]),
                column("applied", "Applied (2)", &[7, 8]),
                column("interviewing", "Interviews (3)", &[3, 4, 5]),
                column("offer", "Offers (0)", &[]),
            ],
        })
        .unwrap()
    }

    fn ids(board: &Board, status: &str) -> Vec<u32> {
        board.column(status).unwrap().cards.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_from_snapshot_rejects_duplicates() {
        let dup_col = BoardSnapshot {
            columns: vec![column("applied", "A (0)", &[]), column("applied", "B (0)", &[])],
        };
        assert_eq!(
            Board::from_snapshot(dup_col),
            Err(BoardError::DuplicateColumn("applied".to_string()))
        );

        let dup_card = BoardSnapshot {
            columns: vec![column("wishlist", "W (1)", &[1]), column("applied", "A (1)", &[1])],
        };
        assert_eq!(Board::from_snapshot(dup_card), Err(BoardError::DuplicateCard(1)));
    }

    #[test]
    fn test_move_between_columns() {
        let mut board = sample_board();
        board.move_card(42, "wishlist", "applied", Some(1)).unwrap();

        assert_eq!(ids(&board, "wishlist"), vec![1, 2]);
        assert_eq!(ids(&board, "applied"), vec![7, 42, 8]);
        assert_eq!(board.card(42).unwrap().status, "applied");
        assert_eq!(board.total_cards(), 8);
    }

    #[test]
    fn test_move_appends_and_clamps() {
        let mut board = sample_board();
        board.move_card(3, "interviewing", "offer", None).unwrap();
        board.move_card(4, "interviewing", "offer", Some(99)).unwrap();
        assert_eq!(ids(&board, "offer"), vec![3, 4]);
    }

    #[test]
    fn test_move_within_column() {
        let mut board = sample_board();
        // Drop before the card at slot 2 (card 2): lands between 1 and 2
        board.move_card(42, "wishlist", "wishlist", Some(2)).unwrap();
        assert_eq!(ids(&board, "wishlist"), vec![1, 42, 2]);

        board.move_card(2, "wishlist", "wishlist", Some(0)).unwrap();
        assert_eq!(ids(&board, "wishlist"), vec![2, 1, 42]);

        // Dropping onto its own slot changes nothing
        board.move_card(1, "wishlist", "wishlist", Some(1)).unwrap();
        assert_eq!(ids(&board, "wishlist"), vec![2, 1, 42]);
    }

    #[test]
    fn test_append_within_column() {
        let mut board = sample_board();
        board.move_card(42, "wishlist", "wishlist", None).unwrap();
        assert_eq!(ids(&board, "wishlist"), vec![1, 2, 42]);

        board.move_card(2, "wishlist", "wishlist", None).unwrap();
        assert_eq!(ids(&board, "wishlist"), vec![1, 42, 2]);
    }

    #[test]
    fn test_failed_move_leaves_board_untouched() {
        let mut board = sample_board();
        let before = board.clone();

        assert_eq!(
            board.move_card(42, "applied", "offer", None),
            Err(BoardError::CardNotInColumn { card: 42, column: "applied".to_string() })
        );
        assert_eq!(
            board.move_card(42, "wishlist", "rejected", None),
            Err(BoardError::UnknownColumn("rejected".to_string()))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_membership_invariant_over_many_moves() {
        let mut board = sample_board();
        let total = board.total_cards();
        let moves = [
            (42, "wishlist", "applied"),
            (42, "applied", "interviewing"),
            (3, "interviewing", "offer"),
            (7, "applied", "applied"),
            (42, "interviewing", "wishlist"),
            (5, "interviewing", "offer"),
        ];
        for (id, from, to) in moves {
            board.move_card(id, from, to, Some(0)).unwrap();

            let count_sum: usize = board.columns().iter().map(|c| c.display_count()).sum();
            assert_eq!(count_sum, total);
            let mut seen = HashSet::new();
            for col in board.columns() {
                for c in &col.cards {
                    assert!(seen.insert(c.id), "card {} in two columns", c.id);
                    assert_eq!(c.status, col.status);
                }
            }
        }
    }

    #[test]
    fn test_count_label() {
        assert_eq!(count_label("Interviews (3)", 4), "Interviews (4)");
        assert_eq!(count_label("Applied (12) jobs", 0), "Applied (0) jobs");
        assert_eq!(count_label("Offers (x) (2)", 5), "Offers (x) (5)");
        assert_eq!(count_label("Wishlist", 1), "Wishlist");
        assert_eq!(count_label("Saved ()", 2), "Saved ()");
    }

    #[test]
    fn test_column_labels_idempotent() {
        let mut board = sample_board();
        board.move_card(8, "applied", "interviewing", None).unwrap();

        let first = board.column_labels();
        let second = board.column_labels();
        assert_eq!(first, second);
        assert!(first.contains(&("interviewing".to_string(), "Interviews (4)".to_string())));
        assert!(first.contains(&("applied".to_string(), "Applied (1)".to_string())));
    }
}
