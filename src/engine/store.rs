//! Board state store.
//!
//! Holds the ordered columns of the board currently on screen. Every mutation
//! clones the column list, edits the clone and swaps it in, so a snapshot
//! handed out through [`BoardStore::snapshot`] never changes underneath its
//! reader.
//!
//! Mutations are total: an unknown column or card id makes them a no-op.
//! Callers check existence first; nothing here reports the miss.

use crate::domain::{array_move, Board, BoardId, Card, CardId, Column, ColumnId, Rect};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    board_id: Option<BoardId>,
    columns: Arc<Vec<Column>>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store already loaded with `board`
    pub fn from_board(board: &Board) -> Self {
        let mut store = Self::new();
        store.load(board);
        store
    }

    /// Replaces the whole state with `board`, columns ordered by its
    /// `column_order_ids`
    pub fn load(&mut self, board: &Board) {
        let mut board = board.clone();
        board.normalize();
        let ordered = board.ordered_columns();
        debug!(board = %board.id, columns = ordered.len(), "board loaded");
        self.board_id = Some(board.id);
        self.columns = Arc::new(ordered);
    }

    pub fn board_id(&self) -> Option<&BoardId> {
        self.board_id.as_ref()
    }

    pub fn ordered_columns(&self) -> &[Column] {
        &self.columns
    }

    /// Cheap shared handle to the current column list
    pub fn snapshot(&self) -> Arc<Vec<Column>> {
        Arc::clone(&self.columns)
    }

    pub fn column_order_ids(&self) -> Vec<ColumnId> {
        self.columns.iter().map(|column| column.id.clone()).collect()
    }

    pub fn find_column(&self, column_id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| &column.id == column_id)
    }

    pub fn column_index(&self, column_id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|column| &column.id == column_id)
    }

    pub fn find_column_containing_card(&self, card_id: &CardId) -> Option<&Column> {
        self.columns.iter().find(|column| column.contains_card(card_id))
    }

    /// Rebuilds a [`Board`] from the current state
    pub fn to_board(&self, title: impl Into<String>) -> Option<Board> {
        let id = self.board_id.clone()?;
        let mut board = Board::new(id, title);
        board.set_ordered_columns(self.columns.to_vec());
        Some(board)
    }

    /// Moves `card_id` out of `source_column_id` and inserts `card_snapshot`
    /// at `dest_index` of `dest_column_id`.
    ///
    /// Safe to call repeatedly while the pointer travels over the destination:
    /// the card is first removed from the destination if already there. An
    /// index past the end appends.
    pub fn move_card_across_columns(
        &mut self,
        source_column_id: &ColumnId,
        dest_column_id: &ColumnId,
        card_id: &CardId,
        dest_index: usize,
        card_snapshot: &Card,
    ) {
        let mut next = self.columns.to_vec();

        if let Some(source) = next.iter_mut().find(|c| &c.id == source_column_id) {
            source.cards.retain(|card| &card.id != card_id);
            source.ensure_placeholder();
            source.sync_card_order();
        }

        let Some(dest) = next.iter_mut().find(|c| &c.id == dest_column_id) else {
            warn!(column = %dest_column_id, card = %card_id, "destination column missing");
            return;
        };

        dest.cards.retain(|card| &card.id != card_id);

        let mut moving = card_snapshot.clone();
        moving.column_id = dest.id.clone();
        if !moving.is_placeholder {
            dest.cards.retain(|card| !card.is_placeholder);
        }

        let at = dest_index.min(dest.cards.len());
        dest.cards.insert(at, moving);
        dest.sync_card_order();

        debug!(
            card = %card_id,
            from = %source_column_id,
            to = %dest_column_id,
            index = at,
            "card moved across columns"
        );
        self.columns = Arc::new(next);
    }

    /// Moves the card at `from_index` of a column to `to_index`
    pub fn move_card_within_column(
        &mut self,
        column_id: &ColumnId,
        card_id: &CardId,
        from_index: usize,
        to_index: usize,
    ) {
        let mut next = self.columns.to_vec();
        let Some(column) = next.iter_mut().find(|c| &c.id == column_id) else {
            return;
        };
        if column.cards.get(from_index).map(|card| &card.id) != Some(card_id) {
            warn!(column = %column_id, card = %card_id, from_index, "card not at expected index");
            return;
        }

        column.cards = array_move(&column.cards, from_index, to_index);
        column.sync_card_order();

        debug!(column = %column_id, card = %card_id, from_index, to_index, "card reordered");
        self.columns = Arc::new(next);
    }

    /// Reinstates a column's card list, e.g. the order captured at drag start
    pub fn replace_column_cards(&mut self, column_id: &ColumnId, cards: Vec<Card>) {
        let mut next = self.columns.to_vec();
        let Some(column) = next.iter_mut().find(|c| &c.id == column_id) else {
            return;
        };
        column.cards = cards;
        for card in &mut column.cards {
            card.column_id = column_id.clone();
        }
        column.ensure_placeholder();
        column.sync_card_order();
        self.columns = Arc::new(next);
    }

    /// Moves the column at `from_index` to `to_index`
    pub fn move_column(&mut self, from_index: usize, to_index: usize) {
        if from_index >= self.columns.len() {
            return;
        }
        let next = array_move(&self.columns, from_index, to_index);
        debug!(from_index, to_index, "column moved");
        self.columns = Arc::new(next);
    }
}

/// Where a card lands in `dest` when dropped over `over_index`.
///
/// Dropping below the over-card's rect inserts after it. Without an over-card
/// the index points past the end, which the store treats as append.
pub fn destination_index(
    dest: &Column,
    over_index: Option<usize>,
    active_rect: Option<Rect>,
    over_rect: &Rect,
) -> usize {
    match over_index {
        Some(index) => {
            let below = active_rect.is_some_and(|rect| rect.top > over_rect.bottom());
            index + usize::from(below)
        }
        None => dest.cards.len() + 1,
    }
}
