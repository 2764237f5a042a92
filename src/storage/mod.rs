use crate::{
    domain::{Board, BoardId, Card, CardId, Column, ColumnId, ItemId},
    engine::Commit,
    error::{DndError, Result},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

/// Input for creating a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewColumn {
    pub title: String,
}

/// Input for creating a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub column_id: ColumnId,
    pub title: String,
}

/// Persistence collaborator for board order changes
#[async_trait]
pub trait BoardPersistence: Send + Sync {
    /// Loads the board with the given id
    async fn load_board(&self, board_id: &BoardId) -> Result<Board>;

    /// Stores a new column order
    async fn move_columns(&self, board_id: &BoardId, ordered_columns: &[Column]) -> Result<()>;

    /// Stores a new card order within one column
    async fn move_card_in_same_column(
        &self,
        _column_id: &ColumnId,
        _card_order_ids: &[CardId],
    ) -> Result<()> {
        Ok(())
    }

    /// Stores a card that changed column along with both resulting orders
    async fn move_card_to_different_column(
        &self,
        _card_id: &CardId,
        _prev_column_id: &ColumnId,
        _prev_card_order_ids: &[CardId],
        _next_column_id: &ColumnId,
        _next_card_order_ids: &[CardId],
    ) -> Result<()> {
        Ok(())
    }

    /// Creates a column at the end of the board
    async fn create_new_column(&self, board_id: &BoardId, input: NewColumn) -> Result<Column>;

    /// Creates a card at the end of a column
    async fn create_new_card(&self, board_id: &BoardId, input: NewCard) -> Result<Card>;
}

/// Forwards engine commits and creation requests to a [`BoardPersistence`]
#[derive(Clone)]
pub struct PersistenceBridge {
    board_id: BoardId,
    backend: Arc<dyn BoardPersistence>,
}

impl PersistenceBridge {
    pub fn new(board_id: impl Into<BoardId>, backend: Arc<dyn BoardPersistence>) -> Self {
        Self {
            board_id: board_id.into(),
            backend,
        }
    }

    pub fn board_id(&self) -> &BoardId {
        &self.board_id
    }

    pub async fn load_board(&self) -> Result<Board> {
        self.backend.load_board(&self.board_id).await
    }

    /// Persists a commit produced at drag end
    pub async fn dispatch(&self, commit: &Commit) -> Result<()> {
        debug!(board = %self.board_id, ?commit, "dispatching commit");
        match commit {
            Commit::MoveColumns {
                board_id,
                ordered_columns,
            } => {
                let board_id = board_id.as_ref().unwrap_or(&self.board_id);
                self.backend.move_columns(board_id, ordered_columns).await
            }
            Commit::MoveCardInSameColumn {
                column_id,
                ordered_cards,
            } => {
                let order: Vec<CardId> = ordered_cards.iter().map(|c| c.id.clone()).collect();
                self.backend.move_card_in_same_column(column_id, &order).await
            }
            Commit::MoveCardToDifferentColumn {
                card_id,
                prev_column_id,
                prev_card_order_ids,
                next_column_id,
                next_card_order_ids,
            } => {
                self.backend
                    .move_card_to_different_column(
                        card_id,
                        prev_column_id,
                        prev_card_order_ids,
                        next_column_id,
                        next_card_order_ids,
                    )
                    .await
            }
        }
    }

    pub async fn create_new_column(&self, input: NewColumn) -> Result<Column> {
        self.backend.create_new_column(&self.board_id, input).await
    }

    pub async fn create_new_card(&self, input: NewCard) -> Result<Card> {
        self.backend.create_new_card(&self.board_id, input).await
    }
}

/// Card order without the column's placeholder; placeholders never reach
/// storage
pub(crate) fn persisted_card_order(column_id: &ColumnId, card_order_ids: &[CardId]) -> Vec<CardId> {
    let placeholder = Card::placeholder_id(column_id);
    card_order_ids
        .iter()
        .filter(|id| **id != placeholder)
        .cloned()
        .collect()
}

/// Appends a new column holding only its placeholder card
pub(crate) fn insert_new_column(board: &mut Board, input: NewColumn) -> Column {
    let column = Column::new(ItemId::generate(), input.title).with_board(board.id.clone());
    board.add_column(column.clone());
    column
}

/// Appends a new card to the end of its column, replacing the placeholder
pub(crate) fn insert_new_card(board: &mut Board, input: NewCard) -> Result<Card> {
    let board_id = board.id.clone();
    let column = board
        .find_column_mut(&input.column_id)
        .ok_or_else(|| DndError::ColumnNotFound(input.column_id.to_string()))?;

    let card =
        Card::new(ItemId::generate(), input.column_id.clone(), input.title).with_board(board_id);
    column.push_card(card.clone());
    Ok(card)
}

/// Applies a column order to a stored board, ignoring unknown ids
pub(crate) fn apply_column_order(board: &mut Board, ordered_columns: &[Column]) {
    let order: Vec<ColumnId> = ordered_columns
        .iter()
        .map(|column| column.id.clone())
        .filter(|id| board.find_column(id).is_some())
        .collect();
    if order.len() == board.columns.len() {
        board.column_order_ids = order;
    }
}

/// Rebuilds a stored column's cards from an id order, pulling cards that
/// live elsewhere on the board into it
pub(crate) fn apply_card_order(board: &mut Board, column_id: &ColumnId, card_order_ids: &[CardId]) {
    let mut moving: Vec<Card> = Vec::new();
    for column in board.columns.iter_mut().filter(|c| &c.id != column_id) {
        let (taken, kept): (Vec<Card>, Vec<Card>) = column
            .cards
            .drain(..)
            .partition(|card| card_order_ids.contains(&card.id));
        column.cards = kept;
        column.ensure_placeholder();
        column.sync_card_order();
        moving.extend(taken);
    }

    if let Some(column) = board.find_column_mut(column_id) {
        let mut pool: Vec<Card> = column.cards.drain(..).chain(moving).collect();
        for id in card_order_ids {
            if let Some(pos) = pool.iter().position(|card| &card.id == id) {
                let card = pool.remove(pos);
                column.push_card(card);
            }
        }
        for card in pool.into_iter().filter(|card| !card.is_placeholder) {
            column.push_card(card);
        }
        column.ensure_placeholder();
        column.sync_card_order();
    }
}

/// Applies both card orders of a cross-column move to a stored board
pub(crate) fn apply_card_move(
    board: &mut Board,
    card_id: &CardId,
    prev_column_id: &ColumnId,
    prev_card_order_ids: &[CardId],
    next_column_id: &ColumnId,
    next_card_order_ids: &[CardId],
) -> Result<()> {
    if board.find_column(prev_column_id).is_none() {
        return Err(DndError::ColumnNotFound(prev_column_id.to_string()));
    }
    if !board.columns.iter().any(|column| column.contains_card(card_id)) {
        return Err(DndError::CardNotFound(card_id.to_string()));
    }

    let prev = persisted_card_order(prev_column_id, prev_card_order_ids);
    let next = persisted_card_order(next_column_id, next_card_order_ids);
    apply_card_order(board, prev_column_id, &prev);
    apply_card_order(board, next_column_id, &next);
    Ok(())
}
