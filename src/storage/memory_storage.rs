use crate::{
    domain::{Board, BoardId, Card, CardId, Column, ColumnId},
    error::{DndError, Result},
    storage::{
        apply_card_move, apply_card_order, apply_column_order, insert_new_card,
        insert_new_column, persisted_card_order, BoardPersistence, NewCard, NewColumn,
    },
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// In-process storage for hosts without a disk, and for tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    boards: Mutex<HashMap<BoardId, Board>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage already holding `boards`
    pub fn with_boards(boards: impl IntoIterator<Item = Board>) -> Self {
        let boards = boards
            .into_iter()
            .map(|mut board| {
                board.normalize();
                (board.id.clone(), board)
            })
            .collect();
        Self {
            boards: Mutex::new(boards),
        }
    }

    pub async fn save_board(&self, board: &Board) {
        let mut boards = self.boards.lock().await;
        boards.insert(board.id.clone(), board.clone());
    }

    async fn update<T: Send>(
        &self,
        board_id: &BoardId,
        apply: impl FnOnce(&mut Board) -> Result<T> + Send,
    ) -> Result<T> {
        let mut boards = self.boards.lock().await;
        let board = boards
            .get_mut(board_id)
            .ok_or_else(|| DndError::BoardNotFound(board_id.to_string()))?;
        apply(board)
    }

    async fn board_owning_column(&self, column_id: &ColumnId) -> Result<BoardId> {
        let boards = self.boards.lock().await;
        boards
            .values()
            .find(|board| board.find_column(column_id).is_some())
            .map(|board| board.id.clone())
            .ok_or_else(|| DndError::ColumnNotFound(column_id.to_string()))
    }
}

#[async_trait]
impl BoardPersistence for MemoryStorage {
    async fn load_board(&self, board_id: &BoardId) -> Result<Board> {
        let boards = self.boards.lock().await;
        boards
            .get(board_id)
            .cloned()
            .ok_or_else(|| DndError::BoardNotFound(board_id.to_string()))
    }

    async fn move_columns(&self, board_id: &BoardId, ordered_columns: &[Column]) -> Result<()> {
        self.update(board_id, |board| {
            apply_column_order(board, ordered_columns);
            Ok(())
        })
        .await
    }

    async fn move_card_in_same_column(
        &self,
        column_id: &ColumnId,
        card_order_ids: &[CardId],
    ) -> Result<()> {
        let board_id = self.board_owning_column(column_id).await?;
        let order = persisted_card_order(column_id, card_order_ids);
        self.update(&board_id, |board| {
            apply_card_order(board, column_id, &order);
            Ok(())
        })
        .await
    }

    async fn move_card_to_different_column(
        &self,
        card_id: &CardId,
        prev_column_id: &ColumnId,
        prev_card_order_ids: &[CardId],
        next_column_id: &ColumnId,
        next_card_order_ids: &[CardId],
    ) -> Result<()> {
        let board_id = self.board_owning_column(next_column_id).await?;
        self.update(&board_id, |board| {
            apply_card_move(
                board,
                card_id,
                prev_column_id,
                prev_card_order_ids,
                next_column_id,
                next_card_order_ids,
            )
        })
        .await
    }

    async fn create_new_column(&self, board_id: &BoardId, input: NewColumn) -> Result<Column> {
        self.update(board_id, |board| Ok(insert_new_column(board, input)))
            .await
    }

    async fn create_new_card(&self, board_id: &BoardId, input: NewCard) -> Result<Card> {
        self.update(board_id, |board| insert_new_card(board, input))
            .await
    }
}
