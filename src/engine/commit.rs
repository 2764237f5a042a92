use crate::domain::{BoardId, Card, CardId, Column, ColumnId};
use serde::{Deserialize, Serialize};

/// A finalized order change handed to the persistence bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Commit {
    /// Column order changed; always emitted for column reorders.
    MoveColumns {
        board_id: Option<BoardId>,
        ordered_columns: Vec<Column>,
    },
    /// Card order changed within one column.
    MoveCardInSameColumn {
        column_id: ColumnId,
        ordered_cards: Vec<Card>,
    },
    /// A card finished in a different column than it started in.
    MoveCardToDifferentColumn {
        card_id: CardId,
        prev_column_id: ColumnId,
        prev_card_order_ids: Vec<CardId>,
        next_column_id: ColumnId,
        next_card_order_ids: Vec<CardId>,
    },
}

impl Commit {
    /// Column ids in their committed order, for column reorders
    pub fn column_order_ids(&self) -> Option<Vec<ColumnId>> {
        match self {
            Self::MoveColumns {
                ordered_columns, ..
            } => Some(ordered_columns.iter().map(|c| c.id.clone()).collect()),
            _ => None,
        }
    }
}
