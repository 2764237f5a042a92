use crate::domain::column::Column;
use crate::domain::id::{BoardId, CardId, ColumnId, ItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A card on the board
///
/// Field names follow the web API (`_id`, `columnId`, `FE_PlaceholderCard`)
/// so boards fetched from it deserialize directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "_id")]
    pub id: CardId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<BoardId>,
    pub column_id: ColumnId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "FE_PlaceholderCard",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub is_placeholder: bool,
}

impl Card {
    /// Creates a new card in the given column
    pub fn new(
        id: impl Into<CardId>,
        column_id: impl Into<ColumnId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            board_id: None,
            column_id: column_id.into(),
            title: title.into(),
            description: None,
            cover: None,
            created_at: Some(Utc::now()),
            is_placeholder: false,
        }
    }

    /// Builds the synthetic card that keeps an empty column droppable.
    ///
    /// The id is derived from the column, so repeated calls for the same
    /// column produce the same identity.
    pub fn placeholder(column: &Column) -> Self {
        Self {
            id: Self::placeholder_id(&column.id),
            board_id: column.board_id.clone(),
            column_id: column.id.clone(),
            title: String::new(),
            description: None,
            cover: None,
            created_at: None,
            is_placeholder: true,
        }
    }

    pub fn placeholder_id(column_id: &ColumnId) -> CardId {
        ItemId::new(format!("{}-placeholder-card", column_id))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_board(mut self, board_id: impl Into<BoardId>) -> Self {
        self.board_id = Some(board_id.into());
        self
    }
}
