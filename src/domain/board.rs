use crate::domain::column::Column;
use crate::domain::id::{BoardId, ColumnId};
use crate::domain::ordering::reorder_by_key;
use crate::error::{DndError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Kanban board as delivered by the data-loading collaborator
///
/// `column_order_ids` defines the visible column order; `columns` may arrive
/// in any order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(rename = "_id")]
    pub id: BoardId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub column_order_ids: Vec<ColumnId>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Board {
    pub fn new(id: impl Into<BoardId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            column_order_ids: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Appends a column to the end of the board
    pub fn add_column(&mut self, column: Column) {
        let column = column.with_board(self.id.clone());
        self.column_order_ids.retain(|id| id != &column.id);
        self.column_order_ids.push(column.id.clone());
        self.columns.retain(|existing| existing.id != column.id);
        self.columns.push(column);
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.add_column(column);
        self
    }

    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| &column.id == id)
    }

    pub fn find_column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| &column.id == id)
    }

    /// Columns materialized in `column_order_ids` order
    pub fn ordered_columns(&self) -> Vec<Column> {
        reorder_by_key(&self.columns, &self.column_order_ids, |column| &column.id)
    }

    /// Repairs every column so freshly fetched data satisfies the board
    /// invariants (card order materialized, placeholders present).
    pub fn normalize(&mut self) {
        for column in &mut self.columns {
            column.normalize();
        }
    }

    /// Replaces columns and column order from an already ordered list
    pub fn set_ordered_columns(&mut self, columns: Vec<Column>) {
        self.column_order_ids = columns.iter().map(|column| column.id.clone()).collect();
        self.columns = columns;
    }

    /// Checks the column permutation invariant and every column's invariants
    pub fn validate(&self) -> Result<()> {
        let column_ids: HashSet<&ColumnId> = self.columns.iter().map(|c| &c.id).collect();
        let order_ids: HashSet<&ColumnId> = self.column_order_ids.iter().collect();

        if column_ids.len() != self.columns.len()
            || order_ids.len() != self.column_order_ids.len()
            || column_ids != order_ids
        {
            return Err(DndError::InvariantViolation(format!(
                "board {} column order is not a permutation of its columns",
                self.id
            )));
        }

        let mut seen_cards = HashSet::new();
        for column in &self.columns {
            column.validate()?;
            for card in &column.cards {
                if !seen_cards.insert(&card.id) {
                    return Err(DndError::InvariantViolation(format!(
                        "card {} appears in more than one column",
                        card.id
                    )));
                }
            }
        }

        Ok(())
    }
}
