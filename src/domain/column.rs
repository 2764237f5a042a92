use crate::domain::card::Card;
use crate::domain::id::{BoardId, CardId, ColumnId};
use crate::domain::ordering::{capitalize_first_letter, reorder_by_key};
use crate::error::{DndError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered container of cards
///
/// `card_order_ids` is the source of truth for card order; `cards` is its
/// materialized form and is kept in step by [`Column::sync_card_order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(rename = "_id")]
    pub id: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<BoardId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub card_order_ids: Vec<CardId>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Column {
    /// Creates a new column holding only its placeholder card
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        let mut column = Self {
            id: id.into(),
            board_id: None,
            title: title.into(),
            card_order_ids: Vec::new(),
            cards: Vec::new(),
            created_at: Some(Utc::now()),
        };
        column.ensure_placeholder();
        column
    }

    pub fn with_board(mut self, board_id: impl Into<BoardId>) -> Self {
        let board_id = board_id.into();
        for card in &mut self.cards {
            card.board_id = Some(board_id.clone());
        }
        self.board_id = Some(board_id);
        self
    }

    /// Appends cards, dropping the placeholder once a real card is present
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = Card>) -> Self {
        for card in cards {
            self.push_card(card);
        }
        self
    }

    /// Title as shown in the column header
    pub fn display_title(&self) -> String {
        capitalize_first_letter(&self.title)
    }

    pub fn contains_card(&self, card_id: &CardId) -> bool {
        self.cards.iter().any(|card| &card.id == card_id)
    }

    pub fn position_of_card(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == card_id)
    }

    /// Number of cards that are not placeholders
    pub fn real_card_count(&self) -> usize {
        self.cards.iter().filter(|card| !card.is_placeholder).count()
    }

    /// Appends a card at the end of the column
    pub fn push_card(&mut self, mut card: Card) {
        card.column_id = self.id.clone();
        if card.board_id.is_none() {
            card.board_id = self.board_id.clone();
        }
        if !card.is_placeholder {
            self.remove_placeholders();
        }
        self.cards.retain(|existing| existing.id != card.id);
        self.cards.push(card);
        self.sync_card_order();
    }

    /// Inserts a placeholder card if the column has no cards at all
    pub fn ensure_placeholder(&mut self) {
        if self.cards.is_empty() {
            self.cards.push(Card::placeholder(self));
            self.sync_card_order();
        }
    }

    /// Drops placeholder cards when at least one real card is present
    pub fn remove_placeholders(&mut self) {
        if self.real_card_count() > 0 {
            self.cards.retain(|card| !card.is_placeholder);
        }
    }

    /// Recomputes `card_order_ids` from the materialized card list
    pub fn sync_card_order(&mut self) {
        self.card_order_ids = self.cards.iter().map(|card| card.id.clone()).collect();
    }

    /// Sorts `cards` by `card_order_ids` and repairs the column so that it
    /// satisfies every board invariant
    pub fn normalize(&mut self) {
        let covered = self.cards.len() == self.card_order_ids.len()
            && self.cards.iter().all(|card| self.card_order_ids.contains(&card.id));
        if covered {
            self.cards = reorder_by_key(&self.cards, &self.card_order_ids, |card| &card.id);
        }
        for card in &mut self.cards {
            card.column_id = self.id.clone();
        }
        self.remove_placeholders();
        self.ensure_placeholder();
        self.sync_card_order();
    }

    /// Checks the card-order, non-empty and ownership invariants
    pub fn validate(&self) -> Result<()> {
        if self.cards.is_empty() {
            return Err(DndError::InvariantViolation(format!(
                "column {} has no cards",
                self.id
            )));
        }

        let placeholders = self.cards.len() - self.real_card_count();
        if placeholders > 0 && (placeholders != 1 || self.cards.len() != 1) {
            return Err(DndError::InvariantViolation(format!(
                "column {} mixes placeholder and real cards",
                self.id
            )));
        }

        let ids: Vec<&CardId> = self.cards.iter().map(|card| &card.id).collect();
        let unique: HashSet<&CardId> = ids.iter().copied().collect();
        if unique.len() != ids.len() {
            return Err(DndError::InvariantViolation(format!(
                "column {} holds duplicate cards",
                self.id
            )));
        }

        if self.card_order_ids.iter().collect::<Vec<_>>() != ids {
            return Err(DndError::InvariantViolation(format!(
                "column {} card order does not match its cards",
                self.id
            )));
        }

        if let Some(card) = self.cards.iter().find(|card| card.column_id != self.id) {
            return Err(DndError::InvariantViolation(format!(
                "card {} in column {} claims column {}",
                card.id, self.id, card.column_id
            )));
        }

        Ok(())
    }
}
