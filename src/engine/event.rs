//! Lifecycle events and geometry handed over by the host drag library.

use crate::domain::{Card, Column, ColumnId, Droppable, ItemId, Point, Rect};
use serde::{Deserialize, Serialize};

/// Kind of the entity being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragItemType {
    Column,
    Card,
}

/// Data attached to a draggable by the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DragItem {
    Card(Card),
    Column(Column),
}

impl DragItem {
    pub fn id(&self) -> &ItemId {
        match self {
            Self::Card(card) => &card.id,
            Self::Column(column) => &column.id,
        }
    }

    /// The owning column; only cards carry one
    pub fn column_id(&self) -> Option<&ColumnId> {
        match self {
            Self::Card(card) => Some(&card.column_id),
            Self::Column(_) => None,
        }
    }

    /// Classifies the item by whether it carries a column id
    pub fn item_type(&self) -> DragItemType {
        if self.column_id().is_some() {
            DragItemType::Card
        } else {
            DragItemType::Column
        }
    }
}

/// The draggable currently held by the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveItem {
    pub id: ItemId,
    pub data: DragItem,
    /// Current on-screen rect of the dragged item, once the host has
    /// translated it.
    pub translated_rect: Option<Rect>,
}

impl ActiveItem {
    pub fn new(data: DragItem) -> Self {
        Self {
            id: data.id().clone(),
            data,
            translated_rect: None,
        }
    }

    pub fn with_translated_rect(mut self, rect: Rect) -> Self {
        self.translated_rect = Some(rect);
        self
    }
}

/// The droppable resolved by collision detection
#[derive(Debug, Clone, PartialEq)]
pub struct OverTarget {
    pub id: ItemId,
    pub rect: Rect,
}

impl OverTarget {
    pub fn new(id: impl Into<ItemId>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragStartEvent {
    pub active: ActiveItem,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragOverEvent {
    pub active: ActiveItem,
    pub over: Option<OverTarget>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragEndEvent {
    pub active: ActiveItem,
    pub over: Option<OverTarget>,
}

/// Inputs for one collision-detection pass
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionArgs {
    /// Rect of the dragged item at its current position.
    pub collision_rect: Rect,
    /// Pointer coordinates; `None` for keyboard-driven drags.
    pub pointer: Option<Point>,
    pub droppables: Vec<Droppable>,
}
