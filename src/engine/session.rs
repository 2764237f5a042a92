//! Drag session state machine.
//!
//! A session is a plain value: each lifecycle handler consumes the current
//! state and returns the next one, mutating the [`BoardStore`] along the way.
//!
//! ```text
//! Idle ──start(card)──▶ DraggingCard ───end/cancel──▶ Idle
//!   └───start(column)─▶ DraggingColumn ─end/cancel──▶ Idle
//! ```
//!
//! Card moves across columns are committed to the store live, on every
//! drag-over that crosses a column boundary. Same-column card moves and
//! column moves are only committed at drag end. Cancelling keeps whatever
//! cross-column moves were already applied.

use crate::domain::{Card, CardId, Column, ColumnId, ItemId};
use crate::engine::commit::Commit;
use crate::engine::event::{
    ActiveItem, DragEndEvent, DragItem, DragItemType, DragOverEvent, DragStartEvent, OverTarget,
};
use crate::engine::store::{destination_index, BoardStore};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    DraggingColumn {
        active_id: ColumnId,
        snapshot: Column,
    },
    DraggingCard {
        active_id: CardId,
        snapshot: Card,
        /// Column as it was when the drag started, cards included.
        source_column: Option<Column>,
    },
}

/// Result of ending a drag
#[derive(Debug, Clone, PartialEq)]
pub struct DragEndOutcome {
    pub session: DragSession,
    pub commit: Option<Commit>,
}

impl DragSession {
    /// Starts a session for the item under the pointer.
    ///
    /// Any session still in progress is discarded.
    pub fn start(store: &BoardStore, event: &DragStartEvent) -> Self {
        let active = &event.active;
        let session = match &active.data {
            DragItem::Card(card) => Self::DraggingCard {
                active_id: active.id.clone(),
                snapshot: card.clone(),
                source_column: store.find_column_containing_card(&active.id).cloned(),
            },
            DragItem::Column(column) => Self::DraggingColumn {
                active_id: active.id.clone(),
                snapshot: column.clone(),
            },
        };
        debug!(active = %active.id, kind = ?session.item_type(), "drag started");
        session
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn item_type(&self) -> Option<DragItemType> {
        match self {
            Self::Idle => None,
            Self::DraggingColumn { .. } => Some(DragItemType::Column),
            Self::DraggingCard { .. } => Some(DragItemType::Card),
        }
    }

    pub fn active_id(&self) -> Option<&ItemId> {
        match self {
            Self::Idle => None,
            Self::DraggingColumn { active_id, .. } | Self::DraggingCard { active_id, .. } => {
                Some(active_id)
            }
        }
    }

    /// Copy of the dragged entity taken at drag start, for the overlay
    pub fn snapshot(&self) -> Option<DragItem> {
        match self {
            Self::Idle => None,
            Self::DraggingColumn { snapshot, .. } => Some(DragItem::Column(snapshot.clone())),
            Self::DraggingCard { snapshot, .. } => Some(DragItem::Card(snapshot.clone())),
        }
    }

    pub fn source_column(&self) -> Option<&Column> {
        match self {
            Self::DraggingCard { source_column, .. } => source_column.as_ref(),
            _ => None,
        }
    }

    /// Handles pointer movement over a droppable.
    ///
    /// Only card drags react: when the target sits in another column than the
    /// one currently holding the card, the card is moved there immediately.
    pub fn drag_over(self, store: &mut BoardStore, event: &DragOverEvent) -> Self {
        if let (Self::DraggingCard { snapshot, .. }, Some(over)) = (&self, &event.over) {
            move_to_other_column(store, &event.active, over, snapshot);
        }
        self
    }

    /// Finishes the gesture and returns to [`DragSession::Idle`].
    ///
    /// Without a drop target this behaves like [`DragSession::cancel`].
    pub fn end(
        self,
        store: &mut BoardStore,
        event: &DragEndEvent,
        persist_card_moves: bool,
    ) -> DragEndOutcome {
        let Some(over) = &event.over else {
            return DragEndOutcome {
                session: self.cancel(),
                commit: None,
            };
        };

        let commit = match &self {
            Self::Idle => None,
            Self::DraggingCard {
                snapshot,
                source_column,
                ..
            } => {
                let source = source_column.as_ref();
                let commit = end_card_drag(store, &event.active, over, snapshot, source);
                commit.filter(|_| persist_card_moves)
            }
            Self::DraggingColumn { .. } => end_column_drag(store, &event.active, over),
        };

        debug!(
            active = ?self.active_id(),
            over = %over.id,
            committed = commit.is_some(),
            "drag ended"
        );
        DragEndOutcome {
            session: Self::Idle,
            commit,
        }
    }

    /// Drops the session without committing anything
    pub fn cancel(self) -> Self {
        if let Some(active) = self.active_id() {
            debug!(active = %active, "drag cancelled");
        }
        Self::Idle
    }
}

/// Column holding `over_id` and the index of the over-card within it.
///
/// An over id naming a column (its empty body) resolves to that column with
/// no card index.
fn resolve_over_column(store: &BoardStore, over_id: &ItemId) -> Option<(ColumnId, Option<usize>)> {
    if let Some(column) = store.find_column_containing_card(over_id) {
        return Some((column.id.clone(), column.position_of_card(over_id)));
    }
    store.find_column(over_id).map(|column| (column.id.clone(), None))
}

/// Moves the card live when `over` lies in another column than the card
fn move_to_other_column(
    store: &mut BoardStore,
    active: &ActiveItem,
    over: &OverTarget,
    snapshot: &Card,
) -> Option<()> {
    let Some(active_column) = store.find_column_containing_card(&active.id) else {
        warn!(card = %active.id, "dragged card not on board");
        return None;
    };
    let active_column_id = active_column.id.clone();
    let (over_column_id, over_index) = resolve_over_column(store, &over.id)?;
    if active_column_id == over_column_id {
        return None;
    }

    let dest = store.find_column(&over_column_id)?;
    let index = destination_index(dest, over_index, active.translated_rect, &over.rect);
    store.move_card_across_columns(&active_column_id, &over_column_id, &active.id, index, snapshot);
    Some(())
}

fn end_card_drag(
    store: &mut BoardStore,
    active: &ActiveItem,
    over: &OverTarget,
    snapshot: &Card,
    source_column: Option<&Column>,
) -> Option<Commit> {
    let Some(source) = source_column else {
        warn!(card = %active.id, "card drag ended without a source column");
        return None;
    };
    let active_column_id = store.find_column_containing_card(&active.id)?.id.clone();
    let (over_column_id, over_index) = resolve_over_column(store, &over.id)?;

    if source.id != over_column_id {
        let dest = store.find_column(&over_column_id)?;
        let index = destination_index(dest, over_index, active.translated_rect, &over.rect);
        store.move_card_across_columns(
            &active_column_id,
            &over_column_id,
            &active.id,
            index,
            snapshot,
        );

        let card_order_ids = |id: &ColumnId| {
            store
                .find_column(id)
                .map(|column| column.card_order_ids.clone())
                .unwrap_or_default()
        };
        return Some(Commit::MoveCardToDifferentColumn {
            card_id: active.id.clone(),
            prev_column_id: source.id.clone(),
            prev_card_order_ids: card_order_ids(&source.id),
            next_column_id: over_column_id.clone(),
            next_card_order_ids: card_order_ids(&over_column_id),
        });
    }

    // Same column: indices come from the list captured at drag start.
    let from_index = source.position_of_card(&active.id)?;
    let to_index = source
        .position_of_card(&over.id)
        .or(over_index)
        .unwrap_or(source.cards.len().saturating_sub(1));

    if active_column_id != source.id {
        store.move_card_across_columns(
            &active_column_id,
            &source.id,
            &active.id,
            from_index,
            snapshot,
        );
    }
    // Restore the captured order only when the column still holds the same
    // cards; after a reload the current membership wins.
    let current = store.find_column(&source.id)?;
    if current.card_order_ids != source.card_order_ids && same_cards(current, source) {
        store.replace_column_cards(&source.id, source.cards.clone());
    }
    store.move_card_within_column(&source.id, &active.id, from_index, to_index);

    let ordered_cards = store.find_column(&source.id)?.cards.clone();
    Some(Commit::MoveCardInSameColumn {
        column_id: source.id.clone(),
        ordered_cards,
    })
}

fn same_cards(a: &Column, b: &Column) -> bool {
    a.card_order_ids.len() == b.card_order_ids.len()
        && a.card_order_ids.iter().all(|id| b.card_order_ids.contains(id))
}

fn end_column_drag(
    store: &mut BoardStore,
    active: &ActiveItem,
    over: &OverTarget,
) -> Option<Commit> {
    if active.id == over.id {
        return None;
    }

    let from_index = store.column_index(&active.id)?;
    let to_index = match store.column_index(&over.id) {
        Some(index) => index,
        None => {
            let column_id = store.find_column_containing_card(&over.id)?.id.clone();
            store.column_index(&column_id)?
        }
    };

    store.move_column(from_index, to_index);
    Some(Commit::MoveColumns {
        board_id: store.board_id().cloned(),
        ordered_columns: store.ordered_columns().to_vec(),
    })
}
