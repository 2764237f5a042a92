//! Collision detection strategy.
//!
//! Column drags use corner distance over every droppable. Card drags use
//! pointer containment first; a hit on a column body is re-resolved to the
//! nearest card of that column, and an empty hit falls back to the last
//! resolved target so the drop target does not flicker to nothing while the
//! pointer crosses a gap.
//!
//! The last-over cache is never cleared between gestures, so the first frame
//! of a new card drag over a gap can still report the previous gesture's
//! target.

use crate::domain::{closest_corners, pointer_within, Collision, Column, Droppable, ItemId};
use crate::engine::event::{CollisionArgs, DragItemType};
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct CollisionDetector {
    last_over_id: Option<ItemId>,
}

impl CollisionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently resolved card-drag target
    pub fn last_over_id(&self) -> Option<&ItemId> {
        self.last_over_id.as_ref()
    }

    /// Resolves the drop target for the current frame.
    ///
    /// Returns at most one collision for card drags; an empty vector means
    /// no target.
    pub fn detect(
        &mut self,
        active_type: Option<DragItemType>,
        columns: &[Column],
        args: &CollisionArgs,
    ) -> Vec<Collision> {
        if active_type == Some(DragItemType::Column) {
            return closest_corners(&args.collision_rect, &args.droppables);
        }

        let hits = match args.pointer {
            Some(pointer) => pointer_within(pointer, &args.droppables),
            None => Vec::new(),
        };

        let Some(first) = hits.into_iter().next() else {
            trace!(cached = ?self.last_over_id, "no pointer hit");
            return self
                .last_over_id
                .clone()
                .map(|id| vec![Collision::new(id, 0.0)])
                .unwrap_or_default();
        };

        let resolved = match columns.iter().find(|column| column.id == first.id) {
            Some(column) => nearest_card_in_column(column, args).unwrap_or(first),
            None => first,
        };

        trace!(over = %resolved.id, "collision resolved");
        self.last_over_id = Some(resolved.id.clone());
        vec![resolved]
    }
}

/// Corner-distance match restricted to the card droppables of `column`
fn nearest_card_in_column(column: &Column, args: &CollisionArgs) -> Option<Collision> {
    let cards: Vec<Droppable> = args
        .droppables
        .iter()
        .filter(|droppable| {
            droppable.id != column.id && column.card_order_ids.contains(&droppable.id)
        })
        .cloned()
        .collect();

    closest_corners(&args.collision_rect, &cards).into_iter().next()
}
