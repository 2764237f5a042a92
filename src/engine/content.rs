use crate::config::DndConfig;
use crate::domain::{Board, Collision, Column, ItemId};
use crate::engine::collision::CollisionDetector;
use crate::engine::commit::Commit;
use crate::engine::event::{
    CollisionArgs, DragEndEvent, DragItem, DragItemType, DragOverEvent, DragStartEvent,
};
use crate::engine::session::DragSession;
use crate::engine::store::BoardStore;
use std::sync::Arc;

/// What the overlay renders while a drag is in progress
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDragItem {
    pub id: ItemId,
    pub item_type: DragItemType,
    pub data: DragItem,
}

/// Board content with its drag-and-drop wiring
///
/// Owns the store, the current drag session and the collision detector. The
/// host binds its drag lifecycle hooks to the `on_*` methods and its collision
/// callback to [`BoardContent::detect_collisions`].
#[derive(Debug, Clone, Default)]
pub struct BoardContent {
    config: DndConfig,
    store: BoardStore,
    session: DragSession,
    collisions: CollisionDetector,
}

impl BoardContent {
    pub fn new(config: DndConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_board(mut self, board: &Board) -> Self {
        self.on_board_loaded(board);
        self
    }

    pub fn config(&self) -> &DndConfig {
        &self.config
    }

    pub fn store(&self) -> &BoardStore {
        &self.store
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Columns to render, in board order
    pub fn ordered_columns(&self) -> Arc<Vec<Column>> {
        self.store.snapshot()
    }

    pub fn active_drag_item(&self) -> Option<ActiveDragItem> {
        Some(ActiveDragItem {
            id: self.session.active_id()?.clone(),
            item_type: self.session.item_type()?,
            data: self.session.snapshot()?,
        })
    }

    /// Replaces the board state; called whenever fresh board data arrives
    pub fn on_board_loaded(&mut self, board: &Board) {
        self.store.load(board);
    }

    pub fn on_drag_start(&mut self, event: &DragStartEvent) {
        self.session = DragSession::start(&self.store, event);
    }

    pub fn on_drag_over(&mut self, event: &DragOverEvent) {
        let session = std::mem::take(&mut self.session);
        self.session = session.drag_over(&mut self.store, event);
    }

    /// Ends the gesture; a returned commit should go to the persistence bridge
    pub fn on_drag_end(&mut self, event: &DragEndEvent) -> Option<Commit> {
        let session = std::mem::take(&mut self.session);
        let outcome = session.end(&mut self.store, event, self.config.persist_card_moves);
        self.session = outcome.session;
        outcome.commit
    }

    pub fn on_drag_cancel(&mut self) {
        let session = std::mem::take(&mut self.session);
        self.session = session.cancel();
    }

    pub fn detect_collisions(&mut self, args: &CollisionArgs) -> Vec<Collision> {
        self.collisions
            .detect(self.session.item_type(), self.store.ordered_columns(), args)
    }

    pub fn last_over_id(&self) -> Option<&ItemId> {
        self.collisions.last_over_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Card, Droppable, Point, Rect};
    use crate::engine::event::{ActiveItem, OverTarget};

    fn board() -> Board {
        Board::new("b1", "Sprint")
            .with_column(
                Column::new("A", "todo")
                    .with_cards([Card::new("c1", "A", "One"), Card::new("c2", "A", "Two")]),
            )
            .with_column(Column::new("B", "done").with_cards([Card::new("c3", "B", "Three")]))
    }

    #[test]
    fn test_overlay_follows_session() {
        let mut content = BoardContent::default().with_board(&board());
        assert!(content.active_drag_item().is_none());

        let card = content.ordered_columns()[0].cards[0].clone();
        content.on_drag_start(&DragStartEvent {
            active: ActiveItem::new(DragItem::Card(card)),
        });

        let overlay = content.active_drag_item().unwrap();
        assert_eq!(overlay.id.as_str(), "c1");
        assert_eq!(overlay.item_type, DragItemType::Card);

        content.on_drag_cancel();
        assert!(content.active_drag_item().is_none());
        assert!(content.session().is_idle());
    }

    #[test]
    fn test_overlay_snapshot_survives_live_moves() {
        let mut content = BoardContent::default().with_board(&board());
        let card = content.ordered_columns()[0].cards[0].clone();
        let active = ActiveItem::new(DragItem::Card(card));

        content.on_drag_start(&DragStartEvent { active: active.clone() });
        content.on_drag_over(&DragOverEvent {
            active,
            over: Some(OverTarget::new("c3", Rect::new(0.0, 0.0, 10.0, 10.0))),
        });

        match content.active_drag_item().unwrap().data {
            DragItem::Card(snapshot) => assert_eq!(snapshot.column_id.as_str(), "A"),
            other => panic!("unexpected overlay data: {:?}", other),
        }
    }

    #[test]
    fn test_collisions_follow_session_type() {
        let mut content = BoardContent::default().with_board(&board());
        let column = content.ordered_columns()[1].clone();
        content.on_drag_start(&DragStartEvent {
            active: ActiveItem::new(DragItem::Column(column)),
        });

        let args = CollisionArgs {
            collision_rect: Rect::new(290.0, 0.0, 200.0, 600.0),
            pointer: Some(Point::new(1000.0, 1000.0)),
            droppables: vec![
                Droppable::new("A", Rect::new(0.0, 0.0, 200.0, 600.0)),
                Droppable::new("B", Rect::new(300.0, 0.0, 200.0, 600.0)),
            ],
        };

        let hits = content.detect_collisions(&args);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id.as_str(), "B");
    }

    #[test]
    fn test_reload_replaces_state() {
        let mut content = BoardContent::default().with_board(&board());
        let mut reloaded = board();
        reloaded.column_order_ids.reverse();

        content.on_board_loaded(&reloaded);

        assert_eq!(content.ordered_columns()[0].id.as_str(), "B");
    }
}
