//! End-to-end drag gestures driven through `BoardContent`, with commits
//! forwarded to a storage backend.

use kanban_dnd_core::{
    ActiveItem, Board, BoardContent, BoardPersistence, Card, CardId, CollisionArgs, Column,
    ColumnId, Commit, DndConfig, DragEndEvent, DragItem, DragOverEvent, DragStartEvent,
    Droppable, FileStorage, MemoryStorage, OverTarget, PersistenceBridge, Point, Rect,
};
use std::sync::Arc;
use tempfile::TempDir;

fn two_column_board() -> Board {
    Board::new("b1", "Sprint")
        .with_column(
            Column::new("A", "todo")
                .with_cards([Card::new("c1", "A", "One"), Card::new("c2", "A", "Two")]),
        )
        .with_column(Column::new("B", "done").with_cards([Card::new("c3", "B", "Three")]))
}

fn target(id: &str) -> Option<OverTarget> {
    Some(OverTarget::new(id, Rect::new(0.0, 100.0, 200.0, 40.0)))
}

fn card(content: &BoardContent, id: &str) -> ActiveItem {
    let card = content
        .store()
        .find_column_containing_card(&id.into())
        .and_then(|column| column.cards.iter().find(|c| c.id.as_str() == id))
        .cloned()
        .expect("card on board");
    ActiveItem::new(DragItem::Card(card))
}

fn column(content: &BoardContent, id: &str) -> ActiveItem {
    let column = content.store().find_column(&id.into()).cloned().expect("column on board");
    ActiveItem::new(DragItem::Column(column))
}

fn card_ids(content: &BoardContent, column: &str) -> Vec<String> {
    content
        .store()
        .find_column(&column.into())
        .expect("column on board")
        .cards
        .iter()
        .map(|c| c.id.to_string())
        .collect()
}

/// Start, hover `over` once, then drop on `drop_on`
fn drag(content: &mut BoardContent, active: ActiveItem, over: &str, drop_on: &str) -> Option<Commit> {
    content.on_drag_start(&DragStartEvent { active: active.clone() });
    content.on_drag_over(&DragOverEvent {
        active: active.clone(),
        over: target(over),
    });
    content.on_drag_end(&DragEndEvent {
        active,
        over: target(drop_on),
    })
}

#[test]
fn test_move_column_after_next() {
    let mut content = BoardContent::default().with_board(&two_column_board());
    let active = column(&content, "A");

    let commit = drag(&mut content, active, "B", "B").expect("column moves always commit");

    assert_eq!(
        content.store().column_order_ids(),
        vec![ColumnId::from("B"), ColumnId::from("A")]
    );
    assert_eq!(card_ids(&content, "A"), vec!["c1", "c2"]);
    assert_eq!(card_ids(&content, "B"), vec!["c3"]);
    assert!(matches!(commit, Commit::MoveColumns { .. }));
}

#[test]
fn test_move_card_to_top_of_other_column() {
    let mut content = BoardContent::default().with_board(&two_column_board());
    let active = card(&content, "c1");

    // After the live move the dragged card itself sits under the pointer.
    let commit = drag(&mut content, active, "c3", "c1");

    assert!(commit.is_none());
    assert_eq!(card_ids(&content, "A"), vec!["c2"]);
    assert_eq!(card_ids(&content, "B"), vec!["c1", "c3"]);

    let b = content.store().find_column(&"B".into()).unwrap();
    assert_eq!(b.cards[0].column_id.as_str(), "B");
}

#[test]
fn test_moving_only_card_leaves_placeholder() {
    let mut content = BoardContent::default().with_board(&two_column_board());
    let active = card(&content, "c3");

    drag(&mut content, active, "c1", "c3");

    let b = content.store().find_column(&"B".into()).unwrap();
    let placeholder = Card::placeholder_id(&"B".into());
    assert_eq!(b.cards.len(), 1);
    assert!(b.cards[0].is_placeholder);
    assert_eq!(b.card_order_ids, vec![placeholder]);
    assert_eq!(card_ids(&content, "A"), vec!["c3", "c1", "c2"]);
}

#[test]
fn test_reorder_within_column() {
    let board = Board::new("b1", "Sprint").with_column(Column::new("A", "todo").with_cards([
        Card::new("c1", "A", "One"),
        Card::new("c2", "A", "Two"),
        Card::new("c3", "A", "Three"),
    ]));
    let config = DndConfig::default().with_card_persistence(true);
    let mut content = BoardContent::new(config).with_board(&board);
    let active = card(&content, "c1");

    let commit = drag(&mut content, active, "c3", "c3");

    assert_eq!(card_ids(&content, "A"), vec!["c2", "c3", "c1"]);
    match commit {
        Some(Commit::MoveCardInSameColumn { column_id, ordered_cards }) => {
            assert_eq!(column_id.as_str(), "A");
            let ids: Vec<&str> = ordered_cards.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids, vec!["c2", "c3", "c1"]);
        }
        other => panic!("unexpected commit: {:?}", other),
    }
}

fn gap_args() -> CollisionArgs {
    CollisionArgs {
        collision_rect: Rect::new(0.0, 45.0, 200.0, 40.0),
        pointer: Some(Point::new(100.0, 65.0)),
        droppables: vec![
            Droppable::unmeasured("A"),
            Droppable::new("c1", Rect::new(0.0, 0.0, 200.0, 40.0)),
            Droppable::new("c2", Rect::new(0.0, 90.0, 200.0, 40.0)),
        ],
    }
}

#[test]
fn test_pointer_in_gap_without_cache_has_no_target() {
    let mut content = BoardContent::default().with_board(&two_column_board());
    let active = card(&content, "c1");
    content.on_drag_start(&DragStartEvent { active });

    assert!(content.detect_collisions(&gap_args()).is_empty());
    assert!(content.last_over_id().is_none());
}

#[test]
fn test_last_over_survives_into_next_gesture() {
    let mut content = BoardContent::default().with_board(&two_column_board());

    let first = card(&content, "c1");
    content.on_drag_start(&DragStartEvent { active: first.clone() });
    let mut over_c2 = gap_args();
    over_c2.pointer = Some(Point::new(100.0, 100.0));
    let hits = content.detect_collisions(&over_c2);
    assert_eq!(hits[0].id.as_str(), "c2");
    content.on_drag_end(&DragEndEvent {
        active: first,
        over: target("c2"),
    });

    let second = card(&content, "c3");
    content.on_drag_start(&DragStartEvent { active: second });
    let hits = content.detect_collisions(&gap_args());

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id.as_str(), "c2");
}

#[test]
fn test_cancel_keeps_live_cross_column_move() {
    let mut content = BoardContent::default().with_board(&two_column_board());
    let active = card(&content, "c2");

    content.on_drag_start(&DragStartEvent { active: active.clone() });
    content.on_drag_over(&DragOverEvent {
        active,
        over: target("B"),
    });
    content.on_drag_cancel();

    assert!(content.session().is_idle());
    assert_eq!(card_ids(&content, "A"), vec!["c1"]);
    assert_eq!(card_ids(&content, "B"), vec!["c3", "c2"]);
}

#[tokio::test]
async fn test_commits_reach_memory_storage() {
    let backend = Arc::new(MemoryStorage::with_boards([two_column_board()]));
    let bridge = PersistenceBridge::new("b1", backend.clone());
    let config = DndConfig::default().with_card_persistence(true);
    let mut content = BoardContent::new(config).with_board(&bridge.load_board().await.unwrap());

    let active = card(&content, "c1");
    let commit = drag(&mut content, active, "c3", "c1").expect("card moves enabled");
    bridge.dispatch(&commit).await.unwrap();

    let active = column(&content, "B");
    let commit = drag(&mut content, active, "A", "A").expect("column moves always commit");
    bridge.dispatch(&commit).await.unwrap();

    let stored = backend.load_board(&"b1".into()).await.unwrap();
    assert_eq!(stored.column_order_ids, vec![ColumnId::from("B"), ColumnId::from("A")]);
    let b = stored.find_column(&"B".into()).unwrap();
    assert_eq!(b.card_order_ids, vec![CardId::from("c1"), CardId::from("c3")]);
    assert!(stored.validate().is_ok());
}

#[tokio::test]
async fn test_new_card_in_fresh_column_round_trips_through_file_storage() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Arc::new(FileStorage::new(temp_dir.path()));
    storage.save_board(&Board::new("b1", "Sprint")).await.unwrap();
    let bridge = PersistenceBridge::new("b1", storage);

    let column = bridge
        .create_new_column(kanban_dnd_core::NewColumn {
            title: "backlog".to_string(),
        })
        .await
        .unwrap();
    let mut content = BoardContent::default().with_board(&bridge.load_board().await.unwrap());
    let shown = content.store().find_column(&column.id).unwrap();
    assert!(shown.cards[0].is_placeholder);

    let card = bridge
        .create_new_card(kanban_dnd_core::NewCard {
            column_id: column.id.clone(),
            title: "Triage".to_string(),
        })
        .await
        .unwrap();
    content.on_board_loaded(&bridge.load_board().await.unwrap());

    let shown = content.store().find_column(&column.id).unwrap();
    assert_eq!(shown.card_order_ids, vec![card.id]);
}
