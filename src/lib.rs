//! # Kanban DnD Core
//!
//! Board state and drag-and-drop reordering for kanban boards.
//!
//! This crate owns the column/card model, the ordered board state used for
//! rendering, the drag session state machine, and the collision strategy that
//! decides what a dragged item is over. Rendering and pointer tracking stay
//! with the host; order changes leave the crate as [`Commit`] values that a
//! [`PersistenceBridge`] forwards to a storage backend.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use config::DndConfig;
pub use domain::{
    BoardId, CardId, ColumnId, ItemId, Board, Card, Collision, Column, Droppable, Point, Rect,
};
pub use engine::{
    ActiveItem, BoardContent, BoardStore, CollisionArgs, CollisionDetector, Commit, DragEndEvent,
    DragItem, DragItemType, DragOverEvent, DragSession, DragStartEvent, OverTarget,
};
pub use error::{DndError, Result};
#[cfg(feature = "file-storage")]
pub use storage::file_storage::FileStorage;
pub use storage::{
    memory_storage::MemoryStorage, BoardPersistence, NewCard, NewColumn, PersistenceBridge,
};
