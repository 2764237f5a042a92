//! The drag-and-drop engine: board state, drag sessions and collision
//! detection.

pub mod collision;
pub mod commit;
pub mod content;
pub mod event;
pub mod session;
pub mod store;

pub use collision::CollisionDetector;
pub use commit::Commit;
pub use content::{ActiveDragItem, BoardContent};
pub use event::{
    ActiveItem, CollisionArgs, DragEndEvent, DragItem, DragItemType, DragOverEvent,
    DragStartEvent, OverTarget,
};
pub use session::{DragEndOutcome, DragSession};
pub use store::{destination_index, BoardStore};
