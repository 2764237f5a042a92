pub mod board;
pub mod card;
pub mod column;
pub mod geometry;
pub mod id;
pub mod ordering;

pub use board::Board;
pub use card::Card;
pub use column::Column;
pub use geometry::{closest_corners, pointer_within, Collision, Droppable, Point, Rect};
pub use id::{BoardId, CardId, ColumnId, ItemId};
pub use ordering::{array_move, reorder_by_key};
