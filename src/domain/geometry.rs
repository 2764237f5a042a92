//! Geometric primitives and the collision algorithms built on them.

use crate::domain::id::ItemId;
use serde::{Deserialize, Serialize};

/// A point in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A client rectangle as measured by the host.
///
/// Origin at the top-left, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right(), self.top),
            Point::new(self.left, self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    /// Check if a point is inside the rectangle (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.left + dx, self.top + dy, self.width, self.height)
    }

    /// True when every coordinate is finite and the size is not negative.
    pub fn is_usable(&self) -> bool {
        [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// A registered drop region. `rect` is `None` until the host has measured it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droppable {
    pub id: ItemId,
    pub rect: Option<Rect>,
}

impl Droppable {
    pub fn new(id: impl Into<ItemId>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect: Some(rect),
        }
    }

    pub fn unmeasured(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            rect: None,
        }
    }

    fn usable_rect(&self) -> Option<Rect> {
        self.rect.filter(Rect::is_usable)
    }
}

/// A resolved drop target; lower `value` means closer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    pub id: ItemId,
    pub value: f64,
}

impl Collision {
    pub fn new(id: impl Into<ItemId>, value: f64) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

fn average_corner_distance(corners: &[Point; 4], rect: &Rect) -> f64 {
    let sum: f64 = rect
        .corners()
        .iter()
        .zip(corners.iter())
        .map(|(a, b)| a.distance_to(b))
        .sum();
    sum / 4.0
}

fn sort_ascending(collisions: &mut [Collision]) {
    collisions.sort_by(|a, b| a.value.total_cmp(&b.value));
}

/// Ranks every measured droppable by the average distance between its
/// corners and the corners of `collision_rect`.
pub fn closest_corners(collision_rect: &Rect, droppables: &[Droppable]) -> Vec<Collision> {
    if !collision_rect.is_usable() {
        return Vec::new();
    }
    let corners = collision_rect.corners();

    let mut collisions: Vec<Collision> = droppables
        .iter()
        .filter_map(|droppable| {
            let rect = droppable.usable_rect()?;
            Some(Collision::new(
                droppable.id.clone(),
                average_corner_distance(&corners, &rect),
            ))
        })
        .collect();

    sort_ascending(&mut collisions);
    collisions
}

/// Droppables whose rect contains `pointer`, closest first.
pub fn pointer_within(pointer: Point, droppables: &[Droppable]) -> Vec<Collision> {
    if !(pointer.x.is_finite() && pointer.y.is_finite()) {
        return Vec::new();
    }
    let pointer_corners = [pointer; 4];

    let mut collisions: Vec<Collision> = droppables
        .iter()
        .filter_map(|droppable| {
            let rect = droppable.usable_rect()?;
            if !rect.contains(pointer) {
                return None;
            }
            Some(Collision::new(
                droppable.id.clone(),
                average_corner_distance(&pointer_corners, &rect),
            ))
        })
        .collect();

    sort_ascending(&mut collisions);
    collisions
}
