//! Geometric primitives: points, sizes, and rectangles.
//!
//! Everything at this layer works in integer output-layout coordinates.
//! Rectangles are allowed to carry non-positive sizes; callers that need a
//! meaningful area check [`Rect::is_degenerate`] first.

use serde::{Deserialize, Serialize};

/// A 2D point in output-layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point::new(0, 0);

    /// Creates a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// A 2D size (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size::new(0, 0);

    /// Creates a new size.
    pub const fn new(width: i32, height: i32) -> Self {
        Size { width, height }
    }

    /// Whether either dimension is missing or non-positive.
    pub fn is_empty(&self) -> bool {
        self.width < 1 || self.height < 1
    }
}

/// An integer rectangle defined by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0, 0, 0, 0);

    /// Creates a new rectangle.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from an origin point and a size.
    pub const fn from_point_size(origin: Point, size: Size) -> Self {
        Rect::new(origin.x, origin.y, size.width, size.height)
    }

    /// The origin (top-left corner).
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The size of the rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The x-coordinate of the left edge.
    pub fn left(&self) -> i32 {
        self.x
    }

    /// The y-coordinate of the top edge.
    pub fn top(&self) -> i32 {
        self.y
    }

    /// The x-coordinate one past the right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// The y-coordinate one past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether the rectangle has no usable area.
    pub fn is_degenerate(&self) -> bool {
        self.width < 1 || self.height < 1
    }

    /// Whether a point lies inside the rectangle. Left/top edges are
    /// inclusive, right/bottom exclusive.
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Whether this rectangle and `other` share any area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// The overlapping region of the two rectangles, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.left().max(other.left());
        let y1 = self.top().max(other.top());
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x1 < x2 && y1 < y2 {
            Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }

    /// Pixel area shared with `other`, widened to `i64` so large layouts
    /// cannot overflow the placement cost sums.
    pub fn intersection_area(&self, other: &Rect) -> i64 {
        match self.intersection(other) {
            Some(r) => r.width as i64 * r.height as i64,
            None => 0,
        }
    }

    /// The rectangle moved by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }
}
