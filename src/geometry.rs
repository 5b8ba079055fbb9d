//! Axis-aligned bounding box in playfield pixels.
//!
//! Rects are never stored on moving entities; they are derived from the
//! entity position every time they are needed, so a rect can never be stale.

/// Axis-aligned rect with its origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    /// Build a rect from a fractional position, truncating toward zero.
    pub fn from_position(x: f32, y: f32, width: i32, height: i32) -> Self {
        Rect::new(x as i32, y as i32, width, height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Half-open overlap on both axes: touching edges do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
