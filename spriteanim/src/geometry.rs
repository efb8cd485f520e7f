//! Pixel-space geometry shared by the parsers and the sheet model.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct RectI {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl RectI {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Re-expresses a top-left-origin rect in a bottom-left-origin space of the given height.
    pub const fn flip_y(self, canvas_height: i32) -> Self {
        Self {
            y: canvas_height - self.y - self.height,
            ..self
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct PointI {
    pub x: i32,
    pub y: i32,
}

impl PointI {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SizeI {
    pub width: i32,
    pub height: i32,
}

impl SizeI {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Converts a pixel pivot inside `bounds` into a 0..1 anchor over `source`, flipping Y so the
/// result is bottom-left based.
pub fn normalized_pivot(bounds: RectI, pivot: PointI, source: SizeI) -> Vec2 {
    let px = (bounds.x + bounds.width - pivot.x) as f32;
    let py = (bounds.y + bounds.height - pivot.y) as f32;
    Vec2 {
        x: px / source.width as f32,
        y: 1.0 - py / source.height as f32,
    }
}
