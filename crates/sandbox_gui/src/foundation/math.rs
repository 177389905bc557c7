//! Math utilities and types
//!
//! Provides the 2D math types used by the compositor and widget layer.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// RGBA color with components in `[0, 1]`
pub type Color = Vec4;

/// Build an RGBA color
pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
    Color::new(r, g, b, a)
}

/// Linear interpolation between two colors
pub fn lerp_color(a: &Color, b: &Color, t: f32) -> Color {
    a + (b - a) * t
}

/// Axis-aligned rectangle stored as its two corners
///
/// `x0,y0` is the top-left corner and `x1,y1` the bottom-right corner in a
/// y-down coordinate system. An inverted rectangle is treated as empty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl Rect {
    /// Create a rectangle from its corners
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a rectangle from a position and a size
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, position.x + size.x, position.y + size.y)
    }

    /// Width (may be negative for inverted rectangles)
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height (may be negative for inverted rectangles)
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Top-left corner
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x0, self.y0)
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.x0 + self.x1) * 0.5, (self.y0 + self.y1) * 0.5)
    }

    /// Whether the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Half-open containment test (`x0 <= x < x1`)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x0 && point.x < self.x1 && point.y >= self.y0 && point.y < self.y1
    }

    /// Intersection of two rectangles; an empty result collapses to zero size
    pub fn intersect(&self, other: &Self) -> Self {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        Self {
            x0,
            y0,
            x1: self.x1.min(other.x1).max(x0),
            y1: self.y1.min(other.y1).max(y0),
        }
    }

    /// Shrink every edge by `amount`
    pub fn shrink(&self, amount: f32) -> Self {
        Self::new(self.x0 + amount, self.y0 + amount, self.x1 - amount, self.y1 - amount)
    }

    /// Offset by a vector
    pub fn translate(&self, offset: Vec2) -> Self {
        Self::new(self.x0 + offset.x, self.y0 + offset.y, self.x1 + offset.x, self.y1 + offset.y)
    }
}

/// Uniform scale followed by a translation
///
/// A point `p` maps to `p * scale + translation`. Used for pan/zoom of
/// logical canvases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Uniform scale factor
    pub scale: f32,
    /// Translation applied after scaling
    pub translation: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// Identity transform
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            translation: Vec2::zeros(),
        }
    }

    /// Pure translation
    pub fn from_translation(translation: Vec2) -> Self {
        Self {
            scale: 1.0,
            translation,
        }
    }

    /// Scale then translate
    pub fn new(scale: f32, translation: Vec2) -> Self {
        Self { scale, translation }
    }

    /// Apply this transform to a point
    pub fn apply(&self, point: Vec2) -> Vec2 {
        point * self.scale + self.translation
    }

    /// Map a point back through this transform
    pub fn inverse_apply(&self, point: Vec2) -> Vec2 {
        (point - self.translation) / self.scale
    }

    /// Apply this transform to both corners of a rectangle
    pub fn apply_rect(&self, rect: &Rect) -> Rect {
        let min = self.apply(rect.min());
        let max = self.apply(rect.max());
        Rect::new(min.x, min.y, max.x, max.y)
    }

    /// Transform equivalent to applying `inner` first, then `self`
    pub fn then(&self, inner: &Self) -> Self {
        Self {
            scale: self.scale * inner.scale,
            translation: inner.translation * self.scale + self.translation,
        }
    }
}
