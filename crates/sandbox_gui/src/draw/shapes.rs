//! Drawing primitives built on quad emission
//!
//! Rounded corners and strokes sample procedural sprites looked up by exact
//! device-pixel size. When the matching sprite is missing the decoration is
//! skipped and the rest of the shape still draws.

use bitflags::bitflags;

use crate::atlas::{SpriteId, UvRect, MAX_CORNER_RADIUS, MAX_LINE_WIDTH};
use crate::foundation::math::{lerp_color, rgba, Color, Rect, Vec2};
use crate::text::Font;
use super::buffer::DrawBuffer;
use super::vertex::Vertex;

/// Number of straight segments used to flatten a bezier curve
pub const BEZIER_SEGMENTS: usize = 32;

/// Radius range covered by corner sprites, in device pixels
pub const CORNER_RADIUS_RANGE: (u32, u32) = (1, MAX_CORNER_RADIUS);

/// Stroke width range covered by line sprites, in device pixels
pub const LINE_WIDTH_RANGE: (u32, u32) = (1, MAX_LINE_WIDTH);

/// Offset of the dark copy drawn by [`DrawBuffer::draw_shadowed_text`]
pub const SHADOW_OFFSET: f32 = 1.0;

bitflags! {
    /// Which corners of a rectangle are rounded
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Corners: u8 {
        /// Top-left corner
        const TOP_LEFT = 1 << 0;
        /// Top-right corner
        const TOP_RIGHT = 1 << 1;
        /// Bottom-left corner
        const BOTTOM_LEFT = 1 << 2;
        /// Bottom-right corner
        const BOTTOM_RIGHT = 1 << 3;
        /// Both top corners
        const TOP = Self::TOP_LEFT.bits() | Self::TOP_RIGHT.bits();
        /// Both bottom corners
        const BOTTOM = Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
        /// Every corner
        const ALL = Self::TOP.bits() | Self::BOTTOM.bits();
    }
}

impl DrawBuffer<'_> {
    /// Fill a rectangle with a flat color
    pub fn draw_rect(&mut self, rect: &Rect, color: &Color) {
        self.draw_gradient_rect(rect, color, color);
    }

    /// Fill a rectangle with a vertical gradient
    pub fn draw_gradient_rect(&mut self, rect: &Rect, top: &Color, bottom: &Color) {
        if rect.is_empty() {
            return;
        }
        let uv = self.solid_uv();
        self.push_quad([
            Vertex::new(Vec2::new(rect.x0, rect.y0), uv, top),
            Vertex::new(Vec2::new(rect.x1, rect.y0), uv, top),
            Vertex::new(Vec2::new(rect.x1, rect.y1), uv, bottom),
            Vertex::new(Vec2::new(rect.x0, rect.y1), uv, bottom),
        ]);
    }

    /// Fill a rectangle with rounded `corners`
    pub fn draw_rounded_rect(&mut self, rect: &Rect, radius: f32, corners: Corners, color: &Color) {
        self.draw_rounded_gradient_rect(rect, radius, corners, color, color);
    }

    /// Fill a rectangle with rounded `corners` and a vertical gradient
    ///
    /// The shape is split into a top band, a middle band and a bottom band;
    /// colors are interpolated by height across all three.
    pub fn draw_rounded_gradient_rect(
        &mut self,
        rect: &Rect,
        radius: f32,
        corners: Corners,
        top: &Color,
        bottom: &Color,
    ) {
        if rect.is_empty() {
            return;
        }

        let radius = radius.min(rect.width() * 0.5).min(rect.height() * 0.5);
        if radius <= 0.0 || corners.is_empty() {
            self.draw_gradient_rect(rect, top, bottom);
            return;
        }

        let scale = self.transform().scale;
        let pixels = ((radius * scale).round() as u32).clamp(CORNER_RADIUS_RANGE.0, CORNER_RADIUS_RANGE.1);
        let r = (pixels as f32 / scale).min(rect.width() * 0.5).min(rect.height() * 0.5);
        let quadrant = self.atlas().quadrant(pixels).and_then(|id| self.atlas().uv(id));

        let color_at = |y: f32| lerp_color(top, bottom, (y - rect.y0) / rect.height());

        let top_band = if corners.intersects(Corners::TOP) { r } else { 0.0 };
        let bottom_band = if corners.intersects(Corners::BOTTOM) { r } else { 0.0 };

        if top_band > 0.0 {
            let band = Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + top_band);
            let (c0, c1) = (color_at(band.y0), color_at(band.y1));
            self.draw_band(&band, r, corners.contains(Corners::TOP_LEFT), corners.contains(Corners::TOP_RIGHT), true, quadrant, &c0, &c1);
        }

        let middle = Rect::new(rect.x0, rect.y0 + top_band, rect.x1, rect.y1 - bottom_band);
        let (c0, c1) = (color_at(middle.y0), color_at(middle.y1));
        self.draw_gradient_rect(&middle, &c0, &c1);

        if bottom_band > 0.0 {
            let band = Rect::new(rect.x0, rect.y1 - bottom_band, rect.x1, rect.y1);
            let (c0, c1) = (color_at(band.y0), color_at(band.y1));
            self.draw_band(&band, r, corners.contains(Corners::BOTTOM_LEFT), corners.contains(Corners::BOTTOM_RIGHT), false, quadrant, &c0, &c1);
        }
    }

    /// One horizontal strip with an optional rounded cell at each end
    fn draw_band(
        &mut self,
        band: &Rect,
        r: f32,
        left: bool,
        right: bool,
        is_top: bool,
        quadrant: Option<UvRect>,
        c0: &Color,
        c1: &Color,
    ) {
        let left_cell = Rect::new(band.x0, band.y0, band.x0 + r, band.y1);
        let right_cell = Rect::new(band.x1 - r, band.y0, band.x1, band.y1);

        match (left, quadrant) {
            (true, Some(uv)) => self.draw_corner(&left_cell, &uv, true, is_top, c0, c1),
            _ => self.draw_gradient_rect(&left_cell, c0, c1),
        }
        self.draw_gradient_rect(&Rect::new(left_cell.x1, band.y0, right_cell.x0, band.y1), c0, c1);
        match (right, quadrant) {
            (true, Some(uv)) => self.draw_corner(&right_cell, &uv, false, is_top, c0, c1),
            _ => self.draw_gradient_rect(&right_cell, c0, c1),
        }
    }

    /// Quadrant sprite oriented so its disc centre faces the shape's interior
    fn draw_corner(&mut self, cell: &Rect, uv: &UvRect, flip_x: bool, flip_y: bool, top: &Color, bottom: &Color) {
        let (sl, sr) = if flip_x { (uv.s1, uv.s0) } else { (uv.s0, uv.s1) };
        let (tt, tb) = if flip_y { (uv.t1, uv.t0) } else { (uv.t0, uv.t1) };
        self.push_quad([
            Vertex::new(Vec2::new(cell.x0, cell.y0), [sl, tt], top),
            Vertex::new(Vec2::new(cell.x1, cell.y0), [sr, tt], top),
            Vertex::new(Vec2::new(cell.x1, cell.y1), [sr, tb], bottom),
            Vertex::new(Vec2::new(cell.x0, cell.y1), [sl, tb], bottom),
        ]);
    }

    /// Fill a circle
    pub fn draw_circle(&mut self, center: Vec2, radius: f32, color: &Color) {
        let rect = Rect::new(center.x - radius, center.y - radius, center.x + radius, center.y + radius);
        self.draw_rounded_rect(&rect, radius, Corners::ALL, color);
    }

    /// Stroke a straight segment `width` logical pixels thick
    pub fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: &Color) {
        let direction = to - from;
        let length = direction.norm();
        if length <= f32::EPSILON {
            return;
        }

        let scale = self.transform().scale;
        let pixels = ((width * scale).round() as u32).clamp(LINE_WIDTH_RANGE.0, LINE_WIDTH_RANGE.1);
        let Some(uv) = self.atlas().line(pixels).and_then(|id| self.atlas().uv(id)) else {
            return;
        };

        // The profile sprite is two pixels taller than the stroke.
        let half = (pixels + 2) as f32 / scale * 0.5;
        let normal = Vec2::new(-direction.y, direction.x) / length * half;
        let s = (uv.s0 + uv.s1) * 0.5;

        self.push_quad([
            Vertex::new(from + normal, [s, uv.t0], color),
            Vertex::new(to + normal, [s, uv.t0], color),
            Vertex::new(to - normal, [s, uv.t1], color),
            Vertex::new(from - normal, [s, uv.t1], color),
        ]);
    }

    /// Stroke a cubic bezier curve
    pub fn draw_bezier_curve(&mut self, points: [Vec2; 4], width: f32, color: &Color) {
        let mut previous = points[0];
        for step in 1..=BEZIER_SEGMENTS {
            let next = cubic_bezier(&points, step as f32 / BEZIER_SEGMENTS as f32);
            self.draw_line(previous, next, width, color);
            previous = next;
        }
    }

    /// Draw a sprite at its pixel size with its top-left corner at `position`
    pub fn draw_sprite(&mut self, sprite: SpriteId, position: Vec2, color: &Color) {
        let Some(size) = self
            .atlas()
            .sprite(sprite)
            .map(|s| Vec2::new(s.width() as f32, s.height() as f32))
        else {
            return;
        };
        self.draw_sprite_rect(sprite, &Rect::from_position_size(position, size), color);
    }

    /// Draw a sprite stretched over `rect`
    pub fn draw_sprite_rect(&mut self, sprite: SpriteId, rect: &Rect, color: &Color) {
        let Some(uv) = self.atlas().uv(sprite) else {
            return;
        };
        self.push_quad([
            Vertex::new(Vec2::new(rect.x0, rect.y0), [uv.s0, uv.t0], color),
            Vertex::new(Vec2::new(rect.x1, rect.y0), [uv.s1, uv.t0], color),
            Vertex::new(Vec2::new(rect.x1, rect.y1), [uv.s1, uv.t1], color),
            Vertex::new(Vec2::new(rect.x0, rect.y1), [uv.s0, uv.t1], color),
        ]);
    }

    /// Draw one line of text with the top of the line at `position`
    ///
    /// Returns the horizontal advance of the whole string.
    pub fn draw_text(&mut self, font: &Font, position: Vec2, text: &str, color: &Color) -> f32 {
        let mut pen = position.x;
        for ch in text.chars() {
            let Some(glyph) = font.glyph(ch) else {
                continue;
            };
            if let Some(sprite) = glyph.sprite {
                let origin = Vec2::new(pen + glyph.offset[0] as f32, position.y + glyph.offset[1] as f32);
                self.draw_sprite(sprite, origin, color);
            }
            pen += glyph.advance as f32;
        }
        pen - position.x
    }

    /// Draw text over a dark copy offset down and right
    pub fn draw_shadowed_text(&mut self, font: &Font, position: Vec2, text: &str, color: &Color) -> f32 {
        let shadow = rgba(0.0, 0.0, 0.0, color.w);
        self.draw_text(font, position + Vec2::new(SHADOW_OFFSET, SHADOW_OFFSET), text, &shadow);
        self.draw_text(font, position, text, color)
    }
}

/// Point on a cubic bezier curve at parameter `t`
pub fn cubic_bezier(points: &[Vec2; 4], t: f32) -> Vec2 {
    let u = 1.0 - t;
    points[0] * (u * u * u)
        + points[1] * (3.0 * u * u * t)
        + points[2] * (3.0 * u * t * t)
        + points[3] * (t * t * t)
}
