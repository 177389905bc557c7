//! Shared fixtures for unit tests

use crate::atlas::SpriteAtlas;
use crate::config::Style;
use crate::foundation::math::Vec2;
use crate::text::{Font, GlyphRasterizer, LineMetrics, RasterGlyph};
use crate::ui::context::GuiContext;
use crate::ui::input::{InputEvent, InputKind, Modifiers, MouseButton};

const ADVANCE: f32 = 8.0;

/// Monospaced 5x7 boxes on an 8px pitch; space has no bitmap
pub struct MonoRasterizer;

impl GlyphRasterizer for MonoRasterizer {
    fn line_metrics(&self, _px: f32) -> Option<LineMetrics> {
        Some(LineMetrics {
            ascent: 10.0,
            descent: -3.0,
            line_gap: 0.0,
        })
    }

    fn rasterize(&self, ch: char, _px: f32) -> Option<RasterGlyph> {
        let (width, height) = if ch == ' ' { (0, 0) } else { (5, 7) };
        Some(RasterGlyph {
            width,
            height,
            xmin: 0,
            ymin: 0,
            advance: ADVANCE,
            coverage: vec![255; (width * height) as usize],
        })
    }
}

/// Prepared atlas and font for building contexts
pub struct Fixture {
    pub atlas: SpriteAtlas,
    pub font: Font,
}

impl Fixture {
    pub fn new() -> Self {
        let mut atlas = SpriteAtlas::with_default_sprites(8, 4).unwrap();
        let font = Font::from_rasterizer(&MonoRasterizer, 13.0, Font::ascii_printable(), &mut atlas).unwrap();
        atlas.prepare().unwrap();
        Self { atlas, font }
    }

    pub fn context(&self) -> GuiContext<'_> {
        GuiContext::new(&self.atlas, &self.font, Style::default()).unwrap()
    }

    /// Pen advance of every fixture glyph
    pub const fn advance(&self) -> f32 {
        ADVANCE
    }
}

/// Press, hold and release the left button at `position`, one event per frame
pub fn click_frames(position: Vec2) -> Vec<InputEvent> {
    [
        InputKind::MouseDown(MouseButton::Left),
        InputKind::None,
        InputKind::MouseUp(MouseButton::Left),
    ]
    .into_iter()
    .map(|kind| InputEvent::new(kind, position, Modifiers::empty()))
    .collect()
}
