//! Glyph rasterizer seam
//!
//! The font loader only needs vertical metrics and per-glyph coverage
//! bitmaps. `fontdue` provides both; tests substitute a synthetic source.

/// Vertical font metrics at one pixel size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    /// Distance from the baseline to the top of the tallest glyph
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the lowest glyph (negative)
    pub descent: f32,
    /// Extra spacing between lines
    pub line_gap: f32,
}

impl LineMetrics {
    /// Baseline-to-baseline distance
    pub fn line_height(&self) -> f32 {
        self.ascent - self.descent + self.line_gap
    }
}

/// One rasterized glyph
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGlyph {
    /// Bitmap width
    pub width: u32,
    /// Bitmap height
    pub height: u32,
    /// Horizontal offset from the pen to the bitmap's left edge
    pub xmin: i32,
    /// Offset from the baseline to the bitmap's bottom edge, y up
    pub ymin: i32,
    /// Horizontal pen advance in pixels
    pub advance: f32,
    /// Coverage values, row-major, top row first
    pub coverage: Vec<u8>,
}

/// Source of glyph bitmaps and font metrics
pub trait GlyphRasterizer {
    /// Vertical metrics at `px`, if the font provides them
    fn line_metrics(&self, px: f32) -> Option<LineMetrics>;

    /// Rasterize `ch` at `px`; `None` when the font has no such glyph
    fn rasterize(&self, ch: char, px: f32) -> Option<RasterGlyph>;
}

impl GlyphRasterizer for fontdue::Font {
    fn line_metrics(&self, px: f32) -> Option<LineMetrics> {
        self.horizontal_line_metrics(px).map(|m| LineMetrics {
            ascent: m.ascent,
            descent: m.descent,
            line_gap: m.line_gap,
        })
    }

    fn rasterize(&self, ch: char, px: f32) -> Option<RasterGlyph> {
        if self.lookup_glyph_index(ch) == 0 {
            return None;
        }
        let (metrics, coverage) = fontdue::Font::rasterize(self, ch, px);
        Some(RasterGlyph {
            width: metrics.width as u32,
            height: metrics.height as u32,
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            advance: metrics.advance_width,
            coverage,
        })
    }
}
