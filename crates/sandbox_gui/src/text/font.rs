//! Font loading and text metrics
//!
//! A [`Font`] is built once for a pixel size and an explicit codepoint set.
//! Every glyph bitmap is registered in the [`SpriteAtlas`]; the font keeps
//! the sprite ids, baseline-adjusted offsets and integer advances.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use fontdue::FontSettings;

use crate::atlas::{AtlasError, SpriteAtlas, SpriteId};
use super::rasterizer::GlyphRasterizer;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur while loading a font
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Failed to read the font file
    #[error("Failed to read font: {0}")]
    Io(#[from] std::io::Error),

    /// The font data could not be parsed
    #[error("Failed to parse font: {0}")]
    Parse(String),

    /// A glyph bitmap was rejected by the atlas
    #[error("Failed to register glyph: {0}")]
    Atlas(#[from] AtlasError),
}

/// Placement of one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// Bitmap in the atlas; `None` for blank glyphs such as space
    pub sprite: Option<SpriteId>,
    /// Offset from the pen position (top of the line) to the bitmap's
    /// top-left corner, y down
    pub offset: [i32; 2],
    /// Horizontal advance in whole pixels
    pub advance: i32,
}

/// Glyph table for one pixel size
#[derive(Debug, Clone)]
pub struct Font {
    pixel_size: f32,
    line_height: f32,
    baseline: i32,
    glyphs: BTreeMap<char, Glyph>,
}

impl Font {
    /// Read a TrueType/OpenType file and rasterize `codepoints` into `atlas`
    pub fn load_file(
        path: impl AsRef<Path>,
        pixel_size: f32,
        codepoints: impl IntoIterator<Item = char>,
        atlas: &mut SpriteAtlas,
    ) -> FontResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        log::info!("Loading font {} at {}px", path.display(), pixel_size);
        Self::from_bytes(&data, pixel_size, codepoints, atlas)
    }

    /// Parse font data and rasterize `codepoints` into `atlas`
    pub fn from_bytes(
        data: &[u8],
        pixel_size: f32,
        codepoints: impl IntoIterator<Item = char>,
        atlas: &mut SpriteAtlas,
    ) -> FontResult<Self> {
        let settings = FontSettings {
            scale: pixel_size,
            ..FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(data, settings)
            .map_err(|e| FontError::Parse(format!("fontdue error: {}", e)))?;
        Self::from_rasterizer(&font, pixel_size, codepoints, atlas)
    }

    /// Build a font from any glyph source
    ///
    /// Every glyph is rasterized and checked before the first one is added
    /// to `atlas`, so a failed load leaves the atlas untouched.
    pub fn from_rasterizer<R: GlyphRasterizer + ?Sized>(
        rasterizer: &R,
        pixel_size: f32,
        codepoints: impl IntoIterator<Item = char>,
        atlas: &mut SpriteAtlas,
    ) -> FontResult<Self> {
        let (line_height, baseline) = match rasterizer.line_metrics(pixel_size) {
            Some(metrics) => (metrics.line_height().round(), metrics.ascent.round() as i32),
            None => (pixel_size.round(), pixel_size.round() as i32),
        };

        let mut seen = BTreeSet::new();
        let mut rasters = Vec::new();
        let mut missing = 0usize;

        for ch in codepoints {
            if !seen.insert(ch) {
                continue;
            }
            let Some(raster) = rasterizer.rasterize(ch, pixel_size) else {
                missing += 1;
                continue;
            };
            if raster.width != 0 && raster.height != 0 {
                atlas.check_bitmap(raster.width, raster.height, raster.coverage.len())?;
            }
            rasters.push((ch, raster));
        }

        let mut glyphs = BTreeMap::new();
        for (ch, raster) in rasters {
            let sprite = if raster.width == 0 || raster.height == 0 {
                None
            } else {
                Some(atlas.insert(raster.width, raster.height, raster.coverage)?)
            };

            glyphs.insert(
                ch,
                Glyph {
                    sprite,
                    offset: [raster.xmin, baseline - (raster.ymin + raster.height as i32)],
                    advance: raster.advance.floor() as i32,
                },
            );
        }

        if missing > 0 {
            log::warn!("{} requested codepoints have no glyph in this font", missing);
        }
        log::info!(
            "Loaded {} glyphs at {}px (line height {}, baseline {})",
            glyphs.len(),
            pixel_size,
            line_height,
            baseline
        );

        Ok(Self {
            pixel_size,
            line_height,
            baseline,
            glyphs,
        })
    }

    /// Printable ASCII, the default codepoint set
    pub fn ascii_printable() -> impl Iterator<Item = char> {
        (0x20u8..=0x7E).map(char::from)
    }

    /// Size the glyphs were rasterized at
    pub const fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    /// Baseline-to-baseline distance in pixels
    pub const fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Distance from the top of the line to the baseline
    pub const fn baseline(&self) -> i32 {
        self.baseline
    }

    /// Number of loaded glyphs
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Look up a loaded glyph
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    /// Sum of advances; characters without a glyph add nothing
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars()
            .filter_map(|ch| self.glyph(ch))
            .map(|glyph| glyph.advance)
            .sum::<i32>() as f32
    }

    /// Byte offset of the character boundary nearest to `x`
    ///
    /// Returns the offset of the first character whose horizontal centre lies
    /// to the right of `x`, or `text.len()` if there is none.
    pub fn cursor_position(&self, text: &str, x: f32) -> usize {
        let mut pen = 0.0;
        for (offset, ch) in text.char_indices() {
            let advance = self.glyph(ch).map_or(0.0, |glyph| glyph.advance as f32);
            if pen + advance * 0.5 > x {
                return offset;
            }
            pen += advance;
        }
        text.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::rasterizer::{LineMetrics, RasterGlyph};
    use approx::assert_relative_eq;

    /// Fixed-pitch boxes with a narrow `i`, a blank space and a descending `g`
    struct BoxRasterizer;

    impl GlyphRasterizer for BoxRasterizer {
        fn line_metrics(&self, _px: f32) -> Option<LineMetrics> {
            Some(LineMetrics {
                ascent: 10.4,
                descent: -3.0,
                line_gap: 1.0,
            })
        }

        fn rasterize(&self, ch: char, _px: f32) -> Option<RasterGlyph> {
            let (width, height, ymin, advance) = match ch {
                ' ' => (0, 0, 0, 5.0),
                'i' => (2, 7, 0, 4.2),
                'g' => (6, 9, -2, 8.6),
                'Z' => return None,
                _ => (6, 7, 0, 8.6),
            };
            Some(RasterGlyph {
                width,
                height,
                xmin: 1,
                ymin,
                advance,
                coverage: vec![255; (width * height) as usize],
            })
        }
    }

    fn load(text: &str) -> (Font, SpriteAtlas) {
        let mut atlas = SpriteAtlas::new();
        let font = Font::from_rasterizer(&BoxRasterizer, 14.0, text.chars(), &mut atlas).unwrap();
        (font, atlas)
    }

    #[test]
    fn test_metrics_from_rasterizer() {
        let (font, _) = load("a");
        assert_eq!(font.baseline(), 10);
        assert_relative_eq!(font.line_height(), 14.0);
        assert_relative_eq!(font.pixel_size(), 14.0);
    }

    #[test]
    fn test_glyphs_registered_in_atlas() {
        let (font, atlas) = load("ab g");
        assert_eq!(font.glyph_count(), 4);
        assert_eq!(atlas.sprite_count(), 4);

        let space = font.glyph(' ').unwrap();
        assert_eq!(space.sprite, None);
        assert_eq!(space.advance, 5);

        let a = font.glyph('a').unwrap();
        assert_eq!(a.offset, [1, 3]);
        assert_eq!(a.advance, 8);

        let g = font.glyph('g').unwrap();
        assert_eq!(g.offset, [1, 3]);
        assert_eq!(atlas.sprite(g.sprite.unwrap()).unwrap().height(), 9);
    }

    #[test]
    fn test_missing_codepoints_are_skipped() {
        let (font, _) = load("aZ");
        assert!(font.glyph('Z').is_none());
        assert_relative_eq!(font.text_width("aZa"), 16.0);
    }

    #[test]
    fn test_cursor_position_round_trips_text_width() {
        let (font, _) = load("hi there");
        let text = "hi there";
        for (k, _) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
            let x = font.text_width(&text[..k]);
            assert_eq!(font.cursor_position(text, x), k);
        }
    }

    #[test]
    fn test_cursor_position_snaps_to_nearest_boundary() {
        let (font, _) = load("ab");
        assert_eq!(font.cursor_position("ab", 3.9), 0);
        assert_eq!(font.cursor_position("ab", 4.1), 1);
        assert_eq!(font.cursor_position("ab", 100.0), 2);
        assert_eq!(font.cursor_position("", 10.0), 0);
    }

    /// Box glyphs, except `W`, which is too large for a small atlas
    struct OversizedW;

    impl GlyphRasterizer for OversizedW {
        fn line_metrics(&self, px: f32) -> Option<LineMetrics> {
            BoxRasterizer.line_metrics(px)
        }

        fn rasterize(&self, ch: char, px: f32) -> Option<RasterGlyph> {
            if ch != 'W' {
                return BoxRasterizer.rasterize(ch, px);
            }
            Some(RasterGlyph {
                width: 200,
                height: 10,
                xmin: 0,
                ymin: 0,
                advance: 200.0,
                coverage: vec![255; 2000],
            })
        }
    }

    #[test]
    fn test_failed_load_leaves_atlas_untouched() {
        let mut atlas = SpriteAtlas::with_max_size(128);
        atlas.insert_quadrant(4).unwrap();
        let before = atlas.sprite_count();

        let result = Font::from_rasterizer(&OversizedW, 14.0, "abWcd".chars(), &mut atlas);
        assert!(matches!(result, Err(FontError::Atlas(AtlasError::Oversized { .. }))));
        assert_eq!(atlas.sprite_count(), before);

        let font = Font::from_rasterizer(&OversizedW, 14.0, "abcd".chars(), &mut atlas).unwrap();
        assert_eq!(atlas.sprite_count(), before + 4);
        assert_eq!(font.glyph('a').unwrap().sprite, Some(SpriteId(before as u32)));
    }

    #[test]
    fn test_load_file_missing_path_fails() {
        let mut atlas = SpriteAtlas::new();
        let result = Font::load_file("/nonexistent/font.ttf", 14.0, Font::ascii_printable(), &mut atlas);
        assert!(matches!(result, Err(FontError::Io(_))));
    }

    #[test]
    fn test_invalid_font_bytes_fail() {
        let mut atlas = SpriteAtlas::new();
        let result = Font::from_bytes(b"not a font", 14.0, Font::ascii_printable(), &mut atlas);
        assert!(matches!(result, Err(FontError::Parse(_))));
    }
}
