//! Sprite atlas
//!
//! Owns every single-channel bitmap drawn by the compositor (glyphs, rounded
//! corner quadrants, line profiles and caller-supplied sprites) and packs
//! them into one texture. Sprite 0 is always a single opaque pixel used for
//! flat fills.
//!
//! Inserting a sprite invalidates the packed texture; call
//! [`SpriteAtlas::prepare`] before drawing with the atlas again.

pub mod packer;
pub mod procedural;

use std::collections::BTreeMap;
use std::path::Path;

/// Largest corner radius registered by [`SpriteAtlas::with_default_sprites`]
pub const MAX_CORNER_RADIUS: u32 = 32;

/// Largest stroke width registered by [`SpriteAtlas::with_default_sprites`]
pub const MAX_LINE_WIDTH: u32 = 8;

/// Default upper bound for either texture edge
pub const DEFAULT_MAX_SIZE: u32 = 8192;

/// Result type for atlas operations
pub type AtlasResult<T> = Result<T, AtlasError>;

/// Errors that can occur while building the atlas
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    /// Bitmap with no pixels
    #[error("Sprite has zero area ({width}x{height})")]
    ZeroArea {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Bitmap larger than the biggest texture the atlas may allocate
    #[error("Sprite {width}x{height} exceeds the maximum atlas size of {max_size}")]
    Oversized {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Maximum texture edge
        max_size: u32,
    },

    /// Pixel buffer length disagrees with the dimensions
    #[error("Expected {expected} pixels, got {actual}")]
    PixelCount {
        /// `width * height`
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// The sprites do not fit into any texture up to the maximum size
    #[error("Sprites do not fit into a {max_size}x{max_size} atlas")]
    TooLarge {
        /// Maximum texture edge
        max_size: u32,
    },

    /// Atlas used before `prepare` was called
    #[error("Atlas has not been prepared")]
    NotPrepared,

    /// Failed to write the debug image
    #[error("Failed to write atlas image: {0}")]
    DebugImage(String),
}

/// Index of a sprite inside the atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpriteId(pub u32);

impl SpriteId {
    /// The reserved opaque pixel
    pub const SOLID: Self = Self(0);

    /// Position in the atlas sprite list
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Normalized texture coordinates of a packed sprite
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UvRect {
    /// Left edge
    pub s0: f32,
    /// Top edge
    pub t0: f32,
    /// Right edge
    pub s1: f32,
    /// Bottom edge
    pub t1: f32,
}

/// A single-channel bitmap owned by the atlas
#[derive(Debug, Clone)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    position: [u32; 2],
    uv: UvRect,
}

impl Sprite {
    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Coverage values, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Top-left corner inside the texture from the last `prepare`
    pub const fn position(&self) -> [u32; 2] {
        self.position
    }

    /// Texture coordinates from the last `prepare`
    pub const fn uv(&self) -> UvRect {
        self.uv
    }
}

/// Borrowed view of the packed texture for upload
#[derive(Debug, Clone, Copy)]
pub struct AtlasTexture<'a> {
    /// Texture width
    pub width: u32,
    /// Texture height
    pub height: u32,
    /// One coverage byte per texel, row-major
    pub pixels: &'a [u8],
}

/// Sprite storage and packed texture
#[derive(Debug, Clone)]
pub struct SpriteAtlas {
    sprites: Vec<Sprite>,
    quadrants: BTreeMap<u32, SpriteId>,
    lines: BTreeMap<u32, SpriteId>,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    prepared: bool,
    revision: u64,
    max_size: u32,
}

impl Default for SpriteAtlas {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteAtlas {
    /// Create an atlas holding only the reserved solid pixel
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_SIZE)
    }

    /// Create an atlas whose texture edges never exceed `max_size`
    pub fn with_max_size(max_size: u32) -> Self {
        let solid = Sprite {
            width: 1,
            height: 1,
            pixels: vec![255],
            position: [0, 0],
            uv: UvRect::default(),
        };

        Self {
            sprites: vec![solid],
            quadrants: BTreeMap::new(),
            lines: BTreeMap::new(),
            width: 0,
            height: 0,
            pixels: Vec::new(),
            prepared: false,
            revision: 0,
            max_size,
        }
    }

    /// Create an atlas with corner quadrants `1..=max_corner_radius` and line
    /// profiles `1..=max_line_width`
    ///
    /// The limits are clamped to [`MAX_CORNER_RADIUS`] and [`MAX_LINE_WIDTH`],
    /// the largest sizes the shape drawing code looks up.
    pub fn with_default_sprites(max_corner_radius: u32, max_line_width: u32) -> AtlasResult<Self> {
        if max_corner_radius > MAX_CORNER_RADIUS || max_line_width > MAX_LINE_WIDTH {
            log::warn!(
                "Default sprites limited to radius {} and line width {} (requested {} and {})",
                MAX_CORNER_RADIUS,
                MAX_LINE_WIDTH,
                max_corner_radius,
                max_line_width
            );
        }
        let max_corner_radius = max_corner_radius.min(MAX_CORNER_RADIUS);
        let max_line_width = max_line_width.min(MAX_LINE_WIDTH);

        let mut atlas = Self::new();
        for radius in 1..=max_corner_radius {
            atlas.insert_quadrant(radius)?;
        }
        for width in 1..=max_line_width {
            atlas.insert_line(width)?;
        }
        Ok(atlas)
    }

    /// Register a bitmap and return its id
    pub fn insert(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> AtlasResult<SpriteId> {
        self.check_bitmap(width, height, pixels.len())?;

        let id = SpriteId(self.sprites.len() as u32);
        self.sprites.push(Sprite {
            width,
            height,
            pixels,
            position: [0, 0],
            uv: UvRect::default(),
        });
        self.prepared = false;
        Ok(id)
    }

    /// Check that a `width` x `height` bitmap of `pixel_count` bytes would be
    /// accepted by [`insert`](Self::insert)
    pub fn check_bitmap(&self, width: u32, height: u32, pixel_count: usize) -> AtlasResult<()> {
        if width == 0 || height == 0 {
            return Err(AtlasError::ZeroArea { width, height });
        }
        let limit = self.max_size.saturating_sub(2 * packer::BORDER);
        if width > limit || height > limit {
            return Err(AtlasError::Oversized {
                width,
                height,
                max_size: self.max_size,
            });
        }
        let expected = width as usize * height as usize;
        if pixel_count != expected {
            return Err(AtlasError::PixelCount {
                expected,
                actual: pixel_count,
            });
        }
        Ok(())
    }

    /// Register an antialiased quarter disc of `radius` pixels
    ///
    /// Inserting the same radius twice returns the existing sprite.
    pub fn insert_quadrant(&mut self, radius: u32) -> AtlasResult<SpriteId> {
        if let Some(&id) = self.quadrants.get(&radius) {
            return Ok(id);
        }
        let id = self.insert(radius, radius, procedural::quadrant_coverage(radius))?;
        self.quadrants.insert(radius, id);
        Ok(id)
    }

    /// Register a line profile for strokes `width` pixels thick
    pub fn insert_line(&mut self, width: u32) -> AtlasResult<SpriteId> {
        if let Some(&id) = self.lines.get(&width) {
            return Ok(id);
        }
        let id = self.insert(1, width + 2, procedural::line_profile(width))?;
        self.lines.insert(width, id);
        Ok(id)
    }

    /// Quadrant sprite for an exact radius, if registered
    pub fn quadrant(&self, radius: u32) -> Option<SpriteId> {
        self.quadrants.get(&radius).copied()
    }

    /// Line sprite for an exact stroke width, if registered
    pub fn line(&self, width: u32) -> Option<SpriteId> {
        self.lines.get(&width).copied()
    }

    /// Pack every sprite into a fresh texture
    ///
    /// Packing is deterministic for a given insertion order. On success the
    /// revision counter is bumped so renderers know to re-upload.
    pub fn prepare(&mut self) -> AtlasResult<()> {
        let sizes: Vec<[u32; 2]> = self.sprites.iter().map(|s| [s.width, s.height]).collect();
        let packing = packer::pack(&sizes, self.max_size)?;

        let width = packing.width;
        let height = packing.height;
        let mut pixels = vec![0u8; width as usize * height as usize];

        for (sprite, &[x, y]) in self.sprites.iter_mut().zip(&packing.positions) {
            let row_len = sprite.width as usize;
            for (row, src) in sprite.pixels.chunks_exact(row_len).enumerate() {
                let start = (y as usize + row) * width as usize + x as usize;
                pixels[start..start + row_len].copy_from_slice(src);
            }

            sprite.position = [x, y];
            sprite.uv = UvRect {
                s0: x as f32 / width as f32,
                t0: y as f32 / height as f32,
                s1: (x + sprite.width) as f32 / width as f32,
                t1: (y + sprite.height) as f32 / height as f32,
            };
        }

        self.width = width;
        self.height = height;
        self.pixels = pixels;
        self.prepared = true;
        self.revision += 1;

        log::info!(
            "Packed {} sprites into {}x{} atlas (revision {})",
            self.sprites.len(),
            width,
            height,
            self.revision
        );
        Ok(())
    }

    /// Whether texture coordinates reflect every inserted sprite
    pub const fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Incremented by every successful `prepare`
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of registered sprites, including the solid pixel
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// Look up a sprite
    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id.index())
    }

    /// Texture coordinates of a sprite
    pub fn uv(&self, id: SpriteId) -> Option<UvRect> {
        self.sprite(id).map(Sprite::uv)
    }

    /// Texture coordinate at the centre of the solid pixel
    pub fn solid_uv(&self) -> [f32; 2] {
        let [x, y] = self.sprites[0].position;
        if self.width == 0 || self.height == 0 {
            return [0.0, 0.0];
        }
        [
            (x as f32 + 0.5) / self.width as f32,
            (y as f32 + 0.5) / self.height as f32,
        ]
    }

    /// Packed texture, or `NotPrepared` if sprites were inserted since the
    /// last `prepare`
    pub fn texture(&self) -> AtlasResult<AtlasTexture<'_>> {
        if !self.prepared {
            return Err(AtlasError::NotPrepared);
        }
        Ok(AtlasTexture {
            width: self.width,
            height: self.height,
            pixels: &self.pixels,
        })
    }

    /// Write the packed texture as a grayscale PNG
    pub fn save_debug_image(&self, path: impl AsRef<Path>) -> AtlasResult<()> {
        let texture = self.texture()?;
        let image = image::GrayImage::from_raw(texture.width, texture.height, texture.pixels.to_vec())
            .ok_or_else(|| AtlasError::DebugImage("texture size mismatch".to_string()))?;
        image
            .save(path.as_ref())
            .map_err(|e| AtlasError::DebugImage(e.to_string()))?;

        log::debug!("Wrote atlas debug image to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texel(texture: &AtlasTexture<'_>, x: u32, y: u32) -> u8 {
        texture.pixels[(y * texture.width + x) as usize]
    }

    #[test]
    fn test_default_sprites_clamped_to_drawable_sizes() {
        let atlas = SpriteAtlas::with_default_sprites(MAX_CORNER_RADIUS + 8, MAX_LINE_WIDTH + 4).unwrap();
        assert!(atlas.quadrant(MAX_CORNER_RADIUS).is_some());
        assert!(atlas.quadrant(MAX_CORNER_RADIUS + 1).is_none());
        assert!(atlas.line(MAX_LINE_WIDTH).is_some());
        assert!(atlas.line(MAX_LINE_WIDTH + 1).is_none());
        assert_eq!(atlas.sprite_count(), 1 + (MAX_CORNER_RADIUS + MAX_LINE_WIDTH) as usize);
    }

    #[test]
    fn test_empty_atlas_has_solid_pixel() {
        let mut atlas = SpriteAtlas::new();
        assert_eq!(atlas.sprite_count(), 1);
        atlas.prepare().unwrap();

        let texture = atlas.texture().unwrap();
        assert_eq!((texture.width, texture.height), (64, 64));
        assert_eq!(texel(&texture, 1, 1), 255);
        assert_eq!(texel(&texture, 0, 0), 0);

        let [s, t] = atlas.solid_uv();
        assert!((s - 1.5 / 64.0).abs() < 1e-6);
        assert!((t - 1.5 / 64.0).abs() < 1e-6);
    }

    #[test]
    fn test_two_sprite_scenario() {
        let mut atlas = SpriteAtlas::new();
        let tall = atlas.insert(10, 20, vec![7; 200]).unwrap();
        let wide = atlas.insert(30, 5, vec![9; 150]).unwrap();
        assert_eq!(tall, SpriteId(1));
        assert_eq!(wide, SpriteId(2));

        atlas.prepare().unwrap();
        let texture = atlas.texture().unwrap();
        assert!(texture.width >= 64 && texture.height >= 64);

        let tall_sprite = atlas.sprite(tall).unwrap();
        let wide_sprite = atlas.sprite(wide).unwrap();
        assert_eq!(tall_sprite.position(), [1, 1]);
        assert_eq!(wide_sprite.position(), [12, 1]);

        assert_eq!(texel(&texture, 1, 1), 7);
        assert_eq!(texel(&texture, 10, 20), 7);
        assert_eq!(texel(&texture, 11, 1), 0);
        assert_eq!(texel(&texture, 12, 1), 9);
        assert_eq!(texel(&texture, 41, 5), 9);

        let uv = wide_sprite.uv();
        assert!((uv.s0 - 12.0 / 64.0).abs() < 1e-6);
        assert!((uv.s1 - 42.0 / 64.0).abs() < 1e-6);
        assert!((uv.t1 - 6.0 / 64.0).abs() < 1e-6);
    }

    #[test]
    fn test_uvs_in_unit_range() {
        let mut atlas = SpriteAtlas::with_default_sprites(MAX_CORNER_RADIUS, MAX_LINE_WIDTH).unwrap();
        atlas.prepare().unwrap();
        for index in 0..atlas.sprite_count() {
            let uv = atlas.uv(SpriteId(index as u32)).unwrap();
            for value in [uv.s0, uv.t0, uv.s1, uv.t1] {
                assert!((0.0..=1.0).contains(&value));
            }
            assert!(uv.s0 < uv.s1 && uv.t0 < uv.t1);
        }
    }

    #[test]
    fn test_insert_invalidates_texture() {
        let mut atlas = SpriteAtlas::new();
        atlas.prepare().unwrap();
        assert_eq!(atlas.revision(), 1);

        atlas.insert(2, 2, vec![1; 4]).unwrap();
        assert!(!atlas.is_prepared());
        assert!(matches!(atlas.texture(), Err(AtlasError::NotPrepared)));

        atlas.prepare().unwrap();
        assert_eq!(atlas.revision(), 2);
    }

    #[test]
    fn test_insert_rejects_bad_bitmaps() {
        let mut atlas = SpriteAtlas::with_max_size(128);
        assert!(matches!(atlas.insert(0, 4, Vec::new()), Err(AtlasError::ZeroArea { .. })));
        assert!(matches!(atlas.insert(3, 3, vec![0; 8]), Err(AtlasError::PixelCount { expected: 9, actual: 8 })));
        assert!(matches!(atlas.insert(127, 1, vec![0; 127]), Err(AtlasError::Oversized { .. })));
    }

    #[test]
    fn test_procedural_lookup_by_exact_size() {
        let mut atlas = SpriteAtlas::new();
        let q = atlas.insert_quadrant(6).unwrap();
        assert_eq!(atlas.insert_quadrant(6).unwrap(), q);
        assert_eq!(atlas.quadrant(6), Some(q));
        assert_eq!(atlas.quadrant(7), None);

        let l = atlas.insert_line(2).unwrap();
        assert_eq!(atlas.line(2), Some(l));
        assert_eq!(atlas.sprite(l).unwrap().height(), 4);
    }
}
