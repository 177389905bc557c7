//! Text system
//!
//! Font loading through a pluggable glyph rasterizer, plus width and cursor
//! queries used by the compositor and the text-edit widget.

pub mod font;
pub mod rasterizer;

pub use font::{Font, FontError, FontResult, Glyph};
pub use rasterizer::{GlyphRasterizer, LineMetrics, RasterGlyph};
