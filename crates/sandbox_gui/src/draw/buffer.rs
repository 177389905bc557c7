//! Frame-scoped draw buffer
//!
//! Collects clipped, transformed quads for one frame. Drawing happens inside
//! nested scopes:
//!
//! - scissor: clips to the intersection of every enclosing scissor rect
//! - transform: uniform scale plus translation for pan/zoom canvases
//! - overlay: raises the draw level so content renders above everything at
//!   lower levels, whatever order it was emitted in
//!
//! Every `begin_*` must be matched by its `end_*` before [`DrawBuffer::end_frame`];
//! a mismatch is a programming error and panics.

use crate::atlas::SpriteAtlas;
use crate::foundation::math::{Rect, Transform2D, Vec2};
use super::clip::{scissor_planes, Polygon};
use super::vertex::Vertex;

/// Largest number of vertices a frame may hold with 16-bit indices
pub const MAX_VERTICES: usize = 1 << 16;

/// Clipped polygons with less area than this are dropped
const MIN_AREA: f32 = 1e-6;

/// Result type for draw operations
pub type DrawResult<T> = Result<T, DrawError>;

/// Errors reported by the draw buffer
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DrawError {
    /// The frame emitted more vertices than 16-bit indices can address
    #[error("Frame exceeded the vertex budget of {limit}")]
    VertexOverflow {
        /// Vertex budget per frame
        limit: usize,
    },

    /// The atlas has sprites that were never packed
    #[error("Sprite atlas must be prepared before drawing")]
    AtlasNotPrepared,
}

/// Contiguous run of indices emitted at one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    level: u32,
    first: usize,
    last: usize,
}

/// Output of a finished frame, ready for one indexed draw call
#[derive(Debug, Clone, Copy)]
pub struct DrawList<'a> {
    /// Vertex array
    pub vertices: &'a [Vertex],
    /// Triangle list indices, ordered by draw level
    pub indices: &'a [u16],
}

/// Immediate-mode 2D draw buffer
#[derive(Debug)]
pub struct DrawBuffer<'a> {
    atlas: &'a SpriteAtlas,
    solid_uv: [f32; 2],
    window: Rect,
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
    ordered: Vec<u16>,
    scissors: Vec<Rect>,
    transforms: Vec<Transform2D>,
    levels: Vec<u32>,
    spans: Vec<Span>,
    span_start: usize,
    overflowed: bool,
}

impl<'a> DrawBuffer<'a> {
    /// Create a draw buffer sampling from a prepared atlas
    pub fn new(atlas: &'a SpriteAtlas) -> DrawResult<Self> {
        if !atlas.is_prepared() {
            return Err(DrawError::AtlasNotPrepared);
        }

        Ok(Self {
            atlas,
            solid_uv: atlas.solid_uv(),
            window: Rect::default(),
            vertices: Vec::new(),
            indices: Vec::new(),
            ordered: Vec::new(),
            scissors: vec![Rect::default()],
            transforms: vec![Transform2D::identity()],
            levels: vec![0],
            spans: Vec::new(),
            span_start: 0,
            overflowed: false,
        })
    }

    /// Atlas the buffer samples from
    pub const fn atlas(&self) -> &'a SpriteAtlas {
        self.atlas
    }

    /// Start a frame covering `window_size` device pixels
    pub fn begin_frame(&mut self, window_size: Vec2) {
        self.window = Rect::new(0.0, 0.0, window_size.x, window_size.y);
        self.vertices.clear();
        self.indices.clear();
        self.ordered.clear();
        self.spans.clear();
        self.span_start = 0;
        self.overflowed = false;

        self.scissors.clear();
        self.scissors.push(self.window);
        self.transforms.clear();
        self.transforms.push(Transform2D::identity());
        self.levels.clear();
        self.levels.push(0);
    }

    /// Finish the frame and return its geometry ordered by draw level
    ///
    /// Returns `VertexOverflow` if any quad was dropped for exceeding the
    /// vertex budget.
    pub fn end_frame(&mut self) -> DrawResult<DrawList<'_>> {
        assert_eq!(self.levels.len(), 1, "end_frame with unbalanced begin_overlay");
        assert_eq!(self.transforms.len(), 1, "end_frame with unbalanced begin_transform");
        assert_eq!(self.scissors.len(), 1, "end_frame with unbalanced begin_scissor");

        self.close_span();

        if self.overflowed {
            log::warn!("Frame dropped geometry past the {} vertex budget", MAX_VERTICES);
            return Err(DrawError::VertexOverflow { limit: MAX_VERTICES });
        }

        self.spans.sort_by_key(|span| span.level);
        self.ordered.clear();
        for span in &self.spans {
            self.ordered.extend_from_slice(&self.indices[span.first..span.last]);
        }

        log::trace!(
            "Frame: {} vertices, {} indices, {} spans",
            self.vertices.len(),
            self.ordered.len(),
            self.spans.len()
        );

        Ok(DrawList {
            vertices: &self.vertices,
            indices: &self.ordered,
        })
    }

    /// Draw subsequent content above everything at the current level
    ///
    /// The scissor is reset to the whole window so popups can leave their
    /// parent's clip region.
    pub fn begin_overlay(&mut self) {
        self.close_span();
        let level = self.level() + 1;
        self.levels.push(level);
        self.scissors.push(self.window);
    }

    /// Return to the enclosing level
    pub fn end_overlay(&mut self) {
        assert!(self.levels.len() > 1, "end_overlay without begin_overlay");
        self.close_span();
        self.levels.pop();
        self.scissors.pop();
    }

    /// Restrict drawing to `rect` (in current logical coordinates)
    pub fn begin_scissor(&mut self, rect: &Rect) {
        let device = self.transform().apply_rect(rect);
        let clipped = device.intersect(&self.scissor());
        self.scissors.push(clipped);
    }

    /// Restore the previous scissor rect
    pub fn end_scissor(&mut self) {
        assert!(self.scissors.len() > 1, "end_scissor without begin_scissor");
        self.scissors.pop();
    }

    /// Apply `transform` inside the current transform
    pub fn begin_transform(&mut self, transform: &Transform2D) {
        let combined = self.transform().then(transform);
        self.transforms.push(combined);
    }

    /// Restore the previous transform
    pub fn end_transform(&mut self) {
        assert!(self.transforms.len() > 1, "end_transform without begin_transform");
        self.transforms.pop();
    }

    /// Full window rect in device pixels
    pub const fn window(&self) -> Rect {
        self.window
    }

    /// Active scissor rect in device pixels
    pub fn scissor(&self) -> Rect {
        self.scissors.last().copied().unwrap_or(self.window)
    }

    /// Active logical-to-device transform
    pub fn transform(&self) -> Transform2D {
        self.transforms.last().copied().unwrap_or_default()
    }

    /// Active draw level
    pub fn level(&self) -> u32 {
        self.levels.last().copied().unwrap_or(0)
    }

    /// Vertices emitted so far this frame
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Texture coordinate used for flat fills
    pub const fn solid_uv(&self) -> [f32; 2] {
        self.solid_uv
    }

    /// Transform, clip and triangulate one quad given in logical coordinates
    ///
    /// Corners must be in winding order. Quads that are fully clipped, or
    /// clipped down to a sliver with no area, emit nothing.
    pub fn push_quad(&mut self, mut quad: [Vertex; 4]) {
        let scissor = self.scissor();
        if scissor.is_empty() {
            return;
        }

        let transform = self.transform();
        for vertex in &mut quad {
            let p = transform.apply(Vec2::new(vertex.position[0], vertex.position[1]));
            vertex.position = [p.x, p.y];
        }

        let polygon = Polygon::from_quad(quad).clip_all(&scissor_planes(&scissor));
        let clipped = polygon.vertices();
        // Remnants lying on a scissor edge enclose no pixels.
        if clipped.len() < 3 || polygon.area().abs() <= MIN_AREA {
            return;
        }

        if self.vertices.len() + clipped.len() > MAX_VERTICES {
            self.overflowed = true;
            return;
        }

        let base = self.vertices.len() as u16;
        self.vertices.extend_from_slice(clipped);
        for i in 1..(clipped.len() as u16 - 1) {
            self.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
    }

    fn close_span(&mut self) {
        let end = self.indices.len();
        if end > self.span_start {
            self.spans.push(Span {
                level: self.level(),
                first: self.span_start,
                last: end,
            });
        }
        self.span_start = end;
    }
}
