//! Half-plane polygon clipping
//!
//! Quads are clipped against the four scissor edges one plane at a time
//! (Sutherland–Hodgman). A convex quad gains at most one vertex per plane,
//! so eight slots always suffice.

use crate::foundation::math::Rect;
use super::vertex::Vertex;

/// Capacity of a clipped polygon
pub const MAX_POLYGON_VERTICES: usize = 8;

/// Line `a*x + b*y + c = 0`; points with a non-negative distance are kept
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    /// X coefficient
    pub a: f32,
    /// Y coefficient
    pub b: f32,
    /// Constant term
    pub c: f32,
}

impl ClipPlane {
    /// Create a plane from its coefficients
    pub const fn new(a: f32, b: f32, c: f32) -> Self {
        Self { a, b, c }
    }

    /// Signed distance (unnormalized) of a point
    pub fn distance(&self, position: [f32; 2]) -> f32 {
        self.a * position[0] + self.b * position[1] + self.c
    }
}

/// Left, right, top and bottom planes of a device-space rectangle
pub fn scissor_planes(rect: &Rect) -> [ClipPlane; 4] {
    [
        ClipPlane::new(1.0, 0.0, -rect.x0),
        ClipPlane::new(-1.0, 0.0, rect.x1),
        ClipPlane::new(0.0, 1.0, -rect.y0),
        ClipPlane::new(0.0, -1.0, rect.y1),
    ]
}

/// Fixed-capacity convex polygon
#[derive(Debug, Clone, Copy)]
pub struct Polygon {
    vertices: [Vertex; MAX_POLYGON_VERTICES],
    len: usize,
}

impl Polygon {
    /// Polygon from four corners in winding order
    pub fn from_quad(quad: [Vertex; 4]) -> Self {
        let mut vertices = [Vertex::default(); MAX_POLYGON_VERTICES];
        vertices[..4].copy_from_slice(&quad);
        Self { vertices, len: 4 }
    }

    /// Current vertices
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices[..self.len]
    }

    /// Signed area by the shoelace formula; positive for clockwise winding
    /// in y-down device space
    pub fn area(&self) -> f32 {
        let vertices = self.vertices();
        let mut twice = 0.0;
        for (i, a) in vertices.iter().enumerate() {
            let b = vertices[(i + 1) % vertices.len()];
            twice += a.position[0] * b.position[1] - b.position[0] * a.position[1];
        }
        twice * 0.5
    }

    fn push(&mut self, vertex: Vertex) {
        if self.len < MAX_POLYGON_VERTICES {
            self.vertices[self.len] = vertex;
            self.len += 1;
        }
    }

    /// Keep the part of the polygon on the positive side of `plane`
    pub fn clip(&self, plane: &ClipPlane) -> Self {
        let mut out = Self {
            vertices: [Vertex::default(); MAX_POLYGON_VERTICES],
            len: 0,
        };
        if self.len == 0 {
            return out;
        }

        let mut previous = self.vertices[self.len - 1];
        let mut dp = plane.distance(previous.position);

        for &current in self.vertices() {
            let dc = plane.distance(current.position);
            if dc >= 0.0 {
                if dp < 0.0 {
                    out.push(previous.lerp(&current, dp / (dp - dc)));
                }
                out.push(current);
            } else if dp >= 0.0 {
                out.push(previous.lerp(&current, dp / (dp - dc)));
            }
            previous = current;
            dp = dc;
        }

        out
    }

    /// Clip against every plane in turn
    pub fn clip_all(&self, planes: &[ClipPlane]) -> Self {
        planes.iter().fold(*self, |polygon, plane| polygon.clip(plane))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad(x0: f32, y0: f32, x1: f32, y1: f32) -> [Vertex; 4] {
        let v = |x: f32, y: f32, s: f32, t: f32| Vertex {
            position: [x, y],
            texcoord: [s, t],
            color: [1.0, 1.0, 1.0, 1.0],
        };
        [v(x0, y0, 0.0, 0.0), v(x1, y0, 1.0, 0.0), v(x1, y1, 1.0, 1.0), v(x0, y1, 0.0, 1.0)]
    }

    #[test]
    fn test_inside_quad_unchanged() {
        let q = quad(10.0, 10.0, 20.0, 20.0);
        let planes = scissor_planes(&Rect::new(0.0, 0.0, 100.0, 100.0));
        let clipped = Polygon::from_quad(q).clip_all(&planes);
        assert_eq!(clipped.vertices(), &q[..]);
    }

    #[test]
    fn test_outside_quad_removed() {
        let planes = scissor_planes(&Rect::new(0.0, 0.0, 100.0, 100.0));
        let clipped = Polygon::from_quad(quad(150.0, 10.0, 200.0, 20.0)).clip_all(&planes);
        assert!(clipped.vertices().is_empty());
    }

    #[test]
    fn test_partial_clip_interpolates_texcoords() {
        let planes = scissor_planes(&Rect::new(5.0, 0.0, 100.0, 100.0));
        let clipped = Polygon::from_quad(quad(0.0, 0.0, 10.0, 10.0)).clip_all(&planes);
        let vertices = clipped.vertices();
        assert_eq!(vertices.len(), 4);
        for v in vertices {
            assert!(v.position[0] >= 5.0);
            if (v.position[0] - 5.0).abs() < 1e-6 {
                assert_relative_eq!(v.texcoord[0], 0.5);
            }
        }
    }

    #[test]
    fn test_corner_cut_grows_polygon() {
        // A diagonal plane through a square cuts one corner off: 4 -> 5 vertices.
        let plane = ClipPlane::new(-1.0, -1.0, 15.0);
        let clipped = Polygon::from_quad(quad(0.0, 0.0, 10.0, 10.0)).clip(&plane);
        assert_eq!(clipped.vertices().len(), 5);
        for v in clipped.vertices() {
            assert!(plane.distance(v.position) >= -1e-5);
        }
    }

    #[test]
    fn test_area_of_clipped_polygons() {
        let full = Polygon::from_quad(quad(0.0, 0.0, 10.0, 4.0));
        assert_relative_eq!(full.area(), 40.0);

        // Clipped down to the shared edge: vertices remain but enclose nothing.
        let edge = full.clip_all(&scissor_planes(&Rect::new(0.0, 4.0, 10.0, 20.0)));
        assert!(!edge.vertices().is_empty());
        assert_relative_eq!(edge.area(), 0.0);
    }
}
