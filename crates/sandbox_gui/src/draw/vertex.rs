//! Vertex type emitted by the draw buffer

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{Color, Vec2};

/// Vertex for the single textured, alpha-blended draw call
///
/// Positions are device pixels with y pointing down; the renderer maps them
/// to clip space. Texture coordinates address the atlas texture.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    /// Position in device pixels
    pub position: [f32; 2],
    /// Atlas texture coordinates
    pub texcoord: [f32; 2],
    /// RGBA color multiplied with the atlas coverage
    pub color: [f32; 4],
}

impl Vertex {
    /// Build a vertex from math types
    pub fn new(position: Vec2, texcoord: [f32; 2], color: &Color) -> Self {
        Self {
            position: [position.x, position.y],
            texcoord,
            color: [color.x, color.y, color.z, color.w],
        }
    }

    /// Component-wise interpolation towards `other`
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self {
            position: [
                mix(self.position[0], other.position[0]),
                mix(self.position[1], other.position[1]),
            ],
            texcoord: [
                mix(self.texcoord[0], other.texcoord[0]),
                mix(self.texcoord[1], other.texcoord[1]),
            ],
            color: [
                mix(self.color[0], other.color[0]),
                mix(self.color[1], other.color[1]),
                mix(self.color[2], other.color[2]),
                mix(self.color[3], other.color[3]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        let vertices = [Vertex::default(); 3];
        assert_eq!(bytemuck::cast_slice::<Vertex, u8>(&vertices).len(), 96);
    }

    #[test]
    fn test_lerp_interpolates_every_attribute() {
        let a = Vertex {
            position: [0.0, 10.0],
            texcoord: [0.0, 0.0],
            color: [1.0, 0.0, 0.0, 1.0],
        };
        let b = Vertex {
            position: [20.0, 10.0],
            texcoord: [1.0, 0.5],
            color: [0.0, 0.0, 1.0, 1.0],
        };
        let mid = a.lerp(&b, 0.25);
        assert_relative_eq!(mid.position[0], 5.0);
        assert_relative_eq!(mid.texcoord[1], 0.125);
        assert_relative_eq!(mid.color[0], 0.75);
        assert_relative_eq!(mid.color[2], 0.25);
    }
}
