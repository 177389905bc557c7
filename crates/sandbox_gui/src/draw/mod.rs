//! 2D compositor
//!
//! [`DrawBuffer`] turns immediate-mode drawing commands into one vertex and
//! index buffer per frame. Quads are transformed, clipped against the active
//! scissor rect and fan-triangulated; overlay levels are sorted at the end of
//! the frame so popups render above their parents.

pub mod buffer;
pub mod clip;
pub mod shapes;
pub mod vertex;

pub use buffer::{DrawBuffer, DrawError, DrawList, DrawResult, MAX_VERTICES};
pub use clip::{ClipPlane, Polygon};
pub use shapes::Corners;
pub use vertex::Vertex;
