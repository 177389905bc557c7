//! # Sandbox GUI
//!
//! Immediate-mode 2D GUI compositor: a sprite atlas with a shelf packer, a
//! font loader, a draw buffer that clips, transforms and layers quads into a
//! single vertex/index list per frame, and a widget layer on top.
//!
//! The crate never touches a window or a graphics API. A renderer uploads the
//! atlas texture and draws the [`DrawList`](draw::DrawList) returned by each
//! frame, see [`RenderBackend`](ui::RenderBackend).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sandbox_gui::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut atlas = SpriteAtlas::with_default_sprites(MAX_CORNER_RADIUS, MAX_LINE_WIDTH)?;
//!     let font = Font::load_file("font.ttf", 14.0, Font::ascii_printable(), &mut atlas)?;
//!     atlas.prepare()?;
//!
//!     let mut gui = GuiContext::new(&atlas, &font, Style::default())?;
//!     let mut input = InputQueue::new();
//!     input.push_mouse_down(MouseButton::Left);
//!
//!     gui.begin_frame(Vec2::new(800.0, 600.0), input.next_event());
//!     if gui.button(1, &Rect::new(10.0, 10.0, 110.0, 40.0), "Hello") {
//!         log::info!("clicked");
//!     }
//!     let list = gui.end_frame()?;
//!     println!("{} vertices", list.vertices.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod atlas;
pub mod config;
pub mod draw;
pub mod foundation;
pub mod text;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

/// Common imports for toolkit users
pub mod prelude {
    pub use crate::{
        atlas::{AtlasError, SpriteAtlas, SpriteId, MAX_CORNER_RADIUS, MAX_LINE_WIDTH},
        config::{Config, ConfigError, GuiConfig, Style},
        draw::{Corners, DrawBuffer, DrawError, DrawList, Vertex},
        foundation::math::{rgba, Color, Rect, Transform2D, Vec2},
        text::{Font, FontError},
        ui::{GuiContext, InputEvent, InputQueue, Key, Modifiers, MouseButton, RenderBackend},
    };
}
