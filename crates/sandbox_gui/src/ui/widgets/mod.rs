//! Widgets
//!
//! Each widget is a method on [`GuiContext`](crate::ui::GuiContext) that lays
//! itself out, reacts to the frame's input event and draws in one call.

pub mod button;
pub mod menu;
pub mod panel;
pub mod text_edit;

pub use button::ButtonState;
pub use panel::{MIN_THUMB_LENGTH, SCROLL_THUMB_ID};
