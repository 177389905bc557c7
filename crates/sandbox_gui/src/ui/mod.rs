//! Immediate-mode widget layer
//!
//! Architecture:
//! - context: per-frame state, hit testing, press and focus tracking
//! - id: hierarchical widget paths
//! - input: events and the per-frame input queue
//! - widgets/: buttons, labels, text edit, scroll panels, splitters, menus
//! - backend: interface to the renderer consuming the draw lists

pub mod backend;
pub mod context;
pub mod id;
pub mod input;
pub mod widgets;

pub use backend::RenderBackend;
pub use context::{GuiContext, TextCursor};
pub use id::WidgetPath;
pub use input::{InputEvent, InputKind, InputQueue, Key, Modifiers, MouseButton};
pub use widgets::ButtonState;
