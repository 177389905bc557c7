//! Immediate-mode GUI context
//!
//! Owns the frame's [`DrawBuffer`] and the interaction state that survives
//! between frames: which widget is pressed, which has keyboard focus, and the
//! text-edit cursor. Widgets are identified each frame by their
//! [`WidgetPath`].

use std::collections::HashMap;

use crate::atlas::SpriteAtlas;
use crate::config::Style;
use crate::draw::{DrawBuffer, DrawList, DrawResult};
use crate::foundation::math::{Rect, Transform2D, Vec2};
use crate::text::Font;
use super::id::WidgetPath;
use super::input::{InputEvent, MouseButton};

/// Cursor and selection anchor of the focused text edit, as byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextCursor {
    /// Insertion point
    pub cursor: usize,
    /// Selection anchor; equal to `cursor` when nothing is selected
    pub mark: usize,
}

impl TextCursor {
    /// Collapsed cursor at `offset`
    pub const fn at(offset: usize) -> Self {
        Self { cursor: offset, mark: offset }
    }

    /// Selected byte range, start first
    pub fn selection(&self) -> std::ops::Range<usize> {
        self.cursor.min(self.mark)..self.cursor.max(self.mark)
    }

    /// Whether a non-empty range is selected
    pub const fn has_selection(&self) -> bool {
        self.cursor != self.mark
    }
}

/// One open menu level
#[derive(Debug, Clone, Copy)]
pub(crate) struct MenuFrame {
    /// Bounding rect grown as items are laid out
    pub rect: Rect,
    /// Where the next item goes
    pub next: Vec2,
    /// Items stack top-to-bottom instead of left-to-right
    pub vertical: bool,
    /// Minimum item width, from the previous frame's layout
    pub min_width: f32,
}

/// Per-frame widget state and drawing surface
pub struct GuiContext<'a> {
    pub(crate) draw: DrawBuffer<'a>,
    pub(crate) font: &'a Font,
    pub(crate) style: Style,
    pub(crate) event: InputEvent,
    pub(crate) ids: WidgetPath,
    pub(crate) pressed: Option<WidgetPath>,
    pub(crate) released: Option<WidgetPath>,
    pub(crate) focused: Option<WidgetPath>,
    pub(crate) focus_claimed: bool,
    pub(crate) click_offset: Vec2,
    pub(crate) text_cursor: TextCursor,
    pub(crate) menus: Vec<MenuFrame>,
    pub(crate) popup_widths: HashMap<WidgetPath, f32>,
    pub(crate) overlay_rects: Vec<Rect>,
    pub(crate) previous_overlay_rects: Vec<Rect>,
}

impl<'a> GuiContext<'a> {
    /// Create a context drawing with `font` from a prepared `atlas`
    pub fn new(atlas: &'a SpriteAtlas, font: &'a Font, style: Style) -> DrawResult<Self> {
        Ok(Self {
            draw: DrawBuffer::new(atlas)?,
            font,
            style,
            event: InputEvent::default(),
            ids: WidgetPath::new(),
            pressed: None,
            released: None,
            focused: None,
            focus_claimed: false,
            click_offset: Vec2::zeros(),
            text_cursor: TextCursor::default(),
            menus: Vec::new(),
            popup_widths: HashMap::new(),
            overlay_rects: Vec::new(),
            previous_overlay_rects: Vec::new(),
        })
    }

    /// Start a frame driven by one input event
    pub fn begin_frame(&mut self, window_size: Vec2, event: InputEvent) {
        self.draw.begin_frame(window_size);
        self.event = event;
        self.focus_claimed = false;
        self.released = None;
        self.previous_overlay_rects = std::mem::take(&mut self.overlay_rects);

        if event.is_mouse_up(MouseButton::Left) {
            self.released = self.pressed.take();
        }
    }

    /// Finish the frame and return its geometry
    ///
    /// A mouse press that no widget claimed focus for clears focus.
    pub fn end_frame(&mut self) -> DrawResult<DrawList<'_>> {
        assert_eq!(self.ids.depth(), 0, "end_frame with unbalanced begin_children");
        assert!(self.menus.is_empty(), "end_frame with unbalanced begin_menu_bar");

        if self.event.is_any_mouse_down() && !self.focus_claimed && self.focused.is_some() {
            log::trace!("Focus cleared by unclaimed click");
            self.focused = None;
        }

        self.draw.end_frame()
    }

    /// Drawing surface for custom content
    pub fn draw(&mut self) -> &mut DrawBuffer<'a> {
        &mut self.draw
    }

    /// Font used by the widgets
    pub const fn font(&self) -> &'a Font {
        self.font
    }

    /// Widget appearance
    pub const fn style(&self) -> &Style {
        &self.style
    }

    /// Replace the widget appearance
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// This frame's input event
    pub const fn event(&self) -> &InputEvent {
        &self.event
    }

    /// Enter a container; ids inside are scoped to it
    pub fn begin_children(&mut self, id: u32) {
        self.ids.push(id);
    }

    /// Leave the innermost container
    pub fn end_children(&mut self) {
        assert!(self.ids.pop().is_some(), "end_children without begin_children");
    }

    /// Full path of the widget `id` in the current container
    pub fn widget_path(&self, id: u32) -> WidgetPath {
        self.ids.child(id)
    }

    /// Apply `transform` to widgets and drawing until `end_transform`
    pub fn begin_transform(&mut self, transform: &Transform2D) {
        self.draw.begin_transform(transform);
    }

    /// Restore the previous transform
    pub fn end_transform(&mut self) {
        self.draw.end_transform();
    }

    /// Clip widgets and drawing to `rect` until `end_scissor`
    pub fn begin_scissor(&mut self, rect: &Rect) {
        self.draw.begin_scissor(rect);
    }

    /// Restore the previous scissor
    pub fn end_scissor(&mut self) {
        self.draw.end_scissor();
    }

    /// Cursor position in the current logical coordinates
    pub fn cursor(&self) -> Vec2 {
        self.draw.transform().inverse_apply(self.event.cursor)
    }

    /// Cursor offset from the clicked widget's top-left corner, recorded at
    /// the press
    pub const fn click_offset(&self) -> Vec2 {
        self.click_offset
    }

    /// Whether the cursor is over `rect` and inside the active scissor
    ///
    /// Base-level widgets underneath last frame's popups are not hit.
    pub fn is_cursor_over(&self, rect: &Rect) -> bool {
        let cursor = self.event.cursor;
        let device = self.draw.transform().apply_rect(rect);
        if !device.contains(cursor) || !self.draw.scissor().contains(cursor) {
            return false;
        }
        self.draw.level() > 0 || !self.previous_overlay_rects.iter().any(|r| r.contains(cursor))
    }

    /// Press `id` if the left button went down over `rect` this frame
    pub fn check_click(&mut self, id: u32, rect: &Rect) -> bool {
        if self.event.is_mouse_down(MouseButton::Left) && self.is_cursor_over(rect) {
            self.pressed = Some(self.widget_path(id));
            self.click_offset = self.cursor() - rect.min();
            true
        } else {
            false
        }
    }

    /// Whether `id` is held down
    pub fn check_pressed(&self, id: u32) -> bool {
        self.pressed.as_ref() == Some(&self.widget_path(id))
    }

    /// Whether `id` was released this frame
    pub fn check_release(&self, id: u32) -> bool {
        self.released.as_ref() == Some(&self.widget_path(id))
    }

    /// Whether a widget inside container `id` is held down
    pub fn is_child_pressed(&self, id: u32) -> bool {
        let path = self.widget_path(id);
        self.pressed.as_ref().is_some_and(|p| path.is_ancestor_of(p))
    }

    /// Give keyboard focus to `id`
    pub fn set_focus(&mut self, id: u32) {
        let path = self.widget_path(id);
        self.focus_path(path);
    }

    pub(crate) fn focus_path(&mut self, path: WidgetPath) {
        if self.focused.as_ref() != Some(&path) {
            log::trace!("Focus moved to {:?}", path.ids());
        }
        self.focused = Some(path);
        self.focus_claimed = true;
    }

    /// Keep the current focus through this frame's click
    pub fn claim_focus(&mut self) {
        self.focus_claimed = true;
    }

    /// Drop keyboard focus
    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// Whether `id` has keyboard focus
    pub fn is_focused(&self, id: u32) -> bool {
        self.focused.as_ref() == Some(&self.widget_path(id))
    }

    /// Whether a widget inside container `id` has keyboard focus
    pub fn is_child_focused(&self, id: u32) -> bool {
        let path = self.widget_path(id);
        self.focused.as_ref().is_some_and(|p| path.is_ancestor_of(p))
    }

    /// Cursor and selection of the focused text edit
    pub const fn text_cursor(&self) -> TextCursor {
        self.text_cursor
    }

    /// Move the text-edit cursor; clamped to the text on the next frame
    pub fn set_text_cursor(&mut self, cursor: TextCursor) {
        self.text_cursor = cursor;
    }
}
