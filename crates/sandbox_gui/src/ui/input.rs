//! Input events
//!
//! The widget layer consumes exactly one [`InputEvent`] per frame. A windowing
//! layer pushes raw events into an [`InputQueue`]; each frame takes the next
//! one, or an empty event carrying the last cursor position when nothing is
//! pending.

use std::collections::VecDeque;

use bitflags::bitflags;

use crate::foundation::math::Vec2;

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Keys the widgets react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Home
    Home,
    /// End
    End,
    /// Backspace
    Backspace,
    /// Delete
    Delete,
    /// Enter / Return
    Enter,
    /// Escape
    Escape,
    /// Tab
    Tab,
    /// Any other key, by platform key code
    Other(i32),
}

bitflags! {
    /// Modifier keys held while an event happened
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either shift key
        const SHIFT = 1 << 0;
        /// Either control key
        const CONTROL = 1 << 1;
        /// Either alt key
        const ALT = 1 << 2;
        /// Command / windows key
        const SUPER = 1 << 3;
    }
}

/// What happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputKind {
    /// Nothing; keeps per-frame widget polling uniform
    None,
    /// Cursor moved by `delta` device pixels
    CursorMoved {
        /// Movement since the previous cursor event
        delta: Vec2,
    },
    /// Key pressed
    KeyDown(Key),
    /// Key held long enough to auto-repeat
    KeyRepeat(Key),
    /// Key released
    KeyUp(Key),
    /// Mouse button pressed
    MouseDown(MouseButton),
    /// Mouse button released
    MouseUp(MouseButton),
    /// Wheel or trackpad scroll
    Scroll(Vec2),
    /// Text input
    Char(char),
}

/// One input event with the cursor and modifier state at the time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    /// What happened
    pub kind: InputKind,
    /// Cursor position in device pixels
    pub cursor: Vec2,
    /// Modifier keys held
    pub modifiers: Modifiers,
}

impl Default for InputEvent {
    fn default() -> Self {
        Self::none(Vec2::zeros(), Modifiers::empty())
    }
}

impl InputEvent {
    /// Event of the given kind
    pub const fn new(kind: InputKind, cursor: Vec2, modifiers: Modifiers) -> Self {
        Self { kind, cursor, modifiers }
    }

    /// Empty event
    pub const fn none(cursor: Vec2, modifiers: Modifiers) -> Self {
        Self::new(InputKind::None, cursor, modifiers)
    }

    /// Key pressed or auto-repeated
    pub fn is_key_pressed(&self, key: Key) -> bool {
        matches!(self.kind, InputKind::KeyDown(k) | InputKind::KeyRepeat(k) if k == key)
    }

    /// Mouse button pressed this frame
    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.kind == InputKind::MouseDown(button)
    }

    /// Mouse button released this frame
    pub fn is_mouse_up(&self, button: MouseButton) -> bool {
        self.kind == InputKind::MouseUp(button)
    }

    /// Any mouse button pressed this frame
    pub const fn is_any_mouse_down(&self) -> bool {
        matches!(self.kind, InputKind::MouseDown(_))
    }

    /// Shift held
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Pending input, drained one event per frame
#[derive(Debug)]
pub struct InputQueue {
    pending: VecDeque<InputEvent>,
    cursor: Vec2,
    modifiers: Modifiers,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
            cursor: Vec2::zeros(),
            modifiers: Modifiers::empty(),
        }
    }
}

impl InputQueue {
    /// Create an empty queue with the cursor at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Update held modifiers; applies to events pushed afterwards
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Last known cursor position
    pub const fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no events are queued
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn push(&mut self, kind: InputKind) {
        self.pending.push_back(InputEvent::new(kind, self.cursor, self.modifiers));
    }

    /// Cursor moved to `position`
    pub fn push_cursor(&mut self, position: Vec2) {
        let delta = position - self.cursor;
        self.cursor = position;
        self.push(InputKind::CursorMoved { delta });
    }

    /// Key pressed
    pub fn push_key_down(&mut self, key: Key) {
        self.push(InputKind::KeyDown(key));
    }

    /// Key auto-repeated
    pub fn push_key_repeat(&mut self, key: Key) {
        self.push(InputKind::KeyRepeat(key));
    }

    /// Key released
    pub fn push_key_up(&mut self, key: Key) {
        self.push(InputKind::KeyUp(key));
    }

    /// Mouse button pressed
    pub fn push_mouse_down(&mut self, button: MouseButton) {
        self.push(InputKind::MouseDown(button));
    }

    /// Mouse button released
    pub fn push_mouse_up(&mut self, button: MouseButton) {
        self.push(InputKind::MouseUp(button));
    }

    /// Scroll by `delta` notches
    pub fn push_scroll(&mut self, delta: Vec2) {
        self.push(InputKind::Scroll(delta));
    }

    /// Text input
    pub fn push_char(&mut self, ch: char) {
        self.push(InputKind::Char(ch));
    }

    /// Type every character of `text`
    pub fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.push_char(ch);
        }
    }

    /// Event for the next frame
    pub fn next_event(&mut self) -> InputEvent {
        self.pending
            .pop_front()
            .unwrap_or_else(|| InputEvent::none(self.cursor, self.modifiers))
    }
}
