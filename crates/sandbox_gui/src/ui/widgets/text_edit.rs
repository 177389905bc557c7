//! Single-line text edit
//!
//! The focused edit owns the context's [`TextCursor`]. Offsets are byte
//! offsets kept on UTF-8 character boundaries and are clamped to the text
//! every frame, so the caller may change the string between frames.

use crate::draw::Corners;
use crate::foundation::math::{Rect, Vec2};
use crate::foundation::utf8;
use crate::ui::context::{GuiContext, TextCursor};
use crate::ui::input::{InputKind, Key};

/// Width of the text cursor bar
const CURSOR_WIDTH: f32 = 1.0;

impl GuiContext<'_> {
    /// Editable single-line text field; returns true if `text` changed
    pub fn edit_text(&mut self, id: u32, rect: &Rect, text: &mut String) -> bool {
        let text_x = rect.x0 + self.style.padding;

        if self.check_click(id, rect) {
            self.set_focus(id);
            let offset = self.font.cursor_position(text, self.cursor().x - text_x);
            self.text_cursor = TextCursor::at(offset);
        }

        let mut changed = false;
        if self.is_focused(id) {
            self.text_cursor = clamp_cursor(text, self.text_cursor);

            if self.check_pressed(id) && matches!(self.event.kind, InputKind::CursorMoved { .. }) {
                self.text_cursor.cursor = self.font.cursor_position(text, self.cursor().x - text_x);
            }

            changed = self.handle_edit_input(text);
        }

        self.draw_text_edit(id, rect, text);
        changed
    }

    fn handle_edit_input(&mut self, text: &mut String) -> bool {
        let event = self.event;
        let shift = event.shift();
        let mut state = self.text_cursor;
        let mut changed = false;

        match event.kind {
            InputKind::KeyDown(key) | InputKind::KeyRepeat(key) => match key {
                Key::Left => {
                    if !shift && state.has_selection() {
                        state = TextCursor::at(state.selection().start);
                    } else {
                        state.cursor = utf8::prev_boundary(text.as_bytes(), state.cursor);
                        if !shift {
                            state.mark = state.cursor;
                        }
                    }
                }
                Key::Right => {
                    if !shift && state.has_selection() {
                        state = TextCursor::at(state.selection().end);
                    } else {
                        state.cursor = utf8::next_boundary(text.as_bytes(), state.cursor);
                        if !shift {
                            state.mark = state.cursor;
                        }
                    }
                }
                Key::Home => {
                    state.cursor = 0;
                    if !shift {
                        state.mark = 0;
                    }
                }
                Key::End => {
                    state.cursor = text.len();
                    if !shift {
                        state.mark = state.cursor;
                    }
                }
                Key::Backspace => {
                    if state.has_selection() {
                        state = delete_selection(text, state);
                        changed = true;
                    } else if state.cursor > 0 {
                        let start = utf8::prev_boundary(text.as_bytes(), state.cursor);
                        text.replace_range(start..state.cursor, "");
                        state = TextCursor::at(start);
                        changed = true;
                    }
                }
                Key::Delete => {
                    if state.has_selection() {
                        state = delete_selection(text, state);
                        changed = true;
                    } else if state.cursor < text.len() {
                        let end = utf8::next_boundary(text.as_bytes(), state.cursor);
                        text.replace_range(state.cursor..end, "");
                        changed = true;
                    }
                }
                Key::Escape | Key::Enter => self.clear_focus(),
                _ => {}
            },
            InputKind::Char(ch) if !ch.is_control() => {
                state = delete_selection(text, state);
                text.insert(state.cursor, ch);
                state = TextCursor::at(state.cursor + ch.len_utf8());
                changed = true;
            }
            _ => {}
        }

        self.text_cursor = state;
        changed
    }

    fn draw_text_edit(&mut self, id: u32, rect: &Rect, text: &str) {
        let focused = self.is_focused(id);
        let style = &self.style;
        let background = style.edit_background;
        let selection_color = style.selection;
        let cursor_color = style.cursor;
        let text_color = style.text;
        let radius = style.corner_radius;
        let text_x = rect.x0 + style.padding;
        let line_height = self.font.line_height();
        let text_y = rect.center().y - line_height * 0.5;

        self.draw.draw_rounded_rect(rect, radius, Corners::ALL, &background);
        self.draw.begin_scissor(rect);

        if focused {
            let state = self.text_cursor;
            if state.has_selection() {
                let range = state.selection();
                let x0 = text_x + self.font.text_width(&text[..range.start]);
                let x1 = text_x + self.font.text_width(&text[..range.end]);
                self.draw.draw_rect(&Rect::new(x0, text_y, x1, text_y + line_height), &selection_color);
            }
        }

        self.draw.draw_text(self.font, Vec2::new(text_x, text_y), text, &text_color);

        if focused {
            let x = text_x + self.font.text_width(&text[..self.text_cursor.cursor]);
            self.draw.draw_rect(
                &Rect::new(x, text_y, x + CURSOR_WIDTH, text_y + line_height),
                &cursor_color,
            );
        }

        self.draw.end_scissor();
    }
}

/// Clamp both offsets to the text and snap them to character boundaries
fn clamp_cursor(text: &str, state: TextCursor) -> TextCursor {
    TextCursor {
        cursor: utf8::floor_boundary(text.as_bytes(), state.cursor),
        mark: utf8::floor_boundary(text.as_bytes(), state.mark),
    }
}

/// Remove the selected range and collapse the cursor at its start
fn delete_selection(text: &mut String, state: TextCursor) -> TextCursor {
    let range = state.selection();
    let start = range.start;
    text.replace_range(range, "");
    TextCursor::at(start)
}
