//! Button and label widgets

use crate::draw::Corners;
use crate::foundation::math::{Rect, Vec2};
use crate::ui::context::GuiContext;

/// Visual state of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Normal resting state
    Normal,
    /// Mouse is hovering over button
    Hovered,
    /// Button is being pressed
    Pressed,
}

impl GuiContext<'_> {
    /// Clickable button; returns true on the frame the click completes
    ///
    /// A click completes when the left button is released over the same
    /// button it was pressed on.
    pub fn button(&mut self, id: u32, rect: &Rect, label: &str) -> bool {
        self.check_click(id, rect);
        let hovered = self.is_cursor_over(rect);
        let clicked = self.check_release(id) && hovered;

        let state = if self.check_pressed(id) {
            ButtonState::Pressed
        } else if hovered {
            ButtonState::Hovered
        } else {
            ButtonState::Normal
        };

        let style = &self.style;
        let (top, bottom) = match state {
            ButtonState::Normal => (style.button_top, style.button_bottom),
            ButtonState::Hovered => (style.hover, style.button_bottom),
            ButtonState::Pressed => (style.pressed, style.button_top),
        };
        let radius = style.corner_radius;
        let text_color = style.text;

        self.draw
            .draw_rounded_gradient_rect(rect, radius, Corners::ALL, &top, &bottom);

        let width = self.font.text_width(label);
        let position = Vec2::new(
            rect.center().x - width * 0.5,
            rect.center().y - self.font.line_height() * 0.5,
        );
        self.draw.begin_scissor(rect);
        self.draw.draw_shadowed_text(self.font, position, label, &text_color);
        self.draw.end_scissor();

        clicked
    }

    /// Text left-aligned and vertically centred in `rect`
    pub fn label(&mut self, rect: &Rect, text: &str) {
        let position = Vec2::new(
            rect.x0 + self.style.padding,
            rect.center().y - self.font.line_height() * 0.5,
        );
        let color = self.style.text;
        self.draw.begin_scissor(rect);
        self.draw.draw_text(self.font, position, text, &color);
        self.draw.end_scissor();
    }
}
