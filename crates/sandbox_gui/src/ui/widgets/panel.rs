//! Scroll panels and splitters

use crate::draw::Corners;
use crate::foundation::math::{Rect, Transform2D, Vec2};
use crate::ui::context::GuiContext;
use crate::ui::input::InputKind;

/// Child id reserved for a scroll panel's thumb
pub const SCROLL_THUMB_ID: u32 = u32::MAX;

/// Shortest scrollbar thumb in pixels
pub const MIN_THUMB_LENGTH: f32 = 16.0;

impl GuiContext<'_> {
    /// Start a vertically scrolling region
    ///
    /// `scroll` is the distance the content has moved up and is clamped to
    /// `[0, content_height - rect.height()]`. Content drawn until
    /// [`end_scroll_panel`](Self::end_scroll_panel) is clipped to the panel
    /// and its ids are scoped under `id`.
    pub fn begin_scroll_panel(&mut self, id: u32, rect: &Rect, scroll: &mut f32, content_height: f32) {
        let view_height = rect.height();
        let max_scroll = (content_height - view_height).max(0.0);
        let scrollable = max_scroll > 0.0;
        let bar_width = if scrollable { self.style.scrollbar_width } else { 0.0 };

        if let InputKind::Scroll(delta) = self.event.kind {
            if self.is_cursor_over(rect) {
                *scroll -= delta.y * self.style.scroll_step;
            }
        }

        let panel = self.style.panel;
        self.draw.draw_rect(rect, &panel);
        self.begin_children(id);

        if scrollable {
            let thumb_length = (view_height * view_height / content_height).clamp(MIN_THUMB_LENGTH.min(view_height), view_height);
            let travel = view_height - thumb_length;

            if self.check_pressed(SCROLL_THUMB_ID) && travel > 0.0 {
                let thumb_top = self.cursor().y - self.click_offset.y - rect.y0;
                *scroll = thumb_top / travel * max_scroll;
            }
            *scroll = scroll.clamp(0.0, max_scroll);

            let thumb_y = rect.y0 + *scroll / max_scroll * travel;
            let thumb = Rect::new(rect.x1 - bar_width, thumb_y, rect.x1, thumb_y + thumb_length);
            self.check_click(SCROLL_THUMB_ID, &thumb);

            let color = if self.check_pressed(SCROLL_THUMB_ID) || self.is_cursor_over(&thumb) {
                self.style.hover
            } else {
                self.style.handle
            };
            let radius = bar_width * 0.5;
            self.draw.draw_rounded_rect(&thumb, radius, Corners::ALL, &color);
        } else {
            *scroll = 0.0;
        }

        let content = Rect::new(rect.x0, rect.y0, rect.x1 - bar_width, rect.y1);
        self.draw.begin_scissor(&content);
        self.draw.begin_transform(&Transform2D::from_translation(Vec2::new(0.0, -*scroll)));
    }

    /// Close the region opened by `begin_scroll_panel`
    pub fn end_scroll_panel(&mut self) {
        self.draw.end_transform();
        self.draw.end_scissor();
        self.end_children();
    }

    /// Split `rect` into side-by-side panes with a draggable divider
    ///
    /// `split` is the left pane's share of the space not taken by the divider,
    /// clamped to `[0, 1]`. Returns the left and right pane rects.
    pub fn hsplitter(&mut self, id: u32, rect: &Rect, split: &mut f32) -> (Rect, Rect) {
        let divider = self.style.splitter_width;
        let available = (rect.width() - divider).max(0.0);

        if self.check_pressed(id) && available > 0.0 {
            let left = self.cursor().x - self.click_offset.x - rect.x0;
            *split = left / available;
        }
        *split = split.clamp(0.0, 1.0);

        let x = rect.x0 + available * *split;
        let handle = Rect::new(x, rect.y0, x + divider, rect.y1);
        self.check_click(id, &handle);
        self.draw_splitter_handle(id, &handle);

        (
            Rect::new(rect.x0, rect.y0, x, rect.y1),
            Rect::new(x + divider, rect.y0, rect.x1, rect.y1),
        )
    }

    /// Split `rect` into stacked panes with a draggable divider
    ///
    /// Returns the top and bottom pane rects.
    pub fn vsplitter(&mut self, id: u32, rect: &Rect, split: &mut f32) -> (Rect, Rect) {
        let divider = self.style.splitter_width;
        let available = (rect.height() - divider).max(0.0);

        if self.check_pressed(id) && available > 0.0 {
            let top = self.cursor().y - self.click_offset.y - rect.y0;
            *split = top / available;
        }
        *split = split.clamp(0.0, 1.0);

        let y = rect.y0 + available * *split;
        let handle = Rect::new(rect.x0, y, rect.x1, y + divider);
        self.check_click(id, &handle);
        self.draw_splitter_handle(id, &handle);

        (
            Rect::new(rect.x0, rect.y0, rect.x1, y),
            Rect::new(rect.x0, y + divider, rect.x1, rect.y1),
        )
    }

    fn draw_splitter_handle(&mut self, id: u32, handle: &Rect) {
        let color = if self.check_pressed(id) || self.is_cursor_over(handle) {
            self.style.hover
        } else {
            self.style.handle
        };
        self.draw.draw_rect(handle, &color);
    }
}
