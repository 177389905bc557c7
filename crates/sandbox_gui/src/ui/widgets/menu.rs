//! Menu bar with nested popups
//!
//! Open menus are a stack of frames. The bar lays its headers out left to
//! right; popups stack their items top to bottom and grow their frame as
//! items are added. A popup is open while keyboard focus sits on its header
//! or anything below it, so opening, switching and closing menus are all
//! focus changes.
//!
//! Popup items are drawn two overlay levels up and the popup background one
//! level up, after the items, so the background ends up underneath them.

use crate::foundation::math::{Rect, Vec2};
use crate::ui::context::{GuiContext, MenuFrame};
use crate::ui::input::Key;

impl GuiContext<'_> {
    /// Start a menu bar filling `rect`
    pub fn begin_menu_bar(&mut self, id: u32, rect: &Rect) {
        let background = self.style.menu_background;
        self.draw.draw_rect(rect, &background);
        self.begin_children(id);
        self.menus.push(MenuFrame {
            rect: *rect,
            next: rect.min(),
            vertical: false,
            min_width: 0.0,
        });
    }

    /// Close the menu bar
    ///
    /// While a menu is open, Escape or a click outside the bar and every open
    /// popup closes it; a click inside keeps it open.
    pub fn end_menu_bar(&mut self) {
        let bar_path = self.ids.clone();
        self.end_children();
        let Some(frame) = self.menus.pop() else {
            panic!("end_menu_bar without begin_menu_bar");
        };
        assert!(self.menus.is_empty(), "end_menu_bar with unbalanced begin_popup");

        let active = self.focused.as_ref().is_some_and(|f| bar_path.is_ancestor_of(f));
        if !active {
            return;
        }

        if self.event.is_key_pressed(Key::Escape) {
            log::trace!("Menu closed by escape");
            self.clear_focus();
        } else if self.event.is_any_mouse_down() {
            let cursor = self.event.cursor;
            let bar = self.draw.transform().apply_rect(&frame.rect);
            let inside = bar.contains(cursor) || self.overlay_rects.iter().any(|r| r.contains(cursor));
            if inside {
                self.claim_focus();
            } else {
                self.clear_focus();
            }
        }
    }

    /// Menu header; returns true while its popup is open
    ///
    /// When this returns true, add items and nested popups, then call
    /// [`end_popup`](Self::end_popup).
    pub fn begin_popup(&mut self, id: u32, label: &str) -> bool {
        let item = self.next_menu_item(label);
        let vertical = self.menus.last().is_some_and(|f| f.vertical);
        let path = self.widget_path(id);
        let parent = self.ids.clone();

        let was_open = self.focused.as_ref().is_some_and(|f| path.contains(f));
        let clicked = self.check_click(id, &item);
        let hovered = self.is_cursor_over(&item);

        if clicked {
            if was_open && !vertical {
                self.clear_focus();
            } else {
                self.focus_path(path.clone());
            }
        } else if hovered && !was_open {
            let bar_active = self.focused.as_ref().is_some_and(|f| parent.is_ancestor_of(f));
            if vertical || bar_active {
                self.focus_path(path.clone());
            }
        }

        let open = self.focused.as_ref().is_some_and(|f| path.contains(f));
        self.draw_menu_item(&item, label, open || hovered);

        if !open {
            return false;
        }

        self.draw.begin_overlay();
        self.draw.begin_overlay();

        let origin = if vertical {
            Vec2::new(item.x1, item.y0)
        } else {
            Vec2::new(item.x0, item.y1)
        };
        let min_width = self.popup_widths.get(&path).copied().unwrap_or(0.0);
        self.menus.push(MenuFrame {
            rect: Rect::new(origin.x, origin.y, origin.x, origin.y),
            next: origin,
            vertical: true,
            min_width,
        });
        self.begin_children(id);
        true
    }

    /// Close a popup opened by `begin_popup` and draw its background
    pub fn end_popup(&mut self) {
        let path = self.ids.clone();
        self.end_children();
        let Some(frame) = self.menus.pop() else {
            panic!("end_popup without begin_popup");
        };
        self.popup_widths.insert(path, frame.rect.width());

        self.draw.end_overlay();
        let background = self.style.menu_background;
        self.draw.draw_rect(&frame.rect, &background);
        self.draw.end_overlay();

        let device = self.draw.transform().apply_rect(&frame.rect);
        self.overlay_rects.push(device);
    }

    /// Menu entry; returns true when clicked, which also closes the menus
    pub fn menu_item(&mut self, id: u32, label: &str) -> bool {
        let item = self.next_menu_item(label);
        let vertical = self.menus.last().is_some_and(|f| f.vertical);

        self.check_click(id, &item);
        let hovered = self.is_cursor_over(&item);

        if hovered && vertical {
            // Hovering a plain entry closes any sibling submenu.
            let parent = self.ids.clone();
            if self.focused.as_ref().is_some_and(|f| parent.is_ancestor_of(f)) {
                self.focus_path(parent);
            }
        }

        self.draw_menu_item(&item, label, hovered);

        let clicked = self.check_release(id) && hovered;
        if clicked {
            log::debug!("Menu item {:?} selected", label);
            self.clear_focus();
        }
        clicked
    }

    /// Reserve space for the next entry of the innermost menu frame
    fn next_menu_item(&mut self, label: &str) -> Rect {
        let padding = self.style.padding;
        let text_width = self.font.text_width(label) + 2.0 * padding;
        let height = self.font.line_height() + 2.0 * padding;
        let Some(frame) = self.menus.last_mut() else {
            panic!("menu entry outside begin_menu_bar");
        };

        if frame.vertical {
            let width = text_width.max(frame.min_width);
            let item = Rect::new(frame.rect.x0, frame.next.y, frame.rect.x0 + width, frame.next.y + height);
            frame.next.y = item.y1;
            frame.rect.x1 = frame.rect.x1.max(item.x1);
            frame.rect.y1 = frame.rect.y1.max(item.y1);
            item
        } else {
            let item = Rect::new(frame.next.x, frame.rect.y0, frame.next.x + text_width, frame.rect.y1);
            frame.next.x = item.x1;
            item
        }
    }

    fn draw_menu_item(&mut self, item: &Rect, label: &str, highlighted: bool) {
        if highlighted {
            let hover = self.style.hover;
            self.draw.draw_rect(item, &hover);
        }
        let position = Vec2::new(item.x0 + self.style.padding, item.center().y - self.font.line_height() * 0.5);
        let color = self.style.text;
        self.draw.draw_text(self.font, position, label, &color);
    }
}

#[cfg(test)]
mod tests {
    use crate::foundation::math::{Rect, Vec2};
    use crate::test_support::Fixture;
    use crate::ui::context::GuiContext;
    use crate::ui::input::{InputEvent, InputKind, Key, Modifiers, MouseButton};

    const BAR: Rect = Rect::new(0.0, 0.0, 400.0, 21.0);

    #[derive(Debug, Default, PartialEq)]
    struct Outcome {
        file_open: bool,
        edit_open: bool,
        recent_open: bool,
        open_clicked: bool,
        button_clicked: bool,
        positions: Vec<[f32; 2]>,
        indices: Vec<u16>,
    }

    fn at(kind: InputKind, x: f32, y: f32) -> InputEvent {
        InputEvent::new(kind, Vec2::new(x, y), Modifiers::empty())
    }

    // Fixture glyphs advance 8px with a 13px line and 4px padding, so "File"
    // spans x 0..40, "Edit" 40..80 and popup rows are 21px tall from y = 21.
    fn frame(ctx: &mut GuiContext<'_>, event: InputEvent) -> Outcome {
        let mut outcome = Outcome::default();
        ctx.begin_frame(Vec2::new(400.0, 300.0), event);

        outcome.button_clicked = ctx.button(9, &Rect::new(0.0, 25.0, 40.0, 40.0), "B");

        ctx.begin_menu_bar(1, &BAR);
        if ctx.begin_popup(10, "File") {
            outcome.file_open = true;
            outcome.open_clicked = ctx.menu_item(11, "Open");
            ctx.menu_item(12, "Quit");
            if ctx.begin_popup(13, "Recent") {
                outcome.recent_open = true;
                ctx.menu_item(14, "a.txt");
                ctx.end_popup();
            }
            ctx.end_popup();
        }
        if ctx.begin_popup(20, "Edit") {
            outcome.edit_open = true;
            ctx.menu_item(21, "Undo");
            ctx.end_popup();
        }
        ctx.end_menu_bar();

        let list = ctx.end_frame().unwrap();
        outcome.positions = list.vertices.iter().map(|v| v.position).collect();
        outcome.indices = list.indices.to_vec();
        outcome
    }

    fn open_file_menu(ctx: &mut GuiContext<'_>) {
        assert!(frame(ctx, at(InputKind::MouseDown(MouseButton::Left), 10.0, 10.0)).file_open);
        assert!(frame(ctx, at(InputKind::MouseUp(MouseButton::Left), 10.0, 10.0)).file_open);
    }

    #[test]
    fn test_closed_menu_draws_no_popup() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        let outcome = frame(&mut ctx, InputEvent::default());
        assert!(!outcome.file_open && !outcome.edit_open);
    }

    #[test]
    fn test_click_item_selects_and_closes() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        open_file_menu(&mut ctx);

        let press = frame(&mut ctx, at(InputKind::MouseDown(MouseButton::Left), 10.0, 30.0));
        assert!(press.file_open && !press.open_clicked);

        let release = frame(&mut ctx, at(InputKind::MouseUp(MouseButton::Left), 10.0, 30.0));
        assert!(release.open_clicked);

        let after = frame(&mut ctx, at(InputKind::None, 10.0, 30.0));
        assert!(!after.file_open);
    }

    #[test]
    fn test_header_click_toggles() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        open_file_menu(&mut ctx);

        let close = frame(&mut ctx, at(InputKind::MouseDown(MouseButton::Left), 10.0, 10.0));
        assert!(!close.file_open);
        assert!(!frame(&mut ctx, at(InputKind::MouseUp(MouseButton::Left), 10.0, 10.0)).file_open);
    }

    #[test]
    fn test_click_outside_closes() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        open_file_menu(&mut ctx);

        frame(&mut ctx, at(InputKind::MouseDown(MouseButton::Left), 300.0, 200.0));
        assert!(!frame(&mut ctx, at(InputKind::None, 300.0, 200.0)).file_open);
    }

    #[test]
    fn test_escape_closes() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        open_file_menu(&mut ctx);

        frame(&mut ctx, at(InputKind::KeyDown(Key::Escape), 10.0, 10.0));
        assert!(!frame(&mut ctx, at(InputKind::None, 10.0, 10.0)).file_open);
    }

    #[test]
    fn test_hover_switches_between_open_headers() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();

        // Hovering alone does not open a menu.
        assert!(!frame(&mut ctx, at(InputKind::CursorMoved { delta: Vec2::zeros() }, 50.0, 10.0)).edit_open);

        open_file_menu(&mut ctx);
        frame(&mut ctx, at(InputKind::CursorMoved { delta: Vec2::new(40.0, 0.0) }, 50.0, 10.0));
        let switched = frame(&mut ctx, at(InputKind::None, 50.0, 10.0));
        assert!(switched.edit_open);
        assert!(!switched.file_open);
    }

    #[test]
    fn test_nested_popup_opens_on_hover() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        open_file_menu(&mut ctx);

        // "Recent" is the third row: y 63..84.
        frame(&mut ctx, at(InputKind::CursorMoved { delta: Vec2::zeros() }, 10.0, 70.0));
        let nested = frame(&mut ctx, at(InputKind::None, 10.0, 70.0));
        assert!(nested.file_open && nested.recent_open);

        // Moving back onto a plain entry closes the submenu but not the menu.
        frame(&mut ctx, at(InputKind::CursorMoved { delta: Vec2::zeros() }, 10.0, 30.0));
        let back = frame(&mut ctx, at(InputKind::None, 10.0, 30.0));
        assert!(back.file_open && !back.recent_open);
    }

    #[test]
    fn test_popup_blocks_widgets_underneath() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        open_file_menu(&mut ctx);

        // The button at y 25..40 sits under the "Open" row.
        frame(&mut ctx, at(InputKind::MouseDown(MouseButton::Left), 10.0, 30.0));
        let release = frame(&mut ctx, at(InputKind::MouseUp(MouseButton::Left), 10.0, 30.0));
        assert!(release.open_clicked);
        assert!(!release.button_clicked);
    }

    #[test]
    fn test_popup_background_sorted_under_items() {
        let fixture = Fixture::new();
        let mut ctx = fixture.context();
        open_file_menu(&mut ctx);

        let outcome = frame(&mut ctx, at(InputKind::None, 300.0, 200.0));
        assert!(outcome.file_open);

        // "Recent" is the widest row, so the background spans x 0..56 and
        // y 21..84; its bottom-right corner is unique in the frame.
        let background = outcome.positions.iter().position(|p| *p == [56.0, 84.0]).unwrap();
        let indices = &outcome.indices;
        let first = indices.iter().position(|&i| i as usize == background).unwrap();
        // Items were emitted before the background but are indexed after it.
        assert!(indices[first..].iter().any(|&i| i as usize + 4 <= background));
        assert_eq!(indices[0], 0);
    }
}
