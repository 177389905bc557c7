//! Demo layout and scripted input
//!
//! A menu bar over a split view: a scrolling form on the left and a pan/zoom
//! canvas of shapes on the right.

use sandbox_gui::config::Style;
use sandbox_gui::draw::Corners;
use sandbox_gui::foundation::math::{rgba, Rect, Transform2D, Vec2};
use sandbox_gui::text::Font;
use sandbox_gui::ui::{GuiContext, InputKind, InputQueue, Key, Modifiers, MouseButton};

const MENU_HEIGHT: f32 = 24.0;
const ROW: f32 = 28.0;
const BUTTON_ROWS: u32 = 24;
const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 4.0;
const RECENT: [&str; 3] = ["alpha", "beta", "gamma"];

mod ids {
    pub const MENU_BAR: u32 = 1;
    pub const SPLITTER: u32 = 2;
    pub const FORM: u32 = 3;
    pub const CANVAS: u32 = 4;

    pub const NAME_EDIT: u32 = 1;
    pub const FIRST_BUTTON: u32 = 100;

    pub const CANVAS_BUTTON: u32 = 1;
}

/// Values the widgets edit across frames
#[derive(Debug)]
pub struct DemoState {
    pub name: String,
    pub scroll: f32,
    pub split: f32,
    pub zoom: f32,
    pub pan: Vec2,
    pub clicks: u32,
    pub quit: bool,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            name: String::from("sandbox"),
            scroll: 0.0,
            split: 0.3,
            zoom: 1.0,
            pan: Vec2::zeros(),
            clicks: 0,
            quit: false,
        }
    }
}

/// Lay out and run every widget for one frame
pub fn build_frame(gui: &mut GuiContext<'_>, state: &mut DemoState, window: Vec2) {
    let bar = Rect::new(0.0, 0.0, window.x, MENU_HEIGHT);
    let body = Rect::new(0.0, MENU_HEIGHT, window.x, window.y);

    menu_bar(gui, state, &bar);

    let (left, right) = gui.hsplitter(ids::SPLITTER, &body, &mut state.split);
    form(gui, state, &left);
    canvas(gui, state, &right);
}

fn menu_bar(gui: &mut GuiContext<'_>, state: &mut DemoState, bar: &Rect) {
    gui.begin_menu_bar(ids::MENU_BAR, bar);

    if gui.begin_popup(1, "File") {
        if gui.menu_item(1, "Reset view") {
            state.zoom = 1.0;
            state.pan = Vec2::zeros();
        }
        if gui.begin_popup(2, "Recent") {
            for (i, name) in (10..).zip(RECENT) {
                if gui.menu_item(i, name) {
                    log::info!("Opened recent entry {}", name);
                    state.name = name.to_string();
                }
            }
            gui.end_popup();
        }
        if gui.menu_item(3, "Quit") {
            state.quit = true;
        }
        gui.end_popup();
    }

    if gui.begin_popup(4, "View") {
        if gui.menu_item(1, "Zoom in") {
            state.zoom = (state.zoom * 2.0).min(MAX_ZOOM);
        }
        if gui.menu_item(2, "Zoom out") {
            state.zoom = (state.zoom * 0.5).max(MIN_ZOOM);
        }
        gui.end_popup();
    }

    gui.end_menu_bar();
}

fn form(gui: &mut GuiContext<'_>, state: &mut DemoState, rect: &Rect) {
    let content_height = ROW * (BUTTON_ROWS + 2) as f32;
    gui.begin_scroll_panel(ids::FORM, rect, &mut state.scroll, content_height);

    let padding = gui.style().padding;
    let width = rect.width() - gui.style().scrollbar_width;
    let row = |i: u32| {
        let y = rect.y0 + ROW * i as f32;
        Rect::new(rect.x0 + padding, y + 2.0, rect.x0 + width - padding, y + ROW - 2.0)
    };

    gui.label(&row(0), "Name");
    if gui.edit_text(ids::NAME_EDIT, &row(1), &mut state.name) {
        log::debug!("Name is now {:?}", state.name);
    }
    for i in 0..BUTTON_ROWS {
        if gui.button(ids::FIRST_BUTTON + i, &row(i + 2), &format!("Button {}", i + 1)) {
            log::info!("Button {} clicked", i + 1);
        }
    }

    gui.end_scroll_panel();
}

fn canvas(gui: &mut GuiContext<'_>, state: &mut DemoState, rect: &Rect) {
    let event = *gui.event();

    gui.draw().draw_rect(rect, &rgba(0.05, 0.06, 0.08, 1.0));

    // Dragging the background pans; control + wheel zooms.
    gui.check_click(ids::CANVAS, rect);
    if gui.check_pressed(ids::CANVAS) {
        if let InputKind::CursorMoved { delta } = event.kind {
            state.pan += delta;
        }
    }
    if let InputKind::Scroll(delta) = event.kind {
        if event.modifiers.contains(Modifiers::CONTROL) && gui.is_cursor_over(rect) {
            state.zoom = (state.zoom * 1.1_f32.powf(delta.y)).clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    gui.begin_scissor(rect);
    gui.begin_children(ids::CANVAS);
    gui.begin_transform(&Transform2D::new(state.zoom, rect.min() + state.pan));

    let draw = gui.draw();
    draw.draw_rounded_gradient_rect(
        &Rect::new(0.0, 80.0, 200.0, 180.0),
        12.0,
        Corners::TOP,
        &rgba(0.3, 0.5, 0.8, 1.0),
        &rgba(0.1, 0.2, 0.4, 1.0),
    );
    draw.draw_circle(Vec2::new(280.0, 130.0), 40.0, &rgba(0.9, 0.6, 0.2, 1.0));
    draw.draw_line(Vec2::new(0.0, 220.0), Vec2::new(320.0, 260.0), 3.0, &rgba(0.8, 0.8, 0.8, 1.0));
    draw.draw_bezier_curve(
        [
            Vec2::new(0.0, 300.0),
            Vec2::new(100.0, 220.0),
            Vec2::new(220.0, 380.0),
            Vec2::new(320.0, 300.0),
        ],
        2.0,
        &rgba(0.4, 0.9, 0.5, 1.0),
    );

    let label = format!("Clicked {} times", state.clicks);
    if gui.button(ids::CANVAS_BUTTON, &Rect::new(20.0, 20.0, 180.0, 52.0), &label) {
        state.clicks += 1;
    }

    gui.end_transform();
    gui.end_children();
    gui.end_scissor();
}

/// Canned input exercising every widget, one event per frame
///
/// Positions are derived from the font and style so the script lines up
/// with the layout in [`build_frame`].
pub fn script(font: &Font, style: &Style, window: Vec2) -> InputQueue {
    let mut input = InputQueue::new();
    let item_height = font.line_height() + 2.0 * style.padding;
    let file_width = font.text_width("File") + 2.0 * style.padding;
    let popup_width = ["Reset view", "Recent", "Quit"]
        .iter()
        .map(|label| font.text_width(label) + 2.0 * style.padding)
        .fold(0.0, f32::max);

    let click = |input: &mut InputQueue, position: Vec2| {
        input.push_cursor(position);
        input.push_mouse_down(MouseButton::Left);
        input.push_mouse_up(MouseButton::Left);
    };

    // File > Recent > beta
    click(&mut input, Vec2::new(file_width * 0.5, MENU_HEIGHT * 0.5));
    let recent_y = MENU_HEIGHT + item_height * 1.5;
    input.push_cursor(Vec2::new(popup_width * 0.5, recent_y));
    input.push_cursor(Vec2::new(popup_width + 10.0, recent_y));
    click(&mut input, Vec2::new(popup_width + 10.0, recent_y + item_height));

    // Edit the name field
    let split_x = (window.x - style.splitter_width) * DemoState::default().split;
    click(&mut input, Vec2::new(split_x * 0.5, MENU_HEIGHT + ROW * 1.5));
    input.push_key_down(Key::End);
    input.push_text(" två");
    input.push_key_down(Key::Backspace);
    input.push_key_down(Key::Left);
    input.push_key_down(Key::Home);
    input.push_key_down(Key::Enter);

    // Scroll the form
    input.push_cursor(Vec2::new(split_x * 0.5, window.y * 0.5));
    input.push_scroll(Vec2::new(0.0, -3.0));

    // Canvas button, zoom and pan
    let canvas_x = split_x + style.splitter_width;
    click(&mut input, Vec2::new(canvas_x + 100.0, MENU_HEIGHT + 36.0));
    input.set_modifiers(Modifiers::CONTROL);
    input.push_cursor(Vec2::new(canvas_x + 200.0, window.y * 0.5));
    input.push_scroll(Vec2::new(0.0, 2.0));
    input.set_modifiers(Modifiers::empty());
    input.push_cursor(Vec2::new(canvas_x + 400.0, window.y - 40.0));
    input.push_mouse_down(MouseButton::Left);
    input.push_cursor(Vec2::new(canvas_x + 440.0, window.y - 20.0));
    input.push_mouse_up(MouseButton::Left);

    // Drag the splitter
    let handle = Vec2::new(split_x + style.splitter_width * 0.5, window.y * 0.5);
    input.push_cursor(handle);
    input.push_mouse_down(MouseButton::Left);
    input.push_cursor(handle + Vec2::new(60.0, 0.0));
    input.push_mouse_up(MouseButton::Left);

    // View menu, then close it with escape
    click(&mut input, Vec2::new(file_width + 10.0, MENU_HEIGHT * 0.5));
    input.push_key_down(Key::Escape);

    input
}
