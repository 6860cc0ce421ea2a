//! Pilot: programmatic interaction with a headless App.
//!
//! The `Pilot` wraps an [`App`] built with [`App::headless`] and simulates
//! user input. Every simulated event is routed and rendered exactly as the
//! run loop would, so `screen_text` always reflects the latest frame.

use crate::app::App;
use crate::event::input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseButton, MouseEvent};
use crate::widget::Widget;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for tests.
///
/// # Examples
///
/// ```
/// use trellis_tui::event::Key;
/// use trellis_tui::testing::Pilot;
/// use trellis_tui::widgets::{Button, Flex};
///
/// let mut pilot = Pilot::new(20, 2, Flex::column().child(Button::new("ok", "OK")));
/// pilot.press_key(Key::Tab);
/// assert_eq!(pilot.focused(), Some("ok"));
/// ```
pub struct Pilot {
    app: App,
}

impl Pilot {
    /// Mount `root` on a `width` x `height` headless app and render once.
    pub fn new(width: u16, height: u16, root: impl Widget + 'static) -> Self {
        let mut app = App::headless(width, height);
        app.mount(root);
        Self::from_app(app)
    }

    /// Drive an app that is already set up; renders once.
    pub fn from_app(mut app: App) -> Self {
        app.render();
        Self { app }
    }

    // ── Input simulation ─────────────────────────────────────────────

    pub fn press_key(&mut self, key: Key) {
        self.press_key_with(key, Modifiers::NONE);
    }

    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) {
        self.app.handle_input(InputEvent::Key(KeyEvent::new(key, modifiers)));
    }

    /// Send each character of `text` as a plain key press.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press_key(Key::Char(ch));
        }
    }

    /// Left button down then up at `(x, y)`.
    pub fn click(&mut self, x: i32, y: i32) {
        self.mouse(MouseAction::Down(MouseButton::Left), x, y);
        self.mouse(MouseAction::Up(MouseButton::Left), x, y);
    }

    pub fn mouse_down(&mut self, button: MouseButton, x: i32, y: i32) {
        self.mouse(MouseAction::Down(button), x, y);
    }

    pub fn mouse_up(&mut self, button: MouseButton, x: i32, y: i32) {
        self.mouse(MouseAction::Up(button), x, y);
    }

    pub fn mouse_move(&mut self, x: i32, y: i32) {
        self.mouse(MouseAction::Moved, x, y);
    }

    /// One wheel notch; negative `delta` scrolls up.
    pub fn scroll(&mut self, x: i32, y: i32, delta: i32) {
        let action = if delta < 0 { MouseAction::ScrollUp } else { MouseAction::ScrollDown };
        for _ in 0..delta.unsigned_abs() {
            self.mouse(action, x, y);
        }
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.app.handle_input(InputEvent::Resize { width, height });
    }

    fn mouse(&mut self, kind: MouseAction, x: i32, y: i32) {
        self.app.handle_input(InputEvent::Mouse(MouseEvent::new(kind, x, y)));
    }

    // ── Frames ───────────────────────────────────────────────────────

    /// Re-render without input, picking up signal changes made outside a
    /// handler.
    pub fn render(&mut self) {
        self.app.render();
    }

    /// Advance animations by one frame and render.
    pub fn tick(&mut self) {
        self.app.handle_tick();
    }

    /// Tick `frames` times.
    pub fn advance(&mut self, frames: usize) {
        for _ in 0..frames {
            self.tick();
        }
    }

    // ── Query ────────────────────────────────────────────────────────

    /// The current frame, one line per row, trailing spaces trimmed.
    pub fn screen_text(&self) -> String {
        self.app.screen().to_text()
    }

    pub fn focused(&self) -> Option<&str> {
        self.app.focused()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.app.hovered()
    }

    pub fn is_running(&self) -> bool {
        self.app.is_running()
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

impl std::fmt::Debug for Pilot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pilot").field("app", &self.app).finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
