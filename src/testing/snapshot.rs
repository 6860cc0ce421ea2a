//! Snapshot rendering helpers.
//!
//! Turn widgets and strips into plain text for `insta` snapshots and
//! string assertions. Rows are joined with `'\n'` and right-trimmed.

use crate::app::App;
use crate::geometry::Rect;
use crate::render::compositor::Compositor;
use crate::render::strip::Strip;
use crate::widget::Widget;

/// Mount `root` on a headless app of the given size, render one frame and
/// return its text.
///
/// ```
/// use trellis_tui::testing::render_to_string;
/// use trellis_tui::widgets::Label;
///
/// assert_eq!(render_to_string(Label::new("Hello"), 8, 1), "Hello");
/// ```
pub fn render_to_string(root: impl Widget + 'static, width: u16, height: u16) -> String {
    let mut app = App::headless(width, height);
    app.mount(root);
    app.render();
    app.screen().to_text()
}

/// Paint raw strips onto a blank `width` x `height` screen.
pub fn strips_to_string(strips: &[Strip], width: u16, height: u16) -> String {
    let mut screen = Compositor::new(width, height);
    let area = Rect::new(0, 0, i32::from(width), i32::from(height));
    screen.place_strips(strips, area);
    screen.to_text()
}
