//! Button widget: an interactive, focusable button.
//!
//! Renders a label centered within its region. Clicking the button, or
//! pressing Enter or Space while it has focus, runs its press action.

use std::any::Any;
use std::sync::Arc;

use crate::event::binding::ActionFn;
use crate::event::context::{ClickEvent, EventContext};
use crate::event::input::{Key, KeyEvent};
use crate::geometry::{Rect, Size};
use crate::layout::{BoxStyle, LayoutKind};
use crate::reactive::{AnySignal, Signal};
use crate::render::strip::{CellStyle, Strip};
use crate::widget::traits::{Clickable, Focusable, KeyHandler, Widget};

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// An interactive button widget with a centered label.
///
/// Buttons can receive focus (unless disabled). The label is rendered centered
/// both horizontally and vertically within the available region. With a
/// focus signal the focused button is drawn reversed; with a hover signal
/// the hovered button is drawn bold. Both are matched by id, so the styling
/// survives a rebuild that replaces the button.
///
/// # Examples
///
/// ```
/// use trellis_tui::widgets::Button;
///
/// let btn = Button::new("submit", "Submit").on_press(|cx| cx.request_quit());
/// assert_eq!(btn.label(), "Submit");
/// ```
#[derive(Clone)]
pub struct Button {
    id: String,
    label: String,
    disabled: bool,
    style: CellStyle,
    box_style: BoxStyle,
    on_press: Option<ActionFn>,
    focus: Option<AnySignal<Option<String>>>,
    hover: Option<Signal<Option<String>>>,
}

impl Button {
    /// Create a new button with the given id and label.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            disabled: false,
            style: CellStyle::default(),
            box_style: BoxStyle::default(),
            on_press: None,
            focus: None,
            hover: None,
        }
    }

    /// Action run when the button is pressed (builder).
    pub fn on_press(mut self, f: impl Fn(&mut EventContext<'_>) + Send + Sync + 'static) -> Self {
        self.on_press = Some(Arc::new(f));
        self
    }

    /// Set whether the button is disabled (builder pattern).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Base cell style (builder).
    pub fn style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    /// Sizing and box-model properties (builder).
    pub fn box_style(mut self, box_style: BoxStyle) -> Self {
        self.box_style = box_style;
        self
    }

    /// Draw focus from the app's focused-id signal (builder).
    pub fn focus_signal(mut self, focus: AnySignal<Option<String>>) -> Self {
        self.focus = Some(focus);
        self
    }

    /// Draw hover from the app's hovered-id signal (builder).
    pub fn hover_signal(mut self, hover: Signal<Option<String>>) -> Self {
        self.hover = Some(hover);
        self
    }

    /// Return the button label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the button is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the pointer is over the button.
    pub fn is_hovered(&self) -> bool {
        self.hover
            .as_ref()
            .is_some_and(|h| h.peek_with(|id| id.as_deref() == Some(self.id.as_str())))
    }

    fn is_focused(&self) -> bool {
        self.focus
            .as_ref()
            .is_some_and(|f| f.peek_with(|id| id.as_deref() == Some(self.id.as_str())))
    }

    fn press(&self, cx: &mut EventContext<'_>) {
        if self.disabled {
            return;
        }
        if let Some(f) = &self.on_press {
            f(cx);
        }
    }

    fn current_style(&self) -> CellStyle {
        let mut style = self.style.clone();
        if self.is_focused() {
            style.reverse = !style.reverse;
        }
        if self.is_hovered() {
            style.bold = true;
        }
        if self.disabled {
            style.dim = true;
        }
        style
    }
}

impl Widget for Button {
    fn widget_type(&self) -> &str {
        "Button"
    }

    fn layout_kind(&self) -> LayoutKind {
        let width = self.label.chars().count() as i32 + 4;
        LayoutKind::Leaf { content: Size::new(width, 1) }
    }

    fn box_style(&self) -> BoxStyle {
        self.box_style
    }

    fn render(&self, area: Rect) -> Vec<Strip> {
        let region = area.shrink(self.box_style.insets());
        if region.width <= 0 || region.height <= 0 {
            return Vec::new();
        }

        let style = self.current_style();
        let width = region.width as usize;
        let label_row = region.height / 2;

        let label: String = self.label.chars().take(width).collect();
        let pad_left = width.saturating_sub(label.chars().count()) / 2;

        (0..region.height)
            .map(|row| {
                let mut strip = Strip::new(region.y + row, region.x);
                if row == label_row {
                    for _ in 0..pad_left {
                        strip.push(' ', style.clone());
                    }
                    strip.push_str(&label, style.clone());
                }
                strip.fill(region.width, style.clone());
                strip
            })
            .collect()
    }

    fn widget_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn as_focusable(&self) -> Option<&dyn Focusable> {
        (!self.disabled).then_some(self as &dyn Focusable)
    }

    fn as_clickable(&self) -> Option<&dyn Clickable> {
        Some(self)
    }

    fn as_key_handler(&self) -> Option<&dyn KeyHandler> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Focusable for Button {}

impl Clickable for Button {
    fn on_click(&self, _event: &ClickEvent, cx: &mut EventContext<'_>) {
        self.press(cx);
    }
}

impl KeyHandler for Button {
    fn on_key(&self, event: &KeyEvent, cx: &mut EventContext<'_>) -> bool {
        match event.code {
            Key::Enter | Key::Char(' ') if event.modifiers.is_empty() => {
                self.press(cx);
                true
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationController;
    use crate::event::input::{Modifiers, MouseButton};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(id: &str) -> (Button, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let btn = Button::new(id, "OK").on_press(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        (btn, hits)
    }

    fn click() -> ClickEvent {
        ClickEvent { count: 1, button: MouseButton::Left, x: 0, y: 0, modifiers: Modifiers::NONE }
    }

    fn row_text(strip: &Strip) -> String {
        strip.cells.iter().map(|c| c.ch).collect()
    }

    // -----------------------------------------------------------------------
    // Basics
    // -----------------------------------------------------------------------

    #[test]
    fn widget_type_and_id() {
        let btn = Button::new("ok", "OK");
        assert_eq!(btn.widget_type(), "Button");
        assert_eq!(btn.widget_id(), Some("ok"));
    }

    #[test]
    fn disabled_is_not_focusable() {
        assert!(Button::new("a", "A").as_focusable().is_some());
        assert!(Button::new("a", "A").disabled(true).as_focusable().is_none());
    }

    #[test]
    fn content_is_label_plus_padding() {
        assert_eq!(
            Button::new("b", "Save").layout_kind(),
            LayoutKind::Leaf { content: Size::new(8, 1) }
        );
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    #[test]
    fn label_is_centered() {
        let strips = Button::new("b", "OK").render(Rect::new(0, 0, 6, 3));
        assert_eq!(strips.len(), 3);
        assert_eq!(row_text(&strips[0]), "      ");
        assert_eq!(row_text(&strips[1]), "  OK  ");
    }

    #[test]
    fn focused_button_is_reversed() {
        let focus = AnySignal::new(None);
        let btn = Button::new("b", "OK").focus_signal(focus.clone());
        assert!(!btn.render(Rect::new(0, 0, 4, 1))[0].cells[0].style.reverse);
        focus.set(Some("b".to_owned()));
        assert!(btn.render(Rect::new(0, 0, 4, 1))[0].cells[0].style.reverse);
    }

    // -----------------------------------------------------------------------
    // Interaction
    // -----------------------------------------------------------------------

    #[test]
    fn click_and_keys_press() {
        let (btn, hits) = counting("b");
        let mut animations = AnimationController::new(60);
        let mut cx = EventContext::new(&mut animations);

        btn.on_click(&click(), &mut cx);
        assert!(btn.on_key(&KeyEvent::plain(Key::Enter), &mut cx));
        assert!(btn.on_key(&KeyEvent::plain(Key::Char(' ')), &mut cx));
        assert!(!btn.on_key(&KeyEvent::plain(Key::Char('x')), &mut cx));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn disabled_button_ignores_presses() {
        let (btn, hits) = counting("b");
        let btn = btn.disabled(true);
        let mut animations = AnimationController::new(60);
        let mut cx = EventContext::new(&mut animations);
        btn.on_click(&click(), &mut cx);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn hover_signal_bolds_matching_id() {
        let hover = Signal::new(None);
        let btn = Button::new("b", "OK").hover_signal(hover.clone());
        assert!(!btn.is_hovered());
        hover.set(Some("b".to_owned()));
        assert!(btn.is_hovered());
        assert!(btn.render(Rect::new(0, 0, 4, 1))[0].cells[0].style.bold);

        let rebuilt = Button::new("b", "OK").hover_signal(hover.clone());
        assert!(rebuilt.is_hovered());
        hover.set(Some("other".to_owned()));
        assert!(!btn.is_hovered());
    }
}
