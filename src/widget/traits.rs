//! Widget trait and capability interfaces.
//!
//! The `Widget` trait is the core abstraction for all UI elements. A widget
//! is either a *composite*, which builds another widget from reactive state,
//! or a *primitive*, which declares its layout, children and rendering.
//!
//! Interactive behaviour is opt-in through capability traits. A widget
//! advertises a capability by overriding the matching `as_*` accessor; the
//! runtime only ever dispatches through those accessors and treats a `None`
//! as "does nothing".

use std::any::Any;
use std::sync::Arc;

use crate::event::binding::Keybind;
use crate::event::context::{ClickEvent, EventContext, ScrollEvent};
use crate::event::hover::HoverEvent;
use crate::event::input::KeyEvent;
use crate::geometry::{Rect, Size};
use crate::layout::{BoxStyle, LayoutKind};
use crate::reactive::BuildContext;
use crate::render::strip::Strip;

/// Shared, immutable handle to a widget.
pub type WidgetRef = Arc<dyn Widget>;

// ---------------------------------------------------------------------------
// Widget trait
// ---------------------------------------------------------------------------

/// Core trait implemented by all widgets.
///
/// Widgets are immutable values shared between the widget tree, the layout
/// pass and the hit-test registry. Mutable state lives in signals.
pub trait Widget: Send + Sync {
    /// The type name for this widget (e.g. "Button", "Column").
    fn widget_type(&self) -> &str;

    /// Produce the widget this one stands for.
    ///
    /// Returning `Some` makes this a composite: it is transparent to layout
    /// and the returned widget takes its place. Signals read through `ctx`
    /// mark this widget for rebuild when they change.
    fn build(&self, _ctx: &BuildContext<'_>) -> Option<WidgetRef> {
        None
    }

    /// Direct children of a primitive, in document order.
    fn children(&self) -> Vec<WidgetRef> {
        Vec::new()
    }

    /// How this widget arranges its children.
    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Leaf { content: Size::ZERO }
    }

    /// Sizing and box-model properties.
    fn box_style(&self) -> BoxStyle {
        BoxStyle::default()
    }

    /// Render this widget into strips covering `area` (absolute cells).
    fn render(&self, _area: Rect) -> Vec<Strip> {
        Vec::new()
    }

    /// Stable identifier used for focus, hover and lookup.
    fn widget_id(&self) -> Option<&str> {
        None
    }

    /// Focus trap opened by this widget. Focusables beneath it are scoped
    /// to this trap id.
    fn focus_trap(&self) -> Option<&str> {
        None
    }

    /// Key bindings active while this widget is mounted.
    fn keybinds(&self) -> Vec<Keybind> {
        Vec::new()
    }

    fn as_focusable(&self) -> Option<&dyn Focusable> {
        None
    }

    fn as_clickable(&self) -> Option<&dyn Clickable> {
        None
    }

    fn as_hoverable(&self) -> Option<&dyn Hoverable> {
        None
    }

    fn as_key_handler(&self) -> Option<&dyn KeyHandler> {
        None
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Can hold keyboard focus. Focusable widgets need a `widget_id`.
pub trait Focusable {
    fn on_focus(&self, _cx: &mut EventContext<'_>) {}

    fn on_blur(&self, _cx: &mut EventContext<'_>) {}
}

/// Receives mouse presses, releases and wheel steps.
pub trait Clickable {
    fn on_click(&self, event: &ClickEvent, cx: &mut EventContext<'_>);

    fn on_release(&self, _event: &ClickEvent, _cx: &mut EventContext<'_>) {}

    fn on_scroll(&self, _event: &ScrollEvent, _cx: &mut EventContext<'_>) {}
}

/// Receives pointer enter/leave transitions.
pub trait Hoverable {
    fn on_hover(&self, event: &HoverEvent, cx: &mut EventContext<'_>);
}

/// Receives key presses while focused. Returns whether the key was consumed.
pub trait KeyHandler {
    fn on_key(&self, event: &KeyEvent, cx: &mut EventContext<'_>) -> bool;
}

// ---------------------------------------------------------------------------
// WidgetExt
// ---------------------------------------------------------------------------

/// Extension trait providing builder-style convenience methods for widgets.
///
/// Automatically implemented for all types that implement `Widget`.
pub trait WidgetExt: Widget + Sized + 'static {
    /// Attach a stable id to a widget that has none of its own.
    fn with_id(self, id: impl Into<String>) -> WithId<Self> {
        WithId { widget: self, id: id.into() }
    }

    /// Move into a shared [`WidgetRef`].
    fn into_ref(self) -> WidgetRef {
        Arc::new(self)
    }
}

impl<T: Widget + 'static> WidgetExt for T {}

// ---------------------------------------------------------------------------
// WithId
// ---------------------------------------------------------------------------

/// A widget wrapped with an id. Delegates everything else to the inner widget.
#[derive(Debug)]
pub struct WithId<W> {
    pub widget: W,
    pub id: String,
}

impl<W: Widget + 'static> Widget for WithId<W> {
    fn widget_type(&self) -> &str {
        self.widget.widget_type()
    }

    fn build(&self, ctx: &BuildContext<'_>) -> Option<WidgetRef> {
        self.widget.build(ctx)
    }

    fn children(&self) -> Vec<WidgetRef> {
        self.widget.children()
    }

    fn layout_kind(&self) -> LayoutKind {
        self.widget.layout_kind()
    }

    fn box_style(&self) -> BoxStyle {
        self.widget.box_style()
    }

    fn render(&self, area: Rect) -> Vec<Strip> {
        self.widget.render(area)
    }

    fn widget_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn focus_trap(&self) -> Option<&str> {
        self.widget.focus_trap()
    }

    fn keybinds(&self) -> Vec<Keybind> {
        self.widget.keybinds()
    }

    fn as_focusable(&self) -> Option<&dyn Focusable> {
        self.widget.as_focusable()
    }

    fn as_clickable(&self) -> Option<&dyn Clickable> {
        self.widget.as_clickable()
    }

    fn as_hoverable(&self) -> Option<&dyn Hoverable> {
        self.widget.as_hoverable()
    }

    fn as_key_handler(&self) -> Option<&dyn KeyHandler> {
        self.widget.as_key_handler()
    }

    fn as_any(&self) -> &dyn Any {
        self.widget.as_any()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
