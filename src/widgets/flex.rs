//! Flex widget: a row or column of child widgets.
//!
//! Flex renders nothing of its own apart from an optional background fill
//! and a line frame over its border insets. Sizing of the children is left
//! to the layout engine's linear distribution.

use std::any::Any;

use crate::geometry::Rect;
use crate::layout::{Axis, BoxStyle, LayoutKind};
use crate::render::strip::{CellStyle, Strip};
use crate::widget::traits::{Widget, WidgetRef};

use super::{fill_strips, frame_strips};

// ---------------------------------------------------------------------------
// Flex
// ---------------------------------------------------------------------------

/// A linear container laying its children out along one axis.
///
/// # Examples
///
/// ```
/// use trellis_tui::widgets::{Flex, Label};
///
/// let column = Flex::column()
///     .child(Label::new("first"))
///     .child(Label::new("second"))
///     .spacing(1);
/// assert_eq!(column.child_count(), 2);
/// ```
#[derive(Clone)]
pub struct Flex {
    axis: Axis,
    spacing: i32,
    children: Vec<WidgetRef>,
    style: BoxStyle,
    background: Option<CellStyle>,
    frame: CellStyle,
}

impl Flex {
    /// An empty container along `axis`.
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            spacing: 0,
            children: Vec::new(),
            style: BoxStyle::default(),
            background: None,
            frame: CellStyle::default(),
        }
    }

    /// Children stacked top to bottom.
    pub fn column() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Children placed left to right.
    pub fn row() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// Add a child widget (builder).
    pub fn child(self, child: impl Widget + 'static) -> Self {
        self.child_ref(std::sync::Arc::new(child))
    }

    /// Add an already shared child (builder).
    pub fn child_ref(mut self, child: WidgetRef) -> Self {
        self.children.push(child);
        self
    }

    /// Add several shared children (builder).
    pub fn children(mut self, children: impl IntoIterator<Item = WidgetRef>) -> Self {
        self.children.extend(children);
        self
    }

    /// Cells between consecutive children (builder).
    pub fn spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sizing and box-model properties (builder).
    pub fn style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    /// Fill the whole box with `style` before children draw (builder).
    pub fn background(mut self, style: CellStyle) -> Self {
        self.background = Some(style);
        self
    }

    /// Style of the frame drawn over border insets (builder).
    pub fn frame_style(mut self, style: CellStyle) -> Self {
        self.frame = style;
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

impl Widget for Flex {
    fn widget_type(&self) -> &str {
        match self.axis {
            Axis::Horizontal => "Row",
            Axis::Vertical => "Column",
        }
    }

    fn children(&self) -> Vec<WidgetRef> {
        self.children.clone()
    }

    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Linear { axis: self.axis, spacing: self.spacing }
    }

    fn box_style(&self) -> BoxStyle {
        self.style
    }

    fn render(&self, area: Rect) -> Vec<Strip> {
        let mut strips = match &self.background {
            Some(bg) => fill_strips(area, bg),
            None => Vec::new(),
        };
        strips.extend(frame_strips(area, self.style.resolved_border(), &self.frame));
        strips
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for Flex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flex")
            .field("axis", &self.axis)
            .field("spacing", &self.spacing)
            .field("children", &self.children.len())
            .field("style", &self.style)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
