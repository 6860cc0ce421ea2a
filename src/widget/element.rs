//! Resolved element tree handed to layout and rendering.

use crate::layout::{BoxStyle, LayoutKind, LayoutNode};

use super::traits::WidgetRef;

/// A primitive widget with its resolved children.
///
/// Composites never appear as elements. Each element records the chain of
/// composites that built it in `owners`, outermost first; they share the
/// element's bounds for hit-testing and their focus traps apply to it.
#[derive(Clone)]
pub struct Element {
    pub widget: WidgetRef,
    pub owners: Vec<WidgetRef>,
    pub children: Vec<Element>,
    style: BoxStyle,
    kind: LayoutKind,
}

impl Element {
    pub fn new(widget: WidgetRef, owners: Vec<WidgetRef>, children: Vec<Element>) -> Self {
        let style = widget.box_style();
        let kind = widget.layout_kind();
        Self { widget, owners, children, style, kind }
    }

    /// Total number of elements in this subtree.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Element::count).sum::<usize>()
    }
}

impl LayoutNode for Element {
    fn box_style(&self) -> BoxStyle {
        self.style
    }

    fn layout_kind(&self) -> &LayoutKind {
        &self.kind
    }

    fn layout_children(&self) -> &[Self] {
        &self.children
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let owners: Vec<&str> = self.owners.iter().map(|w| w.widget_type()).collect();
        f.debug_struct("Element")
            .field("widget", &self.widget.widget_type())
            .field("owners", &owners)
            .field("kind", &self.kind)
            .field("children", &self.children)
            .finish()
    }
}
