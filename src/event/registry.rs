//! Spatial hit-test registry.
//!
//! The render pass appends one [`WidgetEntry`] per drawn widget in
//! depth-first order, parents before children. Index order is z-order:
//! a later entry is drawn on top of an earlier one.

use crate::geometry::Rect;
use crate::widget::traits::{Widget, WidgetRef};

/// A widget drawn during the last render pass and where it was drawn.
#[derive(Clone)]
pub struct WidgetEntry {
    pub widget: WidgetRef,
    pub id: Option<String>,
    pub bounds: Rect,
}

impl std::fmt::Debug for WidgetEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetEntry")
            .field("widget", &self.widget.widget_type())
            .field("id", &self.id)
            .field("bounds", &self.bounds)
            .finish()
    }
}

/// Widgets of the current frame in render order.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    entries: Vec<WidgetEntry>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame. Capacity is kept.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Record `widget` as drawn at `bounds`, on top of everything so far.
    pub fn push(&mut self, widget: WidgetRef, bounds: Rect) {
        let id = widget.widget_id().map(str::to_owned);
        self.entries.push(WidgetEntry { widget, id, bounds });
    }

    /// Topmost entry containing `(x, y)`.
    pub fn widget_at(&self, x: i32, y: i32) -> Option<&WidgetEntry> {
        self.widget_at_where(x, y, |_| true)
    }

    /// Topmost entry containing `(x, y)` whose widget satisfies `pred`.
    pub fn widget_at_where(
        &self,
        x: i32,
        y: i32,
        pred: impl Fn(&dyn Widget) -> bool,
    ) -> Option<&WidgetEntry> {
        self.position_where(x, y, pred).map(|i| &self.entries[i])
    }

    /// Index of the topmost entry containing `(x, y)` that satisfies `pred`.
    pub fn position_where(&self, x: i32, y: i32, pred: impl Fn(&dyn Widget) -> bool) -> Option<usize> {
        self.entries
            .iter()
            .rposition(|e| e.bounds.contains(x, y) && pred(e.widget.as_ref()))
    }

    /// First entry with the given id.
    pub fn widget_by_id(&self, id: &str) -> Option<&WidgetEntry> {
        self.entries.iter().find(|e| e.id.as_deref() == Some(id))
    }

    pub fn entries(&self) -> &[WidgetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::sync::Arc;

    struct Probe {
        id: Option<&'static str>,
        clickable: bool,
    }

    impl Widget for Probe {
        fn widget_type(&self) -> &str {
            "Probe"
        }

        fn widget_id(&self) -> Option<&str> {
            self.id
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn probe(id: &'static str) -> WidgetRef {
        Arc::new(Probe { id: Some(id), clickable: false })
    }

    fn sample() -> WidgetRegistry {
        let mut reg = WidgetRegistry::new();
        reg.push(probe("a"), Rect::new(0, 0, 5, 5));
        reg.push(probe("b"), Rect::new(10, 0, 5, 5));
        reg.push(probe("c"), Rect::new(20, 0, 5, 5));
        reg.push(probe("over"), Rect::new(3, 3, 4, 4));
        reg
    }

    fn hit(reg: &WidgetRegistry, x: i32, y: i32) -> Option<&str> {
        reg.widget_at(x, y).and_then(|e| e.id.as_deref())
    }

    // ── Hit testing ──────────────────────────────────────────────────

    #[test]
    fn disjoint_bounds_resolve_to_owner() {
        let reg = sample();
        assert_eq!(hit(&reg, 0, 0), Some("a"));
        assert_eq!(hit(&reg, 12, 2), Some("b"));
        assert_eq!(hit(&reg, 24, 4), Some("c"));
    }

    #[test]
    fn overlap_resolves_to_later_entry() {
        let reg = sample();
        assert_eq!(hit(&reg, 4, 4), Some("over"));
        assert_eq!(hit(&reg, 3, 3), Some("over"));
        assert_eq!(hit(&reg, 2, 2), Some("a"));
    }

    #[test]
    fn outside_everything_is_none() {
        let reg = sample();
        assert_eq!(hit(&reg, 8, 0), None);
        assert_eq!(hit(&reg, 5, 0), None);
        assert_eq!(hit(&reg, -1, 0), None);
    }

    #[test]
    fn predicate_skips_to_lower_entries() {
        let mut reg = WidgetRegistry::new();
        reg.push(Arc::new(Probe { id: Some("base"), clickable: true }), Rect::new(0, 0, 10, 10));
        reg.push(probe("label"), Rect::new(0, 0, 10, 10));

        let clickable = |w: &dyn Widget| {
            w.as_any().downcast_ref::<Probe>().is_some_and(|p| p.clickable)
        };
        let entry = reg.widget_at_where(1, 1, clickable).unwrap();
        assert_eq!(entry.id.as_deref(), Some("base"));
        assert_eq!(reg.position_where(1, 1, clickable), Some(0));
    }

    // ── Lookup ───────────────────────────────────────────────────────

    #[test]
    fn by_id_is_first_match() {
        let mut reg = sample();
        reg.push(probe("a"), Rect::new(50, 50, 1, 1));
        assert_eq!(reg.widget_by_id("a").unwrap().bounds, Rect::new(0, 0, 5, 5));
        assert!(reg.widget_by_id("zzz").is_none());
    }

    #[test]
    fn reset_truncates() {
        let mut reg = sample();
        assert_eq!(reg.len(), 4);
        reg.reset();
        assert!(reg.is_empty());
        assert!(reg.widget_at(0, 0).is_none());
    }
}
