//! Keyboard focus with trap-scoped tab order.
//!
//! [`FocusCollector`] gathers focusable widgets during the render walk,
//! stamping each with the innermost open focus trap. [`FocusManager`] holds
//! the resulting tab order and the focused id.
//!
//! Traps are matched by id equality only. While the focused entry belongs to
//! a trap, Tab and Shift+Tab cycle among that trap's members and nothing
//! else; otherwise they cycle the whole list.

use crate::widget::traits::WidgetRef;

// ---------------------------------------------------------------------------
// FocusableEntry
// ---------------------------------------------------------------------------

/// One focusable widget in tab order. `trap_id` is empty outside any trap.
#[derive(Clone)]
pub struct FocusableEntry {
    pub id: String,
    pub widget: WidgetRef,
    pub trap_id: String,
}

impl std::fmt::Debug for FocusableEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusableEntry")
            .field("id", &self.id)
            .field("widget", &self.widget.widget_type())
            .field("trap_id", &self.trap_id)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// FocusCollector
// ---------------------------------------------------------------------------

/// Builds the tab order during a depth-first walk.
#[derive(Debug, Default)]
pub struct FocusCollector {
    traps: Vec<String>,
    entries: Vec<FocusableEntry>,
}

impl FocusCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a focus trap. Must be balanced by [`pop_trap`](Self::pop_trap).
    pub fn push_trap(&mut self, trap_id: impl Into<String>) {
        self.traps.push(trap_id.into());
    }

    pub fn pop_trap(&mut self) {
        self.traps.pop();
    }

    /// The innermost open trap, or `""`.
    pub fn current_trap(&self) -> &str {
        self.traps.last().map(String::as_str).unwrap_or("")
    }

    /// Append a focusable under the current trap.
    pub fn collect(&mut self, widget: WidgetRef, id: impl Into<String>) {
        let trap_id = self.current_trap().to_owned();
        self.entries.push(FocusableEntry { id: id.into(), widget, trap_id });
    }

    /// The collected tab order.
    pub fn finish(self) -> Vec<FocusableEntry> {
        self.entries
    }
}

// ---------------------------------------------------------------------------
// FocusManager
// ---------------------------------------------------------------------------

/// Tab order and current focus.
#[derive(Debug, Default)]
pub struct FocusManager {
    entries: Vec<FocusableEntry>,
    focused: Option<String>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tab order wholesale.
    ///
    /// Focus is kept if its id is still present and cleared otherwise.
    pub fn set_focusables(&mut self, entries: Vec<FocusableEntry>) {
        self.entries = entries;
        if let Some(id) = &self.focused {
            if !self.entries.iter().any(|e| &e.id == id) {
                tracing::debug!(from = %id, "focused widget unmounted");
                self.focused = None;
            }
        }
    }

    pub fn focusables(&self) -> &[FocusableEntry] {
        &self.entries
    }

    /// The focused id, if any.
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// The focused entry, if any.
    pub fn focused_entry(&self) -> Option<&FocusableEntry> {
        let id = self.focused.as_deref()?;
        self.entries.iter().find(|e| e.id == id)
    }

    /// Focus `id`. Unknown ids are rejected and focus is left unchanged.
    pub fn request_focus(&mut self, id: &str) -> bool {
        if !self.entries.iter().any(|e| e.id == id) {
            tracing::debug!(to = id, "focus request for unknown id");
            return false;
        }
        self.set(Some(id.to_owned()));
        true
    }

    /// Move focus forward, wrapping. Returns the new focus.
    pub fn focus_next(&mut self) -> Option<&str> {
        self.step(true)
    }

    /// Move focus backward, wrapping. Returns the new focus.
    pub fn focus_previous(&mut self) -> Option<&str> {
        self.step(false)
    }

    /// Drop focus.
    pub fn clear(&mut self) {
        self.set(None);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn step(&mut self, forward: bool) -> Option<&str> {
        let trap = self.focused_entry().map(|e| e.trap_id.clone()).unwrap_or_default();
        let scope: Vec<&FocusableEntry> = self
            .entries
            .iter()
            .filter(|e| trap.is_empty() || e.trap_id == trap)
            .collect();
        if scope.is_empty() {
            return None;
        }

        let current = self
            .focused
            .as_deref()
            .and_then(|id| scope.iter().position(|e| e.id == id));
        let len = scope.len();
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        let id = scope[next].id.clone();
        self.set(Some(id));
        self.focused.as_deref()
    }

    fn set(&mut self, next: Option<String>) {
        if self.focused != next {
            let trap = next
                .as_deref()
                .and_then(|id| self.entries.iter().find(|e| e.id == id))
                .map(|e| e.trap_id.as_str())
                .unwrap_or("");
            tracing::debug!(from = ?self.focused, to = ?next, trap, "focus moved");
        }
        self.focused = next;
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::traits::Widget;
    use std::any::Any;
    use std::sync::Arc;

    struct Dummy;

    impl Widget for Dummy {
        fn widget_type(&self) -> &str {
            "Dummy"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn manager(entries: &[(&str, &str)]) -> FocusManager {
        let mut collector = FocusCollector::new();
        for (id, trap) in entries {
            if trap.is_empty() {
                collector.collect(Arc::new(Dummy), *id);
            } else {
                collector.push_trap(*trap);
                collector.collect(Arc::new(Dummy), *id);
                collector.pop_trap();
            }
        }
        let mut fm = FocusManager::new();
        fm.set_focusables(collector.finish());
        fm
    }

    fn next(fm: &mut FocusManager) -> String {
        fm.focus_next().unwrap_or_default().to_owned()
    }

    // ── Global cycling ───────────────────────────────────────────────

    #[test]
    fn cycles_all_without_traps() {
        let mut fm = manager(&[("a", ""), ("b", ""), ("c", "")]);
        assert!(fm.request_focus("a"));
        assert_eq!(next(&mut fm), "b");
        assert_eq!(next(&mut fm), "c");
        assert_eq!(next(&mut fm), "a");
    }

    #[test]
    fn previous_wraps_backwards() {
        let mut fm = manager(&[("a", ""), ("b", ""), ("c", "")]);
        assert_eq!(fm.focus_previous(), Some("c"));
        assert_eq!(fm.focus_previous(), Some("b"));
        fm.request_focus("a");
        assert_eq!(fm.focus_previous(), Some("c"));
    }

    #[test]
    fn unfocused_next_starts_at_first() {
        let mut fm = manager(&[("a", ""), ("b", "t")]);
        assert_eq!(fm.focus_next(), Some("a"));
    }

    #[test]
    fn empty_manager_has_nothing_to_focus() {
        let mut fm = FocusManager::new();
        assert_eq!(fm.focus_next(), None);
        assert_eq!(fm.focus_previous(), None);
        assert!(fm.focused().is_none());
    }

    // ── Traps ────────────────────────────────────────────────────────

    #[test]
    fn trap_confines_tabbing() {
        let mut fm = manager(&[("a", ""), ("b", "t"), ("c", "t")]);
        fm.request_focus("b");
        assert_eq!(next(&mut fm), "c");
        assert_eq!(next(&mut fm), "b");
        assert_eq!(fm.focus_previous(), Some("c"));
    }

    #[test]
    fn single_member_trap_is_fixed_point() {
        let mut fm = manager(&[("a", ""), ("b", "t"), ("c", "")]);
        fm.request_focus("b");
        assert_eq!(fm.focus_next(), Some("b"));
        assert_eq!(fm.focus_previous(), Some("b"));
    }

    #[test]
    fn nested_traps_scope_by_id() {
        let mut collector = FocusCollector::new();
        collector.push_trap("outer");
        collector.collect(Arc::new(Dummy), "o1");
        collector.push_trap("inner");
        assert_eq!(collector.current_trap(), "inner");
        collector.collect(Arc::new(Dummy), "i1");
        collector.collect(Arc::new(Dummy), "i2");
        collector.pop_trap();
        collector.collect(Arc::new(Dummy), "o2");
        collector.pop_trap();
        assert_eq!(collector.current_trap(), "");

        let mut fm = FocusManager::new();
        fm.set_focusables(collector.finish());

        fm.request_focus("o1");
        assert_eq!(next(&mut fm), "o2");
        assert_eq!(next(&mut fm), "o1");

        fm.request_focus("i2");
        assert_eq!(next(&mut fm), "i1");
        assert_eq!(next(&mut fm), "i2");
    }

    #[test]
    fn programmatic_focus_escapes_trap() {
        let mut fm = manager(&[("a", ""), ("b", "t"), ("c", "t")]);
        fm.request_focus("b");
        assert!(fm.request_focus("a"));
        assert_eq!(next(&mut fm), "b");
    }

    // ── Requests and replacement ─────────────────────────────────────

    #[test]
    fn unknown_request_leaves_focus() {
        let mut fm = manager(&[("a", ""), ("b", "")]);
        fm.request_focus("b");
        assert!(!fm.request_focus("nope"));
        assert_eq!(fm.focused(), Some("b"));
    }

    #[test]
    fn replacement_keeps_surviving_focus() {
        let mut fm = manager(&[("a", ""), ("b", "")]);
        fm.request_focus("b");

        let survivor = manager(&[("b", ""), ("z", "")]).focusables().to_vec();
        fm.set_focusables(survivor);
        assert_eq!(fm.focused(), Some("b"));
        assert_eq!(fm.focused_entry().map(|e| e.id.as_str()), Some("b"));

        let gone = manager(&[("z", "")]).focusables().to_vec();
        fm.set_focusables(gone);
        assert_eq!(fm.focused(), None);
    }

    #[test]
    fn clear_drops_focus() {
        let mut fm = manager(&[("a", "")]);
        fm.request_focus("a");
        fm.clear();
        assert!(fm.focused().is_none());
        assert_eq!(fm.len(), 1);
    }
}
