//! Pointer hover transitions.
//!
//! [`HoverTracker`] remembers which widget id is under the pointer. When the
//! resolved id changes it emits `Leave` for the old widget, publishes the new
//! id into its signal, then emits `Enter` for the new widget. Movement that
//! stays on the same id is silent and does not touch the signal.

use crate::event::input::{Modifiers, MouseButton};
use crate::geometry::Rect;
use crate::reactive::Signal;

// ---------------------------------------------------------------------------
// HoverEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverKind {
    Enter,
    Leave,
}

/// A hover transition delivered to one widget.
///
/// For `Leave`, `previous_widget_id` is the widget being left and
/// `next_widget_id` is empty. For `Enter`, `previous_widget_id` is empty and
/// `next_widget_id` is the widget being entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverEvent {
    pub kind: HoverKind,
    pub widget_id: String,
    pub previous_widget_id: String,
    pub next_widget_id: String,
    /// Pointer column relative to the receiving widget.
    pub x: i32,
    /// Pointer row relative to the receiving widget.
    pub y: i32,
    pub modifiers: Modifiers,
    pub button: Option<MouseButton>,
}

// ---------------------------------------------------------------------------
// HoverTracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Pointer {
    x: i32,
    y: i32,
    modifiers: Modifiers,
    button: Option<MouseButton>,
}

/// Tracks the hovered widget across pointer moves and re-layouts.
#[derive(Debug)]
pub struct HoverTracker {
    hovered: Option<(String, Rect)>,
    pointer: Option<Pointer>,
    signal: Signal<Option<String>>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self { hovered: None, pointer: None, signal: Signal::new(None) }
    }

    /// The shared hovered-id signal.
    pub fn signal(&self) -> Signal<Option<String>> {
        self.signal.clone()
    }

    /// The hovered widget id, if any.
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_ref().map(|(id, _)| id.as_str())
    }

    /// Last known pointer position.
    pub fn pointer(&self) -> Option<(i32, i32)> {
        self.pointer.map(|p| (p.x, p.y))
    }

    /// Process a pointer move to `(x, y)`.
    ///
    /// `resolve` maps a cell to the id and bounds of the widget under it.
    pub fn update(
        &mut self,
        x: i32,
        y: i32,
        modifiers: Modifiers,
        button: Option<MouseButton>,
        resolve: impl Fn(i32, i32) -> Option<(String, Rect)>,
        dispatch: impl FnMut(&HoverEvent),
    ) {
        self.pointer = Some(Pointer { x, y, modifiers, button });
        let target = resolve(x, y);
        self.transition(target, dispatch);
    }

    /// Re-resolve at the last pointer position after bounds moved.
    pub fn reconcile(
        &mut self,
        resolve: impl Fn(i32, i32) -> Option<(String, Rect)>,
        dispatch: impl FnMut(&HoverEvent),
    ) {
        let Some(p) = self.pointer else {
            return;
        };
        let target = resolve(p.x, p.y);
        self.transition(target, dispatch);
    }

    fn transition(&mut self, target: Option<(String, Rect)>, mut dispatch: impl FnMut(&HoverEvent)) {
        let old_id = self.hovered.as_ref().map(|(id, _)| id.as_str());
        let new_id = target.as_ref().map(|(id, _)| id.as_str());
        if old_id == new_id {
            self.hovered = target;
            return;
        }
        tracing::trace!(from = ?old_id, to = ?new_id, "hover moved");

        let p = self.pointer.unwrap_or(Pointer { x: 0, y: 0, modifiers: Modifiers::NONE, button: None });
        if let Some((old, bounds)) = self.hovered.take() {
            dispatch(&HoverEvent {
                kind: HoverKind::Leave,
                widget_id: old.clone(),
                previous_widget_id: old,
                next_widget_id: String::new(),
                x: p.x - bounds.x,
                y: p.y - bounds.y,
                modifiers: p.modifiers,
                button: p.button,
            });
        }

        self.signal.set(target.as_ref().map(|(id, _)| id.clone()));

        if let Some((new, bounds)) = &target {
            dispatch(&HoverEvent {
                kind: HoverKind::Enter,
                widget_id: new.clone(),
                previous_widget_id: String::new(),
                next_widget_id: new.clone(),
                x: p.x - bounds.x,
                y: p.y - bounds.y,
                modifiers: p.modifiers,
                button: p.button,
            });
        }
        self.hovered = target;
    }
}

impl Default for HoverTracker {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
