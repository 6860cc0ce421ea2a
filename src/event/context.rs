//! Per-dispatch context handed to widget event handlers.
//!
//! Handlers cannot reach the [`App`](crate::app::App) directly. They record
//! requests (quit, move focus) on an [`EventContext`], which the app applies
//! once the handler returns, and they may start animations through it.

use crate::animation::{AnimationController, AnimationHandle, Animator};
use crate::event::input::{Modifiers, MouseButton};

// ---------------------------------------------------------------------------
// Pointer events delivered to widgets
// ---------------------------------------------------------------------------

/// A mouse press or release on a clickable widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// Position in the chain: 1 for a single click, 2 for a double, ...
    pub count: u32,
    pub button: MouseButton,
    /// Column relative to the widget's left edge.
    pub x: i32,
    /// Row relative to the widget's top edge.
    pub y: i32,
    pub modifiers: Modifiers,
}

/// A wheel step over a clickable widget. Negative `delta` scrolls up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollEvent {
    pub delta: i32,
    pub x: i32,
    pub y: i32,
    pub modifiers: Modifiers,
}

// ---------------------------------------------------------------------------
// FocusRequest
// ---------------------------------------------------------------------------

/// A focus change requested by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusRequest {
    Focus(String),
    Next,
    Previous,
    Clear,
}

// ---------------------------------------------------------------------------
// EventContext
// ---------------------------------------------------------------------------

/// Side channel from an event handler back to the app.
pub struct EventContext<'a> {
    animations: &'a mut AnimationController,
    quit: bool,
    focus: Option<FocusRequest>,
}

impl<'a> EventContext<'a> {
    pub fn new(animations: &'a mut AnimationController) -> Self {
        Self { animations, quit: false, focus: None }
    }

    /// Ask the app to exit its run loop.
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Ask for focus to move to the widget with `id`.
    pub fn focus(&mut self, id: impl Into<String>) {
        self.focus = Some(FocusRequest::Focus(id.into()));
    }

    pub fn focus_next(&mut self) {
        self.focus = Some(FocusRequest::Next);
    }

    pub fn focus_previous(&mut self) {
        self.focus = Some(FocusRequest::Previous);
    }

    /// Ask for focus to be cleared.
    pub fn blur(&mut self) {
        self.focus = Some(FocusRequest::Clear);
    }

    /// The last focus request recorded, if any. Later requests replace
    /// earlier ones.
    pub fn take_focus_request(&mut self) -> Option<FocusRequest> {
        self.focus.take()
    }

    /// Register an animation with the app's controller.
    pub fn animate(&mut self, animator: impl Animator + 'static) -> Option<AnimationHandle> {
        self.animations.register(animator)
    }

    /// Cancel a running animation.
    pub fn cancel_animation(&mut self, handle: AnimationHandle) -> bool {
        self.animations.unregister(handle)
    }

    pub fn animations(&mut self) -> &mut AnimationController {
        self.animations
    }
}

impl std::fmt::Debug for EventContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventContext")
            .field("quit", &self.quit)
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}
