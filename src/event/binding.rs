//! Key binding registry and resolution.
//!
//! [`KeyBindingRegistry`] maps key+modifier combinations to [`BindingAction`]s
//! at the application level. Widgets declare their own [`Keybind`]s, which
//! the app consults before falling back to this registry.
//! The `with_defaults()` constructor installs standard bindings (Ctrl+C -> Quit, etc.).

use std::collections::HashMap;
use std::sync::Arc;

use super::context::EventContext;
use super::input::{Key, KeyEvent, Modifiers};

/// Callback invoked when a binding fires.
pub type ActionFn = Arc<dyn Fn(&mut EventContext<'_>) + Send + Sync>;

// ---------------------------------------------------------------------------
// BindingAction
// ---------------------------------------------------------------------------

/// Action to take when a key binding is matched.
#[derive(Clone)]
pub enum BindingAction {
    /// Quit the application.
    Quit,
    /// Move focus to the next focusable widget.
    FocusNext,
    /// Move focus to the previous focusable widget.
    FocusPrevious,
    /// Run a callback against the event context.
    Callback(ActionFn),
}

impl BindingAction {
    /// Wrap a closure as a callback action.
    pub fn callback(f: impl Fn(&mut EventContext<'_>) + Send + Sync + 'static) -> Self {
        Self::Callback(Arc::new(f))
    }

    /// Apply the action to `cx`.
    pub fn run(&self, cx: &mut EventContext<'_>) {
        match self {
            Self::Quit => cx.request_quit(),
            Self::FocusNext => cx.focus_next(),
            Self::FocusPrevious => cx.focus_previous(),
            Self::Callback(f) => f(cx),
        }
    }
}

impl std::fmt::Debug for BindingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quit => write!(f, "Quit"),
            Self::FocusNext => write!(f, "FocusNext"),
            Self::FocusPrevious => write!(f, "FocusPrevious"),
            Self::Callback(_) => write!(f, "Callback(<fn>)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Keybind
// ---------------------------------------------------------------------------

/// A binding declared by a widget, active while the widget is mounted.
#[derive(Debug, Clone)]
pub struct Keybind {
    pub key: Key,
    pub modifiers: Modifiers,
    pub description: String,
    pub action: BindingAction,
}

impl Keybind {
    pub fn new(key: Key, modifiers: Modifiers, description: impl Into<String>, action: BindingAction) -> Self {
        Self { key, modifiers, description: description.into(), action }
    }

    /// Whether this binding fires for `event`.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key == event.code && self.modifiers == event.modifiers
    }
}

// ---------------------------------------------------------------------------
// KeyBindingRegistry
// ---------------------------------------------------------------------------

/// Registry of key bindings, mapping (Key, Modifiers) -> BindingAction.
#[derive(Debug)]
pub struct KeyBindingRegistry {
    bindings: HashMap<(Key, Modifiers), BindingAction>,
}

impl KeyBindingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a registry with standard default bindings.
    ///
    /// Defaults:
    /// - `Ctrl+C` -> Quit
    /// - `Tab` -> FocusNext
    /// - `BackTab` (Shift+Tab) -> FocusPrevious
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.bind(Key::Char('c'), Modifiers::CTRL, BindingAction::Quit);
        registry.bind(Key::Tab, Modifiers::NONE, BindingAction::FocusNext);
        registry.bind(
            Key::BackTab,
            Modifiers::NONE,
            BindingAction::FocusPrevious,
        );
        registry
    }

    /// Register a key binding.
    ///
    /// If a binding already exists for this key+modifier combination, it is replaced.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: BindingAction) {
        self.bindings.insert((key, modifiers), action);
    }

    /// Remove a key binding.
    ///
    /// Returns the removed action, if any.
    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<BindingAction> {
        self.bindings.remove(&(key, modifiers))
    }

    /// Look up the action for a given key event (exact key + modifiers).
    pub fn resolve(&self, event: &KeyEvent) -> Option<&BindingAction> {
        self.bindings.get(&(event.code, event.modifiers))
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
