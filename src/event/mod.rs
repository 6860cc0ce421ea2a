//! Event system: input, key bindings, hit-testing, focus, hover, clicks.

pub mod binding;
pub mod click;
pub mod context;
pub mod focus;
pub mod hover;
pub mod input;
pub mod registry;

pub use binding::{ActionFn, BindingAction, KeyBindingRegistry, Keybind};
pub use click::{ClickChain, DEFAULT_CLICK_TIMEOUT};
pub use context::{ClickEvent, EventContext, FocusRequest, ScrollEvent};
pub use focus::{FocusCollector, FocusManager, FocusableEntry};
pub use hover::{HoverEvent, HoverKind, HoverTracker};
pub use input::{from_crossterm, InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseButton, MouseEvent};
pub use registry::{WidgetEntry, WidgetRegistry};
