//! Widget system: trait and capabilities, retained tree, resolved elements.

pub mod element;
pub mod traits;
pub mod tree;

pub use element::Element;
pub use traits::{Clickable, Focusable, Hoverable, KeyHandler, Widget, WidgetExt, WidgetRef, WithId};
pub use tree::{NodeId, WidgetTree};
