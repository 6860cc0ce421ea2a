//! Reactive state: signals and the dirty-tracking build engine.
//!
//! - [`Signal`]: equality-gated reactive cell.
//! - [`AnySignal`]: reactive cell that notifies on every write.
//! - [`BuildContext`]: the node being built, passed explicitly to reads.
//! - [`WidgetNode`]: cached build result, rebuilt only when dirty.

pub mod build;
pub mod signal;

pub use build::{BuildContext, NodeHandle, WidgetNode};
pub use signal::{AnySignal, Signal};
