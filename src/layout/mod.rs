//! Layout engine: dimensions, constraints, flex and grid distribution.

pub mod constraints;
pub mod dimension;
pub mod distribute;
pub mod engine;

pub use constraints::{Axis, Constraints, UNBOUNDED};
pub use dimension::{BoxStyle, Dimension};
pub use distribute::distribute;
pub use engine::{compute_layout, ComputedLayout, GridSpec, LayoutBox, LayoutKind, LayoutNode, PlacedChild};
