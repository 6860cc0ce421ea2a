//! Time-driven animation: a shared frame ticker and tweened values.

pub mod controller;
pub mod tween;

pub use controller::{AnimationController, AnimationHandle, Animator};
pub use tween::{ease_in, ease_in_out, ease_out, linear, Animation, AnimationState, EasingFn, Tween};
