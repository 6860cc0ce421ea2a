//! # trellis-tui
//!
//! A reactive, retained-mode widget runtime for interactive terminal
//! applications.
//!
//! Widgets describe a tree. Signals read while a widget builds make that
//! widget rebuild when they change, and nothing else does. Each frame the
//! dirty parts of the tree are rebuilt, the whole tree is laid out by a
//! constraint-based box-model engine, and one walk paints it while recording
//! what input routing needs: hit-test bounds, tab order, focus traps and key
//! bindings.
//!
//! ## Core Systems
//!
//! - **[`geometry`]**: Offset, Size, Rect, Spacing primitives
//! - **[`layout`]**: dimensions, constraints, flex and grid distribution
//! - **[`reactive`]**: `Signal`, `AnySignal`, build contexts and cached nodes
//! - **[`widget`]**: the `Widget` trait, capability traits, the retained tree
//! - **[`widgets`]**: Label, Row/Column, Grid, Button, TrapScope, Component
//! - **[`event`]**: input events, key bindings, hit-testing, focus, hover, clicks
//! - **[`animation`]**: the lazily ticking animation controller and tweens
//! - **[`render`]**: strips, the frame compositor, the crossterm driver
//! - **[`app`]**: the render pass, input routing and the async run loop
//! - **[`testing`]**: headless pilot and snapshot helpers

// Foundation
pub mod error;
pub mod geometry;

// Core systems
pub mod layout;
pub mod reactive;

// Widget system
pub mod widget;
pub mod widgets;

// Events and animation
pub mod animation;
pub mod event;

// Rendering
pub mod render;

// Application
pub mod app;
pub mod testing;

pub use app::{App, AppConfig, CancelToken};
pub use error::{Error, Result};
