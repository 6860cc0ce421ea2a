//! Headless testing: Pilot, snapshot helpers, an in-memory terminal.
//!
//! Use the [`Pilot`] to drive an [`App`](crate::app::App) without a real
//! terminal, [`render_to_string`] to capture a widget as plain text, and
//! [`MockTerminal`] to run the async loop end to end.

pub mod pilot;
pub mod snapshot;
pub mod terminal;

pub use pilot::Pilot;
pub use snapshot::{render_to_string, strips_to_string};
pub use terminal::MockTerminal;
