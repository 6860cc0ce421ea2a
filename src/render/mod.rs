//! Rendering: strips, the frame compositor, and the terminal driver.

pub mod compositor;
pub mod driver;
pub mod strip;

pub use compositor::{CellUpdate, Compositor};
pub use driver::{parse_color, Driver, Terminal};
pub use strip::{CellStyle, Strip, StyledCell};
