//! Multi-click detection.

use std::time::{Duration, Instant};

use crate::event::input::MouseButton;

/// Default window between presses of one chain.
pub const DEFAULT_CLICK_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
struct LastClick {
    target: String,
    button: MouseButton,
    x: i32,
    y: i32,
    at: Instant,
    count: u32,
}

/// Groups presses on the same target, button and cell into click chains.
#[derive(Debug, Clone)]
pub struct ClickChain {
    timeout: Duration,
    last: Option<LastClick>,
}

impl ClickChain {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout, last: None }
    }

    /// Record a press and return its position in the chain (1 = single).
    ///
    /// The chain continues only when target, button and position match the
    /// previous press and it arrived within the timeout.
    pub fn next_click(&mut self, target: &str, button: MouseButton, x: i32, y: i32, at: Instant) -> u32 {
        let count = match &self.last {
            Some(last)
                if last.target == target
                    && last.button == button
                    && (last.x, last.y) == (x, y)
                    && at.saturating_duration_since(last.at) <= self.timeout =>
            {
                last.count.saturating_add(1)
            }
            _ => 1,
        };
        tracing::trace!(widget = target, count, "click");
        self.last = Some(LastClick { target: target.to_owned(), button, x, y, at, count });
        count
    }

    /// Chain count for a release. A release that does not match the last
    /// press is reported as a single click.
    pub fn release_count(&self, target: &str, button: MouseButton) -> u32 {
        match &self.last {
            Some(last) if last.target == target && last.button == button => last.count,
            _ => 1,
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for ClickChain {
    fn default() -> Self {
        Self::new(DEFAULT_CLICK_TIMEOUT)
    }
}
