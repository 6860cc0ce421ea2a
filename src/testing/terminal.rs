//! In-memory terminal for exercising the run loop.

use tokio::sync::mpsc;

use crate::app::AppConfig;
use crate::error::{Error, Result};
use crate::event::input::InputEvent;
use crate::geometry::Size;
use crate::render::compositor::{CellUpdate, Compositor};
use crate::render::driver::{Terminal, EVENT_BUFFER};

/// A [`Terminal`] that records every call and keeps the presented frame.
///
/// Input is fed through the sender returned by [`MockTerminal::new`].
#[derive(Debug)]
pub struct MockTerminal {
    size: Size,
    events: Option<mpsc::Receiver<InputEvent>>,
    calls: Vec<&'static str>,
    screen: Compositor,
    frames: usize,
}

impl MockTerminal {
    pub fn new(width: u16, height: u16) -> (Self, mpsc::Sender<InputEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let terminal = Self {
            size: Size::new(i32::from(width), i32::from(height)),
            events: Some(rx),
            calls: Vec::new(),
            screen: Compositor::new(width, height),
            frames: 0,
        };
        (terminal, tx)
    }

    /// Names of the `Terminal` methods called, in order.
    pub fn calls(&self) -> &[&'static str] {
        &self.calls
    }

    /// Number of `present` calls.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// What the terminal currently shows.
    pub fn screen_text(&self) -> String {
        self.screen.to_text()
    }
}

impl Terminal for MockTerminal {
    fn size(&self) -> Result<Size> {
        Ok(self.size)
    }

    fn enter(&mut self, _config: &AppConfig) -> Result<()> {
        self.calls.push("enter");
        Ok(())
    }

    fn events(&mut self) -> Result<mpsc::Receiver<InputEvent>> {
        self.calls.push("events");
        self.events.take().ok_or(Error::EventChannelClosed)
    }

    fn present(&mut self, updates: &[CellUpdate]) -> Result<()> {
        if self.calls.last() != Some(&"present") {
            self.calls.push("present");
        }
        self.frames += 1;
        self.screen.apply(updates);
        Ok(())
    }

    fn disable_mouse(&mut self) -> Result<()> {
        self.calls.push("disable_mouse");
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        self.calls.push("restore");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_can_be_taken_once() {
        let (mut terminal, _tx) = MockTerminal::new(4, 2);
        assert!(terminal.events().is_ok());
        assert!(matches!(terminal.events(), Err(Error::EventChannelClosed)));
        assert_eq!(terminal.calls(), ["events", "events"]);
    }
}
