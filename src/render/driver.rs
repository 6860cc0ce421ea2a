//! Terminal collaborator: the `Terminal` trait and its crossterm backend.
//!
//! The run loop only talks to a `Terminal`. `Driver` implements it on top of
//! crossterm: raw mode, alternate screen and mouse capture on `enter`, a
//! background reader thread feeding an event channel, and batched cell
//! output on `present`. Color strings are parsed as named colors or hex.

use std::io::{self, BufWriter, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::app::AppConfig;
use crate::error::Result;
use crate::event::input::{from_crossterm, InputEvent};
use crate::geometry::Size;

use super::compositor::CellUpdate;
use super::strip::CellStyle;

/// Capacity of the input channel between the reader thread and the loop.
pub const EVENT_BUFFER: usize = 64;

/// How often the reader thread wakes to check whether it should exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// Terminal
// ---------------------------------------------------------------------------

/// What the run loop needs from a terminal.
pub trait Terminal {
    /// Current size in cells.
    fn size(&self) -> Result<Size>;

    /// Switch into application mode (raw input, alternate screen, mouse
    /// capture) as `config` asks.
    fn enter(&mut self, config: &AppConfig) -> Result<()>;

    /// Start delivering input. Called once per run.
    fn events(&mut self) -> Result<mpsc::Receiver<InputEvent>>;

    /// Draw changed cells and flush.
    fn present(&mut self, updates: &[CellUpdate]) -> Result<()>;

    /// Stop mouse tracking. First step of shutdown.
    fn disable_mouse(&mut self) -> Result<()>;

    /// Leave application mode and stop the input source.
    fn restore(&mut self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Crossterm-backed terminal writing to stdout.
pub struct Driver {
    writer: BufWriter<Stdout>,
    mouse: bool,
    alt_screen: bool,
    entered: bool,
    stop: Arc<AtomicBool>,
}

impl Driver {
    pub fn new() -> Self {
        Self {
            writer: BufWriter::new(io::stdout()),
            mouse: false,
            alt_screen: false,
            entered: false,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Queue crossterm style commands for `style`.
    fn apply_cell_style(&mut self, style: &CellStyle) -> io::Result<()> {
        if let Some(color) = style.fg.as_deref().and_then(parse_color) {
            queue!(self.writer, SetForegroundColor(color))?;
        }
        if let Some(color) = style.bg.as_deref().and_then(parse_color) {
            queue!(self.writer, SetBackgroundColor(color))?;
        }
        let attributes = [
            (style.bold, Attribute::Bold),
            (style.dim, Attribute::Dim),
            (style.italic, Attribute::Italic),
            (style.underline, Attribute::Underlined),
            (style.strikethrough, Attribute::CrossedOut),
            (style.reverse, Attribute::Reverse),
        ];
        for (on, attribute) in attributes {
            if on {
                queue!(self.writer, SetAttribute(attribute))?;
            }
        }
        Ok(())
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for Driver {
    fn size(&self) -> Result<Size> {
        let (width, height) = terminal::size()?;
        Ok(Size::new(i32::from(width), i32::from(height)))
    }

    fn enter(&mut self, config: &AppConfig) -> Result<()> {
        terminal::enable_raw_mode()?;
        if config.alt_screen {
            execute!(self.writer, EnterAlternateScreen)?;
        }
        if config.mouse {
            execute!(self.writer, EnableMouseCapture)?;
        }
        if let Some(title) = &config.title {
            execute!(self.writer, SetTitle(title))?;
        }
        execute!(self.writer, cursor::Hide, Clear(ClearType::All))?;
        self.mouse = config.mouse;
        self.alt_screen = config.alt_screen;
        self.entered = true;
        debug!(mouse = self.mouse, alt_screen = self.alt_screen, "terminal entered");
        Ok(())
    }

    fn events(&mut self) -> Result<mpsc::Receiver<InputEvent>> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        self.stop.store(false, Ordering::Relaxed);
        let stop = Arc::clone(&self.stop);
        std::thread::Builder::new()
            .name("trellis-input".into())
            .spawn(move || {
                while !stop.load(Ordering::Relaxed) && !tx.is_closed() {
                    match event::poll(POLL_INTERVAL) {
                        Ok(false) => continue,
                        Ok(true) => {}
                        Err(error) => {
                            warn!(%error, "input poll failed");
                            break;
                        }
                    }
                    match event::read() {
                        Ok(raw) => {
                            let Some(input) = from_crossterm(raw) else { continue };
                            if tx.blocking_send(input).is_err() {
                                break;
                            }
                        }
                        Err(error) => {
                            warn!(%error, "input read failed");
                            break;
                        }
                    }
                }
                debug!("input reader stopped");
            })?;
        Ok(rx)
    }

    fn present(&mut self, updates: &[CellUpdate]) -> Result<()> {
        for update in updates {
            queue!(self.writer, cursor::MoveTo(update.x, update.y), SetAttribute(Attribute::Reset))?;
            self.apply_cell_style(&update.cell.style)?;
            queue!(self.writer, Print(update.cell.ch))?;
        }
        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        self.writer.flush()?;
        Ok(())
    }

    fn disable_mouse(&mut self) -> Result<()> {
        if self.mouse {
            execute!(self.writer, DisableMouseCapture)?;
            self.mouse = false;
        }
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        self.stop.store(true, Ordering::Relaxed);
        if !self.entered {
            return Ok(());
        }
        execute!(self.writer, cursor::Show)?;
        if self.alt_screen {
            execute!(self.writer, LeaveAlternateScreen)?;
        }
        terminal::disable_raw_mode()?;
        self.entered = false;
        debug!("terminal restored");
        Ok(())
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        if self.entered {
            let _ = self.disable_mouse();
            let _ = self.restore();
        }
    }
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("mouse", &self.mouse)
            .field("alt_screen", &self.alt_screen)
            .field("entered", &self.entered)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Color parsing
// ---------------------------------------------------------------------------

/// Parse a color string into a crossterm `Color`.
///
/// Accepts `#rrggbb`, `#rgb`, and the sixteen named terminal colors
/// (case-insensitive, `dark_` prefixed or not, `grey` or `gray`).
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "dark_red" | "darkred" => Some(Color::DarkRed),
        "dark_green" | "darkgreen" => Some(Color::DarkGreen),
        "dark_yellow" | "darkyellow" => Some(Color::DarkYellow),
        "dark_blue" | "darkblue" => Some(Color::DarkBlue),
        "dark_magenta" | "darkmagenta" => Some(Color::DarkMagenta),
        "dark_cyan" | "darkcyan" => Some(Color::DarkCyan),
        "dark_grey" | "dark_gray" | "darkgrey" | "darkgray" => Some(Color::DarkGrey),
        "grey" | "gray" => Some(Color::Grey),
        _ => None,
    }
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb { r: channel(&hex[0..2])?, g: channel(&hex[2..4])?, b: channel(&hex[4..6])? }),
        3 => {
            let (r, g, b) = (channel(&hex[0..1])?, channel(&hex[1..2])?, channel(&hex[2..3])?);
            Some(Color::Rgb { r: r * 17, g: g * 17, b: b * 17 })
        }
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
