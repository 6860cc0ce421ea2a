//! Strip: a horizontal run of styled terminal cells.
//!
//! Widgets paint by returning `Vec<Strip>` in absolute screen coordinates.
//! The compositor clips each strip to the widget's visible area and writes
//! its cells into the frame buffer.

use crate::geometry::Rect;

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Visual style for a single terminal cell.
///
/// Colors are kept as strings and parsed when the frame is presented, so
/// named colors and `#rrggbb` both work.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub reverse: bool,
}

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: impl Into<String>) -> Self {
        self.fg = Some(color.into());
        self
    }

    pub fn bg(mut self, color: impl Into<String>) -> Self {
        self.bg = Some(color.into());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

// ---------------------------------------------------------------------------
// StyledCell
// ---------------------------------------------------------------------------

/// One character with its style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    /// A space with default style.
    pub fn blank() -> Self {
        Self::blank_styled(CellStyle::default())
    }

    pub fn blank_styled(style: CellStyle) -> Self {
        Self { ch: ' ', style }
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::blank()
    }
}

// ---------------------------------------------------------------------------
// Strip
// ---------------------------------------------------------------------------

/// A row of cells starting at (`x_offset`, `y`) in screen coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    pub y: i32,
    pub x_offset: i32,
    pub cells: Vec<StyledCell>,
}

impl Strip {
    pub fn new(y: i32, x_offset: i32) -> Self {
        Self { y, x_offset, cells: Vec::new() }
    }

    pub fn push(&mut self, ch: char, style: CellStyle) {
        self.cells.push(StyledCell::new(ch, style));
    }

    pub fn push_str(&mut self, text: &str, style: CellStyle) {
        self.cells.extend(text.chars().map(|ch| StyledCell::new(ch, style.clone())));
    }

    pub fn width(&self) -> i32 {
        self.cells.len() as i32
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x_offset + self.width()
    }

    /// Pad with styled blanks, or truncate, to exactly `width` cells.
    pub fn fill(&mut self, width: i32, style: CellStyle) {
        let width = width.max(0) as usize;
        if self.cells.len() < width {
            self.cells.resize(width, StyledCell::blank_styled(style));
        } else {
            self.cells.truncate(width);
        }
    }

    /// The part of this strip inside `area`, or `None` when nothing is.
    pub fn clip(&self, area: Rect) -> Option<Strip> {
        if self.y < area.y || self.y >= area.bottom() {
            return None;
        }
        let start = area.x.max(self.x_offset);
        let end = area.right().min(self.right());
        if start >= end {
            return None;
        }
        let skip = (start - self.x_offset) as usize;
        let take = (end - start) as usize;
        Some(Strip {
            y: self.y,
            x_offset: start,
            cells: self.cells[skip..skip + take].to_vec(),
        })
    }

    /// The characters of this strip as a string.
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
