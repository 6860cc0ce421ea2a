//! Frame buffer and frame diffing.
//!
//! The `Compositor` holds a full grid of `StyledCell`s for one frame. The
//! render pass clips each widget's strips to its visible area and writes them
//! in registry order, so later (inner) widgets paint over earlier ones.
//! `diff` against the previous frame yields the cells the terminal must
//! redraw.

use crate::geometry::{Offset, Rect, Size};

use super::strip::{CellStyle, Strip, StyledCell};

// ---------------------------------------------------------------------------
// CellUpdate
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: StyledCell,
}

// ---------------------------------------------------------------------------
// Compositor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compositor {
    /// `screen[y][x]` is the cell at column x, row y.
    screen: Vec<Vec<StyledCell>>,
    pub width: u16,
    pub height: u16,
}

impl Compositor {
    pub fn new(width: u16, height: u16) -> Self {
        Self { screen: Self::blank_screen(width, height), width, height }
    }

    /// Compositor sized to `size`, clamping negative extents to zero.
    pub fn with_size(size: Size) -> Self {
        Self::new(clamp_u16(size.width), clamp_u16(size.height))
    }

    pub fn size(&self) -> Size {
        Size::new(i32::from(self.width), i32::from(self.height))
    }

    /// The whole screen as a rectangle at the origin.
    pub fn area(&self) -> Rect {
        self.size().at(Offset::ZERO)
    }

    /// Resize and blank the buffer.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.screen = Self::blank_screen(width, height);
    }

    /// Reset every cell to a default blank.
    pub fn clear(&mut self) {
        self.fill(CellStyle::default());
    }

    /// Reset every cell to a blank in `style`.
    pub fn fill(&mut self, style: CellStyle) {
        for row in &mut self.screen {
            for cell in row.iter_mut() {
                *cell = StyledCell::blank_styled(style.clone());
            }
        }
    }

    /// Write `strips` into the buffer, keeping only cells inside both `clip`
    /// and the screen.
    pub fn place_strips(&mut self, strips: &[Strip], clip: Rect) {
        let clip = clip.intersection(self.area());
        if clip.width <= 0 || clip.height <= 0 {
            return;
        }
        for strip in strips.iter().filter_map(|s| s.clip(clip)) {
            let Some(row) = self.screen.get_mut(strip.y as usize) else {
                continue;
            };
            let start = strip.x_offset as usize;
            for (cell, slot) in strip.cells.into_iter().zip(row.iter_mut().skip(start)) {
                *slot = cell;
            }
        }
    }

    /// Cells of this frame that differ from `previous`. Cells outside the
    /// previous frame's extent always count as changed.
    pub fn diff(&self, previous: &Compositor) -> Vec<CellUpdate> {
        let mut updates = Vec::new();
        for (y, row) in self.screen.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let before = previous.screen.get(y).and_then(|r| r.get(x));
                if before != Some(cell) {
                    updates.push(CellUpdate { x: x as u16, y: y as u16, cell: cell.clone() });
                }
            }
        }
        updates
    }

    /// Every cell, row-major; used for the first frame after a resize.
    pub fn full(&self) -> Vec<CellUpdate> {
        self.diff(&Compositor::new(0, 0))
    }

    /// Write presented updates back into a buffer. Out-of-range cells are
    /// ignored.
    pub fn apply(&mut self, updates: &[CellUpdate]) {
        for update in updates {
            if let Some(slot) =
                self.screen.get_mut(update.y as usize).and_then(|row| row.get_mut(update.x as usize))
            {
                *slot = update.cell.clone();
            }
        }
    }

    pub fn get_cell(&self, x: u16, y: u16) -> Option<&StyledCell> {
        self.screen.get(y as usize).and_then(|row| row.get(x as usize))
    }

    /// Screen characters, one line per row, trailing spaces trimmed.
    pub fn to_text(&self) -> String {
        self.screen
            .iter()
            .map(|row| {
                let line: String = row.iter().map(|c| c.ch).collect();
                line.trim_end().to_owned()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn blank_screen(width: u16, height: u16) -> Vec<Vec<StyledCell>> {
        vec![vec![StyledCell::blank(); width as usize]; height as usize]
    }
}

fn clamp_u16(n: i32) -> u16 {
    n.clamp(0, i32::from(u16::MAX)) as u16
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strip(y: i32, x: i32, text: &str) -> Strip {
        let mut s = Strip::new(y, x);
        s.push_str(text, CellStyle::default());
        s
    }

    #[test]
    fn new_is_blank() {
        let c = Compositor::new(4, 2);
        assert_eq!(c.get_cell(3, 1), Some(&StyledCell::blank()));
        assert!(c.get_cell(4, 0).is_none());
        assert!(c.get_cell(0, 2).is_none());
        assert_eq!(c.to_text(), "\n");
    }

    #[test]
    fn with_size_clamps_negative() {
        let c = Compositor::with_size(Size::new(-3, 2));
        assert_eq!((c.width, c.height), (0, 2));
    }

    // -----------------------------------------------------------------------
    // place_strips
    // -----------------------------------------------------------------------

    #[test]
    fn strips_are_clipped_to_area() {
        let mut c = Compositor::new(10, 3);
        c.place_strips(&[strip(1, 0, "abcdefgh")], Rect::new(2, 0, 3, 3));
        assert_eq!(c.to_text(), "\n  cde\n");
    }

    #[test]
    fn strips_are_clipped_to_screen() {
        let mut c = Compositor::new(4, 1);
        c.place_strips(&[strip(0, 2, "xyz"), strip(5, 0, "no")], Rect::new(0, 0, 100, 100));
        assert_eq!(c.to_text(), "  xy");
    }

    #[test]
    fn later_strips_paint_over_earlier() {
        let mut c = Compositor::new(6, 1);
        let all = Rect::new(0, 0, 6, 1);
        c.place_strips(&[strip(0, 0, "aaaaaa")], all);
        c.place_strips(&[strip(0, 2, "bb")], all);
        assert_eq!(c.to_text(), "aabbaa");
    }

    // -----------------------------------------------------------------------
    // diff
    // -----------------------------------------------------------------------

    #[test]
    fn diff_reports_changed_cells_only() {
        let before = Compositor::new(5, 2);
        let mut after = before.clone();
        after.place_strips(&[strip(1, 3, "Z")], after.area());

        let updates = after.diff(&before);
        assert_eq!(updates.len(), 1);
        assert_eq!((updates[0].x, updates[0].y, updates[0].cell.ch), (3, 1, 'Z'));
        assert!(after.diff(&after).is_empty());
    }

    #[test]
    fn diff_after_grow_includes_new_cells() {
        let before = Compositor::new(2, 1);
        let after = Compositor::new(3, 2);
        assert_eq!(after.diff(&before).len(), 4);
        assert_eq!(after.full().len(), 6);
    }

    #[test]
    fn applying_diff_reproduces_frame() {
        let mut next = Compositor::new(4, 2);
        next.place_strips(&[strip(0, 1, "ab"), strip(1, 0, "cdef")], next.area());
        let mut mirror = Compositor::new(4, 2);
        mirror.apply(&next.diff(&mirror.clone()));
        assert_eq!(mirror, next);
    }

    #[test]
    fn clear_resets_cells() {
        let mut c = Compositor::new(3, 1);
        c.place_strips(&[strip(0, 0, "abc")], c.area());
        c.clear();
        assert_eq!(c, Compositor::new(3, 1));
    }
}
