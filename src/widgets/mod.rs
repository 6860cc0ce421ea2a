//! Built-in widgets: Label, Flex (Row/Column), Grid, Button, TrapScope, Component.

pub mod button;
pub mod component;
pub mod flex;
pub mod grid;
pub mod label;
pub mod trap;

pub use button::Button;
pub use component::Component;
pub use flex::Flex;
pub use grid::Grid;
pub use label::Label;
pub use trap::TrapScope;

use crate::geometry::{Rect, Spacing};
use crate::render::strip::{CellStyle, Strip};

/// One full-width strip per row of `area`.
pub(crate) fn fill_strips(area: Rect, style: &CellStyle) -> Vec<Strip> {
    if area.width <= 0 || area.height <= 0 {
        return Vec::new();
    }
    (area.y..area.bottom())
        .map(|y| {
            let mut strip = Strip::new(y, area.x);
            strip.fill(area.width, style.clone());
            strip
        })
        .collect()
}

/// Single-line frame along the edges of `area` that have a border inset.
pub(crate) fn frame_strips(area: Rect, border: Spacing, style: &CellStyle) -> Vec<Strip> {
    if area.width <= 0 || area.height <= 0 || border == Spacing::ZERO {
        return Vec::new();
    }
    let (top, right, bottom, left) = (border.top > 0, border.right > 0, border.bottom > 0, border.left > 0);

    let horizontal = |y: i32, first: char, last: char| {
        let mut strip = Strip::new(y, area.x);
        for x in 0..area.width {
            let ch = if x == 0 && left {
                first
            } else if x == area.width - 1 && right {
                last
            } else {
                '─'
            };
            strip.push(ch, style.clone());
        }
        strip
    };

    let mut strips = Vec::new();
    if top {
        strips.push(horizontal(area.y, '┌', '┐'));
    }
    let first_row = area.y + i32::from(top);
    let last_row = area.bottom() - i32::from(bottom);
    for y in first_row..last_row {
        if left {
            let mut strip = Strip::new(y, area.x);
            strip.push('│', style.clone());
            strips.push(strip);
        }
        if right {
            let mut strip = Strip::new(y, area.right() - 1);
            strip.push('│', style.clone());
            strips.push(strip);
        }
    }
    if bottom && (area.height > 1 || !top) {
        strips.push(horizontal(area.bottom() - 1, '└', '┘'));
    }
    strips
}
