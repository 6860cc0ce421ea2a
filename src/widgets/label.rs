//! Label widget: displays fixed text content.
//!
//! The simplest widget. It renders one or more lines of immutable text inside
//! its content box and sizes itself to fit them.

use std::any::Any;

use crate::geometry::{Rect, Size};
use crate::layout::{BoxStyle, LayoutKind};
use crate::render::strip::{CellStyle, Strip};
use crate::widget::traits::Widget;

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// A widget that displays fixed, non-interactive text content.
///
/// Lines are split on `'\n'`. Each line is rendered as one [`Strip`], truncated
/// to the content width and limited to the content height.
///
/// # Examples
///
/// ```
/// use trellis_tui::widgets::Label;
///
/// let label = Label::new("Hello,\nworld!");
/// assert_eq!(label.text(), "Hello,\nworld!");
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    style: CellStyle,
    box_style: BoxStyle,
}

impl Label {
    /// Create a new `Label` with the given text content.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::default(),
            box_style: BoxStyle::default(),
        }
    }

    /// Set the text style (builder).
    pub fn style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    /// Set sizing and box-model properties (builder).
    pub fn box_style(mut self, box_style: BoxStyle) -> Self {
        self.box_style = box_style;
        self
    }

    /// Return the text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Width of the longest line and number of lines.
    pub fn content_size(&self) -> Size {
        let mut width = 0;
        let mut height = 0;
        for line in self.text.split('\n') {
            width = width.max(line.chars().count() as i32);
            height += 1;
        }
        Size::new(width, height)
    }
}

impl Widget for Label {
    fn widget_type(&self) -> &str {
        "Label"
    }

    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Leaf { content: self.content_size() }
    }

    fn box_style(&self) -> BoxStyle {
        self.box_style
    }

    fn render(&self, area: Rect) -> Vec<Strip> {
        let content = area.shrink(self.box_style.insets());
        if content.width <= 0 || content.height <= 0 {
            return Vec::new();
        }

        let max_width = content.width as usize;
        self.text
            .split('\n')
            .take(content.height as usize)
            .enumerate()
            .map(|(i, line)| {
                let mut strip = Strip::new(content.y + i as i32, content.x);
                let truncated: String = line.chars().take(max_width).collect();
                strip.push_str(&truncated, self.style.clone());
                strip.fill(content.width, self.style.clone());
                strip
            })
            .collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Spacing;

    fn text_of(strip: &Strip) -> String {
        strip.cells.iter().map(|c| c.ch).collect()
    }

    #[test]
    fn widget_type_is_label() {
        assert_eq!(Label::new("hi").widget_type(), "Label");
    }

    #[test]
    fn content_size_counts_chars_and_lines() {
        assert_eq!(Label::new("ab\ncdef\n").content_size(), Size::new(4, 3));
        assert_eq!(Label::new("").content_size(), Size::new(0, 1));
        assert_eq!(Label::new("héllo").content_size(), Size::new(5, 1));
    }

    #[test]
    fn layout_kind_is_leaf_of_content() {
        assert_eq!(
            Label::new("abc").layout_kind(),
            LayoutKind::Leaf { content: Size::new(3, 1) }
        );
    }

    #[test]
    fn render_truncates_and_pads() {
        let strips = Label::new("hello\nworld\nextra").render(Rect::new(2, 1, 3, 2));
        assert_eq!(strips.len(), 2);
        assert_eq!(text_of(&strips[0]), "hel");
        assert_eq!((strips[0].x_offset, strips[0].y), (2, 1));
        assert_eq!(text_of(&strips[1]), "wor");

        let strips = Label::new("ab").render(Rect::new(0, 0, 4, 1));
        assert_eq!(text_of(&strips[0]), "ab  ");
    }

    #[test]
    fn render_inside_padding() {
        let label = Label::new("x").box_style(BoxStyle::new().padding(Spacing::all(1)));
        let strips = label.render(Rect::new(0, 0, 3, 3));
        assert_eq!(strips.len(), 1);
        assert_eq!((strips[0].x_offset, strips[0].y), (1, 1));
        assert_eq!(text_of(&strips[0]), "x");
    }

    #[test]
    fn render_empty_area() {
        assert!(Label::new("hi").render(Rect::new(0, 0, 0, 5)).is_empty());
    }

    #[test]
    fn style_is_applied() {
        let style = CellStyle { bold: true, ..CellStyle::default() };
        let strips = Label::new("a").style(style.clone()).render(Rect::new(0, 0, 1, 1));
        assert_eq!(strips[0].cells[0].style, style);
    }
}
