//! Grid widget: children placed in a row-major cell matrix.

use std::any::Any;
use std::sync::Arc;

use crate::geometry::Rect;
use crate::layout::{BoxStyle, Dimension, GridSpec, LayoutKind};
use crate::render::strip::{CellStyle, Strip};
use crate::widget::traits::{Widget, WidgetRef};

use super::frame_strips;

/// A `rows` x `columns` table. Child `i` lands in row `i / columns`,
/// column `i % columns`; children beyond the last cell are not shown.
#[derive(Clone)]
pub struct Grid {
    spec: GridSpec,
    children: Vec<WidgetRef>,
    style: BoxStyle,
    frame: CellStyle,
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            spec: GridSpec::new(rows, columns),
            children: Vec::new(),
            style: BoxStyle::default(),
            frame: CellStyle::default(),
        }
    }

    /// Per-column sizing; missing columns are `Auto` (builder).
    pub fn column_dims(mut self, dims: impl IntoIterator<Item = Dimension>) -> Self {
        self.spec.column_dims = dims.into_iter().collect();
        self
    }

    /// Per-row sizing; missing rows are `Auto` (builder).
    pub fn row_dims(mut self, dims: impl IntoIterator<Item = Dimension>) -> Self {
        self.spec.row_dims = dims.into_iter().collect();
        self
    }

    /// Gaps between columns and between rows (builder).
    pub fn gap(mut self, column_gap: i32, row_gap: i32) -> Self {
        self.spec.column_gap = column_gap;
        self.spec.row_gap = row_gap;
        self
    }

    pub fn child(mut self, child: impl Widget + 'static) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    pub fn child_ref(mut self, child: WidgetRef) -> Self {
        self.children.push(child);
        self
    }

    pub fn style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn frame_style(mut self, style: CellStyle) -> Self {
        self.frame = style;
        self
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }
}

impl Widget for Grid {
    fn widget_type(&self) -> &str {
        "Grid"
    }

    fn children(&self) -> Vec<WidgetRef> {
        self.children.clone()
    }

    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Grid(self.spec.clone())
    }

    fn box_style(&self) -> BoxStyle {
        self.style
    }

    fn render(&self, area: Rect) -> Vec<Strip> {
        frame_strips(area, self.style.resolved_border(), &self.frame)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("spec", &self.spec)
            .field("children", &self.children.len())
            .finish()
    }
}
