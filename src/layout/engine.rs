//! Constraint-based layout: box model, linear and grid distribution.
//!
//! [`compute_layout`] is a pure function of a [`LayoutNode`] tree and the
//! root [`Constraints`]. It never caches and never mutates its input, so the
//! same call can be used speculatively to probe a child's intrinsic size.

use crate::geometry::{Offset, Rect, Size, Spacing};

use super::constraints::{shrink_max, Axis, Constraints, UNBOUNDED};
use super::dimension::{BoxStyle, Dimension};
use super::distribute::{resolve_tracks, Track};

// ---------------------------------------------------------------------------
// Input tree
// ---------------------------------------------------------------------------

/// How a node arranges its children.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutKind {
    /// No children; the content has a fixed intrinsic size.
    Leaf { content: Size },
    /// Children laid out one after another along `axis`.
    Linear { axis: Axis, spacing: i32 },
    /// Children placed in a row-major cell matrix.
    Grid(GridSpec),
}

/// Grid shape and per-track sizing.
///
/// Child `i` occupies cell `(i / columns, i % columns)`. Children past
/// `rows * columns` are not laid out. Missing track dimensions are `Auto`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridSpec {
    pub rows: usize,
    pub columns: usize,
    pub column_dims: Vec<Dimension>,
    pub row_dims: Vec<Dimension>,
    pub column_gap: i32,
    pub row_gap: i32,
}

impl GridSpec {
    /// A `rows` x `columns` grid with auto tracks and no gaps.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns, ..Self::default() }
    }

    /// Number of cells in the matrix.
    pub fn capacity(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }
}

/// Anything the layout engine can measure and place.
pub trait LayoutNode {
    /// Sizing and box-model properties.
    fn box_style(&self) -> BoxStyle;

    /// Arrangement of this node's children.
    fn layout_kind(&self) -> &LayoutKind;

    /// Children in document order.
    fn layout_children(&self) -> &[Self]
    where
        Self: Sized;
}

/// A plain data layout tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    pub style: BoxStyle,
    pub kind: LayoutKind,
    pub children: Vec<LayoutBox>,
}

impl LayoutBox {
    /// A leaf with the given intrinsic content size.
    pub fn leaf(width: i32, height: i32) -> Self {
        Self {
            style: BoxStyle::new(),
            kind: LayoutKind::Leaf { content: Size::new(width, height) },
            children: Vec::new(),
        }
    }

    /// A horizontal container.
    pub fn row(children: Vec<LayoutBox>) -> Self {
        Self::linear(Axis::Horizontal, children)
    }

    /// A vertical container.
    pub fn column(children: Vec<LayoutBox>) -> Self {
        Self::linear(Axis::Vertical, children)
    }

    /// A linear container along `axis`.
    pub fn linear(axis: Axis, children: Vec<LayoutBox>) -> Self {
        Self {
            style: BoxStyle::new(),
            kind: LayoutKind::Linear { axis, spacing: 0 },
            children,
        }
    }

    /// A grid container.
    pub fn grid(spec: GridSpec, children: Vec<LayoutBox>) -> Self {
        Self { style: BoxStyle::new(), kind: LayoutKind::Grid(spec), children }
    }

    /// Replace the style (builder).
    pub fn with_style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the inter-child spacing of a linear container (builder).
    pub fn with_spacing(mut self, gap: i32) -> Self {
        if let LayoutKind::Linear { spacing, .. } = &mut self.kind {
            *spacing = gap;
        }
        self
    }
}

impl LayoutNode for LayoutBox {
    fn box_style(&self) -> BoxStyle {
        self.style
    }

    fn layout_kind(&self) -> &LayoutKind {
        &self.kind
    }

    fn layout_children(&self) -> &[Self] {
        &self.children
    }
}

// ---------------------------------------------------------------------------
// Output tree
// ---------------------------------------------------------------------------

/// The resolved box of one node and the placement of its children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComputedLayout {
    /// Outer size: content + padding + border.
    pub size: Size,
    pub padding: Spacing,
    pub border: Spacing,
    /// Consumed by the parent's distribution, not part of `size`.
    pub margin: Spacing,
    /// Children in layout order, offsets relative to this node's outer origin.
    pub children: Vec<PlacedChild>,
}

/// A child layout and its offset inside the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedChild {
    pub offset: Offset,
    pub layout: ComputedLayout,
}

impl ComputedLayout {
    /// The content box in local coordinates.
    pub fn content_rect(&self) -> Rect {
        self.size.at(Offset::ZERO).shrink(self.padding + self.border)
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Lay out `node` under `constraints`.
///
/// Never fails: contradictory constraints are repaired and degenerate
/// containers produce zero-content boxes.
pub fn compute_layout<N: LayoutNode>(node: &N, constraints: Constraints) -> ComputedLayout {
    layout_node(node, constraints, false)
}

/// Lay out one node. With `probe` set the node's own expand flags are
/// ignored, so intrinsic measurement is not inflated by fill requests.
fn layout_node<N: LayoutNode>(node: &N, constraints: Constraints, probe: bool) -> ComputedLayout {
    let style = node.box_style();
    let mut c = constraints.normalized();
    c = apply_dimension(c, Axis::Horizontal, style.dimension(Axis::Horizontal));
    c = apply_dimension(c, Axis::Vertical, style.dimension(Axis::Vertical));
    if !probe {
        if style.expands(Axis::Horizontal) {
            c = c.fill(Axis::Horizontal);
        }
        if style.expands(Axis::Vertical) {
            c = c.fill(Axis::Vertical);
        }
    }

    let padding = style.resolved_padding();
    let border = style.resolved_border();
    let insets = padding + border;
    let content_c = c.deflate(insets.width(), insets.height());

    let (content, mut children) = match node.layout_kind() {
        LayoutKind::Leaf { content } => (content_c.constrain(*content), Vec::new()),
        LayoutKind::Linear { axis, spacing } => {
            layout_linear(node.layout_children(), content_c, *axis, *spacing)
        }
        LayoutKind::Grid(spec) => layout_grid(node.layout_children(), content_c, spec),
    };

    let shift = Offset::new(insets.left, insets.top);
    for child in &mut children {
        child.offset = child.offset + shift;
    }

    let size = c.constrain(Size::new(
        content.width.saturating_add(insets.width()),
        content.height.saturating_add(insets.height()),
    ));

    ComputedLayout { size, padding, border, margin: style.resolved_margin(), children }
}

/// Narrow `c` on `axis` according to the node's own dimension. The result
/// always stays inside `c`, so tight constraints from a parent win.
fn apply_dimension(c: Constraints, axis: Axis, dim: Dimension) -> Constraints {
    let (min, max) = (c.min(axis), c.max(axis));
    match dim {
        Dimension::Auto => c,
        Dimension::Flex(_) => c.fill(axis),
        fixed => match fixed.resolve(max) {
            Some(v) => {
                let v = v.clamp(min, max);
                c.with_axis(axis, v, v)
            }
            None => c,
        },
    }
}

/// Measure a child's outer size without committing it.
fn probe<N: LayoutNode>(node: &N, constraints: Constraints) -> Size {
    layout_node(node, constraints, true).size
}

// ---------------------------------------------------------------------------
// Linear distribution
// ---------------------------------------------------------------------------

fn layout_linear<N: LayoutNode>(
    children: &[N],
    c: Constraints,
    axis: Axis,
    spacing: i32,
) -> (Size, Vec<PlacedChild>) {
    if children.is_empty() {
        return (c.constrain(Size::ZERO), Vec::new());
    }

    let cross = axis.cross();
    let main_max = c.max(axis);
    let bounded = c.is_bounded(axis);
    let spacing = spacing.max(0);
    let gaps = spacing.saturating_mul(children.len() as i32 - 1);

    let mut overhead = gaps;
    let mut tracks = Vec::with_capacity(children.len());
    for child in children {
        let style = child.box_style();
        let margin = style.resolved_margin();
        overhead = overhead.saturating_add(axis.total(margin));

        let track = match style.dimension(axis) {
            Dimension::Cells(n) => Track::Fixed(n.max(0)),
            Dimension::Percent(p) if bounded => {
                Track::Fixed(Dimension::Percent(p).resolve(main_max).unwrap_or(0))
            }
            Dimension::Flex(w) if bounded => Track::Flex(w),
            _ if bounded && style.expands(axis) => Track::Flex(1.0),
            _ => {
                let probe_c = Constraints::UNCONSTRAINED
                    .with_axis(axis, 0, shrink_max(main_max, axis.total(margin)))
                    .with_axis(cross, 0, shrink_max(c.max(cross), cross.total(margin)));
                Track::Auto(axis.of(probe(child, probe_c)))
            }
        };
        tracks.push(track);
    }

    let sizes = resolve_tracks(&tracks, main_max, c.min(axis), overhead);

    let mut placed = Vec::with_capacity(children.len());
    let mut cursor: i32 = 0;
    let mut cross_extent: i32 = 0;
    for (i, (child, &alloc)) in children.iter().zip(&sizes).enumerate() {
        let margin = child.box_style().resolved_margin();
        cursor = cursor.saturating_add(axis.leading(margin));
        let room = if bounded { (main_max - cursor).max(0) } else { UNBOUNDED };
        let main = alloc.min(room);

        let child_c = Constraints::UNCONSTRAINED
            .with_axis(axis, main, main)
            .with_axis(cross, 0, shrink_max(c.max(cross), cross.total(margin)));
        let layout = layout_node(child, child_c, false);

        let offset = axis.offset(cursor, cross.leading(margin));
        cross_extent = cross_extent.max(
            cross.of(layout.size).saturating_add(cross.total(margin)),
        );
        cursor = cursor
            .saturating_add(axis.of(layout.size))
            .saturating_add(axis.total(margin) - axis.leading(margin));
        if i + 1 < children.len() {
            cursor = cursor.saturating_add(spacing);
        }
        placed.push(PlacedChild { offset, layout });
    }

    (c.constrain(axis.size(cursor, cross_extent)), placed)
}

// ---------------------------------------------------------------------------
// Grid distribution
// ---------------------------------------------------------------------------

fn layout_grid<N: LayoutNode>(
    children: &[N],
    c: Constraints,
    spec: &GridSpec,
) -> (Size, Vec<PlacedChild>) {
    let cells = children.len().min(spec.capacity());
    if spec.rows == 0 || spec.columns == 0 || cells == 0 {
        return (c.constrain(Size::ZERO), Vec::new());
    }
    let columns = spec.columns;
    let rows = spec.rows;
    let column_gap = spec.column_gap.max(0);
    let row_gap = spec.row_gap.max(0);

    // Column widths.
    let max_w = c.max_width;
    let mut col_tracks = Vec::with_capacity(columns);
    for col in 0..columns {
        let dim = spec.column_dims.get(col).copied().unwrap_or(Dimension::Auto);
        let track = grid_track(dim, max_w, || {
            (0..rows)
                .map(|row| row * columns + col)
                .filter(|&idx| idx < cells)
                .map(|idx| {
                    let child = &children[idx];
                    let margin = child.box_style().resolved_margin();
                    let probe_c = Constraints::new(
                        0,
                        shrink_max(max_w, margin.width()),
                        0,
                        shrink_max(c.max_height, margin.height()),
                    );
                    probe(child, probe_c).width.saturating_add(margin.width())
                })
                .max()
                .unwrap_or(0)
        });
        col_tracks.push(track);
    }
    let col_overhead = column_gap.saturating_mul(columns as i32 - 1);
    let col_widths = resolve_tracks(&col_tracks, max_w, c.min_width, col_overhead);

    // Row heights, measured against the committed column widths.
    let max_h = c.max_height;
    let mut row_tracks = Vec::with_capacity(rows);
    for row in 0..rows {
        let dim = spec.row_dims.get(row).copied().unwrap_or(Dimension::Auto);
        let track = grid_track(dim, max_h, || {
            (0..columns)
                .map(|col| (col, row * columns + col))
                .filter(|&(_, idx)| idx < cells)
                .map(|(col, idx)| {
                    let child = &children[idx];
                    let margin = child.box_style().resolved_margin();
                    let probe_c = Constraints::new(
                        0,
                        (col_widths[col] - margin.width()).max(0),
                        0,
                        shrink_max(max_h, margin.height()),
                    );
                    probe(child, probe_c).height.saturating_add(margin.height())
                })
                .max()
                .unwrap_or(0)
        });
        row_tracks.push(track);
    }
    let row_overhead = row_gap.saturating_mul(rows as i32 - 1);
    let row_heights = resolve_tracks(&row_tracks, max_h, c.min_height, row_overhead);

    let col_starts = track_starts(&col_widths, column_gap);
    let row_starts = track_starts(&row_heights, row_gap);

    let mut placed = Vec::with_capacity(cells);
    for (idx, child) in children.iter().take(cells).enumerate() {
        let (row, col) = (idx / columns, idx % columns);
        let x = col_starts[col];
        let y = row_starts[row];
        let cell_w = clip_track(col_widths[col], x, max_w);
        let cell_h = clip_track(row_heights[row], y, max_h);

        let margin = child.box_style().resolved_margin();
        let child_c = Constraints::new(
            0,
            (cell_w - margin.width()).max(0),
            0,
            (cell_h - margin.height()).max(0),
        );
        let layout = layout_node(child, child_c, false);
        placed.push(PlacedChild { offset: Offset::new(x + margin.left, y + margin.top), layout });
    }

    let width = col_widths.iter().fold(col_overhead, |acc, &w| acc.saturating_add(w));
    let height = row_heights.iter().fold(row_overhead, |acc, &h| acc.saturating_add(h));
    (c.constrain(Size::new(width, height)), placed)
}

/// Classify one grid track. `measure` is only called for auto tracks.
fn grid_track(dim: Dimension, available: i32, measure: impl FnOnce() -> i32) -> Track {
    let bounded = available != UNBOUNDED;
    match dim {
        Dimension::Cells(n) => Track::Fixed(n.max(0)),
        Dimension::Percent(_) if bounded => Track::Fixed(dim.resolve(available).unwrap_or(0)),
        Dimension::Flex(w) if bounded => Track::Flex(w),
        _ => Track::Auto(measure()),
    }
}

fn track_starts(sizes: &[i32], gap: i32) -> Vec<i32> {
    let mut starts = Vec::with_capacity(sizes.len());
    let mut at = 0i32;
    for &s in sizes {
        starts.push(at);
        at = at.saturating_add(s).saturating_add(gap);
    }
    starts
}

/// Keep a track inside a bounded container.
fn clip_track(size: i32, start: i32, max: i32) -> i32 {
    if max == UNBOUNDED { size } else { size.min((max - start).max(0)) }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn screen(w: i32, h: i32) -> Constraints {
        Constraints::loose(Size::new(w, h))
    }

    fn sizes(layout: &ComputedLayout) -> Vec<Size> {
        layout.children.iter().map(|c| c.layout.size).collect()
    }

    fn offsets(layout: &ComputedLayout) -> Vec<Offset> {
        layout.children.iter().map(|c| c.offset).collect()
    }

    // ── Box model ────────────────────────────────────────────────────

    #[test]
    fn leaf_fits_content() {
        let layout = compute_layout(&LayoutBox::leaf(5, 2), screen(80, 24));
        assert_eq!(layout.size, Size::new(5, 2));
        assert!(layout.children.is_empty());
    }

    #[test]
    fn leaf_content_clamped_to_max() {
        let layout = compute_layout(&LayoutBox::leaf(100, 2), screen(10, 24));
        assert_eq!(layout.size, Size::new(10, 2));
    }

    #[test]
    fn padding_and_border_add_to_outer_size() {
        let node = LayoutBox::leaf(4, 1)
            .with_style(BoxStyle::new().padding(Spacing::symmetric(0, 1)).bordered());
        let layout = compute_layout(&node, screen(80, 24));
        assert_eq!(layout.size, Size::new(8, 3));
        assert_eq!(layout.content_rect(), Rect::new(2, 1, 4, 1));
    }

    #[test]
    fn children_offset_by_insets() {
        let node = LayoutBox::column(vec![LayoutBox::leaf(3, 1)])
            .with_style(BoxStyle::new().padding(Spacing::all(2)).bordered());
        let layout = compute_layout(&node, screen(80, 24));
        assert_eq!(offsets(&layout), vec![Offset::new(3, 3)]);
        assert_eq!(layout.size, Size::new(9, 7));
    }

    #[test]
    fn expand_fills_available_space() {
        let node = LayoutBox::leaf(3, 1).with_style(BoxStyle::new().expand());
        let layout = compute_layout(&node, screen(40, 10));
        assert_eq!(layout.size, Size::new(40, 10));
    }

    #[test]
    fn expand_under_unbounded_axis_fits_content() {
        let node = LayoutBox::leaf(3, 1).with_style(BoxStyle::new().expand());
        let c = Constraints::new(0, 40, 0, UNBOUNDED);
        assert_eq!(compute_layout(&node, c).size, Size::new(40, 1));
    }

    #[test]
    fn fixed_and_percent_own_dimensions() {
        let node = LayoutBox::leaf(1, 1)
            .with_style(BoxStyle::new().width(Dimension::Cells(12)).height(Dimension::Percent(50.0)));
        assert_eq!(compute_layout(&node, screen(80, 24)).size, Size::new(12, 12));
    }

    #[test]
    fn inverted_constraints_are_repaired() {
        let node = LayoutBox::leaf(20, 20);
        let layout = compute_layout(&node, Constraints::new(30, 10, -5, -1));
        assert_eq!(layout.size, Size::new(10, 0));
    }

    #[test]
    fn margin_is_recorded_but_not_part_of_size() {
        let node = LayoutBox::leaf(2, 2).with_style(BoxStyle::new().margin(Spacing::all(3)));
        let layout = compute_layout(&node, screen(80, 24));
        assert_eq!(layout.size, Size::new(2, 2));
        assert_eq!(layout.margin, Spacing::all(3));
    }

    // ── Linear distribution ──────────────────────────────────────────

    #[test]
    fn column_stacks_auto_children() {
        let node = LayoutBox::column(vec![LayoutBox::leaf(4, 1), LayoutBox::leaf(6, 2)]);
        let layout = compute_layout(&node, screen(80, 24));
        assert_eq!(sizes(&layout), vec![Size::new(4, 1), Size::new(6, 2)]);
        assert_eq!(offsets(&layout), vec![Offset::new(0, 0), Offset::new(0, 1)]);
        assert_eq!(layout.size, Size::new(6, 3));
    }

    #[test]
    fn row_with_fixed_and_flex_children() {
        let node = LayoutBox::row(vec![
            LayoutBox::leaf(1, 1).with_style(BoxStyle::new().width(Dimension::Cells(10))),
            LayoutBox::leaf(1, 1).with_style(BoxStyle::new().width(Dimension::Flex(1.0))),
            LayoutBox::leaf(1, 1).with_style(BoxStyle::new().width(Dimension::Flex(2.0))),
        ]);
        let layout = compute_layout(&node, screen(40, 5));
        let widths: Vec<i32> = sizes(&layout).iter().map(|s| s.width).collect();
        assert_eq!(widths, vec![10, 10, 20]);
        assert_eq!(layout.children[2].offset.x, 20);
    }

    #[test]
    fn spacing_is_subtracted_before_flex() {
        let node = LayoutBox::row(vec![
            LayoutBox::leaf(1, 1).with_style(BoxStyle::new().width(Dimension::Flex(1.0))),
            LayoutBox::leaf(1, 1).with_style(BoxStyle::new().width(Dimension::Flex(1.0))),
        ])
        .with_spacing(2);
        let layout = compute_layout(&node, screen(12, 1));
        assert_eq!(sizes(&layout)[0].width + sizes(&layout)[1].width, 10);
        assert_eq!(layout.children[1].offset.x, 7);
    }

    #[test]
    fn flex_rounding_conserves_space() {
        let children = (0..3)
            .map(|_| LayoutBox::leaf(0, 1).with_style(BoxStyle::new().width(Dimension::Flex(1.0))))
            .collect();
        let layout = compute_layout(&LayoutBox::row(children), screen(10, 1));
        let widths: Vec<i32> = sizes(&layout).iter().map(|s| s.width).collect();
        assert_eq!(widths.iter().sum::<i32>(), 10);
        assert_eq!(widths, vec![3, 3, 4]);
    }

    #[test]
    fn percent_children_resolve_against_content_box() {
        let node = LayoutBox::row(vec![
            LayoutBox::leaf(1, 1).with_style(BoxStyle::new().width(Dimension::Percent(25.0))),
            LayoutBox::leaf(1, 1).with_style(BoxStyle::new().width(Dimension::Percent(75.0))),
        ])
        .with_style(BoxStyle::new().padding(Spacing::symmetric(0, 2)));
        let layout = compute_layout(&node, screen(44, 1));
        let widths: Vec<i32> = sizes(&layout).iter().map(|s| s.width).collect();
        assert_eq!(widths, vec![10, 30]);
    }

    #[test]
    fn expanding_auto_child_takes_leftover() {
        let node = LayoutBox::column(vec![
            LayoutBox::leaf(5, 1),
            LayoutBox::leaf(5, 1).with_style(BoxStyle::new().expand_height()),
            LayoutBox::leaf(5, 1),
        ]);
        let layout = compute_layout(&node, screen(20, 10));
        let heights: Vec<i32> = sizes(&layout).iter().map(|s| s.height).collect();
        assert_eq!(heights, vec![1, 8, 1]);
    }

    #[test]
    fn leftover_spread_over_autos_when_container_is_forced_larger() {
        let node = LayoutBox::row(vec![LayoutBox::leaf(2, 1), LayoutBox::leaf(6, 1)])
            .with_style(BoxStyle::new().width(Dimension::Cells(16)));
        let layout = compute_layout(&node, screen(80, 1));
        let widths: Vec<i32> = sizes(&layout).iter().map(|s| s.width).collect();
        assert_eq!(widths, vec![4, 12]);
    }

    #[test]
    fn unbounded_flex_falls_back_to_intrinsic() {
        let node = LayoutBox::column(vec![
            LayoutBox::leaf(3, 2).with_style(BoxStyle::new().height(Dimension::Flex(1.0))),
        ]);
        let layout = compute_layout(&node, Constraints::new(0, 10, 0, UNBOUNDED));
        assert_eq!(sizes(&layout), vec![Size::new(3, 2)]);
    }

    #[test]
    fn cross_axis_flex_fills() {
        let node = LayoutBox::column(vec![
            LayoutBox::leaf(3, 1).with_style(BoxStyle::new().width(Dimension::Flex(1.0))),
            LayoutBox::leaf(3, 1),
        ]);
        let layout = compute_layout(&node, screen(30, 10));
        assert_eq!(sizes(&layout), vec![Size::new(30, 1), Size::new(3, 1)]);
    }

    #[test]
    fn margins_shift_children_and_count_as_used_space() {
        let node = LayoutBox::row(vec![
            LayoutBox::leaf(2, 1).with_style(BoxStyle::new().margin(Spacing::new(1, 1, 0, 3))),
            LayoutBox::leaf(1, 1).with_style(BoxStyle::new().width(Dimension::Flex(1.0))),
        ]);
        let layout = compute_layout(&node, screen(20, 5));
        assert_eq!(layout.children[0].offset, Offset::new(3, 1));
        assert_eq!(layout.children[1].offset.x, 6);
        assert_eq!(layout.children[1].layout.size.width, 14);
    }

    #[test]
    fn overflowing_fixed_children_stay_inside_content_box() {
        let node = LayoutBox::row(vec![
            LayoutBox::leaf(1, 1).with_style(BoxStyle::new().width(Dimension::Cells(8))),
            LayoutBox::leaf(1, 1).with_style(BoxStyle::new().width(Dimension::Cells(8))),
        ]);
        let layout = compute_layout(&node, screen(10, 1));
        for child in &layout.children {
            assert!(child.offset.x >= 0);
            assert!(child.offset.x + child.layout.size.width <= 10);
        }
        assert_eq!(layout.children[1].layout.size.width, 2);
    }

    #[test]
    fn empty_container_is_zero_content() {
        let layout = compute_layout(&LayoutBox::row(Vec::new()), screen(10, 10));
        assert_eq!(layout.size, Size::ZERO);
    }

    // ── Grid distribution ────────────────────────────────────────────

    #[test]
    fn grid_two_by_two_with_three_children() {
        let node = LayoutBox::grid(
            GridSpec::new(2, 2),
            vec![LayoutBox::leaf(3, 1), LayoutBox::leaf(5, 2), LayoutBox::leaf(4, 1)],
        );
        let layout = compute_layout(&node, screen(80, 24));
        assert_eq!(layout.children.len(), 3);
        assert_eq!(
            offsets(&layout),
            vec![Offset::new(0, 0), Offset::new(4, 0), Offset::new(0, 2)],
        );
        assert_eq!(layout.size, Size::new(9, 3));
    }

    #[test]
    fn grid_ignores_children_past_capacity() {
        let node = LayoutBox::grid(
            GridSpec::new(1, 2),
            vec![LayoutBox::leaf(1, 1), LayoutBox::leaf(1, 1), LayoutBox::leaf(1, 1)],
        );
        assert_eq!(compute_layout(&node, screen(10, 10)).children.len(), 2);
    }

    #[test]
    fn grid_degenerate_shapes() {
        let zero_rows = LayoutBox::grid(GridSpec::new(0, 3), vec![LayoutBox::leaf(1, 1)]);
        let layout = compute_layout(&zero_rows, screen(10, 10));
        assert_eq!(layout.size, Size::ZERO);
        assert!(layout.children.is_empty());

        let no_children = LayoutBox::grid(GridSpec::new(2, 2), Vec::new());
        assert_eq!(compute_layout(&no_children, screen(10, 10)).size, Size::ZERO);
    }

    #[test]
    fn grid_flex_and_fixed_columns_with_gap() {
        let spec = GridSpec {
            column_dims: vec![Dimension::Cells(4), Dimension::Flex(1.0), Dimension::Flex(1.0)],
            column_gap: 1,
            ..GridSpec::new(1, 3)
        };
        let node = LayoutBox::grid(
            spec,
            vec![LayoutBox::leaf(1, 1), LayoutBox::leaf(1, 1), LayoutBox::leaf(1, 1)],
        );
        let layout = compute_layout(&node, screen(21, 1));
        assert_eq!(
            offsets(&layout),
            vec![Offset::new(0, 0), Offset::new(5, 0), Offset::new(13, 0)],
        );
    }

    #[test]
    fn grid_row_height_is_tallest_cell() {
        let node = LayoutBox::grid(
            GridSpec::new(2, 2),
            vec![
                LayoutBox::leaf(1, 1),
                LayoutBox::leaf(1, 3),
                LayoutBox::leaf(1, 2),
                LayoutBox::leaf(1, 1),
            ],
        );
        let layout = compute_layout(&node, screen(80, 24));
        assert_eq!(layout.children[2].offset.y, 3);
        assert_eq!(layout.size.height, 5);
    }

    #[test]
    fn grid_expand_does_not_pollute_column_measurement() {
        let node = LayoutBox::grid(
            GridSpec::new(2, 2),
            vec![
                LayoutBox::leaf(2, 1).with_style(BoxStyle::new().expand_width()),
                LayoutBox::leaf(3, 1),
                LayoutBox::leaf(4, 1),
                LayoutBox::leaf(3, 1),
            ],
        );
        let layout = compute_layout(&node, screen(80, 24));
        assert_eq!(layout.size.width, 7);
        assert_eq!(layout.children[0].layout.size.width, 4);
    }

    // ── Determinism ──────────────────────────────────────────────────

    proptest! {
        #[test]
        fn layout_is_deterministic_and_conserves_flex_space(
            width in 0i32..300,
            weights in proptest::collection::vec(0.1f64..20.0, 1..10),
        ) {
            let children = weights
                .iter()
                .map(|&w| LayoutBox::leaf(1, 1).with_style(BoxStyle::new().width(Dimension::Flex(w))))
                .collect();
            let node = LayoutBox::row(children);
            let first = compute_layout(&node, screen(width, 3));
            let second = compute_layout(&node, screen(width, 3));
            prop_assert_eq!(&first, &second);
            let total: i32 = first.children.iter().map(|c| c.layout.size.width).sum();
            prop_assert_eq!(total, width);
        }
    }
}
