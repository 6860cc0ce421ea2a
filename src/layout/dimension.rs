//! Size intent along one axis, and the per-node box style.
//!
//! [`BoxStyle`] follows the same "every field is `Option`" shape as a style
//! sheet: `None` means "not set" and is filled in by
//! [`BoxStyle::with_defaults`]. An unset dimension is distinct from
//! [`Dimension::Auto`], which is an explicit request for intrinsic sizing.

use crate::geometry::Spacing;

use super::constraints::{Axis, UNBOUNDED};

// ---------------------------------------------------------------------------
// Dimension
// ---------------------------------------------------------------------------

/// Size intent for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// Size to content.
    Auto,
    /// Exactly `n` cells.
    Cells(i32),
    /// A share of the leftover space, proportional to the weight.
    Flex(f64),
    /// A percentage of the available space on this axis.
    Percent(f64),
}

impl Dimension {
    /// A fixed cell count. Negative values are clamped to zero.
    pub fn cells(n: i32) -> Self {
        Dimension::Cells(n.max(0))
    }

    /// A flex weight. Negative or NaN weights become zero.
    pub fn flex(weight: f64) -> Self {
        if weight.is_nan() || weight < 0.0 {
            Dimension::Flex(0.0)
        } else {
            Dimension::Flex(weight)
        }
    }

    /// A percentage of available space.
    pub fn percent(p: f64) -> Self {
        if p.is_nan() {
            Dimension::Percent(0.0)
        } else {
            Dimension::Percent(p)
        }
    }

    /// Whether this is a flex dimension.
    pub fn is_flex(self) -> bool {
        matches!(self, Dimension::Flex(_))
    }

    /// Resolve to a concrete cell count when that is possible without
    /// measuring content.
    ///
    /// `Cells` always resolves; `Percent` resolves only against a bounded
    /// `available`. `Auto` and `Flex` return `None`.
    pub fn resolve(self, available: i32) -> Option<i32> {
        match self {
            Dimension::Cells(n) => Some(n.max(0)),
            Dimension::Percent(p) if available != UNBOUNDED => {
                let v = (available.max(0) as f64 * p / 100.0).floor();
                Some((v.max(0.0)).min(i32::MAX as f64) as i32)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// BoxStyle
// ---------------------------------------------------------------------------

/// Box-model and sizing properties of a layout node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxStyle {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub padding: Option<Spacing>,
    pub border: Option<Spacing>,
    pub margin: Option<Spacing>,
    /// Fill the available width instead of fitting content.
    pub expand_width: Option<bool>,
    /// Fill the available height instead of fitting content.
    pub expand_height: Option<bool>,
}

impl BoxStyle {
    /// An empty style (everything unset).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width (builder).
    pub fn width(mut self, d: Dimension) -> Self {
        self.width = Some(d);
        self
    }

    /// Set the height (builder).
    pub fn height(mut self, d: Dimension) -> Self {
        self.height = Some(d);
        self
    }

    /// Set the padding (builder).
    pub fn padding(mut self, s: Spacing) -> Self {
        self.padding = Some(s);
        self
    }

    /// Set the border insets (builder).
    pub fn border(mut self, s: Spacing) -> Self {
        self.border = Some(s);
        self
    }

    /// A one-cell border on every edge (builder).
    pub fn bordered(self) -> Self {
        self.border(Spacing::all(1))
    }

    /// Set the margin (builder).
    pub fn margin(mut self, s: Spacing) -> Self {
        self.margin = Some(s);
        self
    }

    /// Expand on both axes (builder).
    pub fn expand(self) -> Self {
        self.expand_width().expand_height()
    }

    /// Expand horizontally (builder).
    pub fn expand_width(mut self) -> Self {
        self.expand_width = Some(true);
        self
    }

    /// Expand vertically (builder).
    pub fn expand_height(mut self) -> Self {
        self.expand_height = Some(true);
        self
    }

    /// Fill every unset field of `self` from `defaults`.
    ///
    /// Fields already set on `self` win, including an explicit
    /// [`Dimension::Auto`].
    pub fn with_defaults(&self, defaults: &BoxStyle) -> BoxStyle {
        BoxStyle {
            width: self.width.or(defaults.width),
            height: self.height.or(defaults.height),
            padding: self.padding.or(defaults.padding),
            border: self.border.or(defaults.border),
            margin: self.margin.or(defaults.margin),
            expand_width: self.expand_width.or(defaults.expand_width),
            expand_height: self.expand_height.or(defaults.expand_height),
        }
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == BoxStyle::default()
    }

    // ── Resolved accessors ───────────────────────────────────────────

    /// The dimension on `axis`, `Auto` when unset.
    pub fn dimension(&self, axis: Axis) -> Dimension {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
        .unwrap_or(Dimension::Auto)
    }

    /// Whether the node asked to fill `axis`.
    pub fn expands(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.expand_width,
            Axis::Vertical => self.expand_height,
        }
        .unwrap_or(false)
    }

    /// Padding with negative edges clamped away.
    pub fn resolved_padding(&self) -> Spacing {
        self.padding.unwrap_or_default().clamped()
    }

    /// Border with negative edges clamped away.
    pub fn resolved_border(&self) -> Spacing {
        self.border.unwrap_or_default().clamped()
    }

    /// Margin with negative edges clamped away.
    pub fn resolved_margin(&self) -> Spacing {
        self.margin.unwrap_or_default().clamped()
    }

    /// Padding plus border: everything between the outer edge and content.
    pub fn insets(&self) -> Spacing {
        self.resolved_padding() + self.resolved_border()
    }
}
