//! Top-down size constraints and axis helpers.

use crate::geometry::{Offset, Size, Spacing};

/// Marker for an unbounded maximum.
pub const UNBOUNDED: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    pub const fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// The component of `size` along this axis.
    #[inline]
    pub const fn of(self, size: Size) -> i32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Build a size from main/cross components.
    #[inline]
    pub const fn size(self, main: i32, cross: i32) -> Size {
        match self {
            Axis::Horizontal => Size { width: main, height: cross },
            Axis::Vertical => Size { width: cross, height: main },
        }
    }

    /// Build an offset from main/cross components.
    #[inline]
    pub const fn offset(self, main: i32, cross: i32) -> Offset {
        match self {
            Axis::Horizontal => Offset { x: main, y: cross },
            Axis::Vertical => Offset { x: cross, y: main },
        }
    }

    /// The leading inset (left or top) on this axis.
    #[inline]
    pub const fn leading(self, s: Spacing) -> i32 {
        match self {
            Axis::Horizontal => s.left,
            Axis::Vertical => s.top,
        }
    }

    /// Total inset (leading + trailing) on this axis.
    #[inline]
    pub const fn total(self, s: Spacing) -> i32 {
        match self {
            Axis::Horizontal => s.width(),
            Axis::Vertical => s.height(),
        }
    }
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

/// Min/max bounds for a node's outer size, passed from parent to child.
///
/// A max of [`UNBOUNDED`] means the axis has no upper limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constraints {
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
}

impl Constraints {
    /// No lower bound and no upper bound on either axis.
    pub const UNCONSTRAINED: Constraints =
        Constraints { min_width: 0, max_width: UNBOUNDED, min_height: 0, max_height: UNBOUNDED };

    /// Create constraints from explicit bounds.
    #[inline]
    pub const fn new(min_width: i32, max_width: i32, min_height: i32, max_height: i32) -> Self {
        Self { min_width, max_width, min_height, max_height }
    }

    /// Exactly `size`.
    #[inline]
    pub const fn tight(size: Size) -> Self {
        Self::new(size.width, size.width, size.height, size.height)
    }

    /// Anything from zero up to `size`.
    #[inline]
    pub const fn loose(size: Size) -> Self {
        Self::new(0, size.width, 0, size.height)
    }

    /// Repair what a misbehaving parent may send.
    ///
    /// Negative values become zero, and an inverted axis (min > max)
    /// collapses to `min = max = max`.
    pub fn normalized(self) -> Self {
        fn axis(min: i32, max: i32) -> (i32, i32) {
            let min = min.max(0);
            let max = max.max(0);
            if min > max { (max, max) } else { (min, max) }
        }
        let (min_width, max_width) = axis(self.min_width, self.max_width);
        let (min_height, max_height) = axis(self.min_height, self.max_height);
        Self { min_width, max_width, min_height, max_height }
    }

    /// Lower bound on `axis`.
    #[inline]
    pub const fn min(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.min_width,
            Axis::Vertical => self.min_height,
        }
    }

    /// Upper bound on `axis`.
    #[inline]
    pub const fn max(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.max_width,
            Axis::Vertical => self.max_height,
        }
    }

    /// Whether `axis` has a finite maximum.
    #[inline]
    pub const fn is_bounded(self, axis: Axis) -> bool {
        self.max(axis) != UNBOUNDED
    }

    /// Replace the bounds on one axis.
    #[inline]
    pub const fn with_axis(self, axis: Axis, min: i32, max: i32) -> Self {
        match axis {
            Axis::Horizontal => Self { min_width: min, max_width: max, ..self },
            Axis::Vertical => Self { min_height: min, max_height: max, ..self },
        }
    }

    /// Force `min = max` on `axis` when it is bounded.
    pub fn fill(self, axis: Axis) -> Self {
        if self.is_bounded(axis) {
            let max = self.max(axis);
            self.with_axis(axis, max, max)
        } else {
            self
        }
    }

    /// Drop both lower bounds.
    #[inline]
    pub const fn loosen(self) -> Self {
        Self { min_width: 0, min_height: 0, ..self }
    }

    /// Shrink both bounds by fixed insets, keeping unbounded maxima unbounded.
    pub fn deflate(self, horizontal: i32, vertical: i32) -> Self {
        Self {
            min_width: (self.min_width - horizontal).max(0),
            max_width: shrink_max(self.max_width, horizontal),
            min_height: (self.min_height - vertical).max(0),
            max_height: shrink_max(self.max_height, vertical),
        }
    }

    /// Clamp `size` into these bounds.
    pub fn constrain(self, size: Size) -> Size {
        Size {
            width: size.width.max(self.min_width).min(self.max_width),
            height: size.height.max(self.min_height).min(self.max_height),
        }
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::UNCONSTRAINED
    }
}

/// Subtract `by` from a maximum, leaving [`UNBOUNDED`] untouched.
#[inline]
pub(crate) fn shrink_max(max: i32, by: i32) -> i32 {
    if max == UNBOUNDED { UNBOUNDED } else { (max - by).max(0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_clamps_negatives() {
        let c = Constraints::new(-4, -1, 2, 5).normalized();
        assert_eq!(c, Constraints::new(0, 0, 2, 5));
    }

    #[test]
    fn normalized_inverted_axis_collapses_to_max() {
        let c = Constraints::new(10, 4, 3, 3).normalized();
        assert_eq!(c.min_width, 4);
        assert_eq!(c.max_width, 4);
    }

    #[test]
    fn deflate_keeps_unbounded() {
        let c = Constraints::new(3, UNBOUNDED, 1, 10).deflate(2, 4);
        assert_eq!(c, Constraints::new(1, UNBOUNDED, 0, 6));
    }

    #[test]
    fn fill_only_bounded_axes() {
        let c = Constraints::new(0, 20, 0, UNBOUNDED);
        assert_eq!(c.fill(Axis::Horizontal).min_width, 20);
        assert_eq!(c.fill(Axis::Vertical).min_height, 0);
    }

    #[test]
    fn constrain_clamps_both_axes() {
        let c = Constraints::new(2, 8, 1, 3);
        assert_eq!(c.constrain(Size::new(0, 10)), Size::new(2, 3));
        assert_eq!(c.constrain(Size::new(5, 2)), Size::new(5, 2));
    }

    #[test]
    fn axis_helpers() {
        let s = Spacing::new(1, 2, 3, 4);
        assert_eq!(Axis::Horizontal.leading(s), 4);
        assert_eq!(Axis::Vertical.leading(s), 1);
        assert_eq!(Axis::Horizontal.total(s), 6);
        assert_eq!(Axis::Vertical.size(5, 2), Size::new(2, 5));
        assert_eq!(Axis::Vertical.offset(5, 2), Offset::new(2, 5));
        assert_eq!(Axis::Horizontal.cross(), Axis::Vertical);
    }
}
