//! Integer space distribution shared by linear and grid layout.
//!
//! Both layouts reduce one axis to a list of [`Track`]s (a child in a row or
//! column, a grid column, a grid row) and resolve them with
//! [`resolve_tracks`]. Proportional shares use the running-remainder scheme
//! in [`distribute`]: each item receives the difference between successive
//! floored cumulative totals, so the shares always sum to the target.

use super::constraints::UNBOUNDED;

// ---------------------------------------------------------------------------
// Running remainder
// ---------------------------------------------------------------------------

/// Split `total` cells across `weights`.
///
/// The result has one entry per weight and sums to exactly `total` (or to
/// zero when `total <= 0`). Negative and NaN weights count as zero. When
/// every weight is zero the split is even.
pub fn distribute(total: i32, weights: &[f64]) -> Vec<i32> {
    let n = weights.len();
    if n == 0 {
        return Vec::new();
    }
    if total <= 0 {
        return vec![0; n];
    }

    let clean: Vec<f64> = weights
        .iter()
        .map(|&w| if w.is_nan() || w < 0.0 { 0.0 } else { w })
        .collect();
    let mut sum: f64 = clean.iter().sum();
    let even = sum <= 0.0 || !sum.is_finite();
    if even {
        sum = n as f64;
    }

    let mut out = Vec::with_capacity(n);
    let mut running = 0.0_f64;
    let mut previous = 0_i32;
    for (i, &w) in clean.iter().enumerate() {
        running += if even { 1.0 } else { w };
        let current = if i + 1 == n {
            total
        } else {
            let ideal = (running / sum * total as f64).floor();
            (ideal.max(0.0) as i64).clamp(previous as i64, total as i64) as i32
        };
        out.push(current - previous);
        previous = current;
    }
    out
}

// ---------------------------------------------------------------------------
// Tracks
// ---------------------------------------------------------------------------

/// One slot along an axis, classified for distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Track {
    /// Resolved without measuring: `Cells`, or `Percent` of a bounded axis.
    Fixed(i32),
    /// Takes a weighted share of the leftover space.
    Flex(f64),
    /// Measured intrinsic size.
    Auto(i32),
}

/// Resolve track sizes along one axis.
///
/// `available` is the axis maximum (possibly [`UNBOUNDED`]), `minimum` the
/// size the container must at least fill, and `overhead` the space consumed
/// by gaps and margins. Flex tracks share whatever `available` leaves after
/// fixed, auto and overhead space. Without flex tracks, space needed to
/// reach `minimum` is spread over the auto tracks in proportion to their
/// intrinsic sizes.
pub(crate) fn resolve_tracks(tracks: &[Track], available: i32, minimum: i32, overhead: i32) -> Vec<i32> {
    let mut sizes: Vec<i32> = tracks
        .iter()
        .map(|t| match *t {
            Track::Fixed(n) | Track::Auto(n) => n.max(0),
            Track::Flex(_) => 0,
        })
        .collect();

    let used = sizes
        .iter()
        .fold(overhead.max(0) as i64, |acc, &s| acc + s as i64);

    let flex: Vec<(usize, f64)> = tracks
        .iter()
        .enumerate()
        .filter_map(|(i, t)| match *t {
            Track::Flex(w) => Some((i, w)),
            _ => None,
        })
        .collect();

    if !flex.is_empty() {
        if available == UNBOUNDED {
            return sizes;
        }
        let remaining = (available as i64 - used).max(0) as i32;
        let weights: Vec<f64> = flex.iter().map(|&(_, w)| w).collect();
        for (&(i, _), share) in flex.iter().zip(distribute(remaining, &weights)) {
            sizes[i] = share;
        }
        return sizes;
    }

    let leftover = (minimum as i64 - used).max(0) as i32;
    if leftover > 0 {
        let autos: Vec<usize> = tracks
            .iter()
            .enumerate()
            .filter_map(|(i, t)| matches!(t, Track::Auto(_)).then_some(i))
            .collect();
        if !autos.is_empty() {
            let weights: Vec<f64> = autos.iter().map(|&i| sizes[i] as f64).collect();
            for (&i, share) in autos.iter().zip(distribute(leftover, &weights)) {
                sizes[i] += share;
            }
        }
    }
    sizes
}
