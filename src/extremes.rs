use log::debug;
use nalgebra::{self, Point2};

use crate::errors::ExtremeError;

#[derive(PartialEq, Debug, Clone, Copy)]
/// The two anchors farthest apart, and the smallest gap between any two anchors.
pub struct ExtremePair {
    /// Indices of the farthest-apart pair, `first < second`.
    pub farthest: (usize, usize),
    /// Distance between the farthest pair.
    pub max_distance: f64,
    /// Indices of the closest pair, `first < second`.
    pub nearest: (usize, usize),
    /// Distance between the closest pair. Used as the spacing of new lamps.
    pub min_spacing: f64,
}

/// All index pairs `(i, j)` with `i < j < n`, in row-major order.
pub fn index_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// Scans every pair of `points` for the largest and smallest distance.
///
/// Ties keep the pair found first in row-major order, so the result only
/// depends on the order of the input.
pub fn find_extreme_pair(points: &[Point2<f64>]) -> Result<ExtremePair, ExtremeError> {
    let n = points.len();
    if n < 2 {
        return Err(ExtremeError::TooFewPoints(n));
    }

    let first = nalgebra::distance(&points[0], &points[1]);
    let mut extremes = ExtremePair {
        farthest: (0, 1),
        max_distance: first,
        nearest: (0, 1),
        min_spacing: first,
    };
    for (i, j) in index_pairs(n).skip(1) {
        let d = nalgebra::distance(&points[i], &points[j]);
        if d > extremes.max_distance {
            extremes.farthest = (i, j);
            extremes.max_distance = d;
        }
        if d < extremes.min_spacing {
            extremes.nearest = (i, j);
            extremes.min_spacing = d;
        }
    }
    debug!(
        "extreme pair {:?} at {:.4}, nearest pair {:?} at {:.4}",
        extremes.farthest, extremes.max_distance, extremes.nearest, extremes.min_spacing
    );
    Ok(extremes)
}
