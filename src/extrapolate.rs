//! Stepping along a fitted curve by a fixed distance.
//!
//! A new lamp lies on the curve and on the circle of radius `d` around the
//! lamp it extends from. For a line `z = b1·x + b0` substituting into
//! `(x - x0)² + (z - z0)² = d²` gives
//!
//! ```text
//! k1·x² + k2·x + k3 = 0
//! k1 = 1 + b1²
//! k2 = -2·x0 + 2·b1·b0 - 2·b1·z0
//! k3 = x0² + b0² - 2·b0·z0 + z0² - d²
//! ```
//!
//! For a quadratic curve the same substitution gives a quartic, whose real
//! roots are read off the eigenvalues of its companion matrix. Every root is
//! checked against the distance it must satisfy before it is used.

use log::trace;
use nalgebra::{self, DMatrix, Point2};

use crate::curve_fit::Polynomial;
use crate::errors::ExtrapolationError;

/// Imaginary parts below this (relative to the root magnitude) count as real.
const IMAGINARY_TOLERANCE: f64 = 1e-7;
/// Newton steps applied to every root candidate.
const POLISH_STEPS: usize = 12;
/// Candidates whose distance to the anchor misses the target by more than
/// this (relative to the target, or absolute below 1) are discarded.
const DISTANCE_TOLERANCE: f64 = 1e-7;

/// The two intersections of the line `z = b1·x + b0` with the circle of
/// radius `distance` around `center`. A tangent line yields the same point twice.
pub fn intersect_line_circle(
    b0: f64,
    b1: f64,
    center: &Point2<f64>,
    distance: f64,
) -> Result<[Point2<f64>; 2], ExtrapolationError> {
    let (x0, z0) = (center.x, center.y);
    let k1 = 1. + b1 * b1;
    let k2 = -2. * x0 + 2. * b1 * b0 - 2. * b1 * z0;
    let k3 = x0 * x0 + b0 * b0 - 2. * b0 * z0 + z0 * z0 - distance * distance;

    let discriminant = k2 * k2 - 4. * k1 * k3;
    if discriminant.is_nan() || discriminant < 0. {
        return Err(no_solution(center, distance));
    }
    let root = discriminant.sqrt();
    let x1 = (-k2 + root) / (2. * k1);
    let x2 = (-k2 - root) / (2. * k1);
    Ok([
        Point2::new(x1, b1 * x1 + b0),
        Point2::new(x2, b1 * x2 + b0),
    ])
}

/// Every point on `curve` at `distance` from `center`.
pub fn points_at_distance(
    curve: &Polynomial,
    center: &Point2<f64>,
    distance: f64,
) -> Result<Vec<Point2<f64>>, ExtrapolationError> {
    if let Some((b0, b1)) = curve.as_line() {
        return intersect_line_circle(b0, b1, center, distance).map(|points| points.to_vec());
    }

    // Companion-matrix roots lose accuracy when the curve is nearly straight,
    // so the tangent line at the anchor seeds two more Newton searches.
    let q = circle_residual(curve, center, distance);
    let mut roots = real_roots(&q);
    let slope = curve.slope(center.x);
    let intercept = curve.eval(center.x) - slope * center.x;
    if let Ok(seeds) = intersect_line_circle(intercept, slope, center, distance) {
        roots.extend(seeds.iter().map(|seed| polish(&q, seed.x)));
    }

    let tolerance = DISTANCE_TOLERANCE * distance.max(1.);
    let mut points: Vec<Point2<f64>> = Vec::new();
    for x in roots.into_iter().filter(|x| x.is_finite()) {
        let p = Point2::new(x, curve.eval(x));
        let on_circle = (nalgebra::distance(&p, center) - distance).abs() <= tolerance;
        if on_circle && !points.iter().any(|q| nalgebra::distance(q, &p) <= tolerance) {
            points.push(p);
        }
    }
    if points.is_empty() {
        return Err(no_solution(center, distance));
    }
    Ok(points)
}

/// The point on `curve` at `distance` from `from` that lies farther from `opposite`.
///
/// Choosing the farther candidate keeps an installation growing outward
/// instead of folding back over lamps already placed. On a tie the first
/// candidate is kept.
pub fn next_point(
    curve: &Polynomial,
    from: &Point2<f64>,
    opposite: &Point2<f64>,
    distance: f64,
) -> Result<Point2<f64>, ExtrapolationError> {
    let candidates = points_at_distance(curve, from, distance)?;
    trace!("candidates around {:?}: {:?}", from, candidates);
    candidates
        .into_iter()
        .fold(None, |best: Option<(Point2<f64>, f64)>, candidate| {
            let d = nalgebra::distance(&candidate, opposite);
            match best {
                Some((_, best_d)) if best_d >= d => best,
                _ => Some((candidate, d)),
            }
        })
        .map(|(point, _)| point)
        .ok_or_else(|| no_solution(from, distance))
}

fn no_solution(center: &Point2<f64>, distance: f64) -> ExtrapolationError {
    ExtrapolationError::NoRealSolution {
        x: center.x,
        z: center.y,
        distance,
    }
}

/// Ascending coefficients of `(x - x0)² + (f(x) - z0)² - d²`.
fn circle_residual(curve: &Polynomial, center: &Point2<f64>, distance: f64) -> Vec<f64> {
    let mut shifted = curve.coefficients().to_vec();
    shifted[0] -= center.y;

    let mut q = vec![0.; 2 * shifted.len() - 1];
    for (i, a) in shifted.iter().enumerate() {
        for (j, b) in shifted.iter().enumerate() {
            q[i + j] += a * b;
        }
    }
    if q.len() < 3 {
        q.resize(3, 0.);
    }
    q[0] += center.x * center.x - distance * distance;
    q[1] -= 2. * center.x;
    q[2] += 1.;
    q
}

/// Real roots of the polynomial with ascending coefficients `coefficients`.
fn real_roots(coefficients: &[f64]) -> Vec<f64> {
    let mut c = coefficients.to_vec();
    while c.len() > 1 && c[c.len() - 1] == 0. {
        c.pop();
    }

    let m = c.len() - 1;
    match m {
        0 => Vec::new(),
        1 => vec![-c[0] / c[1]],
        _ => {
            let lead = c[m];
            let companion = DMatrix::from_fn(m, m, |row, col| {
                if col == m - 1 {
                    -c[row] / lead
                } else if row == col + 1 {
                    1.
                } else {
                    0.
                }
            });
            companion
                .complex_eigenvalues()
                .iter()
                .filter(|z| z.im.abs() <= IMAGINARY_TOLERANCE * (1. + z.re.abs()))
                .map(|z| polish(&c, z.re))
                .collect()
        }
    }
}

fn polish(c: &[f64], mut x: f64) -> f64 {
    for _ in 0..POLISH_STEPS {
        let (value, slope) = c.iter().rev().fold((0., 0.), |(v, s), coefficient| {
            (v * x + coefficient, s * x + v)
        });
        if slope == 0. || !slope.is_finite() {
            break;
        }
        let step = value / slope;
        x -= step;
        if step.abs() <= f64::EPSILON * (1. + x.abs()) {
            break;
        }
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn line_circle_roots_lie_on_both() {
        let center = Point2::new(0., 1.);
        let roots = intersect_line_circle(1., 2., &center, 5.).unwrap();
        for p in roots.iter() {
            assert_relative_eq!(p.y, 2. * p.x + 1., epsilon = 1e-9);
            assert_relative_eq!(p.x.powi(2) + (p.y - 1.).powi(2), 25., epsilon = 1e-6);
        }
        assert_relative_eq!(roots[0].x, 5f64.sqrt(), epsilon = 1e-9);
        assert_relative_eq!(roots[1].x, -(5f64.sqrt()), epsilon = 1e-9);
    }

    #[test]
    fn picks_root_away_from_opposite_end() {
        let curve = Polynomial::line(1., 2.);
        let from = Point2::new(0., 1.);

        let p = next_point(&curve, &from, &Point2::new(-3., -5.), 5.).unwrap();
        assert_relative_eq!(p.x, 5f64.sqrt(), epsilon = 1e-9);

        let p = next_point(&curve, &from, &Point2::new(3., 7.), 5.).unwrap();
        assert_relative_eq!(p.x, -(5f64.sqrt()), epsilon = 1e-9);
    }

    #[test]
    fn circle_missing_line_is_an_error() {
        let curve = Polynomial::line(0., 0.);
        let from = Point2::new(0., 5.);
        assert_eq!(
            next_point(&curve, &from, &Point2::new(1., 0.), 1.),
            Err(ExtrapolationError::NoRealSolution {
                x: 0.,
                z: 5.,
                distance: 1.
            })
        );
    }

    #[test]
    fn tangent_line_gives_double_root() {
        let roots = intersect_line_circle(1., 0., &Point2::new(2., 0.), 1.).unwrap();
        assert_relative_eq!(roots[0].x, 2., epsilon = 1e-9);
        assert_relative_eq!(roots[1].x, 2., epsilon = 1e-9);
        assert_relative_eq!(roots[0].y, 1.);
    }

    #[test]
    fn steps_along_parabola() {
        // z = x², unit circle scaled to √2 around the vertex meets it at x = ±1.
        let curve = Polynomial::new(vec![0., 0., 1.]);
        let from = Point2::new(0., 0.);
        let mut xs: Vec<f64> = points_at_distance(&curve, &from, 2f64.sqrt())
            .unwrap()
            .iter()
            .map(|p| p.x)
            .collect();
        xs.sort_by(f64::total_cmp);
        assert_eq!(xs.len(), 2);
        assert_relative_eq!(xs[0], -1., epsilon = 1e-8);
        assert_relative_eq!(xs[1], 1., epsilon = 1e-8);

        let p = next_point(&curve, &from, &Point2::new(-1., 1.), 2f64.sqrt()).unwrap();
        assert_relative_eq!(p.x, 1., epsilon = 1e-8);
        assert_relative_eq!(p.y, 1., epsilon = 1e-8);
    }

    #[test]
    fn nearly_straight_parabola_steps_by_the_distance() {
        let curve = Polynomial::new(vec![0., 1., 1e-6]);
        let from = Point2::new(4., curve.eval(4.));
        let opposite = Point2::new(0., 0.);
        let distance = 2f64.sqrt();

        for p in points_at_distance(&curve, &from, distance).unwrap().iter() {
            assert_relative_eq!(nalgebra::distance(p, &from), distance, epsilon = 1e-6);
            assert_relative_eq!(p.y, curve.eval(p.x), epsilon = 1e-12);
        }

        let p = next_point(&curve, &from, &opposite, distance).unwrap();
        assert!(p.x > 4.9 && p.x < 5.1, "stepped to {:?}", p);
        assert_relative_eq!(nalgebra::distance(&p, &from), distance, epsilon = 1e-6);
    }

    #[test]
    fn parabola_far_from_anchor_has_no_solution() {
        let curve = Polynomial::new(vec![10., 0., 1.]);
        let result = points_at_distance(&curve, &Point2::new(0., 0.), 1.);
        assert!(matches!(
            result,
            Err(ExtrapolationError::NoRealSolution { .. })
        ));
    }
}
