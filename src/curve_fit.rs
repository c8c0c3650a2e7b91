//! Ordinary least squares fit of `z = f(x)` through ground-plane points.
//!
//! The design matrix `H` has rows `[1, x, x², …, xᵏ]` and the coefficients
//! solve the normal equations `b = (HᵗH)⁻¹ Hᵗ z`. The degree is capped at
//! [`MAX_CURVE_DEGREE`] and further by the number of distinct x values, so
//! the normal matrix is never rank deficient by construction. A singular
//! matrix that slips through anyway is reported, never propagated as NaN.

use log::debug;
use nalgebra::{DMatrix, DVector, Point2};

use crate::errors::FitError;

/// Highest polynomial degree the fitter will produce.
pub const MAX_CURVE_DEGREE: usize = 2;

#[derive(PartialEq, Debug, Clone)]
/// Polynomial `z = c₀ + c₁x + c₂x² + …` with coefficients in ascending order.
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Creates a polynomial from ascending coefficients. An empty slice is the zero polynomial.
    pub fn new(coefficients: Vec<f64>) -> Polynomial {
        if coefficients.is_empty() {
            return Polynomial {
                coefficients: vec![0.],
            };
        }
        Polynomial { coefficients }
    }

    /// Line `z = b1·x + b0`.
    pub fn line(b0: f64, b1: f64) -> Polynomial {
        Polynomial::new(vec![b0, b1])
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Intercept and slope `(b0, b1)` when this is at most a line.
    pub fn as_line(&self) -> Option<(f64, f64)> {
        match self.coefficients.as_slice() {
            [b0] => Some((*b0, 0.)),
            [b0, b1] => Some((*b0, *b1)),
            _ => None,
        }
    }

    /// Evaluates at `x` using Horner's scheme.
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0., |acc, c| acc * x + c)
    }

    /// Derivative `dz/dx` at `x`.
    pub fn slope(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .fold(0., |acc, (power, c)| acc * x + power as f64 * c)
    }

    /// Sum of squared residuals in z over `points`.
    pub fn sum_squared_residuals(&self, points: &[Point2<f64>]) -> f64 {
        points
            .iter()
            .map(|p| (p.y - self.eval(p.x)).powi(2))
            .sum()
    }
}

/// Number of distinct x values, comparing with a tolerance relative to the magnitude of the data.
pub fn distinct_x_count(points: &[Point2<f64>]) -> usize {
    let mut xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    if xs.is_empty() {
        return 0;
    }
    xs.sort_by(f64::total_cmp);
    let scale = xs.iter().fold(1f64, |m, x| m.max(x.abs()));
    let tolerance = 1e-9 * scale;
    1 + xs.windows(2).filter(|w| w[1] - w[0] > tolerance).count()
}

/// Fits a polynomial of at most `degree` through `points` (x → z).
///
/// The effective degree is `min(degree, MAX_CURVE_DEGREE, distinct_x - 1)`,
/// and at least one.
pub fn fit_polynomial(points: &[Point2<f64>], degree: usize) -> Result<Polynomial, FitError> {
    let n = points.len();
    if n < 2 {
        return Err(FitError::TooFewPoints(n));
    }
    let distinct_x = distinct_x_count(points);
    if distinct_x < 2 {
        return Err(FitError::Degenerate { distinct_x });
    }
    let degree = degree.clamp(1, MAX_CURVE_DEGREE).min(distinct_x - 1);

    let h = DMatrix::from_fn(n, degree + 1, |row, col| points[row].x.powi(col as i32));
    let z = DVector::from_iterator(n, points.iter().map(|p| p.y));
    let ht = h.transpose();
    let normal = &ht * &h;
    let inverse = normal
        .try_inverse()
        .ok_or(FitError::Degenerate { distinct_x })?;
    let b = inverse * ht * z;
    if b.iter().any(|c| !c.is_finite()) {
        return Err(FitError::Degenerate { distinct_x });
    }

    let curve = Polynomial::new(b.iter().cloned().collect());
    debug!(
        "fitted degree {} curve through {} points: {:?}",
        degree,
        n,
        curve.coefficients()
    );
    Ok(curve)
}

/// Fits the line `z = b1·x + b0`.
pub fn fit_line(points: &[Point2<f64>]) -> Result<Polynomial, FitError> {
    fit_polynomial(points, 1)
}
