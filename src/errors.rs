use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
/// Failures while fitting a curve through the anchor set.
pub enum FitError {
    /// Fewer than two points were supplied; a curve through them is undefined.
    #[error("need at least 2 points to fit a curve, got {0}")]
    TooFewPoints(usize),
    /// The normal matrix `HᵗH` is singular. This happens when every anchor
    /// shares the same x, i.e. the lamps stand on a line parallel to the z axis.
    #[error("degenerate curve fit: {distinct_x} distinct x value(s) among the anchors")]
    Degenerate { distinct_x: usize },
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
/// Failures of the farthest/nearest pair scan.
pub enum ExtremeError {
    /// A pair search needs at least one pair.
    #[error("need at least 2 points to find an extreme pair, got {0}")]
    TooFewPoints(usize),
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
/// Failures while stepping along the fitted curve.
pub enum ExtrapolationError {
    /// The circle of the requested radius around the anchor never meets the
    /// curve. Usually the anchor lies farther from the curve than the spacing.
    #[error("no point on the curve at distance {distance} from ({x}, {z})")]
    NoRealSolution { x: f64, z: f64, distance: f64 },
}

#[derive(Debug, Error, Clone, PartialEq)]
/// All errors returned by installation planning. Each wraps the component
/// that caused the abort; no partial set of lamps is ever returned with one.
pub enum InstallationError {
    #[error("curve fit failed: {0}")]
    Fit(#[from] FitError),
    #[error("extreme pair search failed: {0}")]
    Extremes(#[from] ExtremeError),
    #[error("curve extrapolation failed: {0}")]
    Extrapolation(#[from] ExtrapolationError),
    /// Two existing anchors coincide, so the spacing for new lamps is zero.
    #[error("minimum spacing between existing lamps is {0}, expected a positive distance")]
    ZeroSpacing(f64),
    /// More new lamps requested than the planner is configured to produce.
    #[error("requested {requested} new lamps, at most {max} are allowed")]
    TooManyLamps { requested: usize, max: usize },
}

impl InstallationError {
    /// Short advisory suitable for a toast-style notification.
    pub fn advisory_message(&self) -> &'static str {
        match *self {
            InstallationError::Fit(_) | InstallationError::Extremes(_) => {
                "Lamps must be spread out to create installation"
            }
            InstallationError::Extrapolation(_) | InstallationError::ZeroSpacing(_) => {
                "Could not compute layout for current spacing"
            }
            InstallationError::TooManyLamps { .. } => "Too many new lamps requested",
        }
    }
}

#[derive(Debug, Error)]
/// Errors raised while loading planner configuration.
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
/// Errors raised while parsing a lamp catalog.
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),
    /// Field count must be even and at least four: name, scale, then model/material pairs.
    #[error("line {line}: expected name, scale and model/material pairs, got {fields} field(s)")]
    FieldCount { line: usize, fields: usize },
    #[error("line {line}: invalid scale {value:?}")]
    Scale { line: usize, value: String },
    #[error("line {line}: empty {field}")]
    EmptyField { line: usize, field: &'static str },
    #[error("line {line}: duplicate lamp name {name:?}")]
    DuplicateName { line: usize, name: String },
}
