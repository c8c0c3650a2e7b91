//! Installation planning: extends a user-placed set of lamps along the curve
//! that best fits them.
//!
//! A plan runs through `Idle → Fitting → (ExtendingRight ⇄ ExtendingLeft) → Done`.
//! The curve is fitted once over every anchor, the two farthest-apart anchors
//! become the ends of the installation and new lamps are added alternately at
//! each end, spaced by the smallest gap between existing lamps. Any failure
//! aborts the whole plan so the scene never receives a partial installation.

use std::fmt;

use log::{debug, info};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::anchor::{folded_height, ground_points, mean_height, Anchor, LampPosition};
use crate::curve_fit::fit_polynomial;
use crate::errors::InstallationError;
use crate::extrapolate::next_point;
use crate::extremes::find_extreme_pair;

/// Upper bound of new lamps offered by the lamp count picker.
pub const DEFAULT_MAX_NEW_LAMPS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// End of the installation being extended. `Left` is the extreme anchor with
/// the smaller x coordinate.
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// How the height of generated lamps is derived from the existing ones.
pub enum HeightMode {
    /// `h = (h + next) / 2` folded over the anchors in input order.
    PairwiseFold,
    /// Arithmetic mean of all anchor heights.
    Mean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
/// Tunables of the planner, read from the `[planner]` table of the config file.
pub struct PlannerOptions {
    /// Requested degree of the fitted curve, capped by `MAX_CURVE_DEGREE` (default: 1)
    #[serde(default = "default_curve_degree")]
    pub curve_degree: usize,

    /// End extended by the first new lamp (default: right)
    #[serde(default = "default_start_side")]
    pub start_side: Side,

    /// Height rule for generated lamps (default: pairwise_fold)
    #[serde(default = "default_height_mode")]
    pub height_mode: HeightMode,

    /// Largest number of lamps a single plan may add (default: 50)
    #[serde(default = "default_max_new_lamps")]
    pub max_new_lamps: usize,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        PlannerOptions {
            curve_degree: default_curve_degree(),
            start_side: default_start_side(),
            height_mode: default_height_mode(),
            max_new_lamps: default_max_new_lamps(),
        }
    }
}

fn default_curve_degree() -> usize {
    1
}
fn default_start_side() -> Side {
    Side::Right
}
fn default_height_mode() -> HeightMode {
    HeightMode::PairwiseFold
}
fn default_max_new_lamps() -> usize {
    DEFAULT_MAX_NEW_LAMPS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Why a request produced no lamps without being an error.
pub enum Advisory {
    /// Fewer than two lamps are placed, so there is no path to follow.
    NotEnoughLamps { existing: usize },
    /// The requested total does not exceed the lamps already placed.
    NothingToAdd { existing: usize, target: usize },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Advisory::NotEnoughLamps { .. } => write!(f, "Not enough lamps to create installation"),
            Advisory::NothingToAdd { existing, target } => write!(
                f,
                "Installation of {} lamps requested but {} are already placed",
                target, existing
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Result of a plan: the new lamps in generation order, or an advisory explaining why there are none.
pub struct Installation {
    pub lamps: Vec<LampPosition>,
    pub advisory: Option<Advisory>,
}

impl Installation {
    fn no_op(advisory: Advisory) -> Installation {
        info!("installation skipped: {}", advisory);
        Installation {
            lamps: Vec::new(),
            advisory: Some(advisory),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lamps.is_empty()
    }
}

/// Running coordinates of both ends while the installation grows.
struct Ends {
    left: Point2<f64>,
    right: Point2<f64>,
}

impl Ends {
    /// The end to extend from and the one opposite it.
    fn around(&self, side: Side) -> (Point2<f64>, Point2<f64>) {
        match side {
            Side::Left => (self.left, self.right),
            Side::Right => (self.right, self.left),
        }
    }

    fn advance(&mut self, side: Side, to: Point2<f64>) {
        match side {
            Side::Left => self.left = to,
            Side::Right => self.right = to,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InstallationPlanner {
    options: PlannerOptions,
}

impl InstallationPlanner {
    pub fn new(options: PlannerOptions) -> InstallationPlanner {
        InstallationPlanner { options }
    }

    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    /// Plans `target_count - anchors.len()` new lamps along the curve through `anchors`.
    pub fn plan(
        &self,
        anchors: &[Anchor],
        target_count: usize,
    ) -> Result<Installation, InstallationError> {
        let existing = anchors.len();
        if existing < 2 {
            return Ok(Installation::no_op(Advisory::NotEnoughLamps { existing }));
        }
        if target_count <= existing {
            return Ok(Installation::no_op(Advisory::NothingToAdd {
                existing,
                target: target_count,
            }));
        }
        let new_count = target_count - existing;
        if new_count > self.options.max_new_lamps {
            return Err(InstallationError::TooManyLamps {
                requested: new_count,
                max: self.options.max_new_lamps,
            });
        }

        let points = ground_points(anchors);
        let curve = fit_polynomial(&points, self.options.curve_degree)?;
        let extremes = find_extreme_pair(&points)?;
        let spacing = extremes.min_spacing;
        if spacing <= 0. {
            return Err(InstallationError::ZeroSpacing(spacing));
        }

        let (left, right) = order_ends(&points, extremes.farthest);
        let mut ends = Ends {
            left: points[left],
            right: points[right],
        };
        let height = match self.options.height_mode {
            HeightMode::PairwiseFold => folded_height(anchors),
            HeightMode::Mean => mean_height(anchors),
        }
        .unwrap_or(0.);
        debug!(
            "extending from anchors {} (left) and {} (right), spacing {:.4}, height {:.4}",
            left, right, spacing, height
        );

        let mut side = self.options.start_side;
        let mut lamps = Vec::new();
        while lamps.len() < new_count {
            let (from, opposite) = ends.around(side);
            let next = next_point(&curve, &from, &opposite, spacing)?;
            debug!("{:?} end {:?} -> {:?}", side, from, next);
            lamps.push(LampPosition::new(next.x, height, next.y));
            ends.advance(side, next);
            side = side.flip();
        }

        info!(
            "planned {} new lamps along a degree {} curve",
            lamps.len(),
            curve.degree()
        );
        Ok(Installation {
            lamps,
            advisory: None,
        })
    }
}

/// Orders the farthest pair into `(left, right)` by x, then z, then index.
fn order_ends(points: &[Point2<f64>], (i, j): (usize, usize)) -> (usize, usize) {
    let (a, b) = (&points[i], &points[j]);
    let j_first = b.x < a.x || (b.x == a.x && b.y < a.y);
    if j_first {
        (j, i)
    } else {
        (i, j)
    }
}

/// Plans an installation of `target_lamp_count` lamps in total with default options.
pub fn generate_installation(
    anchors: &[Anchor],
    target_lamp_count: usize,
) -> Result<Installation, InstallationError> {
    InstallationPlanner::default().plan(anchors, target_lamp_count)
}
