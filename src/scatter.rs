use log::warn;
use nalgebra::{self, Point2};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::anchor::Anchor;

/// Draws per lamp before giving up on finding a free spot.
const MAX_ATTEMPTS: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
/// Shape of a randomly scattered starting set of lamps: a loose row along the x axis.
pub struct ScatterOptions {
    /// Number of lamps to place.
    pub count: usize,
    /// Lamps fall within `[-spread, spread]` along x.
    pub spread: f64,
    /// Lamps fall within `[-jitter, jitter]` along z.
    pub jitter: f64,
    /// Smallest allowed ground distance between two lamps.
    pub min_gap: f64,
    /// Height assigned to every lamp.
    pub height: f64,
}

impl Default for ScatterOptions {
    fn default() -> Self {
        ScatterOptions {
            count: 4,
            spread: 4.,
            jitter: 0.2,
            min_gap: 0.8,
            height: 0.,
        }
    }
}

/// Finds a position at least `min_gap` away from every lamp in `placed`.
fn find_disjoint_position<R: Rng>(
    placed: &[Anchor],
    min_gap: f64,
    along: &Uniform<f64>,
    across: &Uniform<f64>,
    rng: &mut R,
) -> Option<Point2<f64>> {
    (0..MAX_ATTEMPTS)
        .map(|_| Point2::new(along.sample(rng), across.sample(rng)))
        .find(|candidate| {
            placed
                .iter()
                .all(|lamp| nalgebra::distance(candidate, &lamp.ground()) >= min_gap)
        })
}

/// Places up to `options.count` lamps at random, non-overlapping positions.
///
/// Stops early, with a warning, when the area is too crowded to fit another lamp.
pub fn scatter_lamps<R: Rng>(options: &ScatterOptions, rng: &mut R) -> Vec<Anchor> {
    let along = Uniform::new_inclusive(-options.spread, options.spread);
    let across = Uniform::new_inclusive(-options.jitter, options.jitter);

    let mut lamps: Vec<Anchor> = Vec::with_capacity(options.count);
    while lamps.len() < options.count {
        match find_disjoint_position(&lamps, options.min_gap, &along, &across, rng) {
            Some(p) => lamps.push(Anchor::new(p.x, p.y, options.height)),
            None => {
                warn!(
                    "placed only {} of {} lamps with gap {}",
                    lamps.len(),
                    options.count,
                    options.min_gap
                );
                break;
            }
        }
    }
    lamps
}
