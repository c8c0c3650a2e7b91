use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[derive(PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
/// A placed lamp as seen by the planner: its position on the ground plane
/// and the height it stands at.
pub struct Anchor {
    /// Ground-plane x coordinate.
    pub x: f64,
    /// Ground-plane z coordinate.
    pub z: f64,
    /// Vertical offset of the lamp base.
    pub height: f64,
}

impl Anchor {
    /// Creates a `new` anchor at ground position `(x, z)` and the given `height`.
    pub fn new(x: f64, z: f64, height: f64) -> Anchor {
        Anchor { x, z, height }
    }

    /// Projection onto the ground plane.
    pub fn ground(&self) -> Point2<f64> {
        Point2::new(self.x, self.z)
    }
}

#[derive(PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
/// A lamp position produced by the planner, ready to be instantiated by the scene.
pub struct LampPosition {
    pub x: f64,
    pub height: f64,
    pub z: f64,
}

impl LampPosition {
    pub fn new(x: f64, height: f64, z: f64) -> LampPosition {
        LampPosition { x, height, z }
    }

    pub fn ground(&self) -> Point2<f64> {
        Point2::new(self.x, self.z)
    }
}

impl From<LampPosition> for Anchor {
    fn from(lamp: LampPosition) -> Anchor {
        Anchor::new(lamp.x, lamp.z, lamp.height)
    }
}

/// Ground-plane points of every anchor, in input order.
pub fn ground_points(anchors: &[Anchor]) -> Vec<Point2<f64>> {
    anchors.iter().map(Anchor::ground).collect()
}

/// Folds heights pairwise in input order: `h = (h + next) / 2`.
///
/// Later anchors weigh more than earlier ones, so this is not the mean.
/// Returns `None` for an empty slice.
pub fn folded_height(anchors: &[Anchor]) -> Option<f64> {
    let (first, rest) = anchors.split_first()?;
    Some(
        rest.iter()
            .fold(first.height, |h, anchor| (h + anchor.height) / 2.),
    )
}

/// Arithmetic mean of all heights. Returns `None` for an empty slice.
pub fn mean_height(anchors: &[Anchor]) -> Option<f64> {
    if anchors.is_empty() {
        return None;
    }
    Some(anchors.iter().map(|a| a.height).sum::<f64>() / anchors.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fold_weighs_later_heights_more() {
        let anchors = [
            Anchor::new(0., 0., 0.),
            Anchor::new(1., 0., 0.),
            Anchor::new(2., 0., 1.),
        ];
        assert_relative_eq!(folded_height(&anchors).unwrap(), 0.5);
        assert_relative_eq!(mean_height(&anchors).unwrap(), 1. / 3.);
    }

    #[test]
    fn fold_depends_on_order() {
        let a = [Anchor::new(0., 0., 1.), Anchor::new(1., 0., 0.), Anchor::new(2., 0., 0.)];
        let b = [Anchor::new(0., 0., 0.), Anchor::new(1., 0., 0.), Anchor::new(2., 0., 1.)];
        assert_relative_eq!(folded_height(&a).unwrap(), 0.25);
        assert_relative_eq!(folded_height(&b).unwrap(), 0.5);
    }

    #[test]
    fn single_and_empty() {
        assert_eq!(folded_height(&[]), None);
        assert_eq!(mean_height(&[]), None);
        assert_eq!(folded_height(&[Anchor::new(3., 4., 0.7)]), Some(0.7));
    }

    #[test]
    fn ground_drops_height() {
        let a = Anchor::new(1.5, -2., 9.);
        assert_eq!(a.ground(), Point2::new(1.5, -2.));
        let lamp = LampPosition::new(1.5, 9., -2.);
        assert_eq!(Anchor::from(lamp), a);
    }
}
