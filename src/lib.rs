//! Street Lamps: automatic layout of street lamp installations.
//!
//! Given the lamps a user has already placed on the ground, the planner fits a
//! curve through them and extends the row from both ends, spacing new lamps by
//! the smallest gap among the existing ones. The scene layer owns the lamps;
//! this crate only reads a snapshot of their positions and returns new ones.
//!
//! ```
//! use street_lamps::{generate_installation, Anchor};
//!
//! let placed = [Anchor::new(0., 0., 0.), Anchor::new(10., 0., 0.)];
//! let plan = generate_installation(&placed, 4).unwrap();
//! let xs: Vec<f64> = plan.lamps.iter().map(|l| l.x.round()).collect();
//! assert_eq!(xs, vec![20., -10.]);
//! ```

/// Anchors placed by the user and lamp positions produced for them.
pub mod anchor;
/// Lamp and pole asset definitions read by the scene layer.
pub mod catalog;
pub mod config;
/// Least squares polynomial fit through anchor ground positions.
pub mod curve_fit;
pub mod errors;
pub mod extrapolate;
/// Farthest and nearest anchor pairs.
pub mod extremes;
pub mod planner;
/// Random starting layouts for demos and tests.
pub mod scatter;

pub use anchor::{Anchor, LampPosition};
pub use catalog::{LampCatalog, LampModel, ModelPart};
pub use config::InstallationConfig;
pub use curve_fit::{fit_line, fit_polynomial, Polynomial, MAX_CURVE_DEGREE};
pub use errors::{
    CatalogError, ConfigError, ExtrapolationError, ExtremeError, FitError, InstallationError,
};
pub use extremes::{find_extreme_pair, ExtremePair};
pub use planner::{
    generate_installation, Advisory, HeightMode, Installation, InstallationPlanner,
    PlannerOptions, Side,
};
pub use scatter::{scatter_lamps, ScatterOptions};
