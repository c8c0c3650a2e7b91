//! Street Lamps viewer: scatters a few lamps, plans an installation through
//! them and renders both sets. Pass a TOML config path to tune the planner.

use std::path::Path;

use kiss3d::camera::ArcBall;
use kiss3d::light::Light;
use kiss3d::nalgebra::{Point3, Translation3, UnitQuaternion, Vector3};
use kiss3d::window::Window;
use log::{error, info};
use street_lamps::{scatter_lamps, InstallationConfig, ScatterOptions};

/// Pole height in scene units.
const POLE_HEIGHT: f32 = 0.6;
const POLE_RADIUS: f32 = 0.03;
const BULB_RADIUS: f32 = 0.08;
/// Total number of lamps the installation should reach.
const TARGET_LAMPS: usize = 12;

#[derive(Debug, Clone, Copy)]
/// Simple representation of an rgb color. Kiss3D requires values on $[0.0, 1.0]$.
struct Color {
    red: f32,
    green: f32,
    blue: f32,
}

const PLACED: Color = Color {
    red: 1.0,
    green: 0.8,
    blue: 0.2,
};
const GENERATED: Color = Color {
    red: 0.2157,
    green: 0.4941,
    blue: 0.7216,
};

/// Adds a pole with a bulb on top standing at `(x, height, z)`.
fn add_lamp(window: &mut Window, x: f64, height: f64, z: f64, color: Color) {
    let (x, base, z) = (x as f32, height as f32, z as f32);

    let mut pole = window.add_cylinder(POLE_RADIUS, POLE_HEIGHT);
    pole.set_color(0.3, 0.3, 0.3);
    pole.set_local_translation(Translation3::new(x, base + POLE_HEIGHT / 2., z));

    let mut bulb = window.add_sphere(BULB_RADIUS);
    bulb.set_color(color.red, color.green, color.blue);
    bulb.set_local_translation(Translation3::new(x, base + POLE_HEIGHT, z));
}

/// Program entry point.
fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match InstallationConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                return;
            }
        },
        None => InstallationConfig::default(),
    };

    let placed = scatter_lamps(&ScatterOptions::default(), &mut rand::thread_rng());
    info!("scattered {} lamps", placed.len());

    let eye = Point3::new(0.0, 4.0, 8.0);
    let at = Point3::origin();
    let mut camera = ArcBall::new(eye, at);

    let mut window = Window::new_with_size("Street Lamps", 1920, 1080);
    window.set_light(Light::StickToCamera);

    let mut ground = window.add_cube(40.0, 0.01, 40.0);
    ground.set_color(0.15, 0.15, 0.15);

    for lamp in placed.iter() {
        add_lamp(&mut window, lamp.x, lamp.height, lamp.z, PLACED);
    }

    match config.planner().plan(&placed, TARGET_LAMPS) {
        Ok(installation) => {
            if let Some(advisory) = installation.advisory {
                info!("{}", advisory);
            }
            for lamp in installation.lamps.iter() {
                add_lamp(&mut window, lamp.x, lamp.height, lamp.z, GENERATED);
            }
        }
        Err(e) => error!("{}: {}", e.advisory_message(), e),
    }

    let rot = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.004);

    while window.render_with_camera(&mut camera) {
        window.scene_mut().prepend_to_local_rotation(&rot);
    }
}
