//! SV3D terminal demo - a lit scene of cubes with a free-flying camera.
//!
//! Controls:
//!   - WASD + mouse: fly (hold shift to sprint)
//!   - Space / C: rise / sink
//!   - Arrows + R/F: steer the light
//!   - Q/ESC: quit

use anyhow::Result;
use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sv3d_core::{math, Camera, MeshData, PointLight, Rgb, SceneObject};
use sv3d_terminal::{ViewerApp, ViewerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Log to stderr so the alternate screen stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut spinner = SceneObject::new(MeshData::cube(2.0), 0.0, 2.0)?;
    spinner.set_position(Point3::new(0.0, 0.0, 0.0));

    let mut pedestal = SceneObject::new(MeshData::cube(2.0), 0.0, 3.0)?;
    pedestal.set_position(Point3::new(0.0, -6.0, 0.0));

    let mut satellite = SceneObject::new(MeshData::cube(2.0), 0.0, 1.0)?;
    satellite.set_position(Point3::new(-1.0, 1.0, 5.0));

    let objects = vec![spinner, pedestal, satellite];

    // Fresh palette per session
    let mut rng = StdRng::from_entropy();
    let palette = [
        Rgb::new(230, 80, 200),
        Rgb::new(90, 200, 120),
        Rgb::new(240, 180, 60),
        Rgb::new(80, 160, 240),
    ];
    let mut colors = Vec::new();
    for object in &objects {
        let base = palette[rng.gen_range(0..palette.len())];
        colors.extend(std::iter::repeat(base).take(object.mesh.faces.len()));
    }

    // Looks back at the origin from the +x/+z quadrant.
    let mut camera = Camera::new(Point3::new(7.0, 3.5, 7.0));
    camera.look(45.0, 19.5);

    let light = PointLight::new(Point3::new(8.0, 10.0, 4.0));

    info!(objects = objects.len(), "starting viewer");

    let mut app = ViewerApp::new(objects, colors, camera, light, ViewerConfig::default())?
        .with_spin(0, Vector3::new(math::rad(0.6), math::rad(0.9), 0.0));
    app.run()?;

    info!("viewer closed");
    Ok(())
}
