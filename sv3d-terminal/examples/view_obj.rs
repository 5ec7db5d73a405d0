//! Example: load one or more OBJ files and fly around them.
//!
//! Usage: cargo run --example view_obj -- path/to/model.obj [more.obj ...]

use std::env;

use anyhow::Result;
use nalgebra::Point3;
use sv3d_core::{obj, Camera, MeshData, PointLight, Rgb, SceneObject};
use sv3d_terminal::{ViewerApp, ViewerConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let paths: Vec<String> = env::args().skip(1).collect();

    let mut objects = Vec::new();
    if paths.is_empty() {
        eprintln!("No OBJ file provided, using default cube...");
        objects.push(SceneObject::new(MeshData::cube(2.0), 0.0, 2.0)?);
    } else {
        for path in &paths {
            // Unreadable files come back empty instead of aborting the scene.
            let mesh = obj::load_obj_or_empty(path);
            println!(
                "Loaded {}: {} vertices, {} faces",
                path,
                mesh.vertices.len(),
                mesh.face_count()
            );
            objects.push(SceneObject::new(mesh, 0.0, 1.0)?);
        }
    }

    // Line the models up along world z so they are all in view.
    for (i, object) in objects.iter_mut().enumerate() {
        object.set_position(Point3::new(0.0, 0.0, i as f32 * 6.0));
    }

    let palette = [
        Rgb::new(240, 180, 60),
        Rgb::new(90, 200, 120),
        Rgb::new(80, 160, 240),
        Rgb::new(230, 80, 200),
    ];
    let mut colors = Vec::new();
    for (i, object) in objects.iter().enumerate() {
        let base = palette[i % palette.len()];
        colors.extend(std::iter::repeat(base).take(object.mesh.faces.len()));
    }

    // Looks along -x at the model line from a slight elevation.
    let mut camera = Camera::new(Point3::new(12.0, 4.0, 0.0));
    camera.look(0.0, 18.0);

    let light = PointLight::new(Point3::new(10.0, 12.0, -4.0));

    println!("Starting viewer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = ViewerApp::new(objects, colors, camera, light, ViewerConfig::default())?;
    app.run()
}
