//! SV3D core library - scene model and software draw pipeline.
//!
//! This library provides the stateless core of the viewer: vector math,
//! the camera and projection, renderable objects, scene composition, OBJ
//! loading, and the painter's-algorithm draw pass. Front ends supply a
//! `RenderSurface` and a frame loop.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod light;
pub mod math;
pub mod obj;
pub mod object;
pub mod pipeline;
pub mod scene;

// Re-export commonly used types
pub use camera::{Camera, ProjectedVertex, ScreenPoint, Viewport};
pub use error::Error;
pub use geometry::{Face, MeshData, Rgb};
pub use light::PointLight;
pub use object::SceneObject;
pub use pipeline::{draw, RenderSurface};
pub use scene::{merge_for_render, SceneBuffer};
