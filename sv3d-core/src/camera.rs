//! First-person camera and perspective projection.

use nalgebra::{Point3, Vector3};

use crate::math::{self, rad};

/// Pitch is clamped short of the poles so the basis never degenerates.
const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Screen-space target the projection maps into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Screen units per unit of view-space x (or y) at depth 1.
    pub scale: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    /// Center of the screen, which view-space (0, 0, z) projects onto.
    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// A 2D screen position handed to the render surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A projected vertex: screen position plus view-space depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedVertex {
    pub screen: ScreenPoint,
    pub depth: f32,
}

/// Free-flying camera driven by yaw/pitch angles in degrees.
///
/// The camera sees along `-front`; `view_transform` negates `front` so that
/// view-space z grows with distance in front of the camera. Forward motion
/// therefore subtracts `front` from the position.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub front: Vector3<f32>,
    pub right: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    pub fn new(position: Point3<f32>) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            front: Vector3::new(0.0, 0.0, -1.0),
            right: Vector3::new(1.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
        }
    }

    /// Rebuild the orthonormal basis from the current yaw and pitch.
    ///
    /// Must run after any direct angle change and before projecting. Each
    /// axis keeps its previous value if the update would degenerate it.
    pub fn update_vectors(&mut self) {
        let (yaw, pitch) = (rad(self.yaw), rad(self.pitch));
        let front = Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        if let Some(front) = math::try_unit(&front) {
            self.front = front;
        }
        if let Some(right) = math::try_unit(&self.front.cross(&Vector3::y())) {
            self.right = right;
        }
        if let Some(up) = math::try_unit(&self.right.cross(&self.front)) {
            self.up = up;
        }
    }

    /// Apply yaw/pitch deltas in degrees, clamping pitch short of the poles,
    /// and refresh the basis.
    pub fn look(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        self.update_vectors();
    }

    /// Transform a world point into view space: x along `right`, y along
    /// `up`, z growing with distance in front of the camera.
    pub fn view_transform(&self, point: &Point3<f32>) -> Vector3<f32> {
        let translated = point - self.position;
        Vector3::new(
            translated.dot(&self.right),
            translated.dot(&self.up),
            -translated.dot(&self.front),
        )
    }

    /// Perspective-project a world point onto the viewport.
    ///
    /// Returns `None` for points at or behind the camera plane; screen y
    /// grows downward, so view-space y is flipped.
    pub fn project(&self, point: &Point3<f32>, viewport: &Viewport) -> Option<ProjectedVertex> {
        let view = self.view_transform(point);
        if view.z <= 0.0 {
            return None;
        }

        let (center_x, center_y) = viewport.center();
        let inv_depth = 1.0 / view.z;
        Some(ProjectedVertex {
            screen: ScreenPoint::new(
                view.x * inv_depth * viewport.scale + center_x,
                -view.y * inv_depth * viewport.scale + center_y,
            ),
            depth: view.z,
        })
    }
}
