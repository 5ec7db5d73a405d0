//! Vector math helpers shared by the camera, objects, and the draw
//! pipeline.

use nalgebra::Vector3;
use std::f32::consts::PI;

/// Norm below which a vector is treated as degenerate.
const MIN_NORM: f32 = 1e-12;

/// Convert degrees to radians.
pub fn rad(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

/// Normalize `v`, or `None` when its norm is too small to divide by.
pub fn try_unit(v: &Vector3<f32>) -> Option<Vector3<f32>> {
    v.try_normalize(MIN_NORM)
}

/// Cosine of the angle between two vectors, clamped into `[-1, 1]` so that
/// rounding in the dot product cannot push it out of the valid domain.
///
/// Returns 0 when either vector has zero length.
pub fn cos_angle_between(a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    let len = a.norm() * b.norm();
    if len <= MIN_NORM {
        return 0.0;
    }
    (a.dot(b) / len).clamp(-1.0, 1.0)
}

/// Rotate `v` about the X, then Y, then Z axis by the matching component of
/// `angles` (radians), each step feeding the next.
///
/// The order is fixed; swapping it changes the result for mixed angles.
pub fn rotate_euler(v: &Vector3<f32>, angles: &Vector3<f32>) -> Vector3<f32> {
    let mut v = *v;

    let (sin, cos) = angles.x.sin_cos();
    let (y, z) = (v.y * cos - v.z * sin, v.y * sin + v.z * cos);
    v.y = y;
    v.z = z;

    let (sin, cos) = angles.y.sin_cos();
    let (x, z) = (v.x * cos - v.z * sin, v.x * sin + v.z * cos);
    v.x = x;
    v.z = z;

    let (sin, cos) = angles.z.sin_cos();
    let (x, y) = (v.x * cos - v.y * sin, v.x * sin + v.y * cos);
    v.x = x;
    v.y = y;

    v
}
