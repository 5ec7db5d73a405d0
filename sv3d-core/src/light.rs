//! Point light source sampled by the draw pipeline.

use nalgebra::{Point3, Vector3};

/// A point light: a position and a local frame, no geometry.
///
/// Shading only reads `position`; the basis exists so the light can be
/// steered with the same movement verbs as objects and the camera.
#[derive(Debug, Clone)]
pub struct PointLight {
    pub position: Point3<f32>,
    pub front: Vector3<f32>,
    pub right: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl PointLight {
    pub fn new(position: Point3<f32>) -> Self {
        Self {
            position,
            front: Vector3::new(0.0, 0.0, -1.0),
            right: Vector3::new(1.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
        }
    }

    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
    }

    /// Forward travel runs against `front`, like everything else in the
    /// scene.
    pub fn move_forward(&mut self, amount: f32) {
        self.position -= self.front * amount;
    }

    pub fn move_backward(&mut self, amount: f32) {
        self.position += self.front * amount;
    }

    pub fn move_right(&mut self, amount: f32) {
        self.position += self.right * amount;
    }

    pub fn move_left(&mut self, amount: f32) {
        self.position -= self.right * amount;
    }

    pub fn move_up(&mut self, amount: f32) {
        self.position += self.up * amount;
    }

    pub fn move_down(&mut self, amount: f32) {
        self.position -= self.up * amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_runs_against_front() {
        let mut light = PointLight::new(Point3::origin());
        light.move_forward(2.0);
        // default front is -z
        assert_eq!(light.position, Point3::new(0.0, 0.0, 2.0));
        light.move_backward(2.0);
        assert_eq!(light.position, Point3::origin());
    }

    #[test]
    fn test_lateral_and_vertical_moves() {
        let mut light = PointLight::new(Point3::origin());
        light.move_right(1.0);
        light.move_up(3.0);
        light.move_left(0.5);
        light.move_down(1.0);
        assert_eq!(light.position, Point3::new(0.5, 2.0, 0.0));
    }

    #[test]
    fn test_set_position() {
        let mut light = PointLight::new(Point3::origin());
        light.set_position(Point3::new(-4.0, 7.0, 1.0));
        assert_eq!(light.position, Point3::new(-4.0, 7.0, 1.0));
    }
}
