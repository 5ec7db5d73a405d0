//! Renderable scene objects: an indexed mesh plus a movable local frame.

use nalgebra::{Point3, Vector3};

use crate::error::Error;
use crate::geometry::MeshData;
use crate::math;

/// A mesh instance with a centroid reference position and a local basis.
///
/// Transform operations mutate the vertex data in place. Normals and the
/// basis follow every rotation; `position` follows every translation and
/// every rotation about the object's own center.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub mesh: MeshData,
    /// Mesh centroid at construction, kept on the centroid by translations.
    pub position: Point3<f32>,
    pub front: Vector3<f32>,
    pub right: Vector3<f32>,
    pub up: Vector3<f32>,
    /// Reserved for a physics extension; rendering never reads it.
    pub mass: f32,
    /// Uniform scale, applied once at construction.
    pub scale: f32,
}

impl SceneObject {
    /// Build an object from loaded geometry.
    ///
    /// The reference position starts at the mean of the raw vertices (the
    /// origin for an empty mesh), then position and vertices are scaled
    /// together. Fails if any face references a vertex or normal that does
    /// not exist.
    pub fn new(mesh: MeshData, mass: f32, scale: f32) -> Result<Self, Error> {
        mesh.validate()?;
        let mut object = Self {
            mesh,
            position: Point3::origin(),
            front: Vector3::new(0.0, 0.0, -1.0),
            right: Vector3::new(1.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            mass,
            scale,
        };
        object.setup_position();
        object.setup_scale();
        Ok(object)
    }

    fn setup_position(&mut self) {
        let vertices = &self.mesh.vertices;
        if vertices.is_empty() {
            return;
        }
        let sum = vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        self.position = Point3::from(sum / vertices.len() as f32);
    }

    fn setup_scale(&mut self) {
        self.position *= self.scale;
        for vertex in &mut self.mesh.vertices {
            *vertex *= self.scale;
        }
    }

    /// Rigid translation of every vertex and the reference position.
    fn translate(&mut self, offset: Vector3<f32>) {
        self.position += offset;
        for vertex in &mut self.mesh.vertices {
            *vertex += offset;
        }
    }

    /// Move the object so its reference position lands on `target`.
    pub fn set_position(&mut self, target: Point3<f32>) {
        let offset = target - self.position;
        self.translate(offset);
    }

    /// Forward travel runs against `front`, matching the camera convention.
    pub fn move_forward(&mut self, amount: f32) {
        self.translate(-self.front * amount);
    }

    pub fn move_backward(&mut self, amount: f32) {
        self.translate(self.front * amount);
    }

    pub fn move_right(&mut self, amount: f32) {
        self.translate(self.right * amount);
    }

    pub fn move_left(&mut self, amount: f32) {
        self.translate(-self.right * amount);
    }

    pub fn move_up(&mut self, amount: f32) {
        self.translate(self.up * amount);
    }

    pub fn move_down(&mut self, amount: f32) {
        self.translate(-self.up * amount);
    }

    /// Translate along world y, bypassing the local basis.
    pub fn move_up_global(&mut self, amount: f32) {
        self.translate(Vector3::y() * amount);
    }

    pub fn move_down_global(&mut self, amount: f32) {
        self.translate(-Vector3::y() * amount);
    }

    /// Translate against an arbitrary axis, the way `move_forward` runs
    /// against `front`.
    pub fn move_custom(&mut self, axis: &Vector3<f32>, amount: f32) {
        self.translate(-axis * amount);
    }

    /// Rotate vertices about `pivot`, and rotate normals and the local basis
    /// in place by the same angles.
    fn rotate_about(&mut self, angles: &Vector3<f32>, pivot: Point3<f32>) {
        for vertex in &mut self.mesh.vertices {
            let local = *vertex - pivot;
            *vertex = pivot + math::rotate_euler(&local, angles);
        }
        for normal in &mut self.mesh.normals {
            *normal = math::rotate_euler(normal, angles);
        }
        for axis in [&mut self.front, &mut self.right, &mut self.up] {
            let rotated = math::rotate_euler(axis, angles);
            if let Some(unit) = math::try_unit(&rotated) {
                *axis = unit;
            }
        }
    }

    /// Rotate about the object's own reference position.
    pub fn rotate_about_center(&mut self, angles: &Vector3<f32>) {
        self.rotate_about(angles, self.position);
    }

    /// Rotate about an arbitrary world point.
    ///
    /// `position` is not recomputed: after a foreign-pivot rotation it holds
    /// the last reference point, not the current geometric centroid.
    pub fn rotate_about_pivot(&mut self, angles: &Vector3<f32>, pivot: Point3<f32>) {
        self.rotate_about(angles, pivot);
    }

    /// Roll about the object's own front axis.
    pub fn rotate_about_front(&mut self, angle: f32) {
        let angles = self.front * -angle;
        self.rotate_about(&angles, self.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Face;
    use crate::math::rad;

    const EPS: f32 = 1e-4;

    fn assert_point_eq(a: &Point3<f32>, b: &Point3<f32>) {
        assert!((a - b).norm() < EPS, "{a:?} != {b:?}");
    }

    fn assert_vec_eq(a: &Vector3<f32>, b: &Vector3<f32>) {
        assert!((a - b).norm() < EPS, "{a:?} != {b:?}");
    }

    fn triangle_mesh() -> MeshData {
        MeshData::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(0.0, 2.0, 0.0),
            ],
            vec![Vector3::z()],
            vec![Face::new([0, 1, 2], [0, 0, 0])],
        )
    }

    fn centroid(object: &SceneObject) -> Point3<f32> {
        let sum = object
            .mesh
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Point3::from(sum / object.mesh.vertices.len() as f32)
    }

    #[test]
    fn test_position_starts_on_centroid() {
        let object = SceneObject::new(triangle_mesh(), 1.0, 1.0).unwrap();
        assert_point_eq(&object.position, &Point3::new(2.0 / 3.0, 2.0 / 3.0, 0.0));
    }

    #[test]
    fn test_scale_applies_to_vertices_and_position() {
        let object = SceneObject::new(triangle_mesh(), 1.0, 2.0).unwrap();
        assert_point_eq(&object.position, &Point3::new(4.0 / 3.0, 4.0 / 3.0, 0.0));
        assert_point_eq(&object.mesh.vertices[1], &Point3::new(4.0, 0.0, 0.0));
        assert_point_eq(&centroid(&object), &object.position);
    }

    #[test]
    fn test_empty_mesh_sits_at_origin() {
        let object = SceneObject::new(MeshData::default(), 0.0, 5.0).unwrap();
        assert_point_eq(&object.position, &Point3::origin());
    }

    #[test]
    fn test_invalid_mesh_is_rejected() {
        let mesh = MeshData::new(
            vec![Point3::origin()],
            vec![Vector3::y()],
            vec![Face::new([0, 0, 3], [0, 0, 0])],
        );
        assert!(matches!(
            SceneObject::new(mesh, 0.0, 1.0),
            Err(Error::VertexIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_set_position_is_rigid() {
        let mut object = SceneObject::new(MeshData::cube(2.0), 0.0, 1.0).unwrap();
        object.set_position(Point3::new(5.0, -1.0, 2.0));
        assert_point_eq(&object.position, &Point3::new(5.0, -1.0, 2.0));
        assert_point_eq(&centroid(&object), &object.position);
        assert_point_eq(&object.mesh.vertices[0], &Point3::new(4.0, -2.0, 1.0));
    }

    #[test]
    fn test_move_forward_runs_against_front() {
        let mut object = SceneObject::new(MeshData::cube(2.0), 0.0, 1.0).unwrap();
        // default front is -z, so forward travel is +z
        object.move_forward(3.0);
        assert_point_eq(&object.position, &Point3::new(0.0, 0.0, 3.0));
        assert_point_eq(&centroid(&object), &object.position);
    }

    #[test]
    fn test_global_vertical_moves_ignore_basis() {
        let mut object = SceneObject::new(MeshData::cube(2.0), 0.0, 1.0).unwrap();
        object.rotate_about_center(&Vector3::new(rad(90.0), 0.0, 0.0));
        object.move_up_global(2.0);
        object.move_down_global(0.5);
        assert_point_eq(&object.position, &Point3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn test_move_custom_is_subtractive() {
        let mut object = SceneObject::new(MeshData::cube(2.0), 0.0, 1.0).unwrap();
        object.move_custom(&Vector3::new(1.0, 0.0, 0.0), 2.0);
        assert_point_eq(&object.position, &Point3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotate_about_center_keeps_position() {
        let mut object = SceneObject::new(MeshData::cube(2.0), 0.0, 1.0).unwrap();
        object.set_position(Point3::new(3.0, 0.0, 0.0));
        object.rotate_about_center(&Vector3::new(0.4, 1.3, -0.2));
        assert_point_eq(&object.position, &Point3::new(3.0, 0.0, 0.0));
        assert_point_eq(&centroid(&object), &object.position);
    }

    #[test]
    fn test_rotate_about_center_turns_basis_and_normals() {
        let mut object = SceneObject::new(MeshData::cube(2.0), 0.0, 1.0).unwrap();
        object.rotate_about_center(&Vector3::new(0.0, 0.0, rad(90.0)));
        assert_vec_eq(&object.right, &Vector3::new(0.0, 1.0, 0.0));
        assert_vec_eq(&object.up, &Vector3::new(-1.0, 0.0, 0.0));
        assert_vec_eq(&object.front, &Vector3::new(0.0, 0.0, -1.0));
        // +x face normal follows the geometry
        assert_vec_eq(&object.mesh.normals[4], &Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_rotate_about_pivot_moves_geometry_but_not_position() {
        let mut object = SceneObject::new(MeshData::cube(2.0), 0.0, 1.0).unwrap();
        object.rotate_about_pivot(
            &Vector3::new(0.0, 0.0, rad(180.0)),
            Point3::new(10.0, 0.0, 0.0),
        );
        // geometry swung to the far side of the pivot
        assert_point_eq(&centroid(&object), &Point3::new(20.0, 0.0, 0.0));
        // reference position still reports the old center
        assert_point_eq(&object.position, &Point3::origin());
    }

    #[test]
    fn test_rotate_about_front_rolls_in_place() {
        let mut object = SceneObject::new(MeshData::cube(2.0), 0.0, 1.0).unwrap();
        // front is -z, so rolling by 90 degrees spins +90 about z
        object.rotate_about_front(rad(90.0));
        assert_vec_eq(&object.front, &Vector3::new(0.0, 0.0, -1.0));
        assert_vec_eq(&object.right, &Vector3::new(0.0, 1.0, 0.0));
        assert_point_eq(&object.position, &Point3::origin());
    }
}
