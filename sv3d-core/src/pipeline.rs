//! Frame draw pipeline: project, sort far to near, cull, shade, submit.

use nalgebra::Point3;

use crate::camera::{Camera, ProjectedVertex, ScreenPoint, Viewport};
use crate::error::Error;
use crate::geometry::{Face, Rgb};
use crate::light::PointLight;
use crate::math;
use crate::scene::SceneBuffer;

/// Sink for shaded screen-space triangles.
///
/// Implemented by the terminal front end and by test doubles. Triangles
/// arrive far to near, so painting them in order resolves occlusion.
pub trait RenderSurface {
    fn fill_triangle(&mut self, points: [ScreenPoint; 3], color: Rgb);
}

/// Draw one merged scene onto `surface`.
///
/// Stateless across frames. Fails fast if the buffer's indices or color
/// count are inconsistent; faces with any vertex at or behind the camera
/// plane are dropped, as are faces turned away from the camera.
pub fn draw<S: RenderSurface>(
    scene: &SceneBuffer,
    camera: &Camera,
    light: &PointLight,
    viewport: &Viewport,
    surface: &mut S,
) -> Result<(), Error> {
    scene.validate()?;

    let projected: Vec<Option<ProjectedVertex>> = scene
        .vertices
        .iter()
        .map(|vertex| camera.project(vertex, viewport))
        .collect();

    // Unprojectable vertices weigh in as infinitely deep, which sinks their
    // faces to the front of the far-to-near order before they are dropped.
    let mut order: Vec<(f32, usize)> = scene
        .faces
        .iter()
        .enumerate()
        .map(|(i, face)| (face_depth(face, &projected), i))
        .collect();
    order.sort_by(|a, b| b.0.total_cmp(&a.0));

    for &(_, i) in &order {
        let face = &scene.faces[i];
        let (Some(p0), Some(p1), Some(p2)) = (
            projected[face.vertices[0]],
            projected[face.vertices[1]],
            projected[face.vertices[2]],
        ) else {
            continue;
        };

        let Some(normal) = math::try_unit(&scene.normals[face.normals[0]]) else {
            continue;
        };

        let center = face_center(face, &scene.vertices);
        let Some(view_dir) = math::try_unit(&(camera.position - center)) else {
            continue;
        };
        let Some(light_dir) = math::try_unit(&(light.position - center)) else {
            continue;
        };

        if normal.dot(&view_dir) < 0.0 {
            continue;
        }

        // No ambient term: a face turned away from the light goes flat black.
        let color = if normal.dot(&light_dir) < 0.0 {
            Rgb::BLACK
        } else {
            scene.colors[i].scaled(math::cos_angle_between(&normal, &light_dir))
        };

        surface.fill_triangle([p0.screen, p1.screen, p2.screen], color);
    }

    Ok(())
}

/// Mean view-space depth of a face's corners; infinite when any corner
/// failed to project.
fn face_depth(face: &Face, projected: &[Option<ProjectedVertex>]) -> f32 {
    let depth = |i: usize| projected[i].map_or(f32::INFINITY, |p| p.depth);
    (depth(face.vertices[0]) + depth(face.vertices[1]) + depth(face.vertices[2])) / 3.0
}

fn face_center(face: &Face, vertices: &[Point3<f32>]) -> Point3<f32> {
    let sum = vertices[face.vertices[0]].coords
        + vertices[face.vertices[1]].coords
        + vertices[face.vertices[2]].coords;
    Point3::from(sum / 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MeshData;
    use crate::object::SceneObject;
    use crate::scene::merge_for_render;
    use nalgebra::Vector3;

    /// Records every submission instead of drawing it.
    #[derive(Default)]
    struct RecordingSurface {
        triangles: Vec<([ScreenPoint; 3], Rgb)>,
    }

    impl RenderSurface for RecordingSurface {
        fn fill_triangle(&mut self, points: [ScreenPoint; 3], color: Rgb) {
            self.triangles.push((points, color));
        }
    }

    fn viewport() -> Viewport {
        Viewport::new(800, 600, 200.0)
    }

    /// Camera at the origin with the default basis: it sees along world -x.
    fn camera() -> Camera {
        let mut camera = Camera::new(Point3::origin());
        camera.update_vectors();
        camera
    }

    /// One triangle in the x = -depth plane whose normal points back at the
    /// camera.
    fn facing_triangle(depth: f32) -> SceneObject {
        let mesh = MeshData::new(
            vec![
                Point3::new(-depth, -1.0, -1.0),
                Point3::new(-depth, -1.0, 1.0),
                Point3::new(-depth, 1.0, 0.0),
            ],
            vec![Vector3::x()],
            vec![Face::new([0, 1, 2], [0, 0, 0])],
        );
        SceneObject::new(mesh, 0.0, 1.0).unwrap()
    }

    fn triangle_center(object: &SceneObject) -> Point3<f32> {
        object.position
    }

    #[test]
    fn test_lit_face_keeps_base_color_under_head_on_light() {
        let object = facing_triangle(5.0);
        // light straight along the normal from the face center, so the
        // cosine term is exactly 1
        let light = PointLight::new(triangle_center(&object) + Vector3::new(10.0, 0.0, 0.0));
        let base = Rgb::new(200, 100, 50);
        let scene = merge_for_render(&[object], &[base]).unwrap();

        let mut surface = RecordingSurface::default();
        draw(&scene, &camera(), &light, &viewport(), &mut surface).unwrap();

        assert_eq!(surface.triangles.len(), 1);
        assert_eq!(surface.triangles[0].1, base);
    }

    #[test]
    fn test_face_behind_the_light_goes_black() {
        let object = facing_triangle(5.0);
        let light = PointLight::new(triangle_center(&object) - Vector3::new(10.0, 0.0, 0.0));
        let scene = merge_for_render(&[object], &[Rgb::new(200, 100, 50)]).unwrap();

        let mut surface = RecordingSurface::default();
        draw(&scene, &camera(), &light, &viewport(), &mut surface).unwrap();

        assert_eq!(surface.triangles.len(), 1);
        assert_eq!(surface.triangles[0].1, Rgb::BLACK);
    }

    #[test]
    fn test_back_face_is_culled() {
        let mut object = facing_triangle(5.0);
        // flip the normal away from the camera; the light still hits it
        object.mesh.normals[0] = -Vector3::x();
        let light = PointLight::new(Point3::new(-15.0, 0.0, 0.0));
        let scene = merge_for_render(&[object], &[Rgb::WHITE]).unwrap();

        let mut surface = RecordingSurface::default();
        draw(&scene, &camera(), &light, &viewport(), &mut surface).unwrap();

        assert!(surface.triangles.is_empty());
    }

    #[test]
    fn test_face_behind_camera_is_dropped() {
        // positive x is behind the default camera
        let mut object = facing_triangle(5.0);
        object.set_position(Point3::new(5.0, 0.0, 0.0));
        let light = PointLight::new(Point3::origin());
        let scene = merge_for_render(&[object], &[Rgb::WHITE]).unwrap();

        let mut surface = RecordingSurface::default();
        draw(&scene, &camera(), &light, &viewport(), &mut surface).unwrap();

        assert!(surface.triangles.is_empty());
    }

    #[test]
    fn test_faces_are_submitted_far_to_near() {
        let near = facing_triangle(5.0);
        let far = facing_triangle(20.0);
        let near_color = Rgb::new(0, 250, 0);
        let far_color = Rgb::new(250, 0, 0);
        let light = PointLight::new(Point3::new(100.0, 0.0, 0.0));
        let scene = merge_for_render(&[near, far], &[near_color, far_color]).unwrap();

        let mut surface = RecordingSurface::default();
        draw(&scene, &camera(), &light, &viewport(), &mut surface).unwrap();

        assert_eq!(surface.triangles.len(), 2);
        // the far (red) face must land first so the near one paints over it
        assert!(surface.triangles[0].1.r > surface.triangles[0].1.g);
        assert!(surface.triangles[1].1.g > surface.triangles[1].1.r);
    }

    #[test]
    fn test_zero_length_normal_skips_face() {
        let mut object = facing_triangle(5.0);
        object.mesh.normals[0] = Vector3::zeros();
        let light = PointLight::new(Point3::origin());
        let scene = merge_for_render(&[object], &[Rgb::WHITE]).unwrap();

        let mut surface = RecordingSurface::default();
        draw(&scene, &camera(), &light, &viewport(), &mut surface).unwrap();

        assert!(surface.triangles.is_empty());
    }

    #[test]
    fn test_inconsistent_buffer_fails_fast() {
        let buffer = SceneBuffer {
            vertices: vec![Point3::origin()],
            normals: vec![Vector3::y()],
            faces: vec![Face::new([0, 0, 9], [0, 0, 0])],
            colors: vec![Rgb::BLACK],
        };
        let light = PointLight::new(Point3::origin());

        let mut surface = RecordingSurface::default();
        let result = draw(&buffer, &camera(), &light, &viewport(), &mut surface);

        assert!(matches!(result, Err(Error::VertexIndexOutOfRange { .. })));
        assert!(surface.triangles.is_empty());
    }
}
