//! Scene composition: merging independently transformed objects into one
//! depth-sortable buffer.

use nalgebra::{Point3, Vector3};

use crate::error::Error;
use crate::geometry::{validate_faces, Face, Rgb};
use crate::object::SceneObject;

/// A merged scene, rebuilt every frame and dropped after drawing.
#[derive(Debug, Clone, Default)]
pub struct SceneBuffer {
    pub vertices: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub faces: Vec<Face>,
    /// One base color per face, aligned with `faces`.
    pub colors: Vec<Rgb>,
}

impl SceneBuffer {
    /// Reject any face index outside the merged pools, or a color count
    /// that does not match the face count.
    pub fn validate(&self) -> Result<(), Error> {
        if self.colors.len() != self.faces.len() {
            return Err(Error::ColorCountMismatch {
                expected: self.faces.len(),
                got: self.colors.len(),
            });
        }
        validate_faces(&self.faces, self.vertices.len(), self.normals.len())
    }
}

/// Merge `objects` into a single buffer, rebasing face indices by the
/// running vertex and normal counts.
///
/// `colors` holds one entry per face across all objects, in object order,
/// and is passed through untouched. The objects are only borrowed; nothing
/// is retained between frames.
pub fn merge_for_render(objects: &[SceneObject], colors: &[Rgb]) -> Result<SceneBuffer, Error> {
    let total_faces: usize = objects.iter().map(|o| o.mesh.faces.len()).sum();
    if colors.len() != total_faces {
        return Err(Error::ColorCountMismatch {
            expected: total_faces,
            got: colors.len(),
        });
    }

    let mut buffer = SceneBuffer::default();
    buffer
        .vertices
        .reserve(objects.iter().map(|o| o.mesh.vertices.len()).sum());
    buffer
        .normals
        .reserve(objects.iter().map(|o| o.mesh.normals.len()).sum());
    buffer.faces.reserve(total_faces);
    buffer.colors.extend_from_slice(colors);

    for object in objects {
        let vertex_offset = buffer.vertices.len();
        let normal_offset = buffer.normals.len();
        buffer.vertices.extend_from_slice(&object.mesh.vertices);
        buffer.normals.extend_from_slice(&object.mesh.normals);
        for face in &object.mesh.faces {
            buffer.faces.push(Face::new(
                face.vertices.map(|v| v + vertex_offset),
                face.normals.map(|n| n + normal_offset),
            ));
        }
    }

    Ok(buffer)
}
