//! Geometry primitives for 3D rendering.

use nalgebra::{Point3, Vector3};

use crate::error::Error;

/// A triangle face, referencing mesh-owned vertex and normal pools.
///
/// Indices are zero-based, one normal index per corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub vertices: [usize; 3],
    pub normals: [usize; 3],
}

impl Face {
    pub fn new(vertices: [usize; 3], normals: [usize; 3]) -> Self {
        Self { vertices, normals }
    }
}

/// Solid fill color, one per face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `k`, saturating at the channel bounds.
    pub fn scaled(&self, k: f32) -> Self {
        Self::new(
            (self.r as f32 * k) as u8,
            (self.g as f32 * k) as u8,
            (self.b as f32 * k) as u8,
        )
    }
}

/// An indexed triangle mesh: vertex positions, normals, and faces
/// referencing both pools.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub faces: Vec<Face>,
}

impl MeshData {
    pub fn new(vertices: Vec<Point3<f32>>, normals: Vec<Vector3<f32>>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            normals,
            faces,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check every face index against the vertex and normal pools.
    pub fn validate(&self) -> Result<(), Error> {
        validate_faces(&self.faces, self.vertices.len(), self.normals.len())
    }

    /// Axis-aligned cube centered on the origin, handy for demos and tests.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let vertices = vec![
            Point3::new(-half, -half, -half),
            Point3::new(half, -half, -half),
            Point3::new(half, half, -half),
            Point3::new(-half, half, -half),
            Point3::new(-half, -half, half),
            Point3::new(half, -half, half),
            Point3::new(half, half, half),
            Point3::new(-half, half, half),
        ];
        let normals = vec![
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
        ];
        let quads: [([usize; 4], usize); 6] = [
            ([4, 5, 6, 7], 0), // front
            ([1, 0, 3, 2], 1), // back
            ([7, 6, 2, 3], 2), // top
            ([0, 1, 5, 4], 3), // bottom
            ([5, 1, 2, 6], 4), // right
            ([0, 4, 7, 3], 5), // left
        ];

        let mut faces = Vec::with_capacity(12);
        for (quad, normal) in quads {
            faces.push(Face::new([quad[0], quad[1], quad[2]], [normal; 3]));
            faces.push(Face::new([quad[0], quad[2], quad[3]], [normal; 3]));
        }

        Self {
            vertices,
            normals,
            faces,
        }
    }
}

/// Index check shared by meshes and merged scene buffers.
pub(crate) fn validate_faces(
    faces: &[Face],
    vertex_count: usize,
    normal_count: usize,
) -> Result<(), Error> {
    for (i, face) in faces.iter().enumerate() {
        for &vertex in &face.vertices {
            if vertex >= vertex_count {
                return Err(Error::VertexIndexOutOfRange {
                    face: i,
                    index: vertex,
                    len: vertex_count,
                });
            }
        }
        for &normal in &face.normals {
            if normal >= normal_count {
                return Err(Error::NormalIndexOutOfRange {
                    face: i,
                    index: normal,
                    len: normal_count,
                });
            }
        }
    }
    Ok(())
}
