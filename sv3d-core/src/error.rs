//! Error types shared across the core library.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("face {face} references vertex {index}, but the mesh has {len} vertices")]
    VertexIndexOutOfRange { face: usize, index: usize, len: usize },

    #[error("face {face} references normal {index}, but the mesh has {len} normals")]
    NormalIndexOutOfRange { face: usize, index: usize, len: usize },

    #[error("expected {expected} face colors, got {got}")]
    ColorCountMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
