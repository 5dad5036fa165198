use std::fmt;

/// A mesh whose vertex and normal arrays break the triangle-list invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Vertex and normal arrays differ in length.
    LengthMismatch { vertices: usize, normals: usize },
    /// Vertex count is not a whole number of triangles.
    PartialTriangle { vertices: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::LengthMismatch { vertices, normals } => write!(
                f,
                "mesh error: {vertices} vertices but {normals} normals"
            ),
            MeshError::PartialTriangle { vertices } => write!(
                f,
                "mesh error: {vertices} vertices do not form whole triangles"
            ),
        }
    }
}

impl std::error::Error for MeshError {}
