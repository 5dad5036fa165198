use glam::Vec3;

use crate::error::MeshError;

/// Non-indexed triangle list with one normal per vertex.
///
/// Invariants:
/// - `vertices.len() == normals.len()`
/// - `vertices.len()` is a multiple of 3
///
/// Both are checked on construction, so GPU upload code can zip the two
/// arrays by index without re-validating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, normals: Vec<Vec3>) -> Result<Self, MeshError> {
        if vertices.len() != normals.len() {
            return Err(MeshError::LengthMismatch {
                vertices: vertices.len(),
                normals: normals.len(),
            });
        }
        if vertices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle { vertices: vertices.len() });
        }
        Ok(Self { vertices, normals })
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    #[inline]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Number of vertices (equal to the number of normals).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> Vec<Vec3> {
        vec![Vec3::ZERO, Vec3::X, Vec3::Y]
    }

    #[test]
    fn accepts_matching_triangle_list() {
        let mesh = Mesh::new(tri(), vec![Vec3::Z; 3]).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = Mesh::new(tri(), vec![Vec3::Z; 2]).unwrap_err();
        assert_eq!(err, MeshError::LengthMismatch { vertices: 3, normals: 2 });
    }

    #[test]
    fn rejects_partial_triangle() {
        let err = Mesh::new(vec![Vec3::ZERO; 4], vec![Vec3::Z; 4]).unwrap_err();
        assert_eq!(err, MeshError::PartialTriangle { vertices: 4 });
    }

    #[test]
    fn empty_mesh_is_valid() {
        let mesh = Mesh::new(Vec::new(), Vec::new()).unwrap();
        assert!(mesh.is_empty());
    }
}
