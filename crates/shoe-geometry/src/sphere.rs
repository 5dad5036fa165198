use std::f32::consts::PI;

use glam::Vec3;

use crate::mesh::Mesh;

/// Small latitude/longitude sphere used to mark the light position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightIndicator {
    pub radius: f32,
    /// Angular step in radians for both `phi` and `theta`.
    pub step: f32,
}

impl Default for LightIndicator {
    fn default() -> Self {
        Self { radius: 0.1, step: 0.5 }
    }
}

impl LightIndicator {
    /// Cells along `phi ∈ [0, π)`.
    pub fn phi_cells(&self) -> usize {
        self.cells(PI)
    }

    /// Cells along `theta ∈ [0, 2π)`.
    pub fn theta_cells(&self) -> usize {
        self.cells(2.0 * PI)
    }

    /// A step that is not a positive finite angle tessellates nothing.
    fn cells(&self, span: f32) -> usize {
        if !(self.step.is_finite() && self.step > 0.0) {
            return 0;
        }
        (span / self.step).ceil() as usize
    }

    pub fn vertex_count(&self) -> usize {
        2 * 3 * self.phi_cells() * self.theta_cells()
    }

    /// Spherical to Cartesian: `(r·cosφ·sinθ, r·sinφ·sinθ, r·cosθ)`.
    pub fn point(&self, phi: f32, theta: f32) -> Vec3 {
        let r = self.radius;
        Vec3::new(
            r * phi.cos() * theta.sin(),
            r * phi.sin() * theta.sin(),
            r * theta.cos(),
        )
    }

    /// Triangle-list vertices, two triangles per `(phi, theta)` cell.
    pub fn vertices(&self) -> Vec<Vec3> {
        let s = self.step;
        let mut out = Vec::with_capacity(self.vertex_count());

        for p in 0..self.phi_cells() {
            let phi = p as f32 * s;
            for t in 0..self.theta_cells() {
                let theta = t as f32 * s;

                let v1 = self.point(phi, theta);
                let v2 = self.point(phi + s, theta);
                let v3 = self.point(phi, theta + s);
                let v4 = self.point(phi + s, theta + s);

                out.extend([v1, v2, v3, v3, v2, v4]);
            }
        }
        out
    }

    /// Vertices paired with outward unit normals.
    pub fn mesh(&self) -> Mesh {
        let vertices = self.vertices();
        let normals = vertices.iter().map(|v| v.normalize_or(Vec3::Z)).collect();
        Mesh::new(vertices, normals).expect("sphere tessellation emits matching whole triangles")
    }
}

/// Vertices of a sphere of `radius` tessellated every `step` radians.
///
/// Empty when `step` is zero, negative or not finite.
pub fn sphere_vertices(radius: f32, step: f32) -> Vec<Vec3> {
    LightIndicator { radius, step }.vertices()
}

/// [`sphere_vertices`] with unit normals.
pub fn sphere_mesh(radius: f32, step: f32) -> Mesh {
    LightIndicator { radius, step }.mesh()
}
