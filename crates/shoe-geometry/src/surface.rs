use glam::Vec3;

use crate::mesh::Mesh;
use crate::normal::estimate_normal;

/// Height of the shoe surface: `z = x³/3 − y²/2`.
#[inline]
pub fn calculate_z(x: f32, y: f32) -> f32 {
    (x * x * x) / 3.0 - (y * y) / 2.0
}

/// Point on the surface above `(x, y)`.
#[inline]
pub fn surface_point(x: f32, y: f32) -> Vec3 {
    Vec3::new(x, y, calculate_z(x, y))
}

/// Rectangular parameter domain split into equal cells.
///
/// Coordinates are derived from integer cell indices (`x1 + k · step`), so the
/// number of cells is exactly `steps_x × steps_y` regardless of float rounding.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Grid {
    pub x1: f32,
    pub x2: f32,
    pub y1: f32,
    pub y2: f32,
    pub steps_x: u32,
    pub steps_y: u32,
}

impl Grid {
    pub const fn new(x1: f32, x2: f32, y1: f32, y2: f32, steps_x: u32, steps_y: u32) -> Self {
        Self { x1, x2, y1, y2, steps_x, steps_y }
    }

    #[inline]
    pub fn step_x(&self) -> f32 {
        (self.x2 - self.x1) / self.steps_x as f32
    }

    #[inline]
    pub fn step_y(&self) -> f32 {
        (self.y2 - self.y1) / self.steps_y as f32
    }

    pub fn cell_count(&self) -> usize {
        self.steps_x as usize * self.steps_y as usize
    }

    /// Vertices emitted by the tessellator: two triangles per cell.
    pub fn vertex_count(&self) -> usize {
        self.cell_count() * 6
    }

    /// Cell corner coordinates `(i, j)` in emission order: `j` walks the x
    /// range in the outer loop, `i` walks the y range in the inner loop.
    fn cells(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        let (step_x, step_y) = (self.step_x(), self.step_y());
        (0..self.steps_x).flat_map(move |kj| {
            let j = self.x1 + kj as f32 * step_x;
            (0..self.steps_y).map(move |ki| (self.y1 + ki as f32 * step_y, j))
        })
    }

    /// The six parameter points of a cell, in triangle-list order.
    fn cell_corners(&self, i: f32, j: f32) -> [(f32, f32); 6] {
        let (step_x, step_y) = (self.step_x(), self.step_y());
        [
            (i, j),
            (i + step_y, j),
            (i, j + step_x),
            (i, j + step_x),
            (i + step_y, j),
            (i + step_y, j + step_x),
        ]
    }
}

impl Default for Grid {
    /// `[-1, 1] × [-1, 1]` in 30 × 30 cells.
    fn default() -> Self {
        Self::new(-1.0, 1.0, -1.0, 1.0, 30, 30)
    }
}

/// Triangle-list vertices covering `grid`, fully expanded (no indexing).
pub fn surface_vertices(grid: &Grid) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(grid.vertex_count());
    for (i, j) in grid.cells() {
        out.extend(grid.cell_corners(i, j).map(|(a, b)| surface_point(a, b)));
    }
    out
}

/// Per-vertex normals matching [`surface_vertices`] index for index.
pub fn surface_normals(grid: &Grid) -> Vec<Vec3> {
    let (step_x, step_y) = (grid.step_x(), grid.step_y());
    let mut out = Vec::with_capacity(grid.vertex_count());
    for (i, j) in grid.cells() {
        out.extend(
            grid.cell_corners(i, j)
                .map(|(a, b)| estimate_normal(a, b, step_x, step_y)),
        );
    }
    out
}

/// Surface vertices and normals as one mesh.
pub fn surface_mesh(grid: &Grid) -> Mesh {
    Mesh::new(surface_vertices(grid), surface_normals(grid))
        .expect("surface tessellation emits matching whole triangles")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── calculate_z ───────────────────────────────────────────────────────

    #[test]
    fn z_at_origin_is_zero() {
        assert_eq!(calculate_z(0.0, 0.0), 0.0);
    }

    #[test]
    fn z_cubic_term() {
        assert_eq!(calculate_z(3.0, 0.0), 9.0);
    }

    #[test]
    fn z_quadratic_term() {
        assert_eq!(calculate_z(0.0, 2.0), -2.0);
    }

    // ── grid ──────────────────────────────────────────────────────────────

    #[test]
    fn default_grid_step() {
        let g = Grid::default();
        assert!((g.step_x() - 2.0 / 30.0).abs() < 1e-7);
        assert!((g.step_y() - 2.0 / 30.0).abs() < 1e-7);
        assert_eq!(g.vertex_count(), 5400);
    }

    // ── vertices ──────────────────────────────────────────────────────────

    #[test]
    fn vertex_count_is_six_per_cell() {
        assert_eq!(surface_vertices(&Grid::default()).len(), 5400);

        let g = Grid::new(-1.0, 1.0, -2.0, 2.0, 7, 11);
        assert_eq!(surface_vertices(&g).len(), 6 * 7 * 11);
    }

    #[test]
    fn tessellation_is_deterministic() {
        let g = Grid::default();
        assert_eq!(surface_vertices(&g), surface_vertices(&g));
    }

    #[test]
    fn first_vertex_is_domain_corner() {
        let v = surface_vertices(&Grid::default());
        assert_eq!(v[0].x, -1.0);
        assert_eq!(v[0].y, -1.0);
        assert_eq!(v[0].z, calculate_z(-1.0, -1.0));
        assert!((v[0].z - (-1.0 / 3.0 - 0.5)).abs() < 1e-6);
    }

    #[test]
    fn every_vertex_lies_on_surface() {
        for v in surface_vertices(&Grid::default()) {
            assert_eq!(v.z, calculate_z(v.x, v.y));
        }
    }

    #[test]
    fn first_cell_winding() {
        let g = Grid::default();
        let s = g.step_x();
        let v = surface_vertices(&g);
        assert_eq!(v[1].x, -1.0 + s);
        assert_eq!(v[1].y, -1.0);
        assert_eq!(v[2].x, -1.0);
        assert_eq!(v[2].y, -1.0 + s);
        assert_eq!(v[2], v[3]);
        assert_eq!(v[1], v[4]);
        assert_eq!(v[5].x, -1.0 + s);
        assert_eq!(v[5].y, -1.0 + s);
    }

    #[test]
    fn inner_loop_walks_first_coordinate() {
        let g = Grid::default();
        let v = surface_vertices(&g);
        // Second cell starts one step along x with y unchanged.
        assert_eq!(v[6].y, -1.0);
        assert!((v[6].x - (-1.0 + g.step_y())).abs() < 1e-7);
    }

    // ── normals ───────────────────────────────────────────────────────────

    #[test]
    fn normals_match_vertices() {
        let g = Grid::default();
        let mesh = surface_mesh(&g);
        assert_eq!(mesh.vertices().len(), mesh.normals().len());

        let (sx, sy) = (g.step_x(), g.step_y());
        for (v, n) in mesh.vertices().iter().zip(mesh.normals()).step_by(97) {
            assert_eq!(*n, estimate_normal(v.x, v.y, sx, sy));
        }
    }

    #[test]
    fn normals_are_unit_length() {
        for n in surface_normals(&Grid::default()) {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }
}
