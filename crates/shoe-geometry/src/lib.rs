//! CPU-side geometry for the **shoe surface** viewer.
//!
//! This crate has no GPU or window dependencies so tessellation and transform
//! math can be tested on their own.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`surface`] | `calculate_z`, `Grid`, surface tessellator |
//! | [`normal`] | finite-difference `estimate_normal` |
//! | [`sphere`] | `LightIndicator` sphere generator |
//! | [`mesh`] | `Mesh` triangle list with per-vertex normals |
//! | [`transform`] | matrix builders, `CameraRig`, `light_orbit` |
//! | [`error`] | `MeshError` |
//!
//! # Quick start
//!
//! ```rust
//! use shoe_geometry::{surface_mesh, Grid};
//!
//! let mesh = surface_mesh(&Grid::default());
//! assert_eq!(mesh.vertex_count(), 5400);
//! ```

pub mod error;
pub mod mesh;
pub mod normal;
pub mod sphere;
pub mod surface;
pub mod transform;

pub use glam;

pub use error::MeshError;
pub use mesh::Mesh;
pub use normal::estimate_normal;
pub use sphere::{sphere_mesh, sphere_vertices, LightIndicator};
pub use surface::{calculate_z, surface_mesh, surface_normals, surface_vertices, Grid};
pub use transform::{light_orbit, CameraRig};
