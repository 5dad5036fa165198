//! Shoe engine crate.
//!
//! Platform and GPU runtime for the shoe surface viewer: one window, a
//! wgpu surface with a depth buffer, input translation, frame timing,
//! and a small immediate-style renderer (one shader program, static
//! models, per-draw uniform snapshots).

pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod time;
pub mod window;

pub use glam;
pub use shoe_geometry as geometry;
