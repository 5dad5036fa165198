//! Window-space coordinate types.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down

mod viewport;

pub use viewport::Viewport;
