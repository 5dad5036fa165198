//! Color model shared between the frame driver and renderers.

pub mod color;

pub use color::Color;
