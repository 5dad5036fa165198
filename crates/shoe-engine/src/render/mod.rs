//! GPU rendering subsystem.
//!
//! A [`ShaderProgram`] owns the pipeline and the uniform block; a [`Model`]
//! owns the vertex data. Draws are recorded into one pass per frame, each
//! with its own uniform snapshot.
//!
//! Convention:
//! - Geometry is in model space; the vertex shader applies the
//!   `ModelViewProjectionMatrix` (right-handed, depth 0..1).
//! - Matrices are uploaded column-major.

mod ctx;
mod error;
mod model;
mod program;
pub mod reflect;
mod uniform;

pub use ctx::{RenderCtx, RenderTarget};
pub use error::ProgramError;
pub use model::{Model, Topology};
pub use program::{ShaderProgram, SHOE_SHADER};
pub use reflect::{AttributeLocations, ProgramInterface, UniformLocations};
pub use uniform::{UniformBlock, UniformKind, UniformLocation};
