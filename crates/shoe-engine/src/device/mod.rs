//! GPU device + surface management.
//!
//! [`Gpu`] owns the wgpu instance, adapter, device and queue, the window
//! surface and a depth attachment of the same size, and hands out one
//! [`GpuFrame`] per redraw.

mod depth;
mod frame;
mod gpu;
mod init;
mod surface;

pub use depth::DepthBuffer;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
