//! Graphics context: wgpu instance/adapter/device/queue and the window surface.
//!
//! Context creation is the only fallible step here; per-frame surface failures
//! are mapped to a [`SurfaceRecovery`] instead of an error.

mod context;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use frame::{SurfaceFrame, SurfaceRecovery};
pub use init::GpuInit;
