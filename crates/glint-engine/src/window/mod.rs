//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer and
//! schedules redraws on a fixed cadence.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx, DEFAULT_FRAME_INTERVAL};
