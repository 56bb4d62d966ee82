//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime:
//! - `FrameClock` measures clamped per-frame deltas (one per window)
//! - `Cadence` schedules redraws at a fixed period

mod cadence;
mod frame_clock;

pub use cadence::Cadence;
pub use frame_clock::{FrameClock, FrameTime};
