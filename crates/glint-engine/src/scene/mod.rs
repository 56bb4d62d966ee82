//! Per-frame scene state.
//!
//! `AnimationState` is advanced by elapsed time; `TransformState` is rebuilt
//! from it every frame. Neither touches the GPU.

mod animation;
mod transform;

pub use animation::{AnimationState, Motion, BOUNCE_LIMIT, DEGREES_PER_SECOND};
pub use transform::{CameraConfig, TransformState};
