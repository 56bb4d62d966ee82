//! Glint engine crate.
//!
//! A small render-loop driver: window + GPU context acquisition, shader program
//! compile/link, static geometry upload and a fixed-cadence animate/draw loop.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod scene;

mod error;

pub use error::{Error, Result};
