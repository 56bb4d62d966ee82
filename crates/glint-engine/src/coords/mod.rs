//! Coordinate helpers shared by the device and render layers.

mod viewport;

pub use viewport::Viewport;
