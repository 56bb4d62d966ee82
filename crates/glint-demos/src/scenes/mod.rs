//! Built-in scenes. Each is a [`SceneDesc`] fed to the same render loop.

mod cube;
mod square;

use clap::ValueEnum;
use glint_engine::render::SceneDesc;

pub use cube::cube;
pub use square::{colored_square, square};

pub(crate) const SOLID_VS: &str = include_str!("../../shaders/solid.vert.wgsl");
pub(crate) const SOLID_FS: &str = include_str!("../../shaders/solid.frag.wgsl");
pub(crate) const COLORED_VS: &str = include_str!("../../shaders/colored.vert.wgsl");
pub(crate) const COLORED_FS: &str = include_str!("../../shaders/colored.frag.wgsl");

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Still white square.
    Square,
    /// Spinning, bouncing square with per-vertex colors.
    ColoredSquare,
    /// Spinning cube with one color per face.
    Cube,
}

impl SceneKind {
    pub fn build(self) -> SceneDesc {
        match self {
            SceneKind::Square => square(),
            SceneKind::ColoredSquare => colored_square(),
            SceneKind::Cube => cube(),
        }
    }
}
