//! GPU rendering subsystem.
//!
//! The render loop owns its GPU resources (program, pipeline, buffers, depth
//! target) and issues one draw call per frame.
//!
//! Convention:
//! - Geometry is uploaded once as flat `f32` arrays (3 position / 4 color
//!   components per vertex) and `u16` indices.
//! - Matrices are column-major `mat4x4<f32>` uniforms.

mod ctx;
mod depth;
mod geometry;
mod render_loop;
mod shader;

pub use ctx::{RenderCtx, RenderTarget};
pub use depth::{DepthTarget, DEPTH_FORMAT};
pub use geometry::{
    DrawMode, Geometry, GeometryBuffer, COLOR_COMPONENTS, POSITION_COMPONENTS,
};
pub use render_loop::{RenderLoop, SceneDesc, ShaderBindings};
pub use shader::{AttributeInfo, ShaderProgram, ShaderStage, UniformInfo};
