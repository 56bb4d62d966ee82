use thiserror::Error;

use crate::render::ShaderStage;

/// Set-up failures of the render loop.
///
/// All variants are terminal for the running instance: the runtime reports
/// them and stops. Per-frame surface problems are not errors; see
/// [`crate::device::SurfaceRecovery`].
#[derive(Debug, Error)]
pub enum Error {
    /// The platform could not provide a surface, adapter or device.
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),

    /// A shader stage failed to parse or validate.
    #[error("{stage} shader failed to compile:\n{message}")]
    ShaderCompile { stage: ShaderStage, message: String },

    /// The compiled stages do not form a usable program.
    #[error("shader program failed to link: {0}")]
    ProgramLink(String),
}

pub type Result<T> = std::result::Result<T, Error>;
