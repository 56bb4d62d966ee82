/// One acquired swapchain image plus the encoder recording into it.
///
/// Must be handed back to [`super::Gpu::submit`] before the next acquisition;
/// an outstanding surface texture blocks the swapchain.
pub struct SurfaceFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// What the runtime should do after failing to acquire a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceRecovery {
    /// Surface was configured again; the next frame should succeed.
    Reconfigured,
    /// Transient; drop this frame only.
    SkipFrame,
    /// Out of memory. Stop the loop.
    Fatal,
}
