/// Options for creating a window's graphics context.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Use an sRGB swapchain format when the surface offers one.
    pub prefer_srgb: bool,

    /// Vsync-style FIFO by default. Frame pacing itself comes from the runtime cadence.
    pub present_mode: wgpu::PresentMode,

    /// Falls back to the surface's first supported mode when unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,
    pub required_features: wgpu::Features,

    /// Downlevel defaults: the scenes need nothing beyond two uniform buffers
    /// and two vertex buffers.
    pub required_limits: wgpu::Limits,

    /// Swapchain latency hint; backends may ignore it.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::default(),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}
