use crate::coords::Viewport;

/// Device handles plus the drawable description a [`super::RenderLoop`] is
/// built and drawn against.
///
/// `viewport` tracks the window and can be zero-sized while minimized; it only
/// feeds the projection aspect. Attachment sizes come from [`RenderTarget`].
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub viewport: Viewport,
}

impl<'a> RenderCtx<'a> {
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            viewport,
        }
    }
}

/// One frame's recording state: encoder, color attachment and that
/// attachment's size in texels.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    pub extent: (u32, u32),
}

impl<'a> RenderTarget<'a> {
    pub fn new(
        encoder: &'a mut wgpu::CommandEncoder,
        color_view: &'a wgpu::TextureView,
        extent: (u32, u32),
    ) -> Self {
        Self {
            encoder,
            color_view,
            extent,
        }
    }
}
