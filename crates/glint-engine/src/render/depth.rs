pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth attachment sized to the color attachment; recreated when that size changes.
#[derive(Default)]
pub struct DepthTarget {
    extent: (u32, u32),
    view: Option<wgpu::TextureView>,
}

impl DepthTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure the attachment is `extent` texels; zero axes are clamped to one.
    pub fn ensure(&mut self, device: &wgpu::Device, extent: (u32, u32)) {
        let extent = (extent.0.max(1), extent.1.max(1));
        if self.view.is_some() && self.extent == extent {
            return;
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glint depth texture"),
            size: wgpu::Extent3d {
                width: extent.0,
                height: extent.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        log::debug!("depth target resized to {}x{}", extent.0, extent.1);
        self.view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.extent = extent;
    }

    #[inline]
    pub fn view(&self) -> Option<&wgpu::TextureView> {
        self.view.as_ref()
    }
}
