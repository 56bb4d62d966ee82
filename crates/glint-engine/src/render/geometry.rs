use wgpu::util::DeviceExt;

/// Floats per vertex in the position array.
pub const POSITION_COMPONENTS: usize = 3;

/// Floats per vertex in the color array (RGBA).
pub const COLOR_COMPONENTS: usize = 4;

/// How the uploaded vertices are assembled into triangles.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawMode {
    /// Raw vertices as a strip (flat quads).
    TriangleStrip,
    /// Triangle list over the index buffer (cubes).
    IndexedTriangles,
}

impl DrawMode {
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            DrawMode::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
            DrawMode::IndexedTriangles => wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

/// CPU-side geometry tables: flat positions, optional per-vertex colors and
/// optional triangle indices.
///
/// Nothing is validated against any shader layout. A color array shorter than
/// the position array, or indices past the last vertex, are accepted here and
/// only surface at draw time (wgpu rejects the undersized color binding; an
/// out-of-range index reads whatever robust buffer access returns). Use
/// [`Geometry::out_of_range_indices`] to detect the latter up front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    positions: Vec<f32>,
    colors: Option<Vec<f32>>,
    indices: Option<Vec<u16>>,
}

impl Geometry {
    pub fn new(positions: impl Into<Vec<f32>>) -> Self {
        Self {
            positions: positions.into(),
            colors: None,
            indices: None,
        }
    }

    pub fn with_colors(mut self, colors: impl Into<Vec<f32>>) -> Self {
        self.colors = Some(colors.into());
        self
    }

    pub fn with_indices(mut self, indices: impl Into<Vec<u16>>) -> Self {
        self.indices = Some(indices.into());
        self
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> Option<&[f32]> {
        self.colors.as_deref()
    }

    pub fn indices(&self) -> Option<&[u16]> {
        self.indices.as_deref()
    }

    /// Whole vertices in the position array; a trailing partial vertex is ignored.
    pub fn vertex_count(&self) -> u32 {
        (self.positions.len() / POSITION_COMPONENTS) as u32
    }

    pub fn index_count(&self) -> Option<u32> {
        self.indices.as_ref().map(|i| i.len() as u32)
    }

    /// Triangles produced by drawing this geometry with `mode`.
    pub fn triangle_count(&self, mode: DrawMode) -> u32 {
        match (mode, self.index_count()) {
            (DrawMode::IndexedTriangles, Some(n)) => n / 3,
            (DrawMode::IndexedTriangles, None) => self.vertex_count() / 3,
            (DrawMode::TriangleStrip, _) => self.vertex_count().saturating_sub(2),
        }
    }

    /// Number of distinct vertices the index list references.
    pub fn referenced_vertex_count(&self) -> usize {
        let Some(indices) = self.indices.as_deref() else {
            return self.vertex_count() as usize;
        };
        let mut seen: Vec<u16> = indices.to_vec();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }

    /// Indices that point past the last uploaded vertex.
    pub fn out_of_range_indices(&self) -> usize {
        let vertices = self.vertex_count();
        self.indices
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|&&i| u32::from(i) >= vertices)
            .count()
    }
}

/// GPU-resident copy of a [`Geometry`]. Never mutated after upload.
pub struct GeometryBuffer {
    positions: wgpu::Buffer,
    colors: Option<wgpu::Buffer>,
    indices: Option<wgpu::Buffer>,
    vertex_count: u32,
    index_count: u32,
}

impl GeometryBuffer {
    /// Copies the geometry tables into static GPU buffers.
    ///
    /// Always succeeds for a live device; no layout validation happens here.
    pub fn upload(device: &wgpu::Device, geometry: &Geometry) -> Self {
        let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glint positions vbo"),
            contents: bytemuck::cast_slice(geometry.positions()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let colors = geometry.colors().map(|colors| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("glint colors vbo"),
                contents: bytemuck::cast_slice(colors),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        let indices = geometry.indices().map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("glint ibo"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        log::debug!(
            "uploaded geometry: {} vertices, colors: {}, {} indices",
            geometry.vertex_count(),
            colors.is_some(),
            geometry.index_count().unwrap_or(0)
        );

        Self {
            positions,
            colors,
            indices,
            vertex_count: geometry.vertex_count(),
            index_count: geometry.index_count().unwrap_or(0),
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }

    /// Binds the buffers (positions at slot 0, colors at slot 1 when
    /// `bind_colors`) and issues the single draw call for `mode`.
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, mode: DrawMode, bind_colors: bool) {
        if self.vertex_count == 0 {
            return;
        }

        rpass.set_vertex_buffer(0, self.positions.slice(..));
        if bind_colors {
            if let Some(colors) = self.colors.as_ref() {
                rpass.set_vertex_buffer(1, colors.slice(..));
            }
        }

        match (mode, self.indices.as_ref()) {
            (DrawMode::IndexedTriangles, Some(ibo)) if self.index_count > 0 => {
                rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..self.index_count, 0, 0..1);
            }
            _ => rpass.draw(0..self.vertex_count, 0..1),
        }
    }
}
