//! Exercises upload and full frames against a headless adapter, reading the
//! target back to check something was drawn.
//!
//! Machines without any adapter (CI containers) skip these tests.

use std::sync::mpsc;

use glam::Vec3;
use glint_engine::coords::Viewport;
use glint_engine::render::{
    DrawMode, Geometry, GeometryBuffer, RenderCtx, RenderLoop, RenderTarget, SceneDesc,
    ShaderBindings,
};
use glint_engine::scene::{CameraConfig, Motion};
use glint_engine::Error;

const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
const SIZE: u32 = 64;
const CLEAR: [u8; 4] = [0, 0, 0, 255];

const VS: &str = r#"
@group(0) @binding(0) var<uniform> projectionMatrix: mat4x4<f32>;
@group(0) @binding(1) var<uniform> modelViewMatrix: mat4x4<f32>;

struct VertexOut {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(@location(0) vertexPos: vec3<f32>, @location(1) vertexColor: vec4<f32>) -> VertexOut {
    var out: VertexOut;
    out.position = projectionMatrix * modelViewMatrix * vec4<f32>(vertexPos, 1.0);
    out.color = vertexColor;
    return out;
}
"#;

const FS: &str = r#"
@fragment
fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
    return color;
}
"#;

const QUAD: [f32; 12] = [
    1.0, 1.0, 0.0, //
    -1.0, 1.0, 0.0, //
    1.0, -1.0, 0.0, //
    -1.0, -1.0, 0.0,
];

const QUAD_COLORS: [f32; 16] = [
    1.0, 1.0, 1.0, 1.0, //
    1.0, 0.0, 0.0, 1.0, //
    0.0, 1.0, 0.0, 1.0, //
    0.0, 0.0, 1.0, 1.0,
];

#[rustfmt::skip]
const CUBE_CORNERS: [f32; 24] = [
    -1.0, -1.0,  1.0,   1.0, -1.0,  1.0,   1.0,  1.0,  1.0,  -1.0,  1.0,  1.0,
    -1.0, -1.0, -1.0,   1.0, -1.0, -1.0,   1.0,  1.0, -1.0,  -1.0,  1.0, -1.0,
];

#[rustfmt::skip]
const CUBE_INDICES: [u16; 36] = [
    0, 1, 2,  0, 2, 3, // front
    5, 4, 7,  5, 7, 6, // back
    3, 2, 6,  3, 6, 7, // top
    4, 5, 1,  4, 1, 0, // bottom
    1, 5, 6,  1, 6, 2, // right
    4, 0, 3,  4, 3, 7, // left
];

struct Headless {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

fn headless() -> Option<Headless> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::LowPower,
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .ok()?;

    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
        label: Some("glint test device"),
        required_features: wgpu::Features::empty(),
        required_limits: wgpu::Limits::downlevel_defaults(),
        experimental_features: wgpu::ExperimentalFeatures::disabled(),
        memory_hints: wgpu::MemoryHints::default(),
        trace: wgpu::Trace::Off,
    }))
    .ok()?;

    Some(Headless { device, queue })
}

fn scene(geometry: Geometry, draw_mode: DrawMode, motion: Motion) -> SceneDesc {
    SceneDesc {
        label: format!("offscreen {draw_mode:?}"),
        vertex_source: VS.into(),
        fragment_source: FS.into(),
        geometry,
        draw_mode,
        camera: CameraConfig::default(),
        motion,
        initial_rate: Vec3::new(0.2, -0.4, 0.3),
        clear_color: wgpu::Color::BLACK,
        bindings: ShaderBindings::default(),
    }
}

fn colored_quad() -> SceneDesc {
    scene(
        Geometry::new(QUAD).with_colors(QUAD_COLORS),
        DrawMode::TriangleStrip,
        Motion::SpinAndBounce {
            axis: Vec3::new(1.0, 0.0, 1.0),
        },
    )
}

fn indexed_cube() -> SceneDesc {
    let colors: Vec<f32> = (0..8).flat_map(|_| [1.0, 0.0, 0.0, 1.0]).collect();
    scene(
        Geometry::new(CUBE_CORNERS)
            .with_colors(colors)
            .with_indices(CUBE_INDICES),
        DrawMode::IndexedTriangles,
        Motion::Spin {
            axis: Vec3::new(1.0, 0.0, 1.0),
        },
    )
}

/// Offscreen color target that can be copied back to the CPU.
struct Target {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl Target {
    fn new(device: &wgpu::Device) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glint test target"),
            size: wgpu::Extent3d {
                width: SIZE,
                height: SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Records one frame with `viewport` as the drawable size, then returns the
/// RGBA bytes of the target's center pixel.
fn draw_and_read_center(
    gpu: &Headless,
    render_loop: &mut RenderLoop,
    target: &Target,
    viewport: Viewport,
) -> [u8; 4] {
    // 64 texels * 4 bytes is already a multiple of COPY_BYTES_PER_ROW_ALIGNMENT.
    let bytes_per_row = SIZE * 4;
    let readback = gpu.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("glint test readback"),
        size: u64::from(bytes_per_row * SIZE),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let ctx = RenderCtx::new(&gpu.device, &gpu.queue, TARGET_FORMAT, viewport);
    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("glint test encoder"),
        });
    {
        let mut rt = RenderTarget::new(&mut encoder, &target.view, (SIZE, SIZE));
        render_loop.render_frame(&ctx, &mut rt);
    }
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &target.texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &readback,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(SIZE),
            },
        },
        wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: 1,
        },
    );
    gpu.queue.submit(Some(encoder.finish()));

    let slice = readback.slice(..);
    let (tx, rx) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |res| {
        let _ = tx.send(res);
    });
    gpu.device
        .poll(wgpu::PollType::wait_indefinitely())
        .expect("device poll");
    rx.recv().expect("map callback").expect("readback maps");

    let data = slice.get_mapped_range();
    let center = ((SIZE / 2) * bytes_per_row + (SIZE / 2) * 4) as usize;
    let pixel = [
        data[center],
        data[center + 1],
        data[center + 2],
        data[center + 3],
    ];
    drop(data);
    readback.unmap();
    pixel
}

#[test]
fn short_vertex_array_still_uploads() {
    let Some(gpu) = headless() else {
        eprintln!("no GPU adapter; skipping");
        return;
    };

    let geometry = Geometry::new(&QUAD[..6]).with_indices([0u16, 1, 2, 1, 3, 2]);
    assert_eq!(geometry.out_of_range_indices(), 3);

    let buffer = GeometryBuffer::upload(&gpu.device, &geometry);
    assert_eq!(buffer.vertex_count(), 2);
    assert_eq!(buffer.index_count(), 6);
    assert!(!buffer.has_colors());
}

#[test]
fn strip_quad_covers_the_center() {
    let Some(gpu) = headless() else {
        eprintln!("no GPU adapter; skipping");
        return;
    };

    let viewport = Viewport::new(SIZE as f32, SIZE as f32);
    let ctx = RenderCtx::new(&gpu.device, &gpu.queue, TARGET_FORMAT, viewport);
    let mut render_loop = RenderLoop::new(&ctx, &colored_quad()).expect("scene builds");
    let target = Target::new(&gpu.device);

    render_loop.tick(15.0);
    assert!((render_loop.animation().angle - 0.45).abs() < 1e-5);

    let center = draw_and_read_center(&gpu, &mut render_loop, &target, viewport);
    assert_ne!(center, CLEAR);

    // Aspect comes from the viewport; a square target yields equal x/y scale.
    let p = render_loop.transform().projection;
    assert!((p.x_axis.x - p.y_axis.y).abs() < 1e-5);
}

#[test]
fn indexed_cube_covers_the_center() {
    let Some(gpu) = headless() else {
        eprintln!("no GPU adapter; skipping");
        return;
    };

    let viewport = Viewport::new(SIZE as f32, SIZE as f32);
    let ctx = RenderCtx::new(&gpu.device, &gpu.queue, TARGET_FORMAT, viewport);
    let mut render_loop = RenderLoop::new(&ctx, &indexed_cube()).expect("scene builds");
    let target = Target::new(&gpu.device);

    render_loop.tick(15.0);
    let center = draw_and_read_center(&gpu, &mut render_loop, &target, viewport);

    // Every face is red.
    assert!(center[0] > 200, "center pixel {center:?}");
    assert_eq!(&center[1..], &[0, 0, 255]);
}

#[test]
fn zero_sized_viewport_still_renders_into_the_target() {
    let Some(gpu) = headless() else {
        eprintln!("no GPU adapter; skipping");
        return;
    };

    let full = Viewport::new(SIZE as f32, SIZE as f32);
    let ctx = RenderCtx::new(&gpu.device, &gpu.queue, TARGET_FORMAT, full);
    let mut render_loop = RenderLoop::new(&ctx, &indexed_cube()).expect("scene builds");
    let target = Target::new(&gpu.device);

    // Minimized window: no drawable area, but the attachment keeps its size.
    let center = draw_and_read_center(&gpu, &mut render_loop, &target, Viewport::new(0.0, 0.0));
    assert_ne!(center, CLEAR);
}

#[test]
fn integer_attribute_is_a_link_error() {
    let Some(gpu) = headless() else {
        eprintln!("no GPU adapter; skipping");
        return;
    };

    let vs = VS
        .replace(
            "@location(0) vertexPos: vec3<f32>",
            "@location(0) vertexPos: vec3<i32>",
        )
        .replace("vec4<f32>(vertexPos, 1.0)", "vec4<f32>(vec3<f32>(vertexPos), 1.0)");
    let mut desc = colored_quad();
    desc.vertex_source = vs;

    let viewport = Viewport::new(SIZE as f32, SIZE as f32);
    let ctx = RenderCtx::new(&gpu.device, &gpu.queue, TARGET_FORMAT, viewport);
    match RenderLoop::new(&ctx, &desc) {
        Err(Error::ProgramLink(msg)) => assert!(msg.contains("vertexPos"), "{msg}"),
        Err(other) => panic!("expected a link error, got {other}"),
        Ok(_) => panic!("integer attribute accepted"),
    }
}
