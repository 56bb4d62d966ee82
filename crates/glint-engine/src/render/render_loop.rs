use glam::Vec3;

use crate::scene::{AnimationState, CameraConfig, Motion, TransformState};
use crate::{Error, Result};

use super::depth::{DepthTarget, DEPTH_FORMAT};
use super::geometry::{DrawMode, Geometry, GeometryBuffer, COLOR_COMPONENTS, POSITION_COMPONENTS};
use super::shader::ShaderProgram;
use super::{RenderCtx, RenderTarget};

const MAT4_SIZE: u64 = 64;

/// Names the render loop looks up in the linked program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderBindings {
    pub position: String,
    pub color: String,
    pub projection: String,
    pub model_view: String,
}

impl Default for ShaderBindings {
    fn default() -> Self {
        Self {
            position: "vertexPos".into(),
            color: "vertexColor".into(),
            projection: "projectionMatrix".into(),
            model_view: "modelViewMatrix".into(),
        }
    }
}

/// Everything that distinguishes one scene from another; the loop itself is shared.
#[derive(Debug, Clone)]
pub struct SceneDesc {
    pub label: String,
    pub vertex_source: String,
    pub fragment_source: String,
    pub geometry: Geometry,
    pub draw_mode: DrawMode,
    pub camera: CameraConfig,
    pub motion: Motion,
    pub initial_rate: Vec3,
    pub clear_color: wgpu::Color,
    pub bindings: ShaderBindings,
}

/// Attribute locations and uniform bindings resolved by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slots {
    position_location: u32,
    color_location: Option<u32>,
    projection: UniformSlot,
    model_view: UniformSlot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UniformSlot {
    binding: u32,
    visibility: wgpu::ShaderStages,
}

/// The render loop state: one explicit owner for the program, GPU buffers,
/// animation and transforms.
pub struct RenderLoop {
    slots: Slots,

    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    projection_ubo: wgpu::Buffer,
    model_view_ubo: wgpu::Buffer,
    geometry: GeometryBuffer,
    depth: DepthTarget,

    draw_mode: DrawMode,
    clear_color: wgpu::Color,
    camera: CameraConfig,
    motion: Motion,
    animation: AnimationState,
    transform: TransformState,
}

impl RenderLoop {
    /// Compiles the scene's program, uploads its geometry and builds the pipeline.
    pub fn new(ctx: &RenderCtx<'_>, scene: &SceneDesc) -> Result<Self> {
        let program = ShaderProgram::compile(&scene.vertex_source, &scene.fragment_source)?;
        let slots = resolve_slots(&program, &scene.bindings, scene.geometry.colors().is_some())?;

        let geometry = GeometryBuffer::upload(ctx.device, &scene.geometry);

        let bind_group_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("glint matrices bgl"),
                entries: &[
                    uniform_layout_entry(slots.projection),
                    uniform_layout_entry(slots.model_view),
                ],
            });

        let projection_ubo = matrix_buffer(ctx.device, "glint projection ubo");
        let model_view_ubo = matrix_buffer(ctx.device, "glint model-view ubo");

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glint matrices bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: slots.projection.binding,
                    resource: projection_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: slots.model_view.binding,
                    resource: model_view_ubo.as_entire_binding(),
                },
            ],
        });

        let pipeline = create_pipeline(ctx, &program, &slots, &bind_group_layout, scene.draw_mode);

        log::info!(
            "scene `{}` ready: {} vertices, {:?}",
            scene.label,
            geometry.vertex_count(),
            scene.draw_mode
        );

        Ok(Self {
            slots,
            pipeline,
            bind_group,
            projection_ubo,
            model_view_ubo,
            geometry,
            depth: DepthTarget::new(),
            draw_mode: scene.draw_mode,
            clear_color: scene.clear_color,
            camera: scene.camera,
            motion: scene.motion,
            animation: AnimationState::new(scene.initial_rate),
            transform: TransformState::new(&scene.camera, ctx.viewport.aspect()),
        })
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    /// Advances the animation by `dt_ms` milliseconds.
    pub fn tick(&mut self, dt_ms: f32) {
        self.animation.tick(dt_ms);
    }

    /// Clears color + depth, pushes fresh matrices and issues the scene's draw call.
    pub fn render_frame(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        // Depth must match the color attachment, not the (possibly zero) viewport.
        self.depth.ensure(ctx.device, target.extent);
        self.transform
            .update(&self.camera, ctx.viewport.aspect(), &self.animation, self.motion);

        ctx.queue.write_buffer(
            &self.projection_ubo,
            0,
            bytemuck::cast_slice(&self.transform.projection.to_cols_array()),
        );
        ctx.queue.write_buffer(
            &self.model_view_ubo,
            0,
            bytemuck::cast_slice(&self.transform.model_view.to_cols_array()),
        );

        let Some(depth_view) = self.depth.view() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glint scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        self.geometry
            .draw(&mut rpass, self.draw_mode, self.slots.color_location.is_some());
    }
}

fn resolve_slots(program: &ShaderProgram, names: &ShaderBindings, has_colors: bool) -> Result<Slots> {
    let position_location = program.attribute_location(&names.position).ok_or_else(|| {
        Error::ProgramLink(format!("vertex stage declares no attribute `{}`", names.position))
    })?;

    let color_location = if has_colors {
        program.attribute_location(&names.color)
    } else {
        None
    };

    for attr in program.attributes() {
        let fed = attr.name == names.position || (has_colors && attr.name == names.color);
        if !fed {
            return Err(Error::ProgramLink(format!(
                "attribute `{}` has no vertex data",
                attr.name
            )));
        }
        // Buffers hold f32 components; any f32 scalar or vector accepts them.
        if attr.format.is_none() {
            return Err(Error::ProgramLink(format!(
                "attribute `{}` must be an f32 scalar or vector",
                attr.name
            )));
        }
    }

    let matrix = |name: &str| -> Result<UniformSlot> {
        let info = program
            .uniform(name)
            .ok_or_else(|| Error::ProgramLink(format!("uniform `{name}` is not declared")))?;
        if info.group != 0 {
            return Err(Error::ProgramLink(format!("uniform `{name}` must be in @group(0)")));
        }
        if !info.is_mat4x4_f32() {
            return Err(Error::ProgramLink(format!("uniform `{name}` must be a mat4x4<f32>")));
        }
        Ok(UniformSlot {
            binding: info.binding,
            visibility: info.visibility,
        })
    };

    let projection = matrix(&names.projection)?;
    let model_view = matrix(&names.model_view)?;

    if let Some(extra) = program
        .uniforms()
        .iter()
        .find(|u| u.name != names.projection && u.name != names.model_view)
    {
        return Err(Error::ProgramLink(format!(
            "uniform `{}` has no buffer bound by the render loop",
            extra.name
        )));
    }

    Ok(Slots {
        position_location,
        color_location,
        projection,
        model_view,
    })
}

fn uniform_layout_entry(slot: UniformSlot) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: slot.binding,
        visibility: slot.visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(MAT4_SIZE),
        },
        count: None,
    }
}

fn matrix_buffer(device: &wgpu::Device, label: &'static str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: MAT4_SIZE,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_pipeline(
    ctx: &RenderCtx<'_>,
    program: &ShaderProgram,
    slots: &Slots,
    bind_group_layout: &wgpu::BindGroupLayout,
    draw_mode: DrawMode,
) -> wgpu::RenderPipeline {
    let (vs_module, fs_module) = program.create_modules(ctx.device);

    let pipeline_layout = ctx
        .device
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glint pipeline layout"),
            bind_group_layouts: &[bind_group_layout],
            immediate_size: 0,
        });

    let position_attrs = [wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: slots.position_location,
    }];
    let color_attrs = slots.color_location.map(|location| {
        [wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x4,
            offset: 0,
            shader_location: location,
        }]
    });

    let mut buffers = vec![wgpu::VertexBufferLayout {
        array_stride: (POSITION_COMPONENTS * std::mem::size_of::<f32>()) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &position_attrs,
    }];
    if let Some(attrs) = color_attrs.as_ref() {
        buffers.push(wgpu::VertexBufferLayout {
            array_stride: (COLOR_COMPONENTS * std::mem::size_of::<f32>()) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: attrs,
        });
    }

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("glint pipeline"),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: &vs_module,
            entry_point: Some(program.vertex_entry_point()),
            compilation_options: Default::default(),
            buffers: &buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: &fs_module,
            entry_point: Some(program.fragment_entry_point()),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: draw_mode.topology(),
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),

        multiview_mask: None,
        cache: None,
    })
}
