//! Shader program compile + link.
//!
//! Each stage is WGSL source parsed and validated with naga, so failures are
//! reported per stage before any GPU object exists. Linking checks the
//! vertex → fragment interface and the uniform slots shared between stages, and
//! produces a name → location / binding table for attributes and uniforms.

use std::fmt;

use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{AddressSpace, Binding, Handle, Module, Type, TypeInner};

use crate::{Error, Result};

/// Pipeline stage a shader source is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }

    /// Visibility flag for bind group layouts.
    pub fn visibility(self) -> wgpu::ShaderStages {
        match self {
            ShaderStage::Vertex => wgpu::ShaderStages::VERTEX,
            ShaderStage::Fragment => wgpu::ShaderStages::FRAGMENT,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A vertex attribute declared by the vertex entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeInfo {
    pub name: String,
    pub location: u32,
    /// `None` for types that have no `f32` vertex format.
    pub format: Option<wgpu::VertexFormat>,
}

/// A uniform buffer binding declared by either stage.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformInfo {
    pub name: String,
    pub group: u32,
    pub binding: u32,
    /// Size of the bound type in bytes.
    pub size: u64,
    /// Stages that declare the uniform.
    pub visibility: wgpu::ShaderStages,
    ty: TypeInner,
}

impl UniformInfo {
    /// `true` only for `mat4x4<f32>`; other 64-byte types do not qualify.
    pub fn is_mat4x4_f32(&self) -> bool {
        match self.ty {
            TypeInner::Matrix {
                columns: naga::VectorSize::Quad,
                rows: naga::VectorSize::Quad,
                scalar,
            } => scalar == naga::Scalar::F32,
            _ => false,
        }
    }
}

#[derive(Debug)]
struct Stage {
    source: String,
    module: Module,
    entry_point: String,
}

/// A linked vertex + fragment pair.
///
/// Immutable once created. GPU shader modules are created from it by the render
/// loop when it builds its pipeline.
#[derive(Debug)]
pub struct ShaderProgram {
    vertex: Stage,
    fragment: Stage,
    attributes: Vec<AttributeInfo>,
    uniforms: Vec<UniformInfo>,
}

impl ShaderProgram {
    /// Compiles both stages and links them.
    ///
    /// Errors:
    /// - [`Error::ShaderCompile`] when a stage fails to parse or validate
    /// - [`Error::ProgramLink`] when an entry point is missing, a fragment input is
    ///   not produced by the vertex stage, or uniform declarations disagree
    pub fn compile(vertex_source: &str, fragment_source: &str) -> Result<Self> {
        let vertex = compile_stage(ShaderStage::Vertex, vertex_source)?;
        let fragment = compile_stage(ShaderStage::Fragment, fragment_source)?;
        Self::link(vertex, fragment)
    }

    fn link(vertex: Stage, fragment: Stage) -> Result<Self> {
        let vs = find_entry_point(&vertex.module, ShaderStage::Vertex)?;
        let fs = find_entry_point(&fragment.module, ShaderStage::Fragment)?;

        let produced = entry_outputs(&vertex.module, vs);
        for input in entry_inputs(&fragment.module, fs) {
            let label = input.name.as_deref().unwrap_or("<unnamed>");
            match produced.iter().find(|o| o.location == input.location) {
                None => {
                    return Err(Error::ProgramLink(format!(
                        "fragment input `{label}` at @location({}) is not written by the vertex stage",
                        input.location
                    )));
                }
                Some(out) if out.ty != input.ty => {
                    return Err(Error::ProgramLink(format!(
                        "fragment input `{label}` at @location({}) does not match the vertex output type",
                        input.location
                    )));
                }
                Some(_) => {}
            }
        }

        let uniforms = merge_uniforms(
            stage_uniforms(&vertex.module, ShaderStage::Vertex),
            stage_uniforms(&fragment.module, ShaderStage::Fragment),
        )?;

        let attributes: Vec<AttributeInfo> = entry_inputs(&vertex.module, vs)
            .into_iter()
            .map(|v| AttributeInfo {
                format: vertex_format(&v.ty),
                name: v.name.unwrap_or_default(),
                location: v.location,
            })
            .collect();

        let vs_name = vs.name.clone();
        let fs_name = fs.name.clone();

        log::debug!(
            "linked shader program {vs_name}/{fs_name}: {} attributes, {} uniforms",
            attributes.len(),
            uniforms.len()
        );

        Ok(Self {
            vertex: Stage { entry_point: vs_name, ..vertex },
            fragment: Stage { entry_point: fs_name, ..fragment },
            attributes,
            uniforms,
        })
    }

    /// Location of the vertex attribute declared as `name`.
    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.location)
    }

    /// Uniform declared as `name` in either stage.
    pub fn uniform(&self, name: &str) -> Option<&UniformInfo> {
        self.uniforms.iter().find(|u| u.name == name)
    }

    pub fn attributes(&self) -> &[AttributeInfo] {
        &self.attributes
    }

    pub fn uniforms(&self) -> &[UniformInfo] {
        &self.uniforms
    }

    pub fn vertex_entry_point(&self) -> &str {
        &self.vertex.entry_point
    }

    pub fn fragment_entry_point(&self) -> &str {
        &self.fragment.entry_point
    }

    /// Creates the GPU shader modules `(vertex, fragment)`.
    pub(crate) fn create_modules(
        &self,
        device: &wgpu::Device,
    ) -> (wgpu::ShaderModule, wgpu::ShaderModule) {
        let vs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glint vertex shader"),
            source: wgpu::ShaderSource::Wgsl(self.vertex.source.as_str().into()),
        });
        let fs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glint fragment shader"),
            source: wgpu::ShaderSource::Wgsl(self.fragment.source.as_str().into()),
        });
        (vs, fs)
    }
}

fn compile_stage(stage: ShaderStage, source: &str) -> Result<Stage> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| Error::ShaderCompile {
        stage,
        message: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| Error::ShaderCompile {
            stage,
            message: e.emit_to_string(source),
        })?;

    Ok(Stage {
        source: source.to_owned(),
        module,
        entry_point: String::new(),
    })
}

fn find_entry_point(module: &Module, stage: ShaderStage) -> Result<&naga::EntryPoint> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.naga())
        .ok_or_else(|| {
            Error::ProgramLink(format!("{stage} source declares no @{stage} entry point"))
        })
}

/// A user-defined (`@location`) value crossing a stage boundary.
#[derive(Debug)]
struct Varying {
    name: Option<String>,
    location: u32,
    ty: TypeInner,
}

fn entry_inputs(module: &Module, ep: &naga::EntryPoint) -> Vec<Varying> {
    let mut out = Vec::new();
    for arg in &ep.function.arguments {
        collect_varyings(module, arg.name.as_deref(), arg.binding.as_ref(), arg.ty, &mut out);
    }
    out
}

fn entry_outputs(module: &Module, ep: &naga::EntryPoint) -> Vec<Varying> {
    let mut out = Vec::new();
    if let Some(result) = &ep.function.result {
        collect_varyings(module, None, result.binding.as_ref(), result.ty, &mut out);
    }
    out
}

// Unbound values are structs whose members carry the bindings.
fn collect_varyings(
    module: &Module,
    name: Option<&str>,
    binding: Option<&Binding>,
    ty: Handle<Type>,
    out: &mut Vec<Varying>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => out.push(Varying {
            name: name.map(str::to_owned),
            location: *location,
            ty: module.types[ty].inner.clone(),
        }),
        Some(_) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect_varyings(module, m.name.as_deref(), m.binding.as_ref(), m.ty, out);
                }
            }
        }
    }
}

fn stage_uniforms(module: &Module, stage: ShaderStage) -> Vec<UniformInfo> {
    module
        .global_variables
        .iter()
        .filter(|(_, var)| var.space == AddressSpace::Uniform)
        .filter_map(|(_, var)| {
            let slot = var.binding.as_ref()?;
            let ty = module.types[var.ty].inner.clone();
            Some(UniformInfo {
                name: var.name.clone().unwrap_or_default(),
                group: slot.group,
                binding: slot.binding,
                size: u64::from(ty.size(module.to_ctx())),
                visibility: stage.visibility(),
                ty,
            })
        })
        .collect()
}

fn merge_uniforms(vertex: Vec<UniformInfo>, fragment: Vec<UniformInfo>) -> Result<Vec<UniformInfo>> {
    let mut merged = vertex;

    for u in fragment {
        let same_slot = merged
            .iter_mut()
            .find(|e| e.group == u.group && e.binding == u.binding);

        if let Some(existing) = same_slot {
            if existing.name != u.name || existing.ty != u.ty {
                return Err(Error::ProgramLink(format!(
                    "uniform slot @group({}) @binding({}) is `{}` in the vertex stage but `{}` in the fragment stage",
                    u.group, u.binding, existing.name, u.name
                )));
            }
            existing.visibility |= u.visibility;
            continue;
        }

        if merged.iter().any(|e| e.name == u.name) {
            return Err(Error::ProgramLink(format!(
                "uniform `{}` is bound to different slots in the two stages",
                u.name
            )));
        }

        merged.push(u);
    }

    Ok(merged)
}

fn vertex_format(ty: &TypeInner) -> Option<wgpu::VertexFormat> {
    match *ty {
        TypeInner::Scalar(s) if s == naga::Scalar::F32 => Some(wgpu::VertexFormat::Float32),
        TypeInner::Vector { size, scalar } if scalar == naga::Scalar::F32 => Some(match size {
            naga::VectorSize::Bi => wgpu::VertexFormat::Float32x2,
            naga::VectorSize::Tri => wgpu::VertexFormat::Float32x3,
            naga::VectorSize::Quad => wgpu::VertexFormat::Float32x4,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn link_message(err: Error) -> String {
        match err {
            Error::ProgramLink(msg) => msg,
            other => panic!("expected link error, got {other:?}"),
        }
    }

    // ── compile ───────────────────────────────────────────────────────────

    #[test]
    fn valid_pair_resolves_names() {
        let program = ShaderProgram::compile(VS, FS).unwrap();

        assert_eq!(program.attribute_location("vertexPos"), Some(0));
        assert_eq!(program.attribute_location("vertexColor"), Some(1));
        assert_eq!(program.attribute_location("missing"), None);

        let proj = program.uniform("projectionMatrix").unwrap();
        assert_eq!((proj.group, proj.binding, proj.size), (0, 0, 64));
        assert_eq!(proj.visibility, wgpu::ShaderStages::VERTEX);

        let mv = program.uniform("modelViewMatrix").unwrap();
        assert_eq!((mv.group, mv.binding), (0, 1));
        assert!(proj.is_mat4x4_f32() && mv.is_mat4x4_f32());

        assert_eq!(program.vertex_entry_point(), "vs_main");
        assert_eq!(program.fragment_entry_point(), "fs_main");
    }

    #[test]
    fn attribute_formats_follow_declared_types() {
        let program = ShaderProgram::compile(VS, FS).unwrap();
        let formats: Vec<_> = program.attributes().iter().map(|a| a.format).collect();
        assert_eq!(
            formats,
            vec![
                Some(wgpu::VertexFormat::Float32x3),
                Some(wgpu::VertexFormat::Float32x4)
            ]
        );
    }

    #[test]
    fn vertex_syntax_error_names_vertex_stage() {
        let err = ShaderProgram::compile("@vertex fn vs_main( {", FS).unwrap_err();
        assert!(matches!(err, Error::ShaderCompile { stage: ShaderStage::Vertex, .. }));
    }

    #[test]
    fn fragment_type_error_names_fragment_stage() {
        let fs = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec3<f32>(1.0, 1.0, 1.0);
}
"#;
        let err = ShaderProgram::compile(VS, fs).unwrap_err();
        assert!(matches!(err, Error::ShaderCompile { stage: ShaderStage::Fragment, .. }));
    }

    #[test]
    fn compile_error_message_is_displayed() {
        let err = ShaderProgram::compile("not wgsl", FS).unwrap_err();
        assert!(err.to_string().starts_with("vertex shader failed to compile"));
    }

    // ── link ──────────────────────────────────────────────────────────────

    #[test]
    fn missing_vertex_entry_point_fails_link() {
        let err = ShaderProgram::compile(FS, FS).unwrap_err();
        assert!(link_message(err).contains("@vertex"));
    }

    #[test]
    fn unwritten_fragment_input_fails_link() {
        let fs = r#"
@fragment
fn fs_main(@location(3) shade: vec4<f32>) -> @location(0) vec4<f32> {
    return shade;
}
"#;
        let err = ShaderProgram::compile(VS, fs).unwrap_err();
        assert!(link_message(err).contains("shade"));
    }

    #[test]
    fn mismatched_varying_type_fails_link() {
        let fs = r#"
@fragment
fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(color, 1.0);
}
"#;
        let err = ShaderProgram::compile(VS, fs).unwrap_err();
        assert!(link_message(err).contains("type"));
    }

    #[test]
    fn conflicting_uniform_slot_fails_link() {
        let fs = r#"
@group(0) @binding(0) var<uniform> tint: vec4<f32>;

@fragment
fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
    return color * tint;
}
"#;
        let err = ShaderProgram::compile(VS, fs).unwrap_err();
        assert!(link_message(err).contains("tint"));
    }

    #[test]
    fn shared_uniform_is_visible_to_both_stages() {
        let fs = r#"
@group(0) @binding(1) var<uniform> modelViewMatrix: mat4x4<f32>;

@fragment
fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
    return modelViewMatrix * color;
}
"#;
        let program = ShaderProgram::compile(VS, fs).unwrap();
        assert_eq!(program.uniforms().len(), 2);
        assert_eq!(
            program.uniform("modelViewMatrix").unwrap().visibility,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT
        );
    }

    #[test]
    fn fragment_without_inputs_links_against_any_vertex_stage() {
        let fs = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
"#;
        assert!(ShaderProgram::compile(VS, fs).is_ok());
    }
}
