use glam::Vec3;
use glint_engine::render::{DrawMode, Geometry, SceneDesc, ShaderBindings};
use glint_engine::scene::{AnimationState, CameraConfig, Motion};

use super::{COLORED_FS, COLORED_VS};

#[rustfmt::skip]
const POSITIONS: [f32; 72] = [
    // Front
    -1.0, -1.0,  1.0,   1.0, -1.0,  1.0,   1.0,  1.0,  1.0,  -1.0,  1.0,  1.0,
    // Back
    -1.0, -1.0, -1.0,  -1.0,  1.0, -1.0,   1.0,  1.0, -1.0,   1.0, -1.0, -1.0,
    // Top
    -1.0,  1.0, -1.0,  -1.0,  1.0,  1.0,   1.0,  1.0,  1.0,   1.0,  1.0, -1.0,
    // Bottom
    -1.0, -1.0, -1.0,   1.0, -1.0, -1.0,   1.0, -1.0,  1.0,  -1.0, -1.0,  1.0,
    // Right
     1.0, -1.0, -1.0,   1.0,  1.0, -1.0,   1.0,  1.0,  1.0,   1.0, -1.0,  1.0,
    // Left
    -1.0, -1.0, -1.0,  -1.0, -1.0,  1.0,  -1.0,  1.0,  1.0,  -1.0,  1.0, -1.0,
];

const FACE_COLORS: [[f32; 4]; 6] = [
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
    [0.0, 1.0, 1.0, 1.0],
];

#[rustfmt::skip]
const INDICES: [u16; 36] = [
    0, 1, 2,      0, 2, 3,
    4, 5, 6,      4, 6, 7,
    8, 9, 10,     8, 10, 11,
    12, 13, 14,   12, 14, 15,
    16, 17, 18,   16, 18, 19,
    20, 21, 22,   20, 22, 23,
];

/// Each face color repeated for the face's four vertices.
fn vertex_colors() -> Vec<f32> {
    FACE_COLORS
        .iter()
        .flat_map(|c| std::iter::repeat_n(c, 4))
        .flatten()
        .copied()
        .collect()
}

/// Indexed cube spinning about (1, 0, 1).
pub fn cube() -> SceneDesc {
    SceneDesc {
        label: "cube".into(),
        vertex_source: COLORED_VS.into(),
        fragment_source: COLORED_FS.into(),
        geometry: Geometry::new(POSITIONS)
            .with_colors(vertex_colors())
            .with_indices(INDICES),
        draw_mode: DrawMode::IndexedTriangles,
        camera: CameraConfig::default(),
        motion: Motion::Spin {
            axis: Vec3::new(1.0, 0.0, 1.0),
        },
        initial_rate: AnimationState::default().rate,
        clear_color: wgpu::Color::BLACK,
        bindings: ShaderBindings::default(),
    }
}
