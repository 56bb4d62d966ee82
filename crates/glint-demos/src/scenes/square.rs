use glam::Vec3;
use glint_engine::render::{DrawMode, Geometry, SceneDesc, ShaderBindings};
use glint_engine::scene::{AnimationState, CameraConfig, Motion};

use super::{COLORED_FS, COLORED_VS, SOLID_FS, SOLID_VS};

/// Still white square, one unit wide, seen from 3.333 units away.
pub fn square() -> SceneDesc {
    let positions = [
        0.5, 0.5, 0.0, //
        -0.5, 0.5, 0.0, //
        0.5, -0.5, 0.0, //
        -0.5, -0.5, 0.0,
    ];

    SceneDesc {
        label: "square".into(),
        vertex_source: SOLID_VS.into(),
        fragment_source: SOLID_FS.into(),
        geometry: Geometry::new(positions),
        draw_mode: DrawMode::TriangleStrip,
        camera: CameraConfig {
            fov_y_degrees: 45.0,
            near: 1.0,
            far: 10_000.0,
            distance: 3.333,
        },
        motion: Motion::Still,
        initial_rate: Vec3::ZERO,
        clear_color: wgpu::Color::BLACK,
        bindings: ShaderBindings::default(),
    }
}

/// Two-unit square with white/red/green/blue corners that spins and bounces.
pub fn colored_square() -> SceneDesc {
    let positions = [
        1.0, 1.0, 0.0, //
        -1.0, 1.0, 0.0, //
        1.0, -1.0, 0.0, //
        -1.0, -1.0, 0.0,
    ];
    let colors = [
        1.0, 1.0, 1.0, 1.0, //
        1.0, 0.0, 0.0, 1.0, //
        0.0, 1.0, 0.0, 1.0, //
        0.0, 0.0, 1.0, 1.0,
    ];

    SceneDesc {
        label: "colored-square".into(),
        vertex_source: COLORED_VS.into(),
        fragment_source: COLORED_FS.into(),
        geometry: Geometry::new(positions).with_colors(colors),
        draw_mode: DrawMode::TriangleStrip,
        camera: CameraConfig::default(),
        motion: Motion::SpinAndBounce {
            axis: Vec3::new(1.0, 0.0, 1.0),
        },
        initial_rate: AnimationState::default().rate,
        clear_color: wgpu::Color::BLACK,
        bindings: ShaderBindings::default(),
    }
}
