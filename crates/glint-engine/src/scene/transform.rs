use glam::{Mat4, Vec3};

use super::{AnimationState, Motion};

/// Fixed camera constants a scene is viewed with.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the eye to the scene origin along -Z.
    pub distance: f32,
}

impl CameraConfig {
    /// Right-handed perspective with a 0..1 depth range.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }

    /// Model-view before any animation is applied.
    pub fn base_model_view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            distance: 6.0,
        }
    }
}

/// Matrices pushed to the shader each frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformState {
    pub projection: Mat4,
    pub model_view: Mat4,
}

impl TransformState {
    pub fn new(camera: &CameraConfig, aspect: f32) -> Self {
        Self {
            projection: camera.projection(aspect),
            model_view: camera.base_model_view(),
        }
    }

    /// Rebuilds both matrices for the current frame.
    ///
    /// The base camera matrix is never modified; the animated model-view is
    /// derived from it by value.
    pub fn update(
        &mut self,
        camera: &CameraConfig,
        aspect: f32,
        animation: &AnimationState,
        motion: Motion,
    ) {
        self.projection = camera.projection(aspect);

        let base = camera.base_model_view();
        self.model_view = match motion {
            Motion::Still => base,
            Motion::Spin { axis } => base * rotation(axis, animation.angle),
            Motion::SpinAndBounce { axis } => {
                base * Mat4::from_translation(animation.offset) * rotation(axis, animation.angle)
            }
        };
    }
}

fn rotation(axis: Vec3, degrees: f32) -> Mat4 {
    match axis.try_normalize() {
        Some(axis) => Mat4::from_axis_angle(axis, degrees.to_radians()),
        None => Mat4::IDENTITY,
    }
}
