use glam::{Mat4, Vec3};

use crate::config::SceneConfig;

/// Right-handed perspective camera looking at `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    /// Camera on `+Z` at the configured distance, looking at the origin.
    #[must_use]
    pub fn from_config(config: &SceneConfig, aspect: f32) -> Self {
        Self {
            fov_y_degrees: config.fov_degrees,
            aspect: sanitize_aspect(aspect),
            near: config.near,
            far: config.far,
            position: Vec3::new(0.0, 0.0, config.camera_distance),
            target: Vec3::ZERO,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
    }

    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() {
        aspect.max(1e-3)
    } else {
        1.0
    }
}
