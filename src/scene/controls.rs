use std::f32::consts::PI;

use glam::Vec3;

use crate::config::SceneConfig;
use crate::scene::PerspectiveCamera;

const MIN_POLAR: f32 = 1e-6;
const SETTLE_EPSILON: f32 = 1e-6;

/// Spherical coordinates about the orbit target.
///
/// `theta` is the azimuth about `+Y` measured from `+Z`, `phi` the polar
/// angle from `+Y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    #[must_use]
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius: 0.0,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    #[must_use]
    pub fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Damped orbit controller around the globe.
///
/// Input accumulates rotation, pan and zoom deltas. Each `update` applies
/// the damping factor's share of the pending rotation and pan, then decays
/// what is left by `1 - damping`, so motion eases out over several frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitController {
    damping_factor: f32,
    min_distance: f32,
    max_distance: f32,
    enable_pan: bool,
    enable_zoom: bool,
    pending_theta: f32,
    pending_phi: f32,
    pending_pan: Vec3,
    pending_scale: f32,
}

impl OrbitController {
    #[must_use]
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            damping_factor: config.damping_factor,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            enable_pan: config.enable_pan,
            enable_zoom: config.enable_zoom,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_pan: Vec3::ZERO,
            pending_scale: 1.0,
        }
    }

    #[must_use]
    pub fn damping_factor(&self) -> f32 {
        self.damping_factor
    }

    #[must_use]
    pub fn distance_limits(&self) -> (f32, f32) {
        (self.min_distance, self.max_distance)
    }

    /// Queues an orbit by `azimuth` and `polar` radians.
    pub fn rotate(&mut self, azimuth: f32, polar: f32) {
        self.pending_theta -= azimuth;
        self.pending_phi -= polar;
    }

    /// Queues a target translation in camera-space units.
    pub fn pan(&mut self, camera: &PerspectiveCamera, right: f32, up: f32) {
        if !self.enable_pan {
            return;
        }
        let forward = (camera.target - camera.position).normalize_or_zero();
        let right_axis = forward.cross(Vec3::Y).normalize_or_zero();
        let up_axis = right_axis.cross(forward).normalize_or_zero();
        let distance = camera.distance();
        self.pending_pan += right_axis * (right * distance) + up_axis * (up * distance);
    }

    /// Queues a zoom. Factors above one move the camera closer.
    pub fn zoom(&mut self, factor: f32) {
        if !self.enable_zoom || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.pending_scale /= factor;
    }

    /// Whether queued motion is still large enough to move the camera.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.pending_theta.abs() < SETTLE_EPSILON
            && self.pending_phi.abs() < SETTLE_EPSILON
            && self.pending_pan.length_squared() < SETTLE_EPSILON * SETTLE_EPSILON
            && (self.pending_scale - 1.0).abs() < SETTLE_EPSILON
    }

    /// Integrates one frame of damped motion into `camera`.
    ///
    /// Returns `true` if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;
        let offset = camera.position - camera.target;
        let mut spherical = Spherical::from_offset(offset);

        spherical.theta += self.pending_theta * self.damping_factor;
        spherical.phi = (spherical.phi + self.pending_phi * self.damping_factor)
            .clamp(MIN_POLAR, PI - MIN_POLAR);
        spherical.radius =
            (spherical.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        camera.target += self.pending_pan * self.damping_factor;
        camera.position = camera.target + spherical.to_offset();

        let decay = 1.0 - self.damping_factor;
        self.pending_theta *= decay;
        self.pending_phi *= decay;
        self.pending_pan *= decay;
        self.pending_scale = 1.0;

        camera.position.distance_squared(before) > SETTLE_EPSILON * SETTLE_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::Spherical;

    #[test]
    fn spherical_round_trips_camera_offset() {
        let offset = Vec3::new(0.0, 0.0, 3.0);
        let spherical = Spherical::from_offset(offset);
        assert!((spherical.radius - 3.0).abs() <= 1e-6);
        assert!(spherical.to_offset().distance(offset) <= 1e-5);
    }
}
