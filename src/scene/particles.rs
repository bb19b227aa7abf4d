use std::f32::consts::{PI, TAU};

use glam::{EulerRot, Mat4, Vec3};
use rand::Rng;

use crate::error::{VizError, VizResult};
use crate::render::Color;
use crate::scene::Blending;

pub const WIND_PARTICLE_COUNT: usize = 1000;
pub const WIND_SHELL_RADIUS: f32 = 1.1;
/// Velocity components are drawn from `[-WIND_SPEED_SPAN / 2, WIND_SPEED_SPAN / 2)`.
pub const WIND_SPEED_SPAN: f32 = 0.01;

pub const STAR_COUNT: usize = 2000;
pub const STARFIELD_EXTENT: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsMaterial {
    pub color: Color,
    pub size: f32,
    pub opacity: f64,
    pub blending: Blending,
}

impl PointsMaterial {
    pub fn validate(&self) -> VizResult<()> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(VizError::InvalidData(
                "point size must be finite and > 0".to_owned(),
            ));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(VizError::InvalidData(
                "point opacity must be in [0, 1]".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Point sprite cloud rotated as one group.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    material: PointsMaterial,
    /// Euler angles in radians, applied in `XYZ` order.
    pub rotation: Vec3,
}

impl PointCloud {
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-point velocities; empty for static clouds.
    ///
    /// Velocities are carried for renderers that drift particles. The scene
    /// only rotates the group.
    #[must_use]
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    #[must_use]
    pub fn material(&self) -> PointsMaterial {
        self.material
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
    }

    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

/// Wind particles on a shell around the globe.
///
/// Azimuth and polar angle are drawn independently and uniformly, which
/// clusters points towards the poles.
pub fn wind_particles(rng: &mut impl Rng) -> PointCloud {
    let mut positions = Vec::with_capacity(WIND_PARTICLE_COUNT);
    let mut velocities = Vec::with_capacity(WIND_PARTICLE_COUNT);
    let half_span = WIND_SPEED_SPAN * 0.5;
    for _ in 0..WIND_PARTICLE_COUNT {
        let azimuth = rng.gen_range(0.0..TAU);
        let polar = rng.gen_range(0.0..PI);
        positions.push(Vec3::new(
            WIND_SHELL_RADIUS * polar.sin() * azimuth.cos(),
            WIND_SHELL_RADIUS * polar.cos(),
            WIND_SHELL_RADIUS * polar.sin() * azimuth.sin(),
        ));
        velocities.push(Vec3::new(
            rng.gen_range(-half_span..half_span),
            rng.gen_range(-half_span..half_span),
            rng.gen_range(-half_span..half_span),
        ));
    }
    PointCloud {
        positions,
        velocities,
        material: PointsMaterial {
            color: Color::from_hex(0x88ccff),
            size: 0.005,
            opacity: 0.6,
            blending: Blending::Additive,
        },
        rotation: Vec3::ZERO,
    }
}

/// Background stars uniform in a cube centred at the origin.
pub fn starfield(rng: &mut impl Rng) -> PointCloud {
    let half = STARFIELD_EXTENT * 0.5;
    let positions = (0..STAR_COUNT)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            )
        })
        .collect();
    PointCloud {
        positions,
        velocities: Vec::new(),
        material: PointsMaterial {
            color: Color::WHITE,
            size: 0.1,
            opacity: 0.8,
            blending: Blending::Normal,
        },
        rotation: Vec3::ZERO,
    }
}
