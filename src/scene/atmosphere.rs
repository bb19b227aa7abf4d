use glam::Vec3;

use crate::render::Color;
use crate::scene::{Blending, Material, Shading, Side};

pub const ATMOSPHERE_RADIUS: f32 = 1.05;
pub const ATMOSPHERE_SEGMENTS: u32 = 64;
/// Rim intensity bias; fragments facing the viewer fade, limb fragments glow.
pub const GLOW_BIAS: f32 = 0.7;

#[must_use]
pub fn glow_color() -> Color {
    Color::rgb(0.3, 0.6, 1.0)
}

/// Glow intensity `(0.7 - n·v)²` for a unit normal and unit view direction.
#[must_use]
pub fn glow_intensity(normal: Vec3, view_direction: Vec3) -> f32 {
    (GLOW_BIAS - normal.dot(view_direction)).powi(2)
}

/// Back-face, additive glow shell material.
#[must_use]
pub fn atmosphere_material() -> Material {
    Material::new(Shading::AtmosphereGlow {
        color: glow_color(),
    })
    .with_opacity(1.0)
    .with_blending(Blending::Additive)
    .with_side(Side::Back)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::glow_intensity;

    #[test]
    fn limb_glows_brighter_than_centre() {
        let view = Vec3::Z;
        let centre = glow_intensity(Vec3::Z, view);
        let limb = glow_intensity(Vec3::X, view);
        assert!(limb > centre);
        assert!((limb - 0.49).abs() <= 1e-6);
    }
}
