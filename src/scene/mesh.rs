use std::f32::consts::{PI, TAU};

use glam::{EulerRot, Mat4, Vec2, Vec3};

use crate::error::{VizError, VizResult};
use crate::render::Color;
use crate::scene::ResourceHandle;

/// UV sphere centred at the origin.
///
/// Vertices run row by row from the north pole (`v = 0`) to the south pole,
/// with a duplicated seam column so texture coordinates wrap cleanly.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereGeometry {
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
}

impl SphereGeometry {
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> VizResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(VizError::InvalidData(
                "sphere radius must be finite and > 0".to_owned(),
            ));
        }
        if width_segments < 3 || height_segments < 2 {
            return Err(VizError::InvalidData(
                "sphere needs at least 3 width and 2 height segments".to_owned(),
            ));
        }

        let columns = width_segments + 1;
        let rows = height_segments + 1;
        let vertex_count = (columns * rows) as usize;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for iy in 0..rows {
            let v = iy as f32 / height_segments as f32;
            for ix in 0..columns {
                let u = ix as f32 / width_segments as f32;
                let normal = Vec3::new(
                    -(u * TAU).cos() * (v * PI).sin(),
                    (v * PI).cos(),
                    (u * TAU).sin() * (v * PI).sin(),
                );
                positions.push(normal * radius);
                normals.push(normal.normalize_or_zero());
                uvs.push(Vec2::new(u, 1.0 - v));
            }
        }

        // Pole rows collapse to a point, so they only get one triangle per quad.
        let mut indices = Vec::with_capacity((width_segments * height_segments * 6) as usize);
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * columns + ix + 1;
                let b = iy * columns + ix;
                let c = (iy + 1) * columns + ix;
                let d = (iy + 1) * columns + ix + 1;
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Ok(Self {
            radius,
            width_segments,
            height_segments,
            positions,
            normals,
            uvs,
            indices,
        })
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[must_use]
    pub fn segments(&self) -> (u32, u32) {
        (self.width_segments, self.height_segments)
    }

    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    #[must_use]
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blending {
    Normal,
    Additive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

/// Surface shading model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Lit by the scene lights.
    Phong,
    /// Texture or color as is.
    Unlit,
    /// Rim glow `color * (0.7 - n·v)²` with `n` the view-space normal.
    AtmosphereGlow { color: Color },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub color: Color,
    pub texture: Option<ResourceHandle>,
    pub opacity: f64,
    pub transparent: bool,
    pub blending: Blending,
    pub side: Side,
}

impl Material {
    #[must_use]
    pub fn new(shading: Shading) -> Self {
        Self {
            shading,
            color: Color::WHITE,
            texture: None,
            opacity: 1.0,
            transparent: false,
            blending: Blending::Normal,
            side: Side::Front,
        }
    }

    #[must_use]
    pub fn with_texture(mut self, texture: ResourceHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Marks the material transparent at `opacity`.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }

    #[must_use]
    pub fn with_blending(mut self, blending: Blending) -> Self {
        self.blending = blending;
        self
    }

    #[must_use]
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn validate(&self) -> VizResult<()> {
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(VizError::InvalidData(
                "material opacity must be in [0, 1]".to_owned(),
            ));
        }
        self.color.validate()?;
        if let Shading::AtmosphereGlow { color } = self.shading {
            color.validate()?;
        }
        Ok(())
    }
}

/// Uploaded geometry drawn with one material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    pub geometry: ResourceHandle,
    pub material: Material,
    /// Euler angles in radians, applied in `XYZ` order.
    pub rotation: Vec3,
}

impl Mesh {
    #[must_use]
    pub fn new(geometry: ResourceHandle, material: Material) -> Self {
        Self {
            geometry,
            material,
            rotation: Vec3::ZERO,
        }
    }

    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

#[cfg(test)]
mod tests {
    use super::SphereGeometry;

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let sphere = SphereGeometry::new(1.05, 16, 8).expect("sphere");
        for position in sphere.positions() {
            assert!((position.length() - 1.05).abs() <= 1e-5);
        }
        assert_eq!(sphere.positions().len(), 17 * 9);
        // Pole rows contribute one triangle per quad, other rows two.
        assert_eq!(sphere.triangle_count(), 16 * 8 * 2 - 2 * 16);
    }
}
