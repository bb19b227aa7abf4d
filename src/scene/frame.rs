use glam::{Mat4, Vec3};

use crate::error::{VizError, VizResult};
use crate::render::Color;
use crate::scene::{Material, PointsMaterial, ResourceHandle, SurfaceSize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f32,
    },
    Directional {
        color: Color,
        intensity: f32,
        position: Vec3,
        /// Square shadow map edge in texels; `None` disables shadows.
        shadow_map_size: Option<u32>,
    },
}

impl Light {
    fn validate(&self) -> VizResult<()> {
        let (color, intensity) = match *self {
            Self::Ambient { color, intensity } => (color, intensity),
            Self::Directional {
                color,
                intensity,
                position,
                shadow_map_size,
            } => {
                if !position.is_finite() {
                    return Err(VizError::InvalidData(
                        "light position must be finite".to_owned(),
                    ));
                }
                if shadow_map_size == Some(0) {
                    return Err(VizError::InvalidData(
                        "shadow map size must be > 0".to_owned(),
                    ));
                }
                (color, intensity)
            }
        };
        if !intensity.is_finite() || intensity < 0.0 {
            return Err(VizError::InvalidData(
                "light intensity must be finite and >= 0".to_owned(),
            ));
        }
        color.validate()
    }
}

/// The fixed scene lighting: dim ambient fill plus a shadow-casting key.
#[must_use]
pub fn scene_lights() -> [Light; 2] {
    [
        Light::Ambient {
            color: Color::from_hex(0x404040),
            intensity: 0.4,
        },
        Light::Directional {
            color: Color::WHITE,
            intensity: 1.0,
            position: Vec3::new(5.0, 3.0, 5.0),
            shadow_map_size: Some(2048),
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshDraw {
    pub geometry: ResourceHandle,
    pub material: Material,
    pub model: Mat4,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsDraw {
    pub buffer: ResourceHandle,
    pub material: PointsMaterial,
    pub model: Mat4,
}

/// Everything a backend needs to draw one scene frame.
///
/// Meshes are listed in draw order: opaque-ish globe first, then the
/// transparent shells.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub index: u64,
    pub surface: SurfaceSize,
    pub background: Color,
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub lights: Vec<Light>,
    pub meshes: Vec<MeshDraw>,
    pub points: Vec<PointsDraw>,
}

impl SceneFrame {
    pub fn validate(&self) -> VizResult<()> {
        self.surface.validate()?;
        self.background.validate()?;
        if !self.view.is_finite() || !self.projection.is_finite() || !self.camera_position.is_finite()
        {
            return Err(VizError::InvalidData(
                "camera matrices must be finite".to_owned(),
            ));
        }
        for light in &self.lights {
            light.validate()?;
        }
        for mesh in &self.meshes {
            if !mesh.model.is_finite() {
                return Err(VizError::InvalidData(
                    "mesh transform must be finite".to_owned(),
                ));
            }
            mesh.material.validate()?;
        }
        for points in &self.points {
            if !points.model.is_finite() {
                return Err(VizError::InvalidData(
                    "points transform must be finite".to_owned(),
                ));
            }
            points.material.validate()?;
        }
        Ok(())
    }

    /// Resource handles referenced by this frame.
    pub fn resources(&self) -> impl Iterator<Item = ResourceHandle> + '_ {
        self.meshes
            .iter()
            .flat_map(|mesh| std::iter::once(mesh.geometry).chain(mesh.material.texture))
            .chain(self.points.iter().map(|points| points.buffer))
    }
}
