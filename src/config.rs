use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{DataLayer, RandomSource};
use crate::error::{VizError, VizResult};

/// Globe scene bootstrap configuration.
///
/// Serializable so hosts can keep scene tuning next to their own settings
/// without inventing an ad-hoc format. Missing fields take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_fov_degrees")]
    pub fov_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_camera_distance")]
    pub camera_distance: f32,
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
    #[serde(default = "default_damping_factor")]
    pub damping_factor: f32,
    #[serde(default = "default_true")]
    pub enable_pan: bool,
    #[serde(default = "default_true")]
    pub enable_zoom: bool,
    #[serde(default = "default_max_pixel_ratio")]
    pub max_pixel_ratio: f64,
    #[serde(default = "default_globe_spin")]
    pub globe_spin_per_frame: f32,
    #[serde(default = "default_wind_spin")]
    pub wind_spin_per_frame: f32,
    #[serde(default = "default_star_spin_x")]
    pub star_spin_x_per_frame: f32,
    #[serde(default = "default_star_spin_y")]
    pub star_spin_y_per_frame: f32,
    #[serde(default)]
    pub initial_layer: DataLayer,
    #[serde(default)]
    pub random_source: RandomSource,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fov_degrees: default_fov_degrees(),
            near: default_near(),
            far: default_far(),
            camera_distance: default_camera_distance(),
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
            damping_factor: default_damping_factor(),
            enable_pan: true,
            enable_zoom: true,
            max_pixel_ratio: default_max_pixel_ratio(),
            globe_spin_per_frame: default_globe_spin(),
            wind_spin_per_frame: default_wind_spin(),
            star_spin_x_per_frame: default_star_spin_x(),
            star_spin_y_per_frame: default_star_spin_y(),
            initial_layer: DataLayer::default(),
            random_source: RandomSource::default(),
        }
    }
}

impl SceneConfig {
    /// Pins the random source so texture speckles and particles reproduce.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_source = RandomSource::Seeded(seed);
        self
    }

    #[must_use]
    pub fn with_initial_layer(mut self, layer: DataLayer) -> Self {
        self.initial_layer = layer;
        self
    }

    #[must_use]
    pub fn with_distance_limits(mut self, min_distance: f32, max_distance: f32) -> Self {
        self.min_distance = min_distance;
        self.max_distance = max_distance;
        self
    }

    pub fn validate(&self) -> VizResult<()> {
        if !self.fov_degrees.is_finite() || self.fov_degrees <= 0.0 || self.fov_degrees >= 180.0 {
            return Err(VizError::InvalidData(
                "camera fov must be in (0, 180) degrees".to_owned(),
            ));
        }
        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(VizError::InvalidData(
                "camera clip planes must satisfy 0 < near < far".to_owned(),
            ));
        }
        if !(self.min_distance > 0.0
            && self.min_distance <= self.max_distance
            && self.max_distance.is_finite())
        {
            return Err(VizError::InvalidData(
                "view distance limits must satisfy 0 < min <= max".to_owned(),
            ));
        }
        if !(self.camera_distance >= self.min_distance && self.camera_distance <= self.max_distance)
        {
            return Err(VizError::InvalidData(
                "camera distance must lie within the view distance limits".to_owned(),
            ));
        }
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(VizError::InvalidData(
                "damping factor must be in (0, 1]".to_owned(),
            ));
        }
        if !self.max_pixel_ratio.is_finite() || self.max_pixel_ratio <= 0.0 {
            return Err(VizError::InvalidData(
                "max pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        for (name, spin) in [
            ("globe", self.globe_spin_per_frame),
            ("wind", self.wind_spin_per_frame),
            ("star x", self.star_spin_x_per_frame),
            ("star y", self.star_spin_y_per_frame),
        ] {
            if !spin.is_finite() {
                return Err(VizError::InvalidData(format!(
                    "{name} spin per frame must be finite"
                )));
            }
        }
        Ok(())
    }
}

/// Data-story viewer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoriesConfig {
    /// How long `play()` keeps navigation locked.
    #[serde(default = "default_play_window_ms")]
    pub play_window_ms: u64,
    /// Animate the newly selected story on every navigation.
    #[serde(default)]
    pub autoplay_on_select: bool,
}

impl Default for StoriesConfig {
    fn default() -> Self {
        Self {
            play_window_ms: default_play_window_ms(),
            autoplay_on_select: false,
        }
    }
}

impl StoriesConfig {
    #[must_use]
    pub fn play_window(&self) -> Duration {
        Duration::from_millis(self.play_window_ms)
    }

    #[must_use]
    pub fn with_autoplay_on_select(mut self, enabled: bool) -> Self {
        self.autoplay_on_select = enabled;
        self
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.play_window_ms == 0 {
            return Err(VizError::InvalidData(
                "play window must be > 0 ms".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Combined configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VizConfig {
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub stories: StoriesConfig,
}

impl VizConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> VizResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.scene.validate()?;
        config.stories.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> VizResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn default_fov_degrees() -> f32 {
    75.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    1000.0
}

fn default_camera_distance() -> f32 {
    3.0
}

fn default_min_distance() -> f32 {
    1.5
}

fn default_max_distance() -> f32 {
    10.0
}

fn default_damping_factor() -> f32 {
    0.05
}

fn default_true() -> bool {
    true
}

fn default_max_pixel_ratio() -> f64 {
    2.0
}

fn default_globe_spin() -> f32 {
    0.002
}

fn default_wind_spin() -> f32 {
    0.001
}

fn default_star_spin_x() -> f32 {
    0.0001
}

fn default_star_spin_y() -> f32 {
    0.0002
}

fn default_play_window_ms() -> u64 {
    3000
}
