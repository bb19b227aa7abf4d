use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VizError;
use crate::render::Color;

/// Environmental metric shown as a heatmap overlay on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataLayer {
    #[default]
    Pollution,
    Temperature,
    Co2,
    Deforestation,
}

/// Display attributes of a data layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSpec {
    /// Packed `0xRRGGBB`.
    pub color: u32,
    pub display_name: &'static str,
    pub unit: &'static str,
}

impl DataLayer {
    pub const ALL: [Self; 4] = [
        Self::Pollution,
        Self::Temperature,
        Self::Co2,
        Self::Deforestation,
    ];

    #[must_use]
    pub const fn spec(self) -> LayerSpec {
        match self {
            Self::Pollution => LayerSpec {
                color: 0xff4444,
                display_name: "Air Pollution (AQI)",
                unit: "AQI",
            },
            Self::Temperature => LayerSpec {
                color: 0xff8800,
                display_name: "Temperature Anomaly",
                unit: "°C",
            },
            Self::Co2 => LayerSpec {
                color: 0x8844ff,
                display_name: "CO₂ Levels",
                unit: "ppm",
            },
            Self::Deforestation => LayerSpec {
                color: 0x44ff44,
                display_name: "Forest Coverage",
                unit: "%",
            },
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Pollution => "pollution",
            Self::Temperature => "temperature",
            Self::Co2 => "co2",
            Self::Deforestation => "deforestation",
        }
    }

    #[must_use]
    pub fn color(self) -> Color {
        Color::from_hex(self.spec().color)
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        self.spec().display_name
    }

    #[must_use]
    pub const fn unit(self) -> &'static str {
        self.spec().unit
    }

    /// Low and high ends of the intensity legend for this layer.
    #[must_use]
    pub fn legend_stops(self) -> (Color, Color) {
        let color = self.color();
        (color.with_alpha(0.2), color.with_alpha(1.0))
    }
}

impl fmt::Display for DataLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DataLayer {
    type Err = VizError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|layer| layer.key() == key)
            .ok_or_else(|| VizError::InvalidData(format!("unknown data layer `{key}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::DataLayer;

    #[test]
    fn keys_parse_back_to_their_layer() {
        for layer in DataLayer::ALL {
            assert_eq!(layer.key().parse::<DataLayer>().expect("parse"), layer);
        }
        assert!("ozone".parse::<DataLayer>().is_err());
    }

    #[test]
    fn legend_runs_from_faint_to_opaque_layer_color() {
        let (low, high) = DataLayer::Co2.legend_stops();
        assert_eq!(low.to_hex(), 0x8844ff);
        assert!((low.alpha - 0.2).abs() <= 1e-12);
        assert!((high.alpha - 1.0).abs() <= 1e-12);
    }
}
