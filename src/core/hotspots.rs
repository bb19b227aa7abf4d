use serde::{Deserialize, Serialize};

/// Synthetic point of elevated intensity used to build heatmap overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Horizontal position in `[0, 1]` across the overlay raster.
    pub normalized_x: f64,
    /// Vertical position in `[0, 1]` down the overlay raster.
    pub normalized_y: f64,
    /// Peak alpha in `(0, 1]`.
    pub intensity: f64,
}

impl Hotspot {
    #[must_use]
    pub const fn new(normalized_x: f64, normalized_y: f64, intensity: f64) -> Self {
        Self {
            normalized_x,
            normalized_y,
            intensity,
        }
    }

    /// Centre in raster pixel coordinates.
    #[must_use]
    pub fn center_px(self, width: u32, height: u32) -> (f64, f64) {
        (
            self.normalized_x * f64::from(width),
            self.normalized_y * f64::from(height),
        )
    }
}

/// Continental pollution centres, in paint order.
pub const HOTSPOTS: [Hotspot; 5] = [
    // Asia
    Hotspot::new(0.2, 0.3, 0.8),
    // Europe
    Hotspot::new(0.1, 0.4, 0.6),
    // North America
    Hotspot::new(0.8, 0.4, 0.7),
    // Africa
    Hotspot::new(0.3, 0.7, 0.5),
    // South America
    Hotspot::new(0.7, 0.8, 0.4),
];
