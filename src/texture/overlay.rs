use tracing::debug;

use crate::core::{DataLayer, HOTSPOTS, Hotspot};
use crate::error::VizResult;
use crate::render::Color;
use crate::texture::gradient::{ColorRamp, RadialGradient};
use crate::texture::raster::Raster;

pub const OVERLAY_TEXTURE_WIDTH: u32 = 256;
pub const OVERLAY_TEXTURE_HEIGHT: u32 = 128;
/// Radius, in overlay pixels, at which a hotspot fades out completely.
pub const HOTSPOT_RADIUS: f64 = 50.0;

/// One hotspot as painted onto the overlay raster.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotStamp {
    pub hotspot: Hotspot,
    pub gradient: RadialGradient,
}

impl HotspotStamp {
    fn new(hotspot: Hotspot, color: Color) -> VizResult<Self> {
        let center = hotspot.center_px(OVERLAY_TEXTURE_WIDTH, OVERLAY_TEXTURE_HEIGHT);
        let ramp = ColorRamp::new()
            .with_stop(0.0, color.with_alpha(hotspot.intensity))?
            .with_stop(1.0, Color::TRANSPARENT)?;
        Ok(Self {
            hotspot,
            gradient: RadialGradient::new(center, HOTSPOT_RADIUS, ramp)?,
        })
    }

    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        self.gradient.center
    }

    /// Alpha this stamp contributes at `distance` from its centre.
    #[must_use]
    pub fn alpha_at(&self, distance: f64) -> f32 {
        self.gradient.at_distance(distance)[3]
    }
}

/// Heatmap texture for one data layer.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapOverlay {
    layer: DataLayer,
    stamps: Vec<HotspotStamp>,
    raster: Raster,
}

impl HeatmapOverlay {
    #[must_use]
    pub fn layer(&self) -> DataLayer {
        self.layer
    }

    #[must_use]
    pub fn stamps(&self) -> &[HotspotStamp] {
        &self.stamps
    }

    #[must_use]
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    #[must_use]
    pub fn into_raster(self) -> Raster {
        self.raster
    }
}

/// Paints the fixed hotspots in the layer color onto a transparent raster.
pub fn synthesize_overlay(layer: DataLayer) -> VizResult<HeatmapOverlay> {
    let mut raster = Raster::new(OVERLAY_TEXTURE_WIDTH, OVERLAY_TEXTURE_HEIGHT)?;
    let color = layer.color();

    let mut stamps = Vec::with_capacity(HOTSPOTS.len());
    for hotspot in HOTSPOTS {
        let stamp = HotspotStamp::new(hotspot, color)?;
        raster.fill(&stamp.gradient);
        stamps.push(stamp);
    }

    debug!(layer = %layer, hotspots = stamps.len(), "synthesized heatmap overlay");
    Ok(HeatmapOverlay {
        layer,
        stamps,
        raster,
    })
}
