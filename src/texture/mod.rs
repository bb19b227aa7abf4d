//! Procedural texture synthesis on a CPU raster.

pub mod gradient;
pub mod overlay;
pub mod planet;
pub mod raster;

pub use gradient::{ColorRamp, ColorStop, LinearGradient, RadialGradient};
pub use overlay::{HOTSPOT_RADIUS, HeatmapOverlay, HotspotStamp, synthesize_overlay};
pub use planet::{planet_ramp, synthesize_planet_texture};
pub use raster::{Paint, Premultiplied, Raster};
