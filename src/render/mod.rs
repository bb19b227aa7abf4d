mod frame;
mod null_renderer;
mod primitives;

pub use frame::ChartFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PolygonPrimitive, PolylinePrimitive, RectPrimitive,
    TextHAlign, TextPrimitive,
};

use crate::error::VizResult;

/// Contract implemented by any chart drawing backend.
///
/// Backends receive a fully materialized, deterministic `ChartFrame` so
/// drawing code stays isolated from story and tween logic.
pub trait ChartRenderer {
    fn render(&mut self, frame: &ChartFrame) -> VizResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
