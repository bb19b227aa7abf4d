use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{VizError, VizResult};
use crate::render::{
    CirclePrimitive, LinePrimitive, PolygonPrimitive, PolylinePrimitive, RectPrimitive,
    TextPrimitive,
};

/// Backend-agnostic scene for one chart draw pass.
///
/// Primitives are drawn in field order: polygons, lines, polylines, rects,
/// circles, texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub viewport: Viewport,
    pub polygons: Vec<PolygonPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl ChartFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            polygons: Vec::new(),
            lines: Vec::new(),
            polylines: Vec::new(),
            rects: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    pub fn validate(&self) -> VizResult<()> {
        if !self.viewport.is_valid() {
            return Err(VizError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for polygon in &self.polygons {
            polygon.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.polygons.len()
            + self.lines.len()
            + self.polylines.len()
            + self.rects.len()
            + self.circles.len()
            + self.texts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitive_count() == 0
    }
}
