use smallvec::SmallVec;

use crate::error::{VizError, VizResult};
use crate::render::Color;
use crate::texture::raster::{Paint, Premultiplied, premultiply};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

/// Ordered color ramp interpolated in premultiplied space.
///
/// Offsets before the first stop take the first color and offsets past the
/// last stop take the last color.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorRamp {
    stops: SmallVec<[ColorStop; 4]>,
}

impl ColorRamp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stop. Offsets must lie in `[0, 1]` and never decrease.
    pub fn add_stop(&mut self, offset: f64, color: Color) -> VizResult<()> {
        if !offset.is_finite() || !(0.0..=1.0).contains(&offset) {
            return Err(VizError::InvalidData(format!(
                "color stop offset {offset} must be in [0, 1]"
            )));
        }
        if self.stops.last().is_some_and(|last| offset < last.offset) {
            return Err(VizError::InvalidData(
                "color stop offsets must be non-decreasing".to_owned(),
            ));
        }
        color.validate()?;
        self.stops.push(ColorStop { offset, color });
        Ok(())
    }

    pub fn with_stop(mut self, offset: f64, color: Color) -> VizResult<Self> {
        self.add_stop(offset, color)?;
        Ok(self)
    }

    #[must_use]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    #[must_use]
    pub fn at(&self, t: f64) -> Premultiplied {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return [0.0; 4];
        };
        if t <= first.offset {
            return premultiply(first.color);
        }
        if t >= last.offset {
            return premultiply(last.color);
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.offset && t <= b.offset {
                let span = b.offset - a.offset;
                let local = (if span <= 0.0 { 1.0 } else { (t - a.offset) / span }) as f32;
                let (pa, pb) = (premultiply(a.color), premultiply(b.color));
                return [
                    pa[0] + (pb[0] - pa[0]) * local,
                    pa[1] + (pb[1] - pa[1]) * local,
                    pa[2] + (pb[2] - pa[2]) * local,
                    pa[3] + (pb[3] - pa[3]) * local,
                ];
            }
        }
        premultiply(last.color)
    }
}

/// Linear gradient between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub ramp: ColorRamp,
}

impl LinearGradient {
    #[must_use]
    pub fn new(start: (f64, f64), end: (f64, f64), ramp: ColorRamp) -> Self {
        Self { start, end, ramp }
    }
}

impl Paint for LinearGradient {
    fn sample(&self, x: f64, y: f64) -> Premultiplied {
        let (dx, dy) = (self.end.0 - self.start.0, self.end.1 - self.start.1);
        let length_sq = dx * dx + dy * dy;
        if length_sq <= 0.0 {
            // Degenerate gradients paint nothing.
            return [0.0; 4];
        }
        let t = ((x - self.start.0) * dx + (y - self.start.1) * dy) / length_sq;
        self.ramp.at(t)
    }
}

/// Radial gradient from a point out to `radius`, sharing one centre.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: (f64, f64),
    pub radius: f64,
    pub ramp: ColorRamp,
}

impl RadialGradient {
    pub fn new(center: (f64, f64), radius: f64, ramp: ColorRamp) -> VizResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(VizError::InvalidData(
                "radial gradient radius must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            center,
            radius,
            ramp,
        })
    }

    /// Ramp sample at distance `distance` from the centre.
    #[must_use]
    pub fn at_distance(&self, distance: f64) -> Premultiplied {
        self.ramp.at(distance / self.radius)
    }
}

impl Paint for RadialGradient {
    fn sample(&self, x: f64, y: f64) -> Premultiplied {
        let distance = (x - self.center.0).hypot(y - self.center.1);
        self.at_distance(distance)
    }
}
