use crate::error::{VizError, VizResult};
use crate::render::Color;

/// Premultiplied RGBA sample.
pub type Premultiplied = [f32; 4];

/// Anything that can be sampled as a premultiplied color in raster space.
pub trait Paint {
    fn sample(&self, x: f64, y: f64) -> Premultiplied;
}

#[must_use]
pub fn premultiply(color: Color) -> Premultiplied {
    let alpha = color.alpha as f32;
    [
        color.red as f32 * alpha,
        color.green as f32 * alpha,
        color.blue as f32 * alpha,
        alpha,
    ]
}

impl Paint for Color {
    fn sample(&self, _x: f64, _y: f64) -> Premultiplied {
        premultiply(*self)
    }
}

/// CPU raster with 2D-canvas compositing rules.
///
/// Pixels are stored premultiplied; every fill composites source-over and
/// samples its paint at pixel centres.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Premultiplied>,
}

impl Raster {
    /// Creates a fully transparent raster.
    pub fn new(width: u32, height: u32) -> VizResult<Self> {
        if width == 0 || height == 0 {
            return Err(VizError::InvalidViewport { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![[0.0; 4]; width as usize * height as usize],
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[Premultiplied] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Premultiplied value at `(x, y)`.
    #[must_use]
    pub fn premultiplied(&self, x: u32, y: u32) -> Option<Premultiplied> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Straight (non-premultiplied) color at `(x, y)`.
    #[must_use]
    pub fn color(&self, x: u32, y: u32) -> Option<Color> {
        self.premultiplied(x, y).map(|[r, g, b, a]| {
            if a <= 0.0 {
                Color::TRANSPARENT
            } else {
                Color::rgba(
                    f64::from(r / a),
                    f64::from(g / a),
                    f64::from(b / a),
                    f64::from(a),
                )
            }
        })
    }

    #[must_use]
    pub fn alpha(&self, x: u32, y: u32) -> Option<f32> {
        self.premultiplied(x, y).map(|pixel| pixel[3])
    }

    /// Paints `paint` over the whole raster.
    pub fn fill(&mut self, paint: &impl Paint) {
        self.fill_rect(0.0, 0.0, f64::from(self.width), f64::from(self.height), paint);
    }

    /// Paints `paint` over an axis-aligned rectangle.
    ///
    /// Partially covered edge pixels receive the paint scaled by their covered
    /// area, like an anti-aliased canvas `fillRect`.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &impl Paint) {
        if !(width > 0.0 && height > 0.0) || !x.is_finite() || !y.is_finite() {
            return;
        }
        let left = x.max(0.0);
        let top = y.max(0.0);
        let right = (x + width).min(f64::from(self.width));
        let bottom = (y + height).min(f64::from(self.height));
        if right <= left || bottom <= top {
            return;
        }

        let first_col = left.floor() as u32;
        let last_col = (right.ceil() as u32).min(self.width);
        let first_row = top.floor() as u32;
        let last_row = (bottom.ceil() as u32).min(self.height);

        for py in first_row..last_row {
            let cover_y = (bottom.min(f64::from(py + 1)) - top.max(f64::from(py))).max(0.0);
            for px in first_col..last_col {
                let cover_x = (right.min(f64::from(px + 1)) - left.max(f64::from(px))).max(0.0);
                let coverage = (cover_x * cover_y) as f32;
                if coverage <= 0.0 {
                    continue;
                }
                let source = paint.sample(f64::from(px) + 0.5, f64::from(py) + 0.5);
                let i = py as usize * self.width as usize + px as usize;
                self.pixels[i] = source_over(scale(source, coverage), self.pixels[i]);
            }
        }
    }

    /// Straight-alpha RGBA8 bytes, row-major, as a canvas would read them back.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for &[r, g, b, a] in &self.pixels {
            let unpremultiply = |channel: f32| {
                if a <= 0.0 {
                    0
                } else {
                    ((channel / a).clamp(0.0, 1.0) * 255.0).round() as u8
                }
            };
            bytes.push(unpremultiply(r));
            bytes.push(unpremultiply(g));
            bytes.push(unpremultiply(b));
            bytes.push((a.clamp(0.0, 1.0) * 255.0).round() as u8);
        }
        bytes
    }
}

fn scale(pixel: Premultiplied, factor: f32) -> Premultiplied {
    [
        pixel[0] * factor,
        pixel[1] * factor,
        pixel[2] * factor,
        pixel[3] * factor,
    ]
}

/// Porter-Duff source-over on premultiplied values.
#[must_use]
pub fn source_over(source: Premultiplied, destination: Premultiplied) -> Premultiplied {
    let keep = 1.0 - source[3];
    [
        source[0] + destination[0] * keep,
        source[1] + destination[1] * keep,
        source[2] + destination[2] * keep,
        source[3] + destination[3] * keep,
    ]
}

#[cfg(test)]
mod tests {
    use super::Raster;
    use crate::render::Color;

    #[test]
    fn new_raster_is_transparent() {
        let raster = Raster::new(4, 2).expect("raster");
        assert!(raster.pixels().iter().all(|p| p[3] == 0.0));
    }

    #[test]
    fn half_covered_pixel_gets_half_alpha() {
        let mut raster = Raster::new(4, 4).expect("raster");
        raster.fill_rect(1.0, 1.0, 0.5, 1.0, &Color::rgb(1.0, 0.0, 0.0));
        let alpha = raster.alpha(1, 1).expect("in bounds");
        assert!((alpha - 0.5).abs() <= 1e-6);
        assert_eq!(raster.alpha(2, 1), Some(0.0));
    }

    #[test]
    fn zero_sized_raster_is_rejected() {
        assert!(Raster::new(0, 8).is_err());
    }
}
