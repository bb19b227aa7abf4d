use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds an opaque color from a packed `0xRRGGBB` value.
    #[must_use]
    pub fn from_hex(packed: u32) -> Self {
        let channel = |shift: u32| f64::from((packed >> shift) & 0xff) / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Parses a `#rrggbb` color string.
    pub fn parse_hex(text: &str) -> VizResult<Self> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 {
            return Err(VizError::InvalidData(format!(
                "color `{text}` must have the form #rrggbb"
            )));
        }
        let packed = u32::from_str_radix(digits, 16)
            .map_err(|_| VizError::InvalidData(format!("color `{text}` is not hexadecimal")))?;
        Ok(Self::from_hex(packed))
    }

    /// Builds a color from 0..=255 channels and a 0..=1 alpha.
    #[must_use]
    pub fn from_rgb8(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self::rgba(red / 255.0, green / 255.0, blue / 255.0, alpha)
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self::rgba(self.red, self.green, self.blue, alpha)
    }

    /// Packs the color channels back into `0xRRGGBB`, ignoring alpha.
    #[must_use]
    pub fn to_hex(self) -> u32 {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.red) << 16) | (channel(self.green) << 8) | channel(self.blue)
    }

    pub fn validate(self) -> VizResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(VizError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn validate_points(points: &[(f64, f64)], what: &str) -> VizResult<()> {
    if points
        .iter()
        .any(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        return Err(VizError::InvalidData(format!(
            "{what} coordinates must be finite"
        )));
    }
    Ok(())
}

fn validate_stroke_width(stroke_width: f64) -> VizResult<()> {
    if !stroke_width.is_finite() || stroke_width <= 0.0 {
        return Err(VizError::InvalidData(
            "stroke width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

/// Draw command for one line segment in chart space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> VizResult<()> {
        validate_points(&[(self.x1, self.y1), (self.x2, self.y2)], "line")?;
        validate_stroke_width(self.stroke_width)?;
        self.color.validate()
    }
}

/// Filled rectangle, optionally bordered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: Color,
    pub border_width: f64,
    pub border_color: Color,
    pub corner_radius: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill_color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill_color,
            border_width: 0.0,
            border_color: fill_color,
            corner_radius: 0.0,
        }
    }

    #[must_use]
    pub const fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn validate(self) -> VizResult<()> {
        validate_points(&[(self.x, self.y)], "rect")?;
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(VizError::InvalidData(
                "rect size must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(VizError::InvalidData(
                "rect size must be >= 0".to_owned(),
            ));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(VizError::InvalidData(
                "rect border width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(VizError::InvalidData(
                "rect corner radius must be finite and >= 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.border_color.validate()
    }
}

/// Filled and stroked circle, used for chart data points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

impl CirclePrimitive {
    pub fn validate(self) -> VizResult<()> {
        validate_points(&[(self.cx, self.cy)], "circle")?;
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(VizError::InvalidData(
                "circle radius must be finite and >= 0".to_owned(),
            ));
        }
        validate_stroke_width(self.stroke_width)?;
        self.fill_color.validate()?;
        self.stroke_color.validate()
    }
}

/// Open polyline with a single-dash pattern.
///
/// `dash_length` equal to the path length with `dash_offset` moving from that
/// length to zero reveals the line progressively from its first vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylinePrimitive {
    pub points: Vec<(f64, f64)>,
    pub stroke_width: f64,
    pub color: Color,
    pub dash_length: Option<f64>,
    pub dash_offset: f64,
}

impl PolylinePrimitive {
    pub fn validate(&self) -> VizResult<()> {
        validate_points(&self.points, "polyline")?;
        validate_stroke_width(self.stroke_width)?;
        if let Some(dash) = self.dash_length {
            if !dash.is_finite() || dash < 0.0 {
                return Err(VizError::InvalidData(
                    "dash length must be finite and >= 0".to_owned(),
                ));
            }
        }
        if !self.dash_offset.is_finite() {
            return Err(VizError::InvalidData(
                "dash offset must be finite".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Closed filled polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonPrimitive {
    pub points: Vec<(f64, f64)>,
    pub fill_color: Color,
}

impl PolygonPrimitive {
    pub fn validate(&self) -> VizResult<()> {
        if self.points.len() < 3 {
            return Err(VizError::InvalidData(
                "polygon needs at least 3 vertices".to_owned(),
            ));
        }
        validate_points(&self.points, "polygon")?;
        self.fill_color.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in chart space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.text.is_empty() {
            return Err(VizError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        validate_points(&[(self.x, self.y)], "text")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(VizError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn hex_colors_round_trip_through_packed_form() {
        let color = Color::parse_hex("#ff6b6b").expect("parse");
        assert_eq!(color.to_hex(), 0xff6b6b);
        assert_eq!(Color::from_hex(0x4ecdc4).to_hex(), 0x4ecdc4);
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(Color::parse_hex("#ff6b").is_err());
        assert!(Color::parse_hex("#gg0000").is_err());
    }
}
