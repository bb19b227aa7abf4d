use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::error::{VizError, VizResult};
use crate::render::{ChartFrame, ChartRenderer, Color, RectPrimitive, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub polygons_drawn: usize,
    pub lines_drawn: usize,
    pub polylines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, frame: &ChartFrame)
    -> VizResult<()>;
}

/// Cairo + Pango + PangoCairo chart renderer.
///
/// Frames are drawn in chart space and scaled to the surface size, so a
/// 400x200 story chart fills whatever surface the host allocates.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> VizResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(VizError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::TRANSPARENT,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> VizResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the current surface content as PNG.
    pub fn write_png(&self, writer: &mut impl std::io::Write) -> VizResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| VizError::Backend(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &ChartFrame) -> VizResult<()> {
        frame.validate()?;

        context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        apply_color(context, self.clear_color);
        context.set_operator(cairo::Operator::Source);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        context.set_operator(cairo::Operator::Over);

        let scale_x = f64::from(self.surface.width()) / f64::from(frame.viewport.width);
        let scale_y = f64::from(self.surface.height()) / f64::from(frame.viewport.height);
        context.scale(scale_x, scale_y);

        let mut stats = CairoRenderStats::default();

        for polygon in &frame.polygons {
            append_points_path(context, &polygon.points);
            context.close_path();
            apply_color(context, polygon.fill_color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill polygon", err))?;
            stats.polygons_drawn += 1;
        }

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for polyline in &frame.polylines {
            append_points_path(context, &polyline.points);
            apply_color(context, polyline.color);
            context.set_line_width(polyline.stroke_width);
            context.set_line_cap(cairo::LineCap::Round);
            match polyline.dash_length {
                Some(dash) if dash > 0.0 => context.set_dash(&[dash, dash], polyline.dash_offset),
                _ => context.set_dash(&[], 0.0),
            }
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
            context.set_dash(&[], 0.0);
            stats.polylines_drawn += 1;
        }

        for rect in &frame.rects {
            append_rect_path(context, *rect);
            apply_color(context, rect.fill_color);
            if rect.border_width > 0.0 {
                context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                apply_color(context, rect.border_color);
                context.set_line_width(rect.border_width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke rectangle border", err))?;
            } else {
                context
                    .fill()
                    .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            }
            stats.rects_drawn += 1;
        }

        for circle in &frame.circles {
            if circle.radius <= 0.0 {
                continue;
            }
            context.new_sub_path();
            context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
            apply_color(context, circle.fill_color);
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill circle", err))?;
            apply_color(context, circle.stroke_color);
            context.set_line_width(circle.stroke_width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke circle", err))?;
            stats.circles_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;
        self.last_stats = stats;
        Ok(())
    }
}

impl ChartRenderer for CairoRenderer {
    fn render(&mut self, frame: &ChartFrame) -> VizResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &ChartFrame,
    ) -> VizResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_points_path(context: &Context, points: &[(f64, f64)]) {
    context.new_path();
    let mut iter = points.iter();
    if let Some((x, y)) = iter.next() {
        context.move_to(*x, *y);
    }
    for (x, y) in iter {
        context.line_to(*x, *y);
    }
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> VizError {
    VizError::Backend(format!("{prefix}: {err}"))
}
