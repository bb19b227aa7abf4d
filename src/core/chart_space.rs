//! Fixed chart coordinate space shared by line and area stories.
//!
//! Charts are laid out in a 400x200 box with 10-unit margins. Larger values
//! map to smaller `y`, so they are drawn higher.

use serde::{Deserialize, Serialize};

use crate::core::Viewport;

pub const CHART_WIDTH: f64 = 400.0;
pub const CHART_HEIGHT: f64 = 200.0;
pub const CHART_MARGIN: f64 = 10.0;
pub const PLOT_WIDTH: f64 = CHART_WIDTH - 2.0 * CHART_MARGIN;
pub const PLOT_HEIGHT: f64 = CHART_HEIGHT - 2.0 * CHART_MARGIN;
/// `y` of the plot floor, where the area fill closes.
pub const BASELINE_Y: f64 = CHART_HEIGHT - CHART_MARGIN;

#[must_use]
pub fn chart_viewport() -> Viewport {
    Viewport::new(CHART_WIDTH as u32, CHART_HEIGHT as u32)
}

/// Point in chart space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// Maps the `index`-th of `count` samples to chart `x`.
///
/// A single sample sits on the horizontal centre.
#[must_use]
pub fn index_to_x(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return CHART_WIDTH * 0.5;
    }
    index as f64 / (count - 1) as f64 * PLOT_WIDTH + CHART_MARGIN
}

/// Maps `value` within `[min, max]` to chart `y`.
///
/// A flat series (`max == min`) sits on the vertical centre instead of
/// dividing by zero.
#[must_use]
pub fn value_to_y(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range == 0.0 || !range.is_finite() {
        return CHART_HEIGHT * 0.5;
    }
    BASELINE_Y - (value - min) / range * PLOT_HEIGHT
}

/// Projects a series into chart space.
#[must_use]
pub fn project_series(values: &[f64]) -> Vec<ChartPoint> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| ChartPoint {
            x: index_to_x(index, values.len()),
            y: value_to_y(value, min, max),
        })
        .collect()
}

/// Total length of the open polyline through `points`.
#[must_use]
pub fn polyline_length(points: &[ChartPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| (pair[1].x - pair[0].x).hypot(pair[1].y - pair[0].y))
        .sum()
}

/// Area fill outline closed against the baseline from `x = 10` to `x = 390`.
#[must_use]
pub fn area_outline(points: &[ChartPoint]) -> Vec<ChartPoint> {
    let mut outline = Vec::with_capacity(points.len() + 2);
    outline.push(ChartPoint {
        x: CHART_MARGIN,
        y: BASELINE_Y,
    });
    outline.extend_from_slice(points);
    outline.push(ChartPoint {
        x: CHART_WIDTH - CHART_MARGIN,
        y: BASELINE_Y,
    });
    outline
}

/// Bar height as a percentage of the largest value.
///
/// Non-positive maxima yield `0%` bars.
#[must_use]
pub fn bar_height_percent(value: f64, max: f64) -> f64 {
    if max <= 0.0 || !max.is_finite() {
        return 0.0;
    }
    value / max * 100.0
}
