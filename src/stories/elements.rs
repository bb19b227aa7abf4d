use serde::{Deserialize, Serialize};

use crate::animation::{AnimatedProperty, AnimationTargets};
use crate::core::chart_space::{BASELINE_Y, ChartPoint};
use crate::core::{
    ChartType, Story, area_outline, bar_height_percent, polyline_length, project_series,
};
use crate::render::Color;

/// One bar of a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarElement {
    pub label: String,
    /// Height the bar settles at, in percent of the largest value.
    pub target_percent: f64,
    /// Current animated height in percent.
    pub height_percent: f64,
}

/// Data point marker of a line or area chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointElement {
    pub center: ChartPoint,
    pub scale: f64,
    pub opacity: f64,
}

/// Stroke of a line chart.
///
/// The path is drawn solid until an animation arms the dash pattern, after
/// which `dash_offset` runs from the path length down to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePathElement {
    pub points: Vec<ChartPoint>,
    pub length: f64,
    pub dash_armed: bool,
    pub dash_offset: f64,
}

/// Fill polygon of an area chart, closed against the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaFillElement {
    pub outline: Vec<ChartPoint>,
    pub opacity: f64,
    pub scale_y: f64,
}

impl AreaFillElement {
    /// Outline with the vertical scale applied about the baseline.
    #[must_use]
    pub fn scaled_outline(&self) -> Vec<ChartPoint> {
        self.outline
            .iter()
            .map(|point| ChartPoint {
                x: point.x,
                y: BASELINE_Y - (BASELINE_Y - point.y) * self.scale_y,
            })
            .collect()
    }
}

/// Animated numeric readout under a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterElement {
    pub label: String,
    pub target: f64,
    pub value: f64,
    pub text: String,
}

impl CounterElement {
    fn set_value(&mut self, value: f64) {
        self.value = value;
        self.text = format_counter(value);
    }
}

/// Formats a counter value rounded to one decimal.
///
/// Halves round towards positive infinity and integral results carry no
/// fraction, so `315.0` reads `315` and `-0.25` reads `-0.2`.
#[must_use]
pub fn format_counter(value: f64) -> String {
    let rounded = (value * 10.0 + 0.5).floor() / 10.0;
    // Normalizes -0.0.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    rounded.to_string()
}

/// Visual state of every element of one story chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartElements {
    chart_type: ChartType,
    color: Color,
    bars: Vec<BarElement>,
    points: Vec<PointElement>,
    line: Option<LinePathElement>,
    area: Option<AreaFillElement>,
    counters: Vec<CounterElement>,
}

impl ChartElements {
    /// Builds the pre-animation element set for `story`.
    ///
    /// Bars start flat, markers start collapsed, the area fill starts
    /// transparent and every counter reads `0`.
    #[must_use]
    pub fn for_story(story: &Story) -> Self {
        let values: Vec<f64> = story.values().collect();
        let chart_type = story.chart_type();

        let counters = story
            .data_points()
            .iter()
            .map(|point| CounterElement {
                label: point.label.clone(),
                target: point.value,
                value: 0.0,
                text: format_counter(0.0),
            })
            .collect();

        let mut elements = Self {
            chart_type,
            color: story.color(),
            bars: Vec::new(),
            points: Vec::new(),
            line: None,
            area: None,
            counters,
        };

        match chart_type {
            ChartType::Bar => {
                let (_, max) = story.value_range();
                elements.bars = story
                    .data_points()
                    .iter()
                    .map(|point| BarElement {
                        label: point.label.clone(),
                        target_percent: bar_height_percent(point.value, max),
                        height_percent: 0.0,
                    })
                    .collect();
            }
            ChartType::Line | ChartType::Area => {
                let projected = project_series(&values);
                let initial_opacity = if chart_type == ChartType::Line { 0.0 } else { 1.0 };
                elements.points = projected
                    .iter()
                    .map(|&center| PointElement {
                        center,
                        scale: 0.0,
                        opacity: initial_opacity,
                    })
                    .collect();
                if chart_type == ChartType::Line {
                    elements.line = Some(LinePathElement {
                        length: polyline_length(&projected),
                        points: projected,
                        dash_armed: false,
                        dash_offset: 0.0,
                    });
                } else {
                    elements.area = Some(AreaFillElement {
                        outline: area_outline(&projected),
                        opacity: 0.0,
                        scale_y: 1.0,
                    });
                }
            }
        }
        elements
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn bars(&self) -> &[BarElement] {
        &self.bars
    }

    #[must_use]
    pub fn points(&self) -> &[PointElement] {
        &self.points
    }

    #[must_use]
    pub fn line(&self) -> Option<&LinePathElement> {
        self.line.as_ref()
    }

    #[must_use]
    pub fn area(&self) -> Option<&AreaFillElement> {
        self.area.as_ref()
    }

    #[must_use]
    pub fn counters(&self) -> &[CounterElement] {
        &self.counters
    }

    /// Arms the dash pattern so the line starts fully hidden.
    pub(crate) fn arm_line_dash(&mut self) -> Option<f64> {
        let line = self.line.as_mut()?;
        line.dash_armed = true;
        line.dash_offset = line.length;
        Some(line.length)
    }
}

impl AnimationTargets for ChartElements {
    fn apply(&mut self, property: AnimatedProperty, value: f64) -> bool {
        match property {
            AnimatedProperty::BarHeight(index) => self
                .bars
                .get_mut(index)
                .map(|bar| bar.height_percent = value)
                .is_some(),
            AnimatedProperty::PointScale(index) => self
                .points
                .get_mut(index)
                .map(|point| point.scale = value)
                .is_some(),
            AnimatedProperty::PointOpacity(index) => self
                .points
                .get_mut(index)
                .map(|point| point.opacity = value)
                .is_some(),
            AnimatedProperty::LineDashOffset => self
                .line
                .as_mut()
                .map(|line| line.dash_offset = value)
                .is_some(),
            AnimatedProperty::AreaOpacity => self
                .area
                .as_mut()
                .map(|area| area.opacity = value)
                .is_some(),
            AnimatedProperty::AreaScaleY => self
                .area
                .as_mut()
                .map(|area| area.scale_y = value)
                .is_some(),
            AnimatedProperty::CounterValue(index) => self
                .counters
                .get_mut(index)
                .map(|counter| counter.set_value(value))
                .is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::format_counter;

    #[test]
    fn counter_text_rounds_to_one_decimal() {
        assert_eq!(format_counter(315.0), "315");
        assert_eq!(format_counter(0.6), "0.6");
        assert_eq!(format_counter(-0.2), "-0.2");
        assert_eq!(format_counter(3869.96), "3870");
        assert_eq!(format_counter(-0.01), "0");
    }
}
