use std::time::Duration;

use tracing::{debug, trace};

use crate::animation::{
    AdvanceSummary, AnimatedProperty, Easing, Stagger, Tween, TweenScheduler,
};
use crate::core::chart_space::{
    BASELINE_Y, CHART_HEIGHT, CHART_MARGIN, CHART_WIDTH, PLOT_HEIGHT, PLOT_WIDTH, chart_viewport,
};
use crate::core::{ChartType, Story};
use crate::error::VizResult;
use crate::render::{
    ChartFrame, CirclePrimitive, Color, LinePrimitive, PolygonPrimitive, PolylinePrimitive,
    RectPrimitive, TextHAlign, TextPrimitive,
};
use crate::stories::ChartElements;

const BAR_DURATION: Duration = Duration::from_millis(1000);
const BAR_STAGGER: Duration = Duration::from_millis(200);

const LINE_POINT_DURATION: Duration = Duration::from_millis(800);
const LINE_POINT_STAGGER: Duration = Duration::from_millis(150);
const LINE_PATH_DURATION: Duration = Duration::from_millis(2000);
const LINE_PATH_DELAY: Duration = Duration::from_millis(300);

const AREA_FILL_DURATION: Duration = Duration::from_millis(1500);
const AREA_FILL_OPACITY: f64 = 0.6;
const AREA_POINT_DURATION: Duration = Duration::from_millis(600);
const AREA_POINT_STAGGER: Duration = Duration::from_millis(100);

const COUNTER_DURATION: Duration = Duration::from_millis(1500);
const COUNTER_STAGGER: Duration = Duration::from_millis(100);

const GRID_ROWS: usize = 5;
const GRID_SPACING: f64 = 40.0;
const BAR_OPACITY: f64 = 0.8;
const BAR_SLOT_FILL: f64 = 0.6;
const LINE_STROKE_WIDTH: f64 = 3.0;
const LINE_POINT_RADIUS: f64 = 6.0;
const AREA_POINT_RADIUS: f64 = 5.0;
const LABEL_FONT_PX: f64 = 10.0;
const COUNTER_FONT_PX: f64 = 11.0;

/// Drives the entry animation of one story chart at a time.
///
/// Starting a new animation cancels every tween of the previous one before
/// the new tweens are issued, so tweens of two stories never interleave.
#[derive(Debug, Default)]
pub struct ChartAnimationEngine {
    scheduler: TweenScheduler,
    elements: Option<ChartElements>,
    story_id: Option<u32>,
}

impl ChartAnimationEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `story` in its pre-animation state without starting tweens.
    pub fn load(&mut self, story: &Story) {
        self.scheduler.cancel_all();
        self.elements = Some(ChartElements::for_story(story));
        self.story_id = Some(story.id());
    }

    /// Resets the chart to `story` and issues its entry tweens.
    ///
    /// Returns the number of tweens issued.
    pub fn animate(&mut self, story: &Story) -> VizResult<usize> {
        self.load(story);
        let Some(elements) = self.elements.as_mut() else {
            return Ok(0);
        };

        let mut plan = Vec::new();
        match story.chart_type() {
            ChartType::Bar => {
                let stagger = Stagger::every(BAR_STAGGER);
                for (index, bar) in elements.bars().iter().enumerate() {
                    plan.push(
                        Tween::new(
                            AnimatedProperty::BarHeight(index),
                            0.0,
                            bar.target_percent,
                            BAR_DURATION,
                            Easing::BAR_ELASTIC,
                        )?
                        .with_delay(stagger.delay(index)),
                    );
                }
            }
            ChartType::Line => {
                let stagger = Stagger::every(LINE_POINT_STAGGER);
                for index in 0..elements.points().len() {
                    let delay = stagger.delay(index);
                    plan.push(
                        Tween::new(
                            AnimatedProperty::PointScale(index),
                            0.0,
                            1.0,
                            LINE_POINT_DURATION,
                            Easing::OutBack,
                        )?
                        .with_delay(delay),
                    );
                    plan.push(
                        Tween::new(
                            AnimatedProperty::PointOpacity(index),
                            0.0,
                            1.0,
                            LINE_POINT_DURATION,
                            Easing::OutBack,
                        )?
                        .with_delay(delay),
                    );
                }
                if let Some(length) = elements.arm_line_dash() {
                    plan.push(
                        Tween::new(
                            AnimatedProperty::LineDashOffset,
                            length,
                            0.0,
                            LINE_PATH_DURATION,
                            Easing::InOutQuart,
                        )?
                        .with_delay(LINE_PATH_DELAY),
                    );
                }
            }
            ChartType::Area => {
                plan.push(Tween::new(
                    AnimatedProperty::AreaOpacity,
                    0.0,
                    AREA_FILL_OPACITY,
                    AREA_FILL_DURATION,
                    Easing::OutQuart,
                )?);
                plan.push(Tween::new(
                    AnimatedProperty::AreaScaleY,
                    0.0,
                    1.0,
                    AREA_FILL_DURATION,
                    Easing::OutQuart,
                )?);
                let stagger = Stagger::every(AREA_POINT_STAGGER);
                for index in 0..elements.points().len() {
                    plan.push(
                        Tween::new(
                            AnimatedProperty::PointScale(index),
                            0.0,
                            1.0,
                            AREA_POINT_DURATION,
                            Easing::OutBack,
                        )?
                        .with_delay(stagger.delay(index)),
                    );
                }
            }
        }

        let stagger = Stagger::every(COUNTER_STAGGER);
        for (index, counter) in elements.counters().iter().enumerate() {
            plan.push(
                Tween::new(
                    AnimatedProperty::CounterValue(index),
                    0.0,
                    counter.target,
                    COUNTER_DURATION,
                    Easing::OutQuad,
                )?
                .with_delay(stagger.delay(index)),
            );
        }

        let issued = plan.len();
        for tween in plan {
            self.scheduler.issue(tween);
        }
        debug!(
            story_id = story.id(),
            chart_type = ?story.chart_type(),
            issued,
            "chart animation started"
        );
        Ok(issued)
    }

    /// Advances all live tweens by `delta`.
    pub fn advance(&mut self, delta: Duration) -> AdvanceSummary {
        let Some(elements) = self.elements.as_mut() else {
            return AdvanceSummary::default();
        };
        let summary = self.scheduler.advance(delta, elements);
        if summary.updated > 0 {
            trace!(
                updated = summary.updated,
                completed = summary.completed,
                live = self.scheduler.live_count(),
                "chart tweens advanced"
            );
        }
        summary
    }

    /// Cancels every live tween, leaving elements where they are.
    pub fn stop(&mut self) -> usize {
        self.scheduler.cancel_all()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.scheduler.is_idle()
    }

    #[must_use]
    pub fn live_tweens(&self) -> usize {
        self.scheduler.live_count()
    }

    /// Time until the current animation writes its last value.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.scheduler.remaining()
    }

    #[must_use]
    pub fn story_id(&self) -> Option<u32> {
        self.story_id
    }

    #[must_use]
    pub fn elements(&self) -> Option<&ChartElements> {
        self.elements.as_ref()
    }

    /// Materializes the current element state as a drawable frame.
    #[must_use]
    pub fn build_frame(&self) -> ChartFrame {
        let mut frame = ChartFrame::new(chart_viewport());
        let Some(elements) = self.elements.as_ref() else {
            return frame;
        };
        let color = elements.color();

        match elements.chart_type() {
            ChartType::Bar => push_bars(&mut frame, elements, color),
            ChartType::Line => {
                push_grid(&mut frame);
                if let Some(line) = elements.line() {
                    frame.polylines.push(PolylinePrimitive {
                        points: line.points.iter().map(|p| (p.x, p.y)).collect(),
                        stroke_width: LINE_STROKE_WIDTH,
                        color,
                        dash_length: line.dash_armed.then_some(line.length),
                        dash_offset: line.dash_offset,
                    });
                }
                push_points(&mut frame, elements, |opacity| {
                    (
                        LINE_POINT_RADIUS,
                        fade(color, opacity),
                        fade(Color::WHITE, opacity),
                        2.0,
                    )
                });
            }
            ChartType::Area => {
                if let Some(area) = elements.area() {
                    if area.opacity > 0.0 {
                        frame.polygons.push(PolygonPrimitive {
                            points: area.scaled_outline().iter().map(|p| (p.x, p.y)).collect(),
                            fill_color: fade(color, area.opacity),
                        });
                    }
                }
                push_points(&mut frame, elements, |opacity| {
                    (
                        AREA_POINT_RADIUS,
                        fade(Color::WHITE, opacity),
                        fade(color, opacity),
                        3.0,
                    )
                });
            }
        }

        push_counters(&mut frame, elements);
        frame
    }
}

fn fade(color: Color, opacity: f64) -> Color {
    color.with_alpha((color.alpha * opacity).clamp(0.0, 1.0))
}

fn push_grid(frame: &mut ChartFrame) {
    let grid = Color::from_hex(0xe0e0e0).with_alpha(0.3);
    for row in 0..GRID_ROWS {
        let y = row as f64 * GRID_SPACING;
        frame
            .lines
            .push(LinePrimitive::new(0.0, y, CHART_WIDTH, y, 1.0, grid));
    }
}

fn bar_slot(index: usize, count: usize) -> (f64, f64) {
    let slot = PLOT_WIDTH / count.max(1) as f64;
    (CHART_MARGIN + slot * index as f64, slot)
}

fn push_bars(frame: &mut ChartFrame, elements: &ChartElements, color: Color) {
    let count = elements.bars().len();
    for (index, bar) in elements.bars().iter().enumerate() {
        let (slot_x, slot) = bar_slot(index, count);
        let width = slot * BAR_SLOT_FILL;
        let height = (bar.height_percent / 100.0 * PLOT_HEIGHT).max(0.0);
        frame.rects.push(
            RectPrimitive::new(
                slot_x + (slot - width) * 0.5,
                BASELINE_Y - height,
                width,
                height,
                fade(color, BAR_OPACITY),
            )
            .with_corner_radius(2.0),
        );
        if bar.label.is_empty() {
            continue;
        }
        frame.texts.push(TextPrimitive::new(
            bar.label.clone(),
            slot_x + slot * 0.5,
            CHART_HEIGHT - 1.0,
            LABEL_FONT_PX,
            Color::from_hex(0x666666),
            TextHAlign::Center,
        ));
    }
}

fn push_points(
    frame: &mut ChartFrame,
    elements: &ChartElements,
    style: impl Fn(f64) -> (f64, Color, Color, f64),
) {
    for point in elements.points() {
        if point.scale <= 0.0 || point.opacity <= 0.0 {
            continue;
        }
        let (radius, fill_color, stroke_color, stroke_width) = style(point.opacity);
        frame.circles.push(CirclePrimitive {
            cx: point.center.x,
            cy: point.center.y,
            radius: radius * point.scale,
            fill_color,
            stroke_color,
            stroke_width,
        });
    }
}

fn push_counters(frame: &mut ChartFrame, elements: &ChartElements) {
    let count = elements.counters().len();
    for (index, counter) in elements.counters().iter().enumerate() {
        let (x, y) = match elements.chart_type() {
            ChartType::Bar => {
                let (slot_x, slot) = bar_slot(index, count);
                let top = elements
                    .bars()
                    .get(index)
                    .map_or(0.0, |bar| (bar.height_percent / 100.0 * PLOT_HEIGHT).max(0.0));
                (slot_x + slot * 0.5, (BASELINE_Y - top - 4.0).max(COUNTER_FONT_PX))
            }
            ChartType::Line | ChartType::Area => elements
                .points()
                .get(index)
                .map_or((CHART_WIDTH * 0.5, CHART_HEIGHT * 0.5), |point| {
                    (point.center.x, (point.center.y - 10.0).max(COUNTER_FONT_PX))
                }),
        };
        frame.texts.push(TextPrimitive::new(
            counter.text.clone(),
            x,
            y,
            COUNTER_FONT_PX,
            Color::from_hex(0x333333),
            TextHAlign::Center,
        ));
    }
}
