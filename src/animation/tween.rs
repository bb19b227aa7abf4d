use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::animation::Easing;
use crate::error::{VizError, VizResult};

/// Chart element a tween writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementId {
    Bar(usize),
    Point(usize),
    LinePath,
    AreaFill,
    Counter(usize),
}

/// One animatable property of one chart element.
///
/// Each variant names exactly one `(element, property)` pair, so a binding
/// that targets a property an element does not have cannot be written down.
/// The scheduler keys live tweens by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimatedProperty {
    /// Bar height in percent of the largest value.
    BarHeight(usize),
    PointScale(usize),
    PointOpacity(usize),
    /// Stroke dash offset of the line path.
    LineDashOffset,
    AreaOpacity,
    /// Vertical scale of the area fill about the baseline.
    AreaScaleY,
    CounterValue(usize),
}

impl AnimatedProperty {
    #[must_use]
    pub const fn element(self) -> ElementId {
        match self {
            Self::BarHeight(index) => ElementId::Bar(index),
            Self::PointScale(index) | Self::PointOpacity(index) => ElementId::Point(index),
            Self::LineDashOffset => ElementId::LinePath,
            Self::AreaOpacity | Self::AreaScaleY => ElementId::AreaFill,
            Self::CounterValue(index) => ElementId::Counter(index),
        }
    }
}

/// Element store that tweens write into.
pub trait AnimationTargets {
    /// Writes `value` into `property`. Returns `false` if the element is gone.
    fn apply(&mut self, property: AnimatedProperty, value: f64) -> bool;
}

/// Linear per-item delay offset for a batch of tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stagger {
    pub base: Duration,
    pub step: Duration,
}

impl Stagger {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            base: Duration::ZERO,
            step: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn every(step: Duration) -> Self {
        Self {
            base: Duration::ZERO,
            step,
        }
    }

    #[must_use]
    pub const fn after(mut self, base: Duration) -> Self {
        self.base = base;
        self
    }

    /// Start delay of the `index`-th item.
    #[must_use]
    pub fn delay(self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.base + self.step.saturating_mul(index)
    }
}

pub type UpdateCallback = Box<dyn FnMut(AnimatedProperty, f64)>;

/// Timed interpolation of one property.
///
/// A tween fires at most once to completion; dropping it from the scheduler
/// before that cancels it.
pub struct Tween {
    property: AnimatedProperty,
    from: f64,
    to: f64,
    duration: Duration,
    delay: Duration,
    easing: Easing,
    elapsed: Duration,
    on_update: Option<UpdateCallback>,
}

impl Tween {
    pub fn new(
        property: AnimatedProperty,
        from: f64,
        to: f64,
        duration: Duration,
        easing: Easing,
    ) -> VizResult<Self> {
        if duration.is_zero() {
            return Err(VizError::InvalidData(format!(
                "tween for {property:?} must have a positive duration"
            )));
        }
        if !from.is_finite() || !to.is_finite() {
            return Err(VizError::InvalidData(format!(
                "tween endpoints for {property:?} must be finite"
            )));
        }
        Ok(Self {
            property,
            from,
            to,
            duration,
            delay: Duration::ZERO,
            easing,
            elapsed: Duration::ZERO,
            on_update: None,
        })
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Registers a callback invoked with every value the tween writes.
    #[must_use]
    pub fn with_on_update(mut self, on_update: UpdateCallback) -> Self {
        self.on_update = Some(on_update);
        self
    }

    #[must_use]
    pub fn property(&self) -> AnimatedProperty {
        self.property
    }

    #[must_use]
    pub fn endpoints(&self) -> (f64, f64) {
        (self.from, self.to)
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Time from issue until the final value is written.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.delay + self.duration
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.total_duration().saturating_sub(self.elapsed)
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.elapsed >= self.delay
    }

    /// Value at linear progress `t` in `[0, 1]`.
    #[must_use]
    pub fn value_at(&self, t: f64) -> f64 {
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Advances the tween clock and writes the current value.
    ///
    /// Returns `true` once the final value has been written.
    pub(crate) fn step(&mut self, delta: Duration, targets: &mut dyn AnimationTargets) -> bool {
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed < self.delay {
            return false;
        }

        let active = self.elapsed - self.delay;
        let progress = (active.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        let value = if active >= self.duration {
            self.to
        } else {
            self.value_at(progress)
        };

        if !targets.apply(self.property, value) {
            warn!(property = ?self.property, "tween target is gone, value dropped");
        }
        if let Some(on_update) = self.on_update.as_mut() {
            on_update(self.property, value);
        }
        active >= self.duration
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("property", &self.property)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("easing", &self.easing)
            .field("elapsed", &self.elapsed)
            .field("has_on_update", &self.on_update.is_some())
            .finish()
    }
}
