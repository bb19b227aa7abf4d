use std::time::Duration;

use indexmap::IndexMap;
use tracing::trace;

use crate::animation::{AnimatedProperty, AnimationTargets, Tween};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvanceSummary {
    /// Tweens that wrote a value this step.
    pub updated: usize,
    /// Tweens that wrote their final value and retired this step.
    pub completed: usize,
}

/// Frame-driven tween scheduler.
///
/// Live tweens are keyed by the property they drive. Issuing a tween for a
/// property that already has a live tween cancels the older one first, so
/// no two tweens ever write the same property of the same element.
/// Iteration follows issue order, which keeps writes deterministic.
#[derive(Debug, Default)]
pub struct TweenScheduler {
    live: IndexMap<AnimatedProperty, Tween>,
    clock: Duration,
}

impl TweenScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a tween. Returns the tween it displaced, if any.
    pub fn issue(&mut self, tween: Tween) -> Option<Tween> {
        let property = tween.property();
        let displaced = self.live.shift_remove(&property);
        if displaced.is_some() {
            trace!(?property, "replacing live tween");
        }
        self.live.insert(property, tween);
        displaced
    }

    /// Cancels the live tween on `property`.
    pub fn cancel(&mut self, property: AnimatedProperty) -> bool {
        self.live.shift_remove(&property).is_some()
    }

    /// Cancels every live tween. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.live.len();
        self.live.clear();
        if cancelled > 0 {
            trace!(cancelled, "cancelled live tweens");
        }
        cancelled
    }

    #[must_use]
    pub fn is_animating(&self, property: AnimatedProperty) -> bool {
        self.live.contains_key(&property)
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.live.is_empty()
    }

    /// Scheduler time accumulated across all `advance` calls.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Time until every live tween has written its final value.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.live
            .values()
            .map(Tween::remaining)
            .max()
            .unwrap_or(Duration::ZERO)
    }

    /// Steps every live tween by `delta` and retires completed ones.
    pub fn advance(
        &mut self,
        delta: Duration,
        targets: &mut dyn AnimationTargets,
    ) -> AdvanceSummary {
        self.clock = self.clock.saturating_add(delta);
        let mut summary = AdvanceSummary::default();
        self.live.retain(|_, tween| {
            let done = tween.step(delta, targets);
            if tween.is_started() {
                summary.updated += 1;
            }
            if done {
                summary.completed += 1;
            }
            !done
        });
        summary
    }
}
