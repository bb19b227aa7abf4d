//! Typed tweens driven by an explicit frame clock.

mod easing;
mod scheduler;
mod tween;

pub use easing::Easing;
pub use scheduler::{AdvanceSummary, TweenScheduler};
pub use tween::{AnimatedProperty, AnimationTargets, ElementId, Stagger, Tween, UpdateCallback};
