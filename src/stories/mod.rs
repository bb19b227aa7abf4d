//! Animated data-story charts and the story viewer state machine.

mod elements;
mod engine;
mod navigator;
mod viewer;

pub use elements::{
    AreaFillElement, BarElement, ChartElements, CounterElement, LinePathElement, PointElement,
    format_counter,
};
pub use engine::ChartAnimationEngine;
pub use navigator::StoryNavigator;
pub use viewer::{DataStories, TimelineEntry};
