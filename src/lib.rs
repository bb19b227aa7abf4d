//! ecoviz-rs: environmental data visualization engine.
//!
//! This crate provides a headless, backend-agnostic 3D globe scene with
//! procedural textures and data-layer overlays, plus a tween-driven chart
//! animation engine for narrated data stories.

pub mod animation;
pub mod config;
pub mod core;
pub mod error;
pub mod render;
pub mod scene;
pub mod stories;
pub mod telemetry;
pub mod texture;

pub use config::{SceneConfig, StoriesConfig, VizConfig};
pub use error::{VizError, VizResult};
pub use scene::{GlobeView, SceneManager};
pub use stories::{ChartAnimationEngine, DataStories, StoryNavigator};
