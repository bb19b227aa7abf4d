pub mod chart_space;
pub mod hotspots;
pub mod layers;
pub mod random;
pub mod story;
pub mod types;

pub use chart_space::{ChartPoint, area_outline, bar_height_percent, polyline_length, project_series};
pub use hotspots::{HOTSPOTS, Hotspot};
pub use layers::{DataLayer, LayerSpec};
pub use random::RandomSource;
pub use story::{ChartType, DataPoint, Story, StoryCatalog, StoryRecord};
pub use types::Viewport;
