use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::animation::AdvanceSummary;
use crate::config::StoriesConfig;
use crate::core::{Story, StoryCatalog};
use crate::error::VizResult;
use crate::render::{ChartFrame, Color};
use crate::stories::{ChartAnimationEngine, StoryNavigator};

/// One entry of the story timeline strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// 1-based position.
    pub number: usize,
    pub title: String,
    pub color: Color,
    pub active: bool,
}

/// Data-story viewer state: catalog, cursor, chart animation and the play
/// window.
///
/// `play()` locks navigation for a fixed window of scheduler time. The lock
/// is released when the window elapses, whether or not every tween has
/// completed by then.
#[derive(Debug)]
pub struct DataStories {
    catalog: StoryCatalog,
    navigator: StoryNavigator,
    engine: ChartAnimationEngine,
    config: StoriesConfig,
    play_remaining: Option<Duration>,
}

impl DataStories {
    pub fn new(catalog: StoryCatalog, config: StoriesConfig) -> VizResult<Self> {
        config.validate()?;
        let navigator = StoryNavigator::new(catalog.len())?;
        let mut engine = ChartAnimationEngine::new();
        if let Some(first) = catalog.get(0) {
            engine.load(first);
        }
        Ok(Self {
            catalog,
            navigator,
            engine,
            config,
            play_remaining: None,
        })
    }

    /// Viewer over the built-in environmental stories.
    pub fn with_builtin_stories(config: StoriesConfig) -> VizResult<Self> {
        Self::new(StoryCatalog::builtin()?, config)
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.play_remaining.is_some()
    }

    /// Time left before navigation unlocks.
    #[must_use]
    pub fn play_remaining(&self) -> Option<Duration> {
        self.play_remaining
    }

    /// Animates the current story and locks navigation for the play window.
    ///
    /// Returns `false` without doing anything while already playing.
    pub fn play(&mut self) -> VizResult<bool> {
        if self.is_playing() {
            trace!("play ignored while playing");
            return Ok(false);
        }
        let index = self.navigator.current();
        let story = &self.catalog.stories()[index];
        self.engine.animate(story)?;
        self.play_remaining = Some(self.config.play_window());
        debug!(
            story_index = index,
            window_ms = self.config.play_window_ms,
            "story playback started"
        );
        Ok(true)
    }

    /// Advances tweens and the play window by `delta`.
    pub fn advance(&mut self, delta: Duration) -> AdvanceSummary {
        let summary = self.engine.advance(delta);
        if let Some(remaining) = self.play_remaining {
            let remaining = remaining.saturating_sub(delta);
            if remaining.is_zero() {
                self.play_remaining = None;
                debug!(
                    story_index = self.navigator.current(),
                    live_tweens = self.engine.live_tweens(),
                    "story playback window elapsed"
                );
            } else {
                self.play_remaining = Some(remaining);
            }
        }
        summary
    }

    /// Moves to the next story. Returns `false` while playing.
    pub fn next(&mut self) -> VizResult<bool> {
        self.navigate(|navigator| navigator.next())
    }

    /// Moves to the previous story. Returns `false` while playing.
    pub fn prev(&mut self) -> VizResult<bool> {
        self.navigate(|navigator| navigator.prev())
    }

    /// Jumps to `index` modulo the story count. Returns `false` while playing.
    pub fn select(&mut self, index: usize) -> VizResult<bool> {
        self.navigate(|navigator| navigator.select(index))
    }

    fn navigate(&mut self, step: impl FnOnce(&mut StoryNavigator) -> usize) -> VizResult<bool> {
        if self.is_playing() {
            trace!("navigation ignored while playing");
            return Ok(false);
        }
        let index = step(&mut self.navigator);
        debug!(story_index = index, "story selected");
        if self.config.autoplay_on_select {
            self.play()?;
        } else {
            self.engine.load(&self.catalog.stories()[index]);
        }
        Ok(true)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.navigator.current()
    }

    #[must_use]
    pub fn story_count(&self) -> usize {
        self.navigator.count()
    }

    #[must_use]
    pub fn current_story(&self) -> &Story {
        &self.catalog.stories()[self.navigator.current()]
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.current_story().title()
    }

    #[must_use]
    pub fn subtitle(&self) -> &str {
        self.current_story().subtitle()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.current_story().description()
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        self.current_story().unit()
    }

    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        self.navigator.progress_percent()
    }

    #[must_use]
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        let current = self.navigator.current();
        self.catalog
            .stories()
            .iter()
            .enumerate()
            .map(|(index, story)| TimelineEntry {
                number: index + 1,
                title: story.title().to_owned(),
                color: story.color(),
                active: index == current,
            })
            .collect()
    }

    #[must_use]
    pub fn catalog(&self) -> &StoryCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> StoriesConfig {
        self.config
    }

    #[must_use]
    pub fn engine(&self) -> &ChartAnimationEngine {
        &self.engine
    }

    /// Drawable frame of the current chart state.
    #[must_use]
    pub fn build_frame(&self) -> ChartFrame {
        self.engine.build_frame()
    }
}
