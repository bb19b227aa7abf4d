use crate::error::VizResult;
use crate::render::{ChartFrame, ChartRenderer};

/// No-op chart renderer used by tests and headless story playback.
///
/// It still validates frame content so tests catch invalid geometry without a
/// drawing backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_primitive_count: usize,
    pub last_text_count: usize,
}

impl ChartRenderer for NullRenderer {
    fn render(&mut self, frame: &ChartFrame) -> VizResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_primitive_count = frame.primitive_count();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
