use crate::error::{VizError, VizResult};

/// Cursor over a fixed, non-empty story list.
///
/// Every move wraps modulo the story count, so the index is always in
/// `[0, count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryNavigator {
    index: usize,
    count: usize,
}

impl StoryNavigator {
    pub fn new(count: usize) -> VizResult<Self> {
        if count == 0 {
            return Err(VizError::InvalidData(
                "story navigator needs at least one story".to_owned(),
            ));
        }
        Ok(Self { index: 0, count })
    }

    #[must_use]
    pub fn current(self) -> usize {
        self.index
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.count;
        self.index
    }

    pub fn prev(&mut self) -> usize {
        self.index = (self.index + self.count - 1) % self.count;
        self.index
    }

    /// Jumps to `index`, wrapping out-of-range requests.
    pub fn select(&mut self, index: usize) -> usize {
        self.index = index % self.count;
        self.index
    }

    /// Position indicator `(index + 1) / count` as a percentage.
    #[must_use]
    pub fn progress_percent(self) -> f64 {
        (self.index + 1) as f64 / self.count as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::StoryNavigator;

    #[test]
    fn prev_from_first_wraps_to_last() {
        let mut navigator = StoryNavigator::new(4).expect("navigator");
        assert_eq!(navigator.prev(), 3);
        assert_eq!(navigator.next(), 0);
    }

    #[test]
    fn empty_navigator_is_rejected() {
        assert!(StoryNavigator::new(0).is_err());
    }
}
