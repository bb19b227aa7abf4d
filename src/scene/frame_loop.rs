/// Cancellable frame counter driven by host ticks.
///
/// Replaces a self-rescheduling animation callback: the host calls
/// `next_frame` once per display refresh and stops getting frames after
/// `cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameLoop {
    next_index: u64,
    cancelled: bool,
}

impl FrameLoop {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the frame to render, or `None` once cancelled.
    pub fn next_frame(&mut self) -> Option<u64> {
        if self.cancelled {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;
        Some(index)
    }

    /// Stops the loop. Returns `false` if it was already cancelled.
    pub fn cancel(&mut self) -> bool {
        !std::mem::replace(&mut self.cancelled, true)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.cancelled
    }

    #[must_use]
    pub fn frames_issued(&self) -> u64 {
        self.next_index
    }
}

#[cfg(test)]
mod tests {
    use super::FrameLoop;

    #[test]
    fn cancelled_loop_issues_no_frames() {
        let mut frame_loop = FrameLoop::new();
        assert_eq!(frame_loop.next_frame(), Some(0));
        assert_eq!(frame_loop.next_frame(), Some(1));
        assert!(frame_loop.cancel());
        assert!(!frame_loop.cancel());
        assert_eq!(frame_loop.next_frame(), None);
        assert_eq!(frame_loop.frames_issued(), 2);
    }
}
