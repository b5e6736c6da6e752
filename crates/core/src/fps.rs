use std::collections::VecDeque;

/// Rolling one-second frame counter.
///
/// Each frame pushes its timestamp and drops stamps older than a second;
/// the remaining count is the frame rate.
#[derive(Debug, Default)]
pub struct FpsCounter {
    stamps: VecDeque<u64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now_ms` and return the number of frames seen in
    /// the last second.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        self.stamps.push_back(now_ms);
        while self
            .stamps
            .front()
            .is_some_and(|&front| now_ms - front >= 1000)
        {
            self.stamps.pop_front();
        }
        self.stamps.len()
    }
}
