use std::time::{Duration, Instant};

/// Limits how often progress is rendered
///
/// Progress updates still arrive for every page; this only decides which
/// of them are worth drawing.
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl Default for ProgressThrottle {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl ProgressThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn should_render(&mut self) -> bool {
        self.should_render_at(Instant::now())
    }

    pub fn should_render_at(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Render the next update regardless of timing
    pub fn reset(&mut self) {
        self.last = None;
    }
}
