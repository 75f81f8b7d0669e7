use std::time::{Duration, Instant};

/// A single re-armable deadline for the post-scroll re-show.
///
/// Scheduling replaces any pending deadline, so callbacks never stack.
#[derive(Debug, Clone, Default)]
pub struct ReshowTimer {
    deadline: Option<Instant>,
}

impl ReshowTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the deadline if it has passed
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reschedule_replaces_deadline() {
        let start = Instant::now();
        let mut timer = ReshowTimer::new();
        timer.schedule(start, Duration::from_millis(100));
        timer.schedule(start + Duration::from_millis(50), Duration::from_millis(100));

        assert!(!timer.fire(start + Duration::from_millis(120)));
        assert!(timer.fire(start + Duration::from_millis(150)));
        assert!(!timer.fire(start + Duration::from_millis(300)));
    }
}
