use std::time::{Duration, Instant};

/// A monotonic wall-clock deadline.
///
/// Checked only between outer solve calls (never from inside one), per the
/// coarse interrupt granularity the MUS engine and its enumeration loop are
/// allowed: an individual solve may overrun the deadline by one call.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    start: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn from_now(limit: Duration) -> Self {
        Deadline {
            start: Instant::now(),
            limit,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.start.elapsed() >= self.limit
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.limit.checked_sub(self.start.elapsed())
    }

    pub fn limit_duration(&self) -> Duration {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_deadline_is_immediately_expired() {
        let deadline = Deadline::from_now(Duration::ZERO);
        assert!(deadline.is_expired());
        assert_eq!(deadline.remaining(), None);
    }

    #[test]
    fn generous_deadline_is_not_expired() {
        let deadline = Deadline::from_now(Duration::from_secs(3600));
        assert!(!deadline.is_expired());
        assert!(deadline.remaining().unwrap() > Duration::from_secs(1));
    }
}
