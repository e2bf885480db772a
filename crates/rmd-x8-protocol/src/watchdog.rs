//! Feedback staleness tracking.
//!
//! Timestamps are supplied by the caller as a [`Duration`] since an epoch of
//! its choosing (typically a monotonic clock). Nothing here reads the clock
//! or schedules callbacks.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackWatchdog {
    timeout: Duration,
    last_feedback: Duration,
}

impl FeedbackWatchdog {
    /// New watchdog whose last feedback time is the zero timestamp.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            last_feedback: Duration::ZERO,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Time of the last accepted feedback frame.
    pub fn last_feedback(&self) -> Duration {
        self.last_feedback
    }

    pub fn record(&mut self, received_at: Duration) {
        self.last_feedback = received_at;
    }

    /// Elapsed time since the last feedback, or `None` if `now` is earlier.
    pub fn time_since_feedback(&self, now: Duration) -> Option<Duration> {
        now.checked_sub(self.last_feedback)
    }

    /// Returns `true` if more than `timeout` has elapsed at `now`.
    ///
    /// A `now` earlier than the last feedback is never stale.
    pub fn is_stale(&self, now: Duration) -> bool {
        self.time_since_feedback(now)
            .is_some_and(|elapsed| elapsed > self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_before_first_feedback() {
        let watchdog = FeedbackWatchdog::new(Duration::from_millis(500));
        assert!(!watchdog.is_stale(Duration::from_millis(500)));
        assert!(watchdog.is_stale(Duration::from_millis(501)));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let mut watchdog = FeedbackWatchdog::new(Duration::from_millis(100));
        watchdog.record(Duration::from_secs(10));

        let deadline = Duration::from_secs(10) + Duration::from_millis(100);
        assert!(!watchdog.is_stale(deadline));
        assert!(watchdog.is_stale(deadline + Duration::from_nanos(1)));
    }

    #[test]
    fn test_time_before_last_feedback_is_not_stale() {
        let mut watchdog = FeedbackWatchdog::new(Duration::from_millis(1));
        watchdog.record(Duration::from_secs(5));
        assert!(!watchdog.is_stale(Duration::from_secs(1)));
        assert_eq!(watchdog.time_since_feedback(Duration::from_secs(1)), None);
    }

    #[test]
    fn test_time_since_feedback() {
        let mut watchdog = FeedbackWatchdog::new(Duration::from_millis(500));
        watchdog.record(Duration::from_millis(250));
        assert_eq!(
            watchdog.time_since_feedback(Duration::from_millis(400)),
            Some(Duration::from_millis(150))
        );
        assert_eq!(watchdog.last_feedback(), Duration::from_millis(250));
    }
}
