//! Poll timing.
//!
//! The interval is `timeout / 60`, clamped to `[5s, 60s]`: short waits stay responsive and
//! long waits do not hammer the API. The loop is bounded by an absolute deadline computed
//! once per wait.

use std::time::Duration;

use tokio::time::Instant;

/// Longest wait any caller may request.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(86_400);

/// Shortest delay between two refreshes.
pub const MIN_INTERVAL: Duration = Duration::from_secs(5);

/// Longest delay between two refreshes.
pub const MAX_INTERVAL: Duration = Duration::from_secs(60);

/// Timing derived for one wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPlan {
    /// Delay between refreshes.
    pub interval: Duration,
    /// Upper bound on refresh calls (`ceil(timeout / interval)`).
    pub max_attempts: u32,
    /// Instant after which no new refresh is started.
    pub deadline: Instant,
}

impl PollPlan {
    /// Derive a plan starting now.
    ///
    /// Returns `None` if `timeout` exceeds [`MAX_TIMEOUT`].
    #[must_use]
    pub fn new(timeout: Duration) -> Option<Self> {
        if timeout > MAX_TIMEOUT {
            return None;
        }

        let interval = Self::interval_for(timeout);
        let attempts = timeout.as_millis().div_ceil(interval.as_millis());

        Some(Self {
            interval,
            max_attempts: u32::try_from(attempts).unwrap_or(u32::MAX),
            deadline: Instant::now() + timeout,
        })
    }

    /// Poll interval for a given timeout.
    #[must_use]
    pub fn interval_for(timeout: Duration) -> Duration {
        (timeout / 60).clamp(MIN_INTERVAL, MAX_INTERVAL)
    }

    /// Time left before the deadline (zero once passed).
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Delay before the next refresh: one interval, cut short by the deadline.
    #[must_use]
    pub fn next_delay(&self) -> Duration {
        self.interval.min(self.remaining())
    }

    /// Latest instant a refresh started now may finish.
    ///
    /// A refresh gets whatever is left of the wait, but never less than one interval, so
    /// the last budgeted refresh (which starts at the deadline) can still complete.
    #[must_use]
    pub fn refresh_deadline(&self) -> Instant {
        self.deadline.max(Instant::now() + self.interval)
    }
}
