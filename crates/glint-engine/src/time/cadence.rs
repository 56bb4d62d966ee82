use std::time::{Duration, Instant};

/// Fixed-period redraw schedule.
///
/// A passed deadline fires exactly once. When the loop falls behind by more than a
/// whole period the schedule re-anchors on the poll time instead of bursting
/// catch-up frames. A zero period fires on every poll.
#[derive(Debug, Clone)]
pub struct Cadence {
    period: Duration,
    next: Instant,
}

impl Cadence {
    /// Creates a schedule whose first deadline is `start`.
    pub fn new(period: Duration, start: Instant) -> Self {
        Self { period, next: start }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Next instant at which [`poll`](Self::poll) returns `true`.
    #[inline]
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Returns `true` when a frame is due at `now` and advances the schedule.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }

        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}
