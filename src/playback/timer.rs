// Recurring auto-advance deadline

use std::time::{Duration, Instant};

/// An armed auto-advance timer
///
/// Cancelling is dropping: a session holds at most one of these in an
/// `Option`, so there is never a second timer to race with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    period: Duration,
    due: Instant,
}

impl Timer {
    /// Arm a timer whose first tick is one full period after `now`
    pub fn arm(now: Instant, period: Duration) -> Self {
        Timer {
            period,
            due: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn due(&self) -> Instant {
        self.due
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }
}
