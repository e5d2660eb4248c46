//! Wall-clock port definition.

use std::time::Duration;

use chrono::NaiveTime;

/// Port for reading local wall-clock time-of-day and pacing with blocking
/// sleeps. Injected so window gating and pacing are testable without
/// waiting on real time.
pub trait Clock {
    /// Current local time-of-day.
    fn time_of_day(&self) -> NaiveTime;

    /// Block for `duration`. Intentional pacing, not an I/O wait.
    fn sleep(&self, duration: Duration);
}
