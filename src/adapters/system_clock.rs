//! Real wall-clock adapter.

use std::time::Duration;

use chrono::{Local, NaiveTime};

use crate::ports::Clock;

/// Local wall clock with blocking thread sleeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn time_of_day(&self) -> NaiveTime {
        Local::now().time()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
