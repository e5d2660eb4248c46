//! Daily commit-window gate.

use std::time::Duration;

use crate::domain::CommitWindow;
use crate::ports::Clock;

/// Re-evaluation interval while waiting for the window to open.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Terminal outcome of waiting on a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowOutcome {
    /// Now is inside the window.
    Entered,
    /// The window has already closed for today; no next-day rollover.
    MissedClosed,
}

/// Block until the window opens, or report that it already closed.
///
/// Returns immediately when now is inside the window or past its end;
/// otherwise polls the clock every [`POLL_INTERVAL`]. A plain polling loop
/// is enough here: exactly one task is in flight and the gate works at
/// wall-clock granularity.
pub fn await_window(window: &CommitWindow, clock: &impl Clock) -> WindowOutcome {
    loop {
        let now = clock.time_of_day();
        if window.contains(now) {
            println!("Inside the commit window ({}).", window.display());
            return WindowOutcome::Entered;
        }
        if window.closed_for(now) {
            println!("Past the window end ({}). Nothing to do today.", window.display());
            return WindowOutcome::MissedClosed;
        }
        println!("Not yet in the commit window. Sleeping 60s...");
        clock.sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeClock;
    use chrono::NaiveTime;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn window(start: NaiveTime, end: NaiveTime) -> CommitWindow {
        CommitWindow { start, end }
    }

    #[test]
    fn enters_immediately_when_inside_window() {
        let clock = FakeClock::at(time(12, 0));
        let outcome = await_window(&window(time(9, 0), time(17, 0)), &clock);
        assert_eq!(outcome, WindowOutcome::Entered);
        assert!(clock.sleeps().is_empty(), "no polling delay when already inside");
    }

    #[test]
    fn misses_immediately_when_past_end() {
        let clock = FakeClock::at(time(18, 0));
        let outcome = await_window(&window(time(9, 0), time(17, 0)), &clock);
        assert_eq!(outcome, WindowOutcome::MissedClosed);
        assert!(clock.sleeps().is_empty(), "no polling delay when already closed");
    }

    #[test]
    fn single_instant_window_admits_its_exact_instant() {
        let clock = FakeClock::at(time(17, 0));
        let outcome = await_window(&window(time(17, 0), time(17, 0)), &clock);
        assert_eq!(outcome, WindowOutcome::Entered);
    }

    #[test]
    fn polls_until_window_opens() {
        let clock = FakeClock::at(time(8, 58));
        clock.advance_per_sleep(chrono::Duration::minutes(1));

        let outcome = await_window(&window(time(9, 0), time(17, 0)), &clock);
        assert_eq!(outcome, WindowOutcome::Entered);
        assert_eq!(clock.sleeps().len(), 2);
        assert!(clock.sleeps().iter().all(|d| *d == POLL_INTERVAL));
    }
}
