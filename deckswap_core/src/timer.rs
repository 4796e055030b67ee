// Copyright 2026 the Deckswap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interval deadlines polled from the host's frame loop.

use crate::time::{Duration, HostTime};

/// A repeating deadline with `setInterval`-like behavior.
///
/// The timer never fires on its own; the owner calls [`poll`](Self::poll)
/// with the current host time once per frame. A poll fires at most once even
/// if several intervals elapsed since the last poll (the host was throttled
/// or stalled), and the next deadline is then re-based on `now` so that
/// missed firings are dropped rather than replayed in a burst.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatTimer {
    interval: Option<Duration>,
    due: Option<HostTime>,
}

impl RepeatTimer {
    /// Creates a disarmed timer. A `None` or zero interval can never be
    /// armed.
    #[must_use]
    pub const fn new(interval: Option<Duration>) -> Self {
        let interval = match interval {
            Some(d) if d.0 > 0 => Some(d),
            _ => None,
        };
        Self {
            interval,
            due: None,
        }
    }

    /// The configured interval, if any.
    #[must_use]
    pub const fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Arms (or re-arms) the timer so it first fires one full interval after
    /// `now`. Returns `false` if the timer has no interval.
    pub fn arm(&mut self, now: HostTime) -> bool {
        match self.interval {
            Some(interval) => {
                self.due = Some(now.saturating_add(interval));
                true
            }
            None => false,
        }
    }

    /// Cancels any pending firing.
    pub fn disarm(&mut self) {
        self.due = None;
    }

    /// Whether a firing is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    /// The next deadline, if armed.
    #[must_use]
    pub const fn due(&self) -> Option<HostTime> {
        self.due
    }

    /// Returns `true` if the deadline has passed, and schedules the next one.
    pub fn poll(&mut self, now: HostTime) -> bool {
        let (Some(due), Some(interval)) = (self.due, self.interval) else {
            return false;
        };
        if now < due {
            return false;
        }
        let next = due.saturating_add(interval);
        self.due = Some(if next > now {
            next
        } else {
            now.saturating_add(interval)
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(ms: u64) -> HostTime {
        HostTime::from_millis(ms)
    }

    #[test]
    fn fires_on_cadence() {
        let mut timer = RepeatTimer::new(Some(Duration::from_millis(100)));
        assert!(!timer.is_armed());
        assert!(timer.arm(t(0)));
        assert!(!timer.poll(t(99)));
        assert!(timer.poll(t(100)));
        assert!(!timer.poll(t(150)));
        assert!(timer.poll(t(205)));
        // Phase is kept relative to the first deadline.
        assert_eq!(timer.due(), Some(t(300)));
    }

    #[test]
    fn stall_fires_once_and_rebases() {
        let mut timer = RepeatTimer::new(Some(Duration::from_millis(100)));
        timer.arm(t(0));
        assert!(timer.poll(t(1_050)));
        assert!(!timer.poll(t(1_100)));
        assert_eq!(timer.due(), Some(t(1_150)));
    }

    #[test]
    fn zero_interval_never_arms() {
        let mut timer = RepeatTimer::new(Some(Duration::ZERO));
        assert!(!timer.arm(t(0)));
        assert!(!timer.poll(t(1_000)));
        assert_eq!(timer.interval(), None);
    }

    #[test]
    fn disarm_cancels() {
        let mut timer = RepeatTimer::new(Some(Duration::from_millis(10)));
        timer.arm(t(0));
        timer.disarm();
        assert!(!timer.poll(t(50)));
        // Re-arming restarts a full interval.
        timer.arm(t(50));
        assert!(!timer.poll(t(55)));
        assert!(timer.poll(t(60)));
    }
}
