//! Automatic drop scheduling
//!
//! The engine never keeps time. The host owns a [`DropTimer`], feeds it the
//! current instant every frame, and calls `Engine::soft_drop` whenever
//! `poll` says a tick is due.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct DropTimer {
    interval: Duration,
    /// Start of the current interval; None while suspended
    last_tick: Option<Instant>,
}

impl DropTimer {
    /// A running timer whose first tick is one interval after `now`
    pub fn start(now: Instant, interval: Duration) -> Self {
        Self {
            interval,
            last_tick: Some(now),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.last_tick.is_some()
    }

    /// Change the interval, e.g. after a level-up. The current interval is
    /// measured against the new length from its original start.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Suspend ticking entirely
    pub fn pause(&mut self) {
        self.last_tick = None;
    }

    /// Resume with a fresh interval; time spent paused is never made up
    pub fn resume(&mut self, now: Instant) {
        if self.last_tick.is_none() {
            self.last_tick = Some(now);
        }
    }

    /// Restart the current interval from `now`
    pub fn reset(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }

    /// Whether a drop is due. Fires at most once per call, and a late poll
    /// restarts the interval from `now` instead of queuing missed ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_tick {
            Some(last) if now.saturating_duration_since(last) >= self.interval => {
                self.last_tick = Some(now);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_millis(1000);

    #[test]
    fn test_fires_after_interval() {
        let t0 = Instant::now();
        let mut timer = DropTimer::start(t0, SECOND);
        assert!(!timer.poll(t0 + Duration::from_millis(999)));
        assert!(timer.poll(t0 + SECOND));
        assert!(!timer.poll(t0 + SECOND + Duration::from_millis(10)));
        assert!(timer.poll(t0 + SECOND * 2));
    }

    #[test]
    fn test_late_poll_does_not_catch_up() {
        let t0 = Instant::now();
        let mut timer = DropTimer::start(t0, SECOND);
        assert!(timer.poll(t0 + SECOND * 5));
        assert!(!timer.poll(t0 + SECOND * 5 + Duration::from_millis(1)));
    }

    #[test]
    fn test_pause_suspends_and_resume_restarts() {
        let t0 = Instant::now();
        let mut timer = DropTimer::start(t0, SECOND);
        timer.pause();
        assert!(!timer.is_running());
        assert!(!timer.poll(t0 + SECOND * 10));

        let resumed_at = t0 + SECOND * 10;
        timer.resume(resumed_at);
        assert!(!timer.poll(resumed_at));
        assert!(!timer.poll(resumed_at + Duration::from_millis(500)));
        assert!(timer.poll(resumed_at + SECOND));
    }

    #[test]
    fn test_resume_while_running_keeps_interval() {
        let t0 = Instant::now();
        let mut timer = DropTimer::start(t0, SECOND);
        timer.resume(t0 + Duration::from_millis(900));
        assert!(timer.poll(t0 + SECOND));
    }

    #[test]
    fn test_set_interval() {
        let t0 = Instant::now();
        let mut timer = DropTimer::start(t0, SECOND);
        timer.set_interval(Duration::from_millis(500));
        assert_eq!(timer.interval(), Duration::from_millis(500));
        assert!(timer.poll(t0 + Duration::from_millis(500)));
    }
}
