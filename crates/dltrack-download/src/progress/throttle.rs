//! Progress throttling.
//!
//! Rate-limits progress events so a fast stream of small chunks does not
//! flood observers. Polling through `status` is never throttled.
//!
//! The throttle remembers the byte count it last let through, so the final
//! value of a transfer is reported exactly once: either by the last
//! throttled event or by [`ProgressThrottle::settle`].

use std::time::{Duration, Instant};

/// Rate-limiter for one transfer's progress events.
pub struct ProgressThrottle {
    interval: Duration,
    last: Option<(Instant, u64)>,
}

impl ProgressThrottle {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Admit a progress event at `received` bytes if the interval elapsed.
    pub fn admit(&mut self, received: u64) -> bool {
        let now = Instant::now();
        if let Some((at, _)) = self.last {
            if now.saturating_duration_since(at) < self.interval {
                return false;
            }
        }
        self.last = Some((now, received));
        true
    }

    /// Admit the closing event at `received` bytes unless observers already
    /// saw that value. A transfer that never moved reports nothing.
    pub fn settle(&mut self, received: u64) -> bool {
        let reported = self.last.map_or(0, |(_, bytes)| bytes);
        if reported == received {
            return false;
        }
        self.last = Some((Instant::now(), received));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_event_is_always_admitted() {
        let mut throttle = ProgressThrottle::new(Duration::from_secs(60));
        assert!(throttle.admit(10));
        assert!(!throttle.admit(20));
    }

    #[test]
    fn admits_again_after_interval() {
        let mut throttle = ProgressThrottle::new(Duration::from_millis(50));
        assert!(throttle.admit(1));
        assert!(!throttle.admit(2));

        std::thread::sleep(Duration::from_millis(60));
        assert!(throttle.admit(3));
    }

    #[test]
    fn settle_skips_value_already_reported() {
        let mut throttle = ProgressThrottle::new(Duration::ZERO);
        assert!(throttle.admit(4));
        assert!(!throttle.settle(4));
    }

    #[test]
    fn settle_reports_value_held_back_by_interval() {
        let mut throttle = ProgressThrottle::new(Duration::from_secs(60));
        assert!(throttle.admit(4));
        assert!(!throttle.admit(8));
        assert!(throttle.settle(8));
        assert!(!throttle.settle(8));
    }

    #[test]
    fn settle_is_silent_for_empty_transfer() {
        let mut throttle = ProgressThrottle::new(Duration::ZERO);
        assert!(!throttle.settle(0));
    }
}
