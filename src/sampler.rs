//! Periodic sampling trigger.
//!
//! Fires on a fixed cadence, unconditional on value change.  The sampler is
//! pure bookkeeping: it never reads a sensor itself, so a sensor fault can
//! never corrupt the cadence.

/// Timer-driven trigger with wraparound-safe elapsed-time arithmetic.
#[derive(Debug, Clone)]
pub struct PeriodicSampler {
    interval_ms: u32,
    last_fire_ms: u32,
}

impl PeriodicSampler {
    /// Create a sampler anchored at `now_ms`; the first fire happens one
    /// full interval after construction.
    pub fn new(interval_ms: u32, now_ms: u32) -> Self {
        Self {
            interval_ms,
            last_fire_ms: now_ms,
        }
    }

    /// Returns `true` when one interval has elapsed since the last fire,
    /// and re-anchors the cadence to `now_ms`.
    ///
    /// Fires at most once per call: a stall spanning several intervals
    /// yields a single fire rather than a catch-up burst, and subsequent
    /// fires are measured from `now_ms`.
    pub fn tick(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_fire_ms) >= self.interval_ms {
            self.last_fire_ms = now_ms;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let mut s = PeriodicSampler::new(1_000, 0);
        assert!(!s.tick(10));
        assert!(!s.tick(999));
        assert!(s.tick(1_000));
        // Immediately after firing, not again.
        assert!(!s.tick(1_001));
        assert!(s.tick(2_000));
    }

    #[test]
    fn long_stall_fires_exactly_once() {
        let mut s = PeriodicSampler::new(1_000, 0);
        // The loop stalls for 5.5 intervals.
        assert!(s.tick(5_500));
        // No catch-up burst; next fire is one interval from the stalled fire.
        assert!(!s.tick(5_510));
        assert!(!s.tick(6_400));
        assert!(s.tick(6_500));
    }

    #[test]
    fn cadence_survives_wraparound() {
        let anchor = u32::MAX - 400;
        let mut s = PeriodicSampler::new(1_000, anchor);
        assert!(!s.tick(anchor.wrapping_add(999)));
        assert!(s.tick(anchor.wrapping_add(1_000)));
    }

    #[test]
    fn no_fire_before_first_interval() {
        let mut s = PeriodicSampler::new(30_000, 500);
        for t in (500..30_499).step_by(250) {
            assert!(!s.tick(t));
        }
        assert!(s.tick(30_500));
    }
}
