//! Debounced edge detection over a binary sensor signal.
//!
//! Converts a noisy two-level signal (reed contact, PIR output) into
//! discrete, debounced change events.  The debounce is a *time floor on
//! committing*, not a sample counter: a candidate level is accepted only
//! when it differs from the last stable level AND at least one debounce
//! window has elapsed since the last committed change.  Rapid oscillation
//! around a threshold therefore produces no events at all.
//!
//! Timestamps are `u32` milliseconds since boot with wrapping arithmetic,
//! so behaviour is correct across timer wraparound (~49.7 days).

/// A two-valued sensor reading with source-defined polarity.
///
/// Each sensor source owns the mapping from raw GPIO level to signal
/// polarity (e.g. a pulled-up reed contact reads HIGH when the door is
/// open, so HIGH maps to `Active`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalLevel {
    /// Door open / motion present.
    Active,
    /// Door closed / no motion.
    Inactive,
}

/// Debounced state-change detector.  One instance per digital sensor; the
/// instance exclusively owns its stable value and change timestamp.
#[derive(Debug, Clone)]
pub struct EdgeDetector {
    last_stable: SignalLevel,
    last_change_ms: u32,
    debounce_ms: u32,
}

impl EdgeDetector {
    /// Create a detector seeded with the sensor's boot-time level.
    ///
    /// Seeding `last_change_ms` with the current time makes boot count as
    /// the last change: the initial state is a deliberate initial condition,
    /// not a detected edge, and a genuine first edge occurring inside the
    /// window right after boot is deferred one window rather than lost.
    pub fn new(initial: SignalLevel, debounce_ms: u32, now_ms: u32) -> Self {
        Self {
            last_stable: initial,
            last_change_ms: now_ms,
            debounce_ms,
        }
    }

    /// Feed one raw sample.  Returns the new stable level only when a
    /// debounced change commits; otherwise `None`.
    pub fn observe(&mut self, level: SignalLevel, now_ms: u32) -> Option<SignalLevel> {
        if level != self.last_stable && now_ms.wrapping_sub(self.last_change_ms) >= self.debounce_ms
        {
            self.last_stable = level;
            self.last_change_ms = now_ms;
            return Some(level);
        }
        None
    }

    /// The last committed stable level.
    pub fn current(&self) -> SignalLevel {
        self.last_stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SignalLevel::{Active, Inactive};

    const WINDOW: u32 = 50;

    #[test]
    fn constant_signal_reports_nothing() {
        let mut det = EdgeDetector::new(Inactive, WINDOW, 0);
        for t in (0..10_000).step_by(10) {
            assert_eq!(det.observe(Inactive, t), None);
        }
        assert_eq!(det.current(), Inactive);
    }

    #[test]
    fn stable_change_commits_once() {
        let mut det = EdgeDetector::new(Inactive, WINDOW, 0);
        assert_eq!(det.observe(Inactive, 10), None);
        // Change arrives after the window has elapsed since boot.
        assert_eq!(det.observe(Active, 100), Some(Active));
        // Same level again — no repeated event.
        assert_eq!(det.observe(Active, 110), None);
        assert_eq!(det.observe(Active, 1_000), None);
    }

    #[test]
    fn boot_time_counts_as_last_change() {
        // Detector constructed at t=1000; an edge at t=1020 is inside the
        // window measured from boot and must be held back...
        let mut det = EdgeDetector::new(Inactive, WINDOW, 1_000);
        assert_eq!(det.observe(Active, 1_020), None);
        // ...but commits once the window from boot has passed.
        assert_eq!(det.observe(Active, 1_050), Some(Active));
    }

    #[test]
    fn oscillation_within_window_is_suppressed() {
        let mut det = EdgeDetector::new(Inactive, WINDOW, 0);
        // Settle well past boot.
        assert_eq!(det.observe(Active, 200), Some(Active));
        // Chatter: A -> B -> A with both transitions inside one window.
        assert_eq!(det.observe(Inactive, 210), None);
        assert_eq!(det.observe(Active, 230), None);
        // Back at the stable level — the blip produced zero events.
        assert_eq!(det.current(), Active);
        assert_eq!(det.observe(Active, 400), None);
    }

    #[test]
    fn events_never_closer_than_window() {
        let mut det = EdgeDetector::new(Inactive, WINDOW, 0);
        let mut last_event_at: Option<u32> = None;
        let mut level = Active;
        // Toggle the raw level every 10 ms for a while.
        for t in (60..5_000).step_by(10) {
            level = if level == Active { Inactive } else { Active };
            if det.observe(level, t).is_some() {
                if let Some(prev) = last_event_at {
                    assert!(t - prev >= WINDOW, "events at {prev} and {t} too close");
                }
                last_event_at = Some(t);
            }
        }
    }

    #[test]
    fn correct_across_timer_wraparound() {
        let boot = u32::MAX - 20;
        let mut det = EdgeDetector::new(Inactive, WINDOW, boot);
        // 10 ms after boot (pre-wrap) — inside the window.
        assert_eq!(det.observe(Active, boot.wrapping_add(10)), None);
        // 60 ms after boot (post-wrap) — window elapsed, commits.
        assert_eq!(det.observe(Active, boot.wrapping_add(60)), Some(Active));
    }
}
