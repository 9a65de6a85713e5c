//! One-shot timed counting session.
//!
//! Independent of the continuous home-screen estimator: the session records
//! its own baseline from the shared tally and runs its own clock, finishing
//! automatically once the configured duration has elapsed. The UI keeps at
//! most one of {home-screen estimation, timed session} live, but the pulse
//! tally itself never stops.

/// Session progress reported by [`TimedAcquisition::poll`].
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct TimedProgress {
    /// Counts accumulated since the session baseline.
    pub counts: u32,
    /// Mean rate over the session so far, in counts per minute.
    pub cpm: f32,
    /// Completed fraction in `[0, 1]`.
    pub fraction: f32,
    /// True on exactly the poll that transitions Running → Completed.
    pub just_completed: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
enum State {
    #[default]
    Idle,
    Running,
    Completed,
}

/// Timed-count state machine: Idle → Running → Completed, with cancel back
/// to Idle from anywhere.
pub struct TimedAcquisition {
    state: State,
    duration_ms: u64,
    start_ms: u64,
    baseline: u32,
}

impl TimedAcquisition {
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            duration_ms: 0,
            start_ms: 0,
            baseline: 0,
        }
    }

    pub const fn is_running(&self) -> bool { matches!(self.state, State::Running) }

    pub const fn is_completed(&self) -> bool { matches!(self.state, State::Completed) }

    /// Begin a session: capture the clock and the tally baseline.
    pub fn start(
        &mut self,
        duration_min: u16,
        now_ms: u64,
        baseline_count: u32,
    ) {
        self.state = State::Running;
        self.duration_ms = duration_min as u64 * 60_000;
        self.start_ms = now_ms;
        self.baseline = baseline_count;
    }

    /// Update the session against the clock and the shared tally.
    ///
    /// Returns `None` when Idle. After completion the result keeps
    /// reporting the finalized figures (with `just_completed` false) so the
    /// UI can leave them on screen.
    pub fn poll(
        &mut self,
        now_ms: u64,
        current_count: u32,
    ) -> Option<TimedProgress> {
        match self.state {
            State::Idle => None,
            State::Running | State::Completed => {
                let elapsed = now_ms.saturating_sub(self.start_ms).min(self.duration_ms);
                let counts = current_count.wrapping_sub(self.baseline);

                let just_completed = self.state == State::Running && elapsed >= self.duration_ms;
                if just_completed {
                    self.state = State::Completed;
                }

                // Guard the first-tick division: elapsed can be 0 ms.
                let minutes = elapsed.max(1) as f32 / 60_000.0;
                let fraction = if self.duration_ms == 0 {
                    1.0
                } else {
                    elapsed as f32 / self.duration_ms as f32
                };

                Some(TimedProgress {
                    counts,
                    cpm: counts as f32 / minutes,
                    fraction,
                    just_completed,
                })
            }
        }
    }

    /// Abandon the session; partial results are discarded.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }
}

impl Default for TimedAcquisition {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_exactly_at_duration() {
        let mut session = TimedAcquisition::new();
        session.start(5, 10_000, 100);

        let p = session.poll(10_000 + 5 * 60_000 - 1, 400).unwrap();
        assert!(!p.just_completed);
        assert!(session.is_running());

        let p = session.poll(10_000 + 5 * 60_000, 400).unwrap();
        assert!(p.just_completed);
        assert!(session.is_completed());

        // The completion notification fires once.
        let p = session.poll(10_000 + 6 * 60_000, 500).unwrap();
        assert!(!p.just_completed);
        assert!((p.fraction - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cpm_tracks_elapsed_minutes() {
        let mut session = TimedAcquisition::new();
        session.start(10, 0, 1_000);

        // 90 counts over 2 minutes
        let p = session.poll(120_000, 1_090).unwrap();
        assert_eq!(p.counts, 90);
        assert!((p.cpm - 45.0).abs() < 1e-3);
        assert!((p.fraction - 0.2).abs() < 1e-6);
    }

    #[test]
    fn first_poll_does_not_divide_by_zero() {
        let mut session = TimedAcquisition::new();
        session.start(5, 42, 0);
        let p = session.poll(42, 3).unwrap();
        assert!(p.cpm.is_finite());
        assert_eq!(p.counts, 3);
    }

    #[test]
    fn cancel_returns_to_idle_and_restart_takes_fresh_baseline() {
        let mut session = TimedAcquisition::new();
        session.start(5, 0, 50);
        session.poll(30_000, 80);
        session.cancel();
        assert!(session.poll(31_000, 90).is_none());

        session.start(5, 60_000, 200);
        let p = session.poll(120_000, 260).unwrap();
        assert_eq!(p.counts, 60); // from the new baseline, not the old one
    }

    #[test]
    fn idle_reports_nothing() {
        let mut session = TimedAcquisition::new();
        assert!(session.poll(1_000, 5).is_none());
    }
}
