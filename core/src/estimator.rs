//! Multi-window count-rate estimation with dead-time correction.
//!
//! Once per second the main loop pushes the raw tally snapshot into three
//! parallel sliding windows (5 s / 60 s / 180 s). All three advance in
//! lock-step regardless of which one is selected, so switching integration
//! mode after a reset always finds fully consistent history. The selected
//! window's delta is normalized to counts-per-minute and inflated by the
//! tube dead-time correction.

use crate::config::{DEAD_TIME_CLAMP, FAST_SLOTS, K_DEAD_TIME, MEDIUM_SLOTS, SLOW_SLOTS};
use crate::ring::WindowBuffer;

/// Averaging-window choice: responsiveness vs. smoothing.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum IntegrationMode {
    /// 5 s window, scaled ×12 to CPM.
    Fast = 1,
    /// 60 s window, already per-minute.
    #[default]
    Medium = 0,
    /// 180 s window, scaled ÷3 to CPM.
    Slow = 2,
}

impl IntegrationMode {
    /// Cycle Medium → Fast → Slow → Medium, matching the front-panel button.
    pub const fn next(self) -> Self {
        match self {
            Self::Medium => Self::Fast,
            Self::Fast => Self::Slow,
            Self::Slow => Self::Medium,
        }
    }

    /// Window length label shown on the mode button.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fast => "5 s",
            Self::Medium => "60 s",
            Self::Slow => "180 s",
        }
    }
}

/// One tick's estimation output.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct RateSample {
    /// Windowed rate normalized to counts-per-minute, before correction.
    pub cpm_normalized: f32,
    /// Dead-time-corrected counts-per-minute. Never negative, never past
    /// the clamp ceiling.
    pub cpm_corrected: f32,
}

/// Three-window moving-count estimator.
pub struct RateEstimator {
    fast: WindowBuffer<FAST_SLOTS>,
    medium: WindowBuffer<MEDIUM_SLOTS>,
    slow: WindowBuffer<SLOW_SLOTS>,
    mode: IntegrationMode,
}

impl RateEstimator {
    pub const fn new() -> Self {
        Self {
            fast: WindowBuffer::new(),
            medium: WindowBuffer::new(),
            slow: WindowBuffer::new(),
            mode: IntegrationMode::Medium,
        }
    }

    /// Currently selected averaging window.
    pub const fn mode(&self) -> IntegrationMode { self.mode }

    /// Select a window and discard all history.
    ///
    /// A stale window would blend pre- and post-change counts, so a mode
    /// change always restarts estimation from zero. The caller must also
    /// call [`crate::pulse::PulseCounter::reset_current`].
    pub fn set_mode(
        &mut self,
        mode: IntegrationMode,
    ) {
        self.mode = mode;
        self.reset();
    }

    /// Zero all three windows (page return, session start/end).
    pub fn reset(&mut self) {
        self.fast.reset();
        self.medium.reset();
        self.slow.reset();
    }

    /// Advance all windows with this tick's raw tally snapshot and return
    /// the rate over the selected window.
    ///
    /// The raw count must be snapshotted once by the caller; re-reading the
    /// live tally here would let an interrupt land between the push and the
    /// delta and skew the window by a count.
    pub fn advance(
        &mut self,
        raw: u32,
    ) -> RateSample {
        self.fast.push(raw);
        self.medium.push(raw);
        self.slow.push(raw);

        // Baseline is the snapshot from exactly one window-period ago. A
        // reset landing mid-tick can leave raw below it; saturate instead
        // of producing a negative window.
        let delta = match self.mode {
            IntegrationMode::Fast => raw.saturating_sub(self.fast.baseline()),
            IntegrationMode::Medium => raw.saturating_sub(self.medium.baseline()),
            IntegrationMode::Slow => raw.saturating_sub(self.slow.baseline()),
        };

        let cpm_normalized = match self.mode {
            IntegrationMode::Fast => delta as f32 * 12.0,
            IntegrationMode::Medium => delta as f32,
            IntegrationMode::Slow => delta as f32 / 3.0,
        };

        RateSample {
            cpm_normalized,
            cpm_corrected: dead_time_correct(cpm_normalized),
        }
    }
}

impl Default for RateEstimator {
    fn default() -> Self { Self::new() }
}

/// Inflate an apparent CPM to compensate for counts lost while the tube was
/// insensitive after each discharge: `n / (1 - k * n)`.
///
/// The denominator goes to zero as `n` approaches `1/k` (~300k CPM for the
/// SBM-20), so the input is clamped into `[0, DEAD_TIME_CLAMP / k]` first;
/// the output is therefore bounded and never negative.
pub fn dead_time_correct(cpm_normalized: f32) -> f32 {
    let ceiling = DEAD_TIME_CLAMP / K_DEAD_TIME;
    let n = cpm_normalized.clamp(0.0, ceiling);
    n / (1.0 - K_DEAD_TIME * n)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed a constant 7 counts/s and check each mode reads 420 CPM in
    /// steady state.
    #[test]
    fn steady_state_window_delta_matches_period() {
        for (mode, warmup) in [
            (IntegrationMode::Fast, FAST_SLOTS),
            (IntegrationMode::Medium, MEDIUM_SLOTS),
            (IntegrationMode::Slow, SLOW_SLOTS),
        ] {
            let mut est = RateEstimator::new();
            est.set_mode(mode);
            let mut raw = 0u32;
            let mut sample = RateSample::default();
            for _ in 0..(warmup + 10) {
                raw += 7;
                sample = est.advance(raw);
            }
            assert!(
                (sample.cpm_normalized - 420.0).abs() < 1e-3,
                "{mode:?}: got {}",
                sample.cpm_normalized
            );
        }
    }

    #[test]
    fn fast_window_scales_by_twelve() {
        let mut est = RateEstimator::new();
        est.set_mode(IntegrationMode::Fast);
        // 3 counts/s for long enough to fill the 5 s window
        let mut sample = RateSample::default();
        for t in 1..=20u32 {
            sample = est.advance(t * 3);
        }
        // 15 counts over 5 s -> 180 CPM
        assert!((sample.cpm_normalized - 180.0).abs() < 1e-3);
    }

    #[test]
    fn mode_switch_discards_history() {
        let mut est = RateEstimator::new();
        let mut raw = 0u32;
        for _ in 0..200 {
            raw += 50;
            est.advance(raw);
        }
        // Mode change: buffers zeroed, raw tally restarts at zero too.
        est.set_mode(IntegrationMode::Fast);
        let sample = est.advance(4);
        // Baseline slot holds 0, so the delta is exactly the counts
        // accumulated since the reset.
        assert!((sample.cpm_normalized - 48.0).abs() < 1e-3);
    }

    #[test]
    fn reset_race_saturates_instead_of_underflowing() {
        let mut est = RateEstimator::new();
        for _ in 0..100 {
            est.advance(1_000);
        }
        // Raw snapshot below the retained baseline (tally was reset but the
        // estimator was not yet): window saturates at zero.
        let sample = est.advance(3);
        assert!(sample.cpm_normalized >= 0.0);
        assert!(sample.cpm_corrected >= 0.0);
    }

    #[test]
    fn correction_is_zero_at_zero() {
        assert_eq!(dead_time_correct(0.0), 0.0);
    }

    #[test]
    fn correction_is_monotonic_and_inflating() {
        let mut prev = 0.0f32;
        for i in 0..1_000 {
            let n = i as f32 * (DEAD_TIME_CLAMP / K_DEAD_TIME) / 1_000.0;
            let c = dead_time_correct(n);
            assert!(c >= n, "corrected {c} < normalized {n}");
            assert!(c >= prev, "not monotonic at {n}");
            prev = c;
        }
    }

    #[test]
    fn correction_is_bounded_at_the_singularity() {
        let ceiling = DEAD_TIME_CLAMP / K_DEAD_TIME;
        let at_clamp = dead_time_correct(ceiling);
        // Inputs past the clamp collapse onto the ceiling value.
        assert_eq!(dead_time_correct(ceiling * 10.0), at_clamp);
        assert_eq!(dead_time_correct(f32::MAX), at_clamp);
        assert!(at_clamp.is_finite());
        assert!(at_clamp > 0.0);
    }

    #[test]
    fn negative_input_clamps_to_zero() {
        assert_eq!(dead_time_correct(-123.0), 0.0);
    }

    #[test]
    fn realistic_background_rate_is_barely_corrected() {
        // ~20 CPM background: correction should be well under 0.1%.
        let c = dead_time_correct(20.0);
        assert!(c >= 20.0);
        assert!(c < 20.01);
    }

    #[test]
    fn mode_cycle_order_matches_front_panel() {
        let mut mode = IntegrationMode::Medium;
        mode = mode.next();
        assert_eq!(mode, IntegrationMode::Fast);
        mode = mode.next();
        assert_eq!(mode, IntegrationMode::Slow);
        mode = mode.next();
        assert_eq!(mode, IntegrationMode::Medium);
    }
}
