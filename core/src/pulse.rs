//! Interrupt-safe debounced pulse tally.
//!
//! [`PulseCounter`] is the only writer of the raw counts. It is built from
//! single-word atomics so the edge handler can run in interrupt context
//! while the main loop reads the tally without locking: each field is read
//! or written in one operation, and derived work always starts from a
//! [`TallySnapshot`] taken once per tick rather than re-reading the counters
//! mid-computation.

use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

use crate::config::DEAD_TIME_FLOOR_US;

/// How the debounce reference timestamp re-arms.
///
/// The GC-20 historically updates the reference on *every* edge, accepted or
/// rejected, so a sustained noise burst faster than the floor keeps pushing
/// the reference forward and yields at most the burst's first count.
/// Re-arming only on accepted edges instead enforces the floor as a true
/// minimum spacing between counts.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum DebouncePolicy {
    /// Reference timestamp moves on every edge (retrigger-on-any-edge).
    #[default]
    RearmOnAnyEdge = 0,
    /// Reference timestamp moves only when an edge is accepted.
    RearmOnAccepted = 1,
}

/// One coherent read of both counters.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TallySnapshot {
    /// Counts since the estimator's history was last reset.
    pub current: u32,
    /// Counts since the last full reset (power-on).
    pub cumulative: u32,
}

/// Debounced tally of tube discharges.
///
/// All fields are single words; `Relaxed` ordering is sufficient because no
/// field's validity depends on another (the timestamp only gates future
/// increments, and each counter is independently monotonic between resets).
pub struct PulseCounter {
    current: AtomicU32,
    cumulative: AtomicU32,
    /// Microsecond timestamp of the debounce reference edge. Wraps every
    /// ~71 minutes; `wrapping_sub` keeps interval math correct across the
    /// wrap for any gap under half the range.
    last_edge_us: AtomicU32,
    policy: AtomicU8,
}

impl PulseCounter {
    /// Create a counter with the retrigger-on-any-edge debounce.
    pub const fn new() -> Self {
        Self::with_policy(DebouncePolicy::RearmOnAnyEdge)
    }

    /// Create a counter with an explicit debounce policy.
    pub const fn with_policy(policy: DebouncePolicy) -> Self {
        Self {
            current: AtomicU32::new(0),
            cumulative: AtomicU32::new(0),
            last_edge_us: AtomicU32::new(0),
            policy: AtomicU8::new(policy as u8),
        }
    }

    /// Record a falling edge on the tube sense pin.
    ///
    /// Called from interrupt context with the monotonic microsecond clock.
    /// Performs only compares and two increments; never blocks, never fails.
    /// Edges within [`DEAD_TIME_FLOOR_US`] of the reference edge are
    /// discarded as bounce.
    pub fn on_pulse_edge(
        &self,
        now_us: u32,
    ) {
        let last = self.last_edge_us.load(Ordering::Relaxed);
        let accepted = now_us.wrapping_sub(last) > DEAD_TIME_FLOOR_US;

        if accepted {
            self.current.fetch_add(1, Ordering::Relaxed);
            self.cumulative.fetch_add(1, Ordering::Relaxed);
        }

        let rearm = match self.policy() {
            DebouncePolicy::RearmOnAnyEdge => true,
            DebouncePolicy::RearmOnAccepted => accepted,
        };
        if rearm {
            self.last_edge_us.store(now_us, Ordering::Relaxed);
        }
    }

    /// Read both counters once for this tick's derived computations.
    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            current: self.current.load(Ordering::Relaxed),
            cumulative: self.cumulative.load(Ordering::Relaxed),
        }
    }

    /// Counts since the last history reset.
    pub fn current(&self) -> u32 { self.current.load(Ordering::Relaxed) }

    /// Counts since power-on.
    pub fn cumulative(&self) -> u32 { self.cumulative.load(Ordering::Relaxed) }

    /// Zero the windowed count. Paired with an estimator reset whenever the
    /// integration mode changes, a settings page closes, or a timed session
    /// starts or ends.
    pub fn reset_current(&self) {
        self.current.store(0, Ordering::Relaxed);
    }

    /// Zero both counters (full reset).
    pub fn reset_all(&self) {
        self.current.store(0, Ordering::Relaxed);
        self.cumulative.store(0, Ordering::Relaxed);
    }

    fn policy(&self) -> DebouncePolicy {
        match self.policy.load(Ordering::Relaxed) {
            1 => DebouncePolicy::RearmOnAccepted,
            _ => DebouncePolicy::RearmOnAnyEdge,
        }
    }
}

impl Default for PulseCounter {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_above_floor_both_count() {
        let pulse = PulseCounter::new();
        pulse.on_pulse_edge(1_000);
        pulse.on_pulse_edge(1_250); // 250 us gap, above the 200 us floor
        let snap = pulse.snapshot();
        assert_eq!(snap.current, 2);
        assert_eq!(snap.cumulative, 2);
    }

    #[test]
    fn edge_below_floor_is_coalesced() {
        let pulse = PulseCounter::new();
        pulse.on_pulse_edge(1_000);
        pulse.on_pulse_edge(1_100); // 100 us gap
        assert_eq!(pulse.current(), 1);
        assert_eq!(pulse.cumulative(), 1);
    }

    #[test]
    fn retrigger_policy_suppresses_a_sustained_burst() {
        let pulse = PulseCounter::new();
        pulse.on_pulse_edge(1_000);
        // 100 us-spaced burst: every edge re-arms the reference, so none
        // of them are ever far enough from it to count.
        for i in 1..=20u32 {
            pulse.on_pulse_edge(1_000 + i * 100);
        }
        assert_eq!(pulse.current(), 1);
    }

    #[test]
    fn rearm_on_accepted_counts_through_a_burst() {
        let pulse = PulseCounter::with_policy(DebouncePolicy::RearmOnAccepted);
        pulse.on_pulse_edge(1_000);
        // Same burst: the reference only moves on accepted edges, so every
        // third 100 us step lands beyond the floor.
        for i in 1..=6u32 {
            pulse.on_pulse_edge(1_000 + i * 100);
        }
        assert_eq!(pulse.current(), 3); // t=1000, 1300, 1600
    }

    #[test]
    fn interval_math_survives_clock_wrap() {
        let pulse = PulseCounter::new();
        pulse.on_pulse_edge(u32::MAX - 50);
        pulse.on_pulse_edge(250); // 301 us across the wrap
        assert_eq!(pulse.current(), 2);
    }

    #[test]
    fn reset_current_leaves_cumulative() {
        let pulse = PulseCounter::new();
        pulse.on_pulse_edge(1_000);
        pulse.on_pulse_edge(2_000);
        pulse.reset_current();
        let snap = pulse.snapshot();
        assert_eq!(snap.current, 0);
        assert_eq!(snap.cumulative, 2);

        pulse.reset_all();
        assert_eq!(pulse.cumulative(), 0);
    }
}
