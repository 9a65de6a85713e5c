//! Fixed-capacity sliding-window snapshot buffer.
//!
//! Each estimation window keeps `period + 1` raw-tally snapshots in a
//! circular buffer: the slot the cursor is about to overwrite holds the
//! snapshot from exactly one window-period ago, which is the subtraction
//! baseline for the windowed count.

/// Circular buffer of raw-tally snapshots, one slot per second plus the
/// baseline slot.
///
/// `N` is the window period in seconds + 1.
pub struct WindowBuffer<const N: usize> {
    slots: [u32; N],
    cursor: usize,
}

impl<const N: usize> WindowBuffer<N> {
    /// Create a zeroed buffer. Until `N - 1` pushes have happened the
    /// baseline slot still holds 0, so windowed deltas over-report during
    /// warm-up; that startup transient is accepted.
    pub const fn new() -> Self {
        Self {
            slots: [0; N],
            cursor: 0,
        }
    }

    /// Window period covered by this buffer, in seconds.
    pub const fn period_s(&self) -> usize { N - 1 }

    /// Store a snapshot at the cursor and advance it.
    pub fn push(
        &mut self,
        snapshot: u32,
    ) {
        self.slots[self.cursor] = snapshot;
        self.cursor = (self.cursor + 1) % N;
    }

    /// The oldest retained snapshot: the value pushed `N - 1` pushes ago,
    /// or 0 while the buffer is still warming up.
    pub const fn baseline(&self) -> u32 { self.slots[self.cursor] }

    /// Zero all slots and rewind the cursor.
    pub fn reset(&mut self) {
        self.slots = [0; N];
        self.cursor = 0;
    }
}

impl<const N: usize> Default for WindowBuffer<N> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_is_zero_during_warmup() {
        let mut buf: WindowBuffer<6> = WindowBuffer::new();
        assert_eq!(buf.baseline(), 0);
        for i in 1..=5u32 {
            buf.push(i);
            assert_eq!(buf.baseline(), 0, "warm-up push {i}");
        }
    }

    #[test]
    fn baseline_lags_by_exactly_one_period() {
        let mut buf: WindowBuffer<6> = WindowBuffer::new();
        // After the buffer wraps, the baseline is the value from
        // period_s() pushes ago.
        for i in 0..100u32 {
            buf.push(i);
            if i >= 5 {
                assert_eq!(buf.baseline(), i - 5);
            }
        }
    }

    #[test]
    fn reset_clears_history() {
        let mut buf: WindowBuffer<4> = WindowBuffer::new();
        for i in 0..10u32 {
            buf.push(i * 7);
        }
        buf.reset();
        assert_eq!(buf.baseline(), 0);
        buf.push(42);
        assert_eq!(buf.baseline(), 0);
    }

    #[test]
    fn period_matches_capacity() {
        let buf: WindowBuffer<61> = WindowBuffer::new();
        assert_eq!(buf.period_s(), 60);
    }
}
