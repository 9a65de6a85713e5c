//! Three-level alert classification.
//!
//! Pure function of the corrected rate against two thresholds derived from
//! the calibration factor. No hysteresis: a rate oscillating on a boundary
//! flaps between levels each tick, and consumers treat the result as
//! latest-value only. Change-only redraw/buzzer notification is the
//! caller's job (track the previously displayed level there).

/// Home-screen alert level.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum AlertLevel {
    /// Below half the calibration factor (~0.5 µSv/h equivalent).
    #[default]
    Normal = 0,
    /// Above background but below the alarm threshold.
    Elevated = 1,
    /// At or above `alarm_threshold × calibration` CPM.
    High = 2,
}

impl AlertLevel {
    /// Banner caption for this level.
    pub const fn caption(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL BACKGROUND",
            Self::Elevated => "ELEVATED ACTIVITY",
            Self::High => "HIGH RADIATION LEVEL",
        }
    }
}

/// Classify a corrected rate. The three half-open intervals partition
/// `[0, ∞)`: `[0, cal/2)`, `[cal/2, alarm·cal)`, `[alarm·cal, ∞)`.
pub fn classify(
    cpm_corrected: f32,
    calibration: u16,
    alarm_threshold: u8,
) -> AlertLevel {
    let cal = calibration as f32;
    if cpm_corrected < cal / 2.0 {
        AlertLevel::Normal
    } else if cpm_corrected < alarm_threshold as f32 * cal {
        AlertLevel::Elevated
    } else {
        AlertLevel::High
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_partition_the_line() {
        // Boundary values land in exactly one level each.
        assert_eq!(classify(0.0, 175, 5), AlertLevel::Normal);
        assert_eq!(classify(87.4, 175, 5), AlertLevel::Normal);
        assert_eq!(classify(87.5, 175, 5), AlertLevel::Elevated); // cal/2 inclusive
        assert_eq!(classify(874.9, 175, 5), AlertLevel::Elevated);
        assert_eq!(classify(875.0, 175, 5), AlertLevel::High); // alarm*cal inclusive
        assert_eq!(classify(f32::MAX, 175, 5), AlertLevel::High);
    }

    #[test]
    fn classification_is_pure() {
        for _ in 0..3 {
            assert_eq!(classify(500.0, 175, 5), AlertLevel::Elevated);
        }
    }

    #[test]
    fn thresholds_scale_with_calibration() {
        // Halving the calibration factor halves both boundaries.
        assert_eq!(classify(50.0, 88, 5), AlertLevel::Elevated);
        assert_eq!(classify(50.0, 175, 5), AlertLevel::Normal);
        assert_eq!(classify(440.0, 88, 5), AlertLevel::High);
    }

    #[test]
    fn captions_match_levels() {
        assert_eq!(AlertLevel::Normal.caption(), "NORMAL BACKGROUND");
        assert_eq!(AlertLevel::High.caption(), "HIGH RADIATION LEVEL");
    }
}
