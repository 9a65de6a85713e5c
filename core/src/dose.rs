//! Dose-rate and total-dose conversion plus display formatting.
//!
//! The calibration factor is the tube-specific CPM corresponding to
//! 1 µSv/h. The Rem path divides by a further 10 because 1 mR/h equals
//! 10 µSv/h for the gamma energies the tube is calibrated against.

use core::fmt::Write;

use heapless::String;

/// Unit system for dose display.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[repr(u8)]
pub enum DoseUnits {
    /// Sieverts, displayed as µSv/h and µSv.
    #[default]
    Sievert = 0,
    /// Rems, displayed as mR/h and mR.
    Rem = 1,
}

impl DoseUnits {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Sievert => Self::Rem,
            Self::Rem => Self::Sievert,
        }
    }

    /// Dose-rate unit label.
    pub const fn rate_label(self) -> &'static str {
        match self {
            Self::Sievert => "uSv/hr",
            Self::Rem => "mR/hr",
        }
    }

    /// Cumulative-dose unit label.
    pub const fn total_label(self) -> &'static str {
        match self {
            Self::Sievert => "uSv",
            Self::Rem => "mR",
        }
    }

    /// CPM per unit dose rate for a given calibration factor.
    const fn cpm_per_unit(
        self,
        calibration: u16,
    ) -> f32 {
        match self {
            Self::Sievert => calibration as f32,
            Self::Rem => calibration as f32 * 10.0,
        }
    }
}

/// Instantaneous dose rate from a corrected count rate.
pub fn dose_rate(
    cpm_corrected: f32,
    units: DoseUnits,
    calibration: u16,
) -> f32 {
    cpm_corrected / units.cpm_per_unit(calibration)
}

/// Time-integrated dose from the cumulative tally.
///
/// The tally accumulates counts over elapsed minutes implicitly, so the
/// division by 60 converts the per-hour calibration into per-minute.
pub fn total_dose(
    cumulative_count: u32,
    units: DoseUnits,
    calibration: u16,
) -> f32 {
    cumulative_count as f32 / (60.0 * units.cpm_per_unit(calibration))
}

/// Character budget for a formatted dose figure.
pub const DOSE_TEXT_LEN: usize = 12;

/// Format a dose figure with magnitude-dependent precision: two decimals
/// below 10, one in [10, 100), whole numbers at 100 and above. Negative
/// inputs (noisy near-zero corrected rates) clamp to "0".
pub fn format_dose(value: f32) -> String<DOSE_TEXT_LEN> {
    let mut text = String::new();
    // The value fits the buffer for anything the corrected-rate ceiling can
    // produce; a formatting error would only truncate the display.
    if value < 0.0 {
        let _ = write!(text, "0");
    } else if value < 10.0 {
        let _ = write!(text, "{value:.2}");
    } else if value < 100.0 {
        let _ = write!(text, "{value:.1}");
    } else {
        let _ = write!(text, "{value:.0}");
    }
    text
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibration_rate_round_trip() {
        // 175 CPM at the default SBM-20 factor is exactly 1 uSv/h,
        // equivalently 0.1 mR/h.
        let sv = dose_rate(175.0, DoseUnits::Sievert, 175);
        let rem = dose_rate(175.0, DoseUnits::Rem, 175);
        assert!((sv - 1.0).abs() < 1e-6);
        assert!((rem - 0.1).abs() < 1e-6);
    }

    #[test]
    fn total_dose_integrates_over_minutes() {
        // 175 CPM held for one hour = 10500 counts = 1 uSv.
        let total = total_dose(10_500, DoseUnits::Sievert, 175);
        assert!((total - 1.0).abs() < 1e-6);
        let total_rem = total_dose(10_500, DoseUnits::Rem, 175);
        assert!((total_rem - 0.1).abs() < 1e-6);
    }

    #[test]
    fn precision_steps_down_with_magnitude() {
        assert_eq!(format_dose(0.37), "0.37");
        assert_eq!(format_dose(9.999), "10.00"); // rounds within the band
        assert_eq!(format_dose(12.34), "12.3");
        assert_eq!(format_dose(45.67), "45.7");
        assert_eq!(format_dose(100.0), "100");
        assert_eq!(format_dose(12_345.6), "12346");
    }

    #[test]
    fn negative_reading_displays_as_zero() {
        assert_eq!(format_dose(-0.02), "0");
        assert_eq!(format_dose(-400.0), "0");
    }

    #[test]
    fn zero_displays_with_full_precision() {
        assert_eq!(format_dose(0.0), "0.00");
    }

    #[test]
    fn unit_labels() {
        assert_eq!(DoseUnits::Sievert.rate_label(), "uSv/hr");
        assert_eq!(DoseUnits::Rem.rate_label(), "mR/hr");
        assert_eq!(DoseUnits::Sievert.toggle(), DoseUnits::Rem);
        assert_eq!(DoseUnits::Rem.total_label(), "mR");
    }
}
