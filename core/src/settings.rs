//! Persistent device settings over a byte-addressable store.
//!
//! Settings are read once at startup and written back only when a settings
//! page is confirmed (navigation away), and only the bytes that actually
//! changed, to minimize wear on the underlying flash sector.

use crate::config::{
    ADDR_ALARM,
    ADDR_BUZZER,
    ADDR_CALIBRATION,
    ADDR_DEVICE_MODE,
    ADDR_LOGGING,
    ADDR_UNITS,
    ALARM_THRESHOLD_MAX,
    ALARM_THRESHOLD_MIN,
    CALIBRATION_MAX,
    CALIBRATION_MIN,
    DEFAULT_ALARM_THRESHOLD,
    DEFAULT_CALIBRATION,
    STORE_SIZE,
};
use crate::dose::DoseUnits;

/// Byte-addressable persistent store (emulated EEPROM sector).
///
/// `commit` flushes buffered writes to the backing medium; RAM-backed
/// implementations may treat it as a no-op.
pub trait SettingsStore {
    fn read(
        &self,
        addr: usize,
    ) -> u8;

    fn write(
        &mut self,
        addr: usize,
        value: u8,
    );

    fn commit(&mut self) {}

    /// Write only if the stored byte differs (wear minimization).
    fn write_if_changed(
        &mut self,
        addr: usize,
        value: u8,
    ) -> bool {
        if self.read(addr) != value {
            self.write(addr, value);
            true
        } else {
            false
        }
    }

    fn read_u16(
        &self,
        addr: usize,
    ) -> u16 {
        u16::from_le_bytes([self.read(addr), self.read(addr + 1)])
    }

    fn read_u32(
        &self,
        addr: usize,
    ) -> u32 {
        u32::from_le_bytes([
            self.read(addr),
            self.read(addr + 1),
            self.read(addr + 2),
            self.read(addr + 3),
        ])
    }

    fn write_u32(
        &mut self,
        addr: usize,
        value: u32,
    ) {
        for (i, b) in value.to_le_bytes().iter().enumerate() {
            self.write(addr + i, *b);
        }
    }
}

/// RAM image of the device's emulated EEPROM sector.
///
/// Fresh images read as erased flash (0xFF), which [`Settings::load`]
/// sanitizes to defaults. The firmware copies this image to/from flash on
/// commit; the simulator and tests use it as-is.
pub struct EepromImage {
    bytes: [u8; STORE_SIZE],
}

impl EepromImage {
    pub const fn new() -> Self {
        Self {
            bytes: [0xFF; STORE_SIZE],
        }
    }
}

impl Default for EepromImage {
    fn default() -> Self { Self::new() }
}

impl SettingsStore for EepromImage {
    fn read(
        &self,
        addr: usize,
    ) -> u8 {
        self.bytes[addr]
    }

    fn write(
        &mut self,
        addr: usize,
        value: u8,
    ) {
        self.bytes[addr] = value;
    }
}

/// User-adjustable device configuration.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Settings {
    pub units: DoseUnits,
    /// High-alert threshold as a multiplier of the calibration factor.
    pub alarm_threshold: u8,
    /// Tube conversion factor, CPM per µSv/h.
    pub calibration: u16,
    /// True when acting as a WiFi monitoring station instead of a handheld.
    pub monitoring_mode: bool,
    /// True while periodic data logging is on.
    pub logging_enabled: bool,
    /// True while the per-count click buzzer is audible.
    pub buzzer_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            units: DoseUnits::Sievert,
            alarm_threshold: DEFAULT_ALARM_THRESHOLD,
            calibration: DEFAULT_CALIBRATION,
            monitoring_mode: false,
            logging_enabled: false,
            buzzer_enabled: true,
        }
    }
}

impl Settings {
    /// Read settings from the store, sanitizing anything out of range
    /// (erased flash, earlier firmware revisions) to the defaults.
    pub fn load<S: SettingsStore>(store: &S) -> Self {
        let defaults = Self::default();

        let units = match store.read(ADDR_UNITS) {
            0 => DoseUnits::Sievert,
            1 => DoseUnits::Rem,
            _ => defaults.units,
        };

        let alarm = store.read(ADDR_ALARM);
        let alarm_threshold = if (ALARM_THRESHOLD_MIN..=ALARM_THRESHOLD_MAX).contains(&alarm) {
            alarm
        } else {
            defaults.alarm_threshold
        };

        let cal = store.read_u16(ADDR_CALIBRATION);
        let calibration = if (CALIBRATION_MIN..=CALIBRATION_MAX).contains(&cal) {
            cal
        } else {
            defaults.calibration
        };

        let monitoring_mode = match store.read(ADDR_DEVICE_MODE) {
            0 => false,
            1 => true,
            _ => defaults.monitoring_mode,
        };

        let logging_enabled = match store.read(ADDR_LOGGING) {
            0 => false,
            1 => true,
            _ => defaults.logging_enabled,
        };

        let buzzer_enabled = match store.read(ADDR_BUZZER) {
            0 => false,
            1 => true,
            _ => defaults.buzzer_enabled,
        };

        Self {
            units,
            alarm_threshold,
            calibration,
            monitoring_mode,
            logging_enabled,
            buzzer_enabled,
        }
    }

    /// Persist any fields that differ from the stored bytes; commits once
    /// if anything was written. Returns true when a write happened.
    pub fn save_if_changed<S: SettingsStore>(
        &self,
        store: &mut S,
    ) -> bool {
        let cal = self.calibration.to_le_bytes();
        let mut dirty = false;
        dirty |= store.write_if_changed(ADDR_UNITS, self.units as u8);
        dirty |= store.write_if_changed(ADDR_ALARM, self.alarm_threshold);
        dirty |= store.write_if_changed(ADDR_CALIBRATION, cal[0]);
        dirty |= store.write_if_changed(ADDR_CALIBRATION + 1, cal[1]);
        dirty |= store.write_if_changed(ADDR_DEVICE_MODE, self.monitoring_mode as u8);
        dirty |= store.write_if_changed(ADDR_LOGGING, self.logging_enabled as u8);
        dirty |= store.write_if_changed(ADDR_BUZZER, self.buzzer_enabled as u8);
        if dirty {
            store.commit();
        }
        dirty
    }

    /// Step the alarm threshold, saturating at its bounds.
    pub fn adjust_alarm(
        &mut self,
        up: bool,
    ) {
        self.alarm_threshold = if up {
            (self.alarm_threshold + 1).min(ALARM_THRESHOLD_MAX)
        } else {
            (self.alarm_threshold - 1).max(ALARM_THRESHOLD_MIN)
        };
    }

    /// Step the calibration factor, saturating at its bounds.
    pub fn adjust_calibration(
        &mut self,
        up: bool,
    ) {
        self.calibration = if up {
            (self.calibration + 1).min(CALIBRATION_MAX)
        } else {
            self.calibration.saturating_sub(1).max(CALIBRATION_MIN)
        };
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_loads_defaults() {
        let store = EepromImage::new();
        let settings = Settings::load(&store);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.calibration, 175);
        assert_eq!(settings.alarm_threshold, 5);
        assert_eq!(settings.units, DoseUnits::Sievert);
    }

    #[test]
    fn settings_survive_a_store_round_trip() {
        let mut store = EepromImage::new();
        let settings = Settings {
            units: DoseUnits::Rem,
            alarm_threshold: 12,
            calibration: 310,
            monitoring_mode: true,
            logging_enabled: true,
            buzzer_enabled: false,
        };
        assert!(settings.save_if_changed(&mut store));
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn buzzer_mute_persists_and_defaults_audible() {
        // Erased flash reads back as audible.
        let mut store = EepromImage::new();
        assert!(Settings::load(&store).buzzer_enabled);

        let mut settings = Settings::load(&store);
        settings.buzzer_enabled = false;
        assert!(settings.save_if_changed(&mut store));
        assert!(!Settings::load(&store).buzzer_enabled);
    }

    #[test]
    fn unchanged_settings_do_not_rewrite() {
        let mut store = EepromImage::new();
        let settings = Settings::default();
        assert!(settings.save_if_changed(&mut store));
        // Second save with identical values touches nothing.
        assert!(!settings.save_if_changed(&mut store));
    }

    #[test]
    fn out_of_range_bytes_sanitize_to_defaults() {
        let mut store = EepromImage::new();
        store.write(ADDR_ALARM, 200); // above ALARM_THRESHOLD_MAX
        store.write(ADDR_CALIBRATION, 0);
        store.write(ADDR_CALIBRATION + 1, 0); // calibration 0 would divide by zero
        store.write(ADDR_UNITS, 7);
        let settings = Settings::load(&store);
        assert_eq!(settings.alarm_threshold, DEFAULT_ALARM_THRESHOLD);
        assert_eq!(settings.calibration, DEFAULT_CALIBRATION);
        assert_eq!(settings.units, DoseUnits::Sievert);
    }

    #[test]
    fn adjustments_saturate_at_bounds() {
        let mut settings = Settings::default();
        for _ in 0..500 {
            settings.adjust_alarm(true);
        }
        assert_eq!(settings.alarm_threshold, ALARM_THRESHOLD_MAX);
        for _ in 0..500 {
            settings.adjust_alarm(false);
        }
        assert_eq!(settings.alarm_threshold, ALARM_THRESHOLD_MIN);

        for _ in 0..2000 {
            settings.adjust_calibration(false);
        }
        assert_eq!(settings.calibration, CALIBRATION_MIN);
    }
}
