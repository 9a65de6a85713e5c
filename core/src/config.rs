//! Tube, timing, and storage-layout constants.
//!
//! All values are compile-time constants with validation assertions, so a
//! misconfigured window or storage region fails the build instead of
//! corrupting a reading at runtime.

// =============================================================================
// Pulse Input
// =============================================================================

/// Minimum accepted spacing between tube discharges, in microseconds.
///
/// Edges closer together than this are switching noise or contact bounce on
/// the sense pin, not separate ionizing events, and are coalesced into one.
pub const DEAD_TIME_FLOOR_US: u32 = 200;

// =============================================================================
// Rate Estimation
// =============================================================================

/// SBM-20 dead-time constant in minutes per count.
///
/// Immediately after a discharge the tube is insensitive; at high rates this
/// causes undercounting, compensated by `n / (1 - K_DEAD_TIME * n)`.
pub const K_DEAD_TIME: f32 = 3.33e-6;

/// Fraction of the `1 / K_DEAD_TIME` singularity the normalized rate is
/// clamped below before correction is applied.
pub const DEAD_TIME_CLAMP: f32 = 0.99;

/// Slot counts for the three averaging windows. One extra slot per window
/// holds the oldest snapshot used as the subtraction baseline.
pub const FAST_SLOTS: usize = 6; // 5 s window
pub const MEDIUM_SLOTS: usize = 61; // 60 s window
pub const SLOW_SLOTS: usize = 181; // 180 s window

/// Estimation tick period in milliseconds (all windows advance in lock-step).
pub const TICK_MS: u64 = 1000;

const _: () = assert!(FAST_SLOTS < MEDIUM_SLOTS);
const _: () = assert!(MEDIUM_SLOTS < SLOW_SLOTS);

// =============================================================================
// Settings Defaults and Ranges
// =============================================================================

/// Default conversion factor for the SBM-20: CPM per µSv/h.
pub const DEFAULT_CALIBRATION: u16 = 175;

/// Calibration factor bounds.
pub const CALIBRATION_MIN: u16 = 1;
pub const CALIBRATION_MAX: u16 = 999;

/// Default alarm threshold (multiplier of the calibration factor).
pub const DEFAULT_ALARM_THRESHOLD: u8 = 5;

/// Alarm threshold bounds.
pub const ALARM_THRESHOLD_MIN: u8 = 2;
pub const ALARM_THRESHOLD_MAX: u8 = 100;

const _: () = assert!(CALIBRATION_MIN >= 1); // division by the factor is unguarded
const _: () = assert!(ALARM_THRESHOLD_MIN >= 2);
const _: () = assert!(ALARM_THRESHOLD_MIN < ALARM_THRESHOLD_MAX);

// =============================================================================
// Timed Count
// =============================================================================

/// Timed-count duration bounds and step, in minutes.
pub const TIMED_DURATION_MIN: u16 = 5;
pub const TIMED_DURATION_MAX: u16 = 995;
pub const TIMED_DURATION_STEP: u16 = 5;

const _: () = assert!(TIMED_DURATION_MIN < TIMED_DURATION_MAX);

// =============================================================================
// Storage Layout (emulated EEPROM sector)
// =============================================================================

/// Size of the emulated EEPROM image.
pub const STORE_SIZE: usize = 4096;

/// Settings byte addresses.
pub const ADDR_UNITS: usize = 0;
pub const ADDR_ALARM: usize = 1;
pub const ADDR_CALIBRATION: usize = 2; // u16, little-endian
pub const ADDR_DEVICE_MODE: usize = 4;
pub const ADDR_LOGGING: usize = 5;
pub const ADDR_BUZZER: usize = 6;

/// Persisted data-log write cursor (u32, little-endian).
pub const ADDR_LOG_CURSOR: usize = 96;

/// Data-log record region: 4-byte little-endian records.
pub const LOG_REGION_START: usize = 100;
pub const LOG_REGION_END: usize = 2100;

/// Cursor position at or above which the log reports itself full.
pub const LOG_FULL_MARK: usize = 2000;

/// Seconds between periodic log records (10 minutes).
pub const LOG_INTERVAL_S: u32 = 600;

/// Seconds between monitoring-station uploads (5 minutes).
pub const UPLOAD_INTERVAL_S: u32 = 300;

const _: () = assert!(ADDR_LOG_CURSOR + 4 <= LOG_REGION_START);
const _: () = assert!(LOG_REGION_START < LOG_FULL_MARK);
const _: () = assert!(LOG_FULL_MARK < LOG_REGION_END);
const _: () = assert!(LOG_REGION_END <= STORE_SIZE);
const _: () = assert!((LOG_REGION_END - LOG_REGION_START) % 4 == 0);
