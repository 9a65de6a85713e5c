//! Append-only periodic record log.
//!
//! Fixed-width `u32` little-endian corrected-rate snapshots written to the
//! same byte store as the settings, one every [`LOG_INTERVAL_S`] seconds
//! while logging is on. The write cursor persists across power cycles so a
//! long survey can span several sessions.
//!
//! [`LOG_INTERVAL_S`]: crate::config::LOG_INTERVAL_S

use crate::config::{
    ADDR_LOGGING,
    ADDR_LOG_CURSOR,
    LOG_FULL_MARK,
    LOG_REGION_END,
    LOG_REGION_START,
};
use crate::settings::SettingsStore;

/// Width of one stored record in bytes.
pub const RECORD_SIZE: usize = 4;

/// Maximum number of records the region can hold before reporting full.
pub const LOG_CAPACITY: usize = (LOG_FULL_MARK - LOG_REGION_START) / RECORD_SIZE;

/// Number of records the full region can hold. A store written by earlier
/// firmware may carry a valid cursor past the full mark, so readers size
/// their buffers to the region, not to [`LOG_CAPACITY`].
pub const LOG_REGION_CAPACITY: usize = (LOG_REGION_END - LOG_REGION_START) / RECORD_SIZE;

/// Non-fatal logging failures.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LogError {
    /// The record region is full; logging degrades until a clear.
    Full,
}

/// Read the persisted write cursor, sanitizing anything outside the record
/// region (erased flash, interrupted writes) back to the region start.
pub fn cursor<S: SettingsStore>(store: &S) -> usize {
    let raw = store.read_u32(ADDR_LOG_CURSOR) as usize;
    if raw < LOG_REGION_START || raw >= LOG_REGION_END {
        return LOG_REGION_START;
    }
    if (raw - LOG_REGION_START) % RECORD_SIZE != 0 {
        return LOG_REGION_START;
    }
    raw
}

/// Number of records currently stored.
pub fn len<S: SettingsStore>(store: &S) -> usize {
    (cursor(store) - LOG_REGION_START) / RECORD_SIZE
}

/// True once the cursor has reached the full mark. Appends are refused from
/// here on, but the records already stored remain readable.
pub fn is_full<S: SettingsStore>(store: &S) -> bool {
    cursor(store) >= LOG_FULL_MARK
}

/// Append one corrected-rate snapshot and persist the advanced cursor.
pub fn append<S: SettingsStore>(
    store: &mut S,
    cpm: u32,
) -> Result<(), LogError> {
    let at = cursor(store);
    if at >= LOG_FULL_MARK || at + RECORD_SIZE > LOG_REGION_END {
        return Err(LogError::Full);
    }
    store.write_u32(at, cpm);
    store.write_u32(ADDR_LOG_CURSOR, (at + RECORD_SIZE) as u32);
    store.commit();
    Ok(())
}

/// Erase the record region, rewind the cursor, and switch logging off.
///
/// Turning logging off here forces the user to re-arm it deliberately
/// after a download, instead of silently overwriting a fresh survey.
pub fn clear<S: SettingsStore>(store: &mut S) {
    for addr in LOG_REGION_START..LOG_REGION_END {
        store.write_if_changed(addr, 0xFF);
    }
    store.write_u32(ADDR_LOG_CURSOR, LOG_REGION_START as u32);
    store.write_if_changed(ADDR_LOGGING, 0);
    store.commit();
}

/// Iterate the stored records, oldest first.
pub fn records<S: SettingsStore>(store: &S) -> impl Iterator<Item = u32> + '_ {
    let end = cursor(store);
    (LOG_REGION_START..end)
        .step_by(RECORD_SIZE)
        .map(|addr| store.read_u32(addr))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::EepromImage;

    #[test]
    fn fresh_store_is_empty_and_not_full() {
        let store = EepromImage::new();
        // Erased cursor bytes sanitize to the region start.
        assert_eq!(cursor(&store), LOG_REGION_START);
        assert_eq!(len(&store), 0);
        assert!(!is_full(&store));
        assert_eq!(records(&store).count(), 0);
    }

    #[test]
    fn appended_records_read_back_oldest_first() {
        let mut store = EepromImage::new();
        for cpm in [21, 19, 400, 23] {
            append(&mut store, cpm).unwrap();
        }
        assert_eq!(len(&store), 4);
        let got: Vec<u32> = records(&store).collect();
        assert_eq!(got, [21, 19, 400, 23]);
    }

    #[test]
    fn cursor_survives_a_reload() {
        let mut store = EepromImage::new();
        append(&mut store, 30).unwrap();
        append(&mut store, 31).unwrap();
        // A new session sees the persisted cursor, not a fresh one.
        let resumed = cursor(&store);
        assert_eq!(resumed, LOG_REGION_START + 2 * RECORD_SIZE);
        append(&mut store, 32).unwrap();
        assert_eq!(records(&store).last(), Some(32));
    }

    #[test]
    fn refuses_appends_once_full() {
        let mut store = EepromImage::new();
        for i in 0..LOG_CAPACITY as u32 {
            append(&mut store, i).unwrap();
        }
        assert!(is_full(&store));
        assert_eq!(append(&mut store, 999), Err(LogError::Full));
        // Stored records stay readable after the refusal.
        assert_eq!(len(&store), LOG_CAPACITY);
        assert_eq!(records(&store).next(), Some(0));
    }

    #[test]
    fn clear_rewinds_and_disables_logging() {
        let mut store = EepromImage::new();
        store.write(ADDR_LOGGING, 1);
        for i in 0..10 {
            append(&mut store, i).unwrap();
        }
        clear(&mut store);
        assert_eq!(len(&store), 0);
        assert_eq!(store.read(ADDR_LOGGING), 0);
        assert_eq!(records(&store).count(), 0);
        // The region is usable again immediately.
        append(&mut store, 77).unwrap();
        assert_eq!(records(&store).next(), Some(77));
    }

    #[test]
    fn corrupt_cursor_sanitizes_to_region_start() {
        let mut store = EepromImage::new();
        store.write_u32(ADDR_LOG_CURSOR, 3); // below the region
        assert_eq!(cursor(&store), LOG_REGION_START);
        store.write_u32(ADDR_LOG_CURSOR, (LOG_REGION_START + 1) as u32); // misaligned
        assert_eq!(cursor(&store), LOG_REGION_START);
        store.write_u32(ADDR_LOG_CURSOR, u32::MAX); // erased flash
        assert_eq!(cursor(&store), LOG_REGION_START);
    }
}
