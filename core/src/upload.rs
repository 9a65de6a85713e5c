//! Upload-batch production for the monitoring station.
//!
//! Maps the stored data log into evenly spaced upload records and renders
//! them as a ThingSpeak-style bulk update. Transport belongs to a
//! collaborator (WiFi co-processor on the device, stdout in the simulator);
//! this module only produces the payload.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::config::LOG_INTERVAL_S;
use crate::datalog;
use crate::datalog::LOG_REGION_CAPACITY;
use crate::settings::SettingsStore;

/// One bulk-update entry: a rate sample and its spacing from the previous
/// entry in seconds.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct UploadRecord {
    pub delta_t_s: u32,
    pub cpm: u32,
}

/// Payload rendering failures.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UploadError {
    /// The output buffer cannot hold the rendered payload.
    BufferFull,
}

impl From<core::fmt::Error> for UploadError {
    fn from(_: core::fmt::Error) -> Self { Self::BufferFull }
}

/// Collect every logged record into an upload batch. Records carry the
/// fixed log spacing, oldest first, matching the order they were taken.
pub fn batch<S: SettingsStore>(store: &S) -> Vec<UploadRecord, LOG_REGION_CAPACITY> {
    let mut out = Vec::new();
    for cpm in datalog::records(store) {
        // The cursor never leaves the record region, so every stored record
        // fits, including ones past the full mark on a store written by
        // earlier firmware.
        let _ = out.push(UploadRecord {
            delta_t_s: LOG_INTERVAL_S,
            cpm,
        });
    }
    out
}

/// Render a batch as a bulk-update JSON document:
///
/// ```json
/// {"write_api_key":"KEY","updates":[{"delta_t":600,"field1":22},...]}
/// ```
pub fn write_bulk_json<const N: usize>(
    api_key: &str,
    records: &[UploadRecord],
    out: &mut String<N>,
) -> Result<(), UploadError> {
    write!(out, "{{\"write_api_key\":\"{api_key}\",\"updates\":[")?;
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push(',').map_err(|_| UploadError::BufferFull)?;
        }
        write!(
            out,
            "{{\"delta_t\":{},\"field1\":{}}}",
            record.delta_t_s, record.cpm
        )?;
    }
    write!(out, "]}}")?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::EepromImage;

    #[test]
    fn batch_mirrors_the_log_with_fixed_spacing() {
        let mut store = EepromImage::new();
        for cpm in [18, 22, 510] {
            datalog::append(&mut store, cpm).unwrap();
        }
        let batch = batch(&store);
        assert_eq!(batch.len(), 3);
        assert!(batch.iter().all(|r| r.delta_t_s == 600));
        assert_eq!(batch[2].cpm, 510);
    }

    #[test]
    fn batch_holds_records_past_the_full_mark() {
        use crate::config::{ADDR_LOG_CURSOR, LOG_REGION_END, LOG_REGION_START};
        use crate::datalog::{LOG_CAPACITY, RECORD_SIZE};

        // A store written by earlier firmware: valid cursor between the
        // full mark and the region end, more records than the log itself
        // will ever append.
        let mut store = EepromImage::new();
        let cursor = LOG_REGION_END - RECORD_SIZE;
        let count = (cursor - LOG_REGION_START) / RECORD_SIZE;
        for i in 0..count {
            store.write_u32(LOG_REGION_START + i * RECORD_SIZE, i as u32);
        }
        store.write_u32(ADDR_LOG_CURSOR, cursor as u32);

        let batch = batch(&store);
        assert!(count > LOG_CAPACITY);
        assert_eq!(batch.len(), count);
        assert_eq!(batch[count - 1].cpm, (count - 1) as u32);
    }

    #[test]
    fn empty_log_yields_an_empty_updates_array() {
        let store = EepromImage::new();
        let batch = batch(&store);
        let mut json: String<128> = String::new();
        write_bulk_json("KEY", &batch, &mut json).unwrap();
        assert_eq!(json.as_str(), "{\"write_api_key\":\"KEY\",\"updates\":[]}");
    }

    #[test]
    fn renders_thingspeak_bulk_format() {
        let records = [
            UploadRecord {
                delta_t_s: 600,
                cpm: 21,
            },
            UploadRecord {
                delta_t_s: 600,
                cpm: 340,
            },
        ];
        let mut json: String<256> = String::new();
        write_bulk_json("ABC123", &records, &mut json).unwrap();
        assert_eq!(
            json.as_str(),
            "{\"write_api_key\":\"ABC123\",\"updates\":[\
             {\"delta_t\":600,\"field1\":21},\
             {\"delta_t\":600,\"field1\":340}]}"
        );
    }

    #[test]
    fn undersized_buffer_reports_overflow() {
        let records = [UploadRecord {
            delta_t_s: 600,
            cpm: 12345,
        }; 4];
        let mut json: String<32> = String::new();
        assert_eq!(
            write_bulk_json("KEY", &records, &mut json),
            Err(UploadError::BufferFull)
        );
    }
}
