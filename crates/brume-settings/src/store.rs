//! Storage abstraction over the fixed settings slot.

use crate::record::RECORD_LEN;

/// A fixed-size storage slot for the encoded settings record.
///
/// Implementations cover whatever medium holds the record: a reserved
/// flash page on hardware, a file on a host, an array in tests. The
/// methods return plain booleans rather than `Result`: a failed read is
/// indistinguishable from a record that will not validate (the caller
/// falls back to defaults either way), and a failed write just leaves
/// the record dirty for a later retry.
pub trait SettingsStore {
    /// Fill `buf` with the stored record. Returns `false` when nothing
    /// valid could be read; `buf` contents are then unspecified.
    fn read_record(&mut self, buf: &mut [u8; RECORD_LEN]) -> bool;

    /// Persist `buf` as the new record. Returns `false` when the write
    /// did not complete; the previous record may or may not survive.
    fn write_record(&mut self, buf: &[u8; RECORD_LEN]) -> bool;
}

/// Array-backed store for tests and host-side simulation.
///
/// Starts empty (reads fail, like a never-written slot). Tests can
/// pre-seed arbitrary bytes to simulate stale or corrupt records and
/// force write failures to exercise retry paths.
#[derive(Debug, Default)]
pub struct MemStore {
    record: Option<[u8; RECORD_LEN]>,
    fail_writes: bool,
    writes: usize,
}

impl MemStore {
    /// An empty store; the first read fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with raw bytes, valid or not.
    pub fn with_raw(record: [u8; RECORD_LEN]) -> Self {
        Self {
            record: Some(record),
            ..Self::default()
        }
    }

    /// Make subsequent writes report failure without touching the slot.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// The last successfully written record, if any.
    pub fn raw(&self) -> Option<[u8; RECORD_LEN]> {
        self.record
    }
}

impl SettingsStore for MemStore {
    fn read_record(&mut self, buf: &mut [u8; RECORD_LEN]) -> bool {
        match self.record {
            Some(record) => {
                buf.copy_from_slice(&record);
                true
            }
            None => false,
        }
    }

    fn write_record(&mut self, buf: &[u8; RECORD_LEN]) -> bool {
        if self.fail_writes {
            return false;
        }
        self.record = Some(*buf);
        self.writes += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_fails_reads() {
        let mut store = MemStore::new();
        let mut buf = [0u8; RECORD_LEN];
        assert!(!store.read_record(&mut buf));
    }

    #[test]
    fn write_then_read_round_trips() {
        let mut store = MemStore::new();
        let record = [1, 2, 3, 4, 5, 6, 7, 8];
        assert!(store.write_record(&record));
        let mut buf = [0u8; RECORD_LEN];
        assert!(store.read_record(&mut buf));
        assert_eq!(buf, record);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn failed_write_leaves_slot_untouched() {
        let mut store = MemStore::with_raw([9; RECORD_LEN]);
        store.set_fail_writes(true);
        assert!(!store.write_record(&[1; RECORD_LEN]));
        assert_eq!(store.raw(), Some([9; RECORD_LEN]));
        assert_eq!(store.writes(), 0);
    }
}
