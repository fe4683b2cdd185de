//! The fixed-layout settings record and its codec.

use crate::store::SettingsStore;

/// Two-byte marker identifying a brume settings record ("BR", little-endian).
pub const SETTINGS_MAGIC: u16 = 0x4252;

/// Current schema version. Bump on any layout or meaning change; old
/// records are then ignored in full rather than migrated.
pub const SETTINGS_VERSION: u16 = 1;

/// Size of the encoded record in bytes.
pub const RECORD_LEN: usize = 8;

/// User settings that survive power cycles.
///
/// The encoded form is an 8-byte little-endian record:
///
/// | bytes | field               |
/// |-------|---------------------|
/// | 0..2  | magic (`0x4252`)    |
/// | 2..4  | schema version      |
/// | 4     | overdrive enabled   |
/// | 5..8  | reserved, zero      |
///
/// Loading is all-or-nothing: a record with the wrong magic or a version
/// other than [`SETTINGS_VERSION`] is discarded whole and the caller's
/// default takes its place. There is no field-level migration.
///
/// ```
/// use brume_settings::{MemStore, PersistentSettings};
///
/// let mut store = MemStore::new();
/// let settings = PersistentSettings {
///     overdrive_enabled: true,
///     ..PersistentSettings::default()
/// };
/// assert!(settings.save(&mut store));
///
/// let loaded = PersistentSettings::load(&mut store, PersistentSettings::default());
/// assert!(loaded.overdrive_enabled);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PersistentSettings {
    /// Schema version the record was written under.
    #[cfg_attr(feature = "std", serde(default = "default_version"))]
    pub version: u16,
    /// Whether the overdrive stage engages in the effect chain.
    #[cfg_attr(feature = "std", serde(default))]
    pub overdrive_enabled: bool,
}

#[cfg(feature = "std")]
fn default_version() -> u16 {
    SETTINGS_VERSION
}

impl Default for PersistentSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            overdrive_enabled: false,
        }
    }
}

impl PersistentSettings {
    /// Whether this record carries the current schema version.
    pub fn is_current(&self) -> bool {
        self.version == SETTINGS_VERSION
    }

    /// Encode into the fixed 8-byte record. Reserved bytes are zeroed.
    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut buf = [0u8; RECORD_LEN];
        buf[0..2].copy_from_slice(&SETTINGS_MAGIC.to_le_bytes());
        buf[2..4].copy_from_slice(&self.version.to_le_bytes());
        buf[4] = u8::from(self.overdrive_enabled);
        buf
    }

    /// Decode a record, returning `None` when the magic does not match.
    ///
    /// The version is passed through as found; callers that require the
    /// current schema gate on [`is_current`](Self::is_current) (which is
    /// what [`load`](Self::load) does).
    pub fn decode(buf: &[u8; RECORD_LEN]) -> Option<Self> {
        let magic = u16::from_le_bytes([buf[0], buf[1]]);
        if magic != SETTINGS_MAGIC {
            return None;
        }
        Some(Self {
            version: u16::from_le_bytes([buf[2], buf[3]]),
            overdrive_enabled: buf[4] != 0,
        })
    }

    /// Read the stored record, falling back to `default` whole when the
    /// read fails, the magic is absent, or the version is not current.
    pub fn load<S: SettingsStore>(store: &mut S, default: Self) -> Self {
        let mut buf = [0u8; RECORD_LEN];
        if !store.read_record(&mut buf) {
            return default;
        }
        match Self::decode(&buf) {
            Some(record) if record.is_current() => record,
            _ => default,
        }
    }

    /// Encode and write the full record. Returns the store's verdict;
    /// callers keep their dirty flag set on `false` and retry later.
    pub fn save<S: SettingsStore>(&self, store: &mut S) -> bool {
        store.write_record(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_produces_documented_layout() {
        let settings = PersistentSettings {
            version: 1,
            overdrive_enabled: true,
        };
        assert_eq!(settings.encode(), [0x52, 0x42, 0x01, 0x00, 0x01, 0, 0, 0]);
    }

    #[test]
    fn decode_inverts_encode() {
        let settings = PersistentSettings {
            version: 3,
            overdrive_enabled: true,
        };
        assert_eq!(PersistentSettings::decode(&settings.encode()), Some(settings));
    }

    #[test]
    fn decode_rejects_foreign_magic() {
        let mut buf = PersistentSettings::default().encode();
        buf[0] ^= 0xFF;
        assert_eq!(PersistentSettings::decode(&buf), None);
    }

    #[test]
    fn erased_flash_pattern_does_not_decode() {
        assert_eq!(PersistentSettings::decode(&[0xFF; RECORD_LEN]), None);
    }

    #[test]
    fn reserved_bytes_do_not_affect_decode() {
        let mut buf = PersistentSettings::default().encode();
        buf[5] = 0xAA;
        buf[7] = 0x55;
        let decoded = PersistentSettings::decode(&buf);
        assert_eq!(decoded, Some(PersistentSettings::default()));
    }

    #[test]
    fn default_is_current_with_overdrive_off() {
        let settings = PersistentSettings::default();
        assert!(settings.is_current());
        assert!(!settings.overdrive_enabled);
    }
}
