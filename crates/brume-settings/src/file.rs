//! TOML-file settings store for host builds.

use std::path::{Path, PathBuf};

use crate::error::SettingsError;
use crate::record::{PersistentSettings, RECORD_LEN};
use crate::store::SettingsStore;

/// Settings persisted as a small TOML file.
///
/// Host sessions use this in place of the hardware storage slot so the
/// overdrive mode survives across runs. The file holds the decoded form:
///
/// ```toml
/// version = 1
/// overdrive_enabled = true
/// ```
///
/// Through the [`SettingsStore`] trait the file behaves exactly like the
/// fixed record slot: unreadable or unparseable files fail the read, and
/// version gating stays with [`PersistentSettings::load`]. The inherent
/// [`read`](Self::read) and [`write`](Self::write) methods surface the
/// underlying errors for callers that want to report them.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// A store over `path`. No I/O happens until the first read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the settings file currently exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Parse the settings file as found, version included.
    pub fn read(&self) -> Result<PersistentSettings, SettingsError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| SettingsError::read_file(&self.path, e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Serialize `settings` to the file, creating parent directories.
    pub fn write(&self, settings: &PersistentSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::create_dir(parent, e))?;
        }
        let content = toml::to_string_pretty(settings)?;
        std::fs::write(&self.path, content).map_err(|e| SettingsError::write_file(&self.path, e))
    }
}

impl SettingsStore for FileStore {
    fn read_record(&mut self, buf: &mut [u8; RECORD_LEN]) -> bool {
        match self.read() {
            Ok(settings) => {
                *buf = settings.encode();
                true
            }
            Err(_) => false,
        }
    }

    fn write_record(&mut self, buf: &[u8; RECORD_LEN]) -> bool {
        match PersistentSettings::decode(buf) {
            Some(settings) => self.write(&settings).is_ok(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_fails_record_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("absent.toml"));
        let mut buf = [0u8; RECORD_LEN];
        assert!(!store.read_record(&mut buf));
        assert!(!store.exists());
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested/deeper/settings.toml"));
        store.write(&PersistentSettings::default()).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn garbage_record_bytes_are_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("settings.toml"));
        assert!(!store.write_record(&[0xFF; RECORD_LEN]));
        assert!(!store.exists());
    }
}
