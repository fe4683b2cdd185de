//! Error type for the file-backed settings store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file
    #[error("failed to read settings file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the settings file
    #[error("failed to write settings file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the parent directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse settings TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize settings TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl SettingsError {
    /// Create a read error for `path`.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SettingsError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write error for `path`.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SettingsError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a directory-creation error for `path`.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SettingsError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn read_file_factory_produces_correct_variant() {
        let err = SettingsError::read_file("/some/path", mock_io_err());
        assert!(
            matches!(err, SettingsError::ReadFile { ref path, .. } if path == std::path::Path::new("/some/path"))
        );
    }

    #[test]
    fn write_file_factory_produces_correct_variant() {
        let err = SettingsError::write_file("/out/path", mock_io_err());
        assert!(
            matches!(err, SettingsError::WriteFile { ref path, .. } if path == std::path::Path::new("/out/path"))
        );
    }

    #[test]
    fn read_file_display_names_the_path() {
        let err = SettingsError::read_file("/a/settings.toml", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to read settings file"), "got: {msg}");
        assert!(msg.contains("/a/settings.toml"), "got: {msg}");
    }

    #[test]
    fn io_variants_expose_their_source() {
        let err = SettingsError::read_file("/x", mock_io_err());
        assert!(err.source().is_some(), "ReadFile must expose I/O source");
        let err = SettingsError::write_file("/x", mock_io_err());
        assert!(err.source().is_some(), "WriteFile must expose I/O source");
    }

    #[test]
    fn toml_parse_converts_via_from() {
        let parse_err = toml::from_str::<crate::PersistentSettings>("version = ")
            .expect_err("incomplete TOML must fail");
        let err = SettingsError::from(parse_err);
        assert!(matches!(err, SettingsError::TomlParse(_)));
    }
}
