//! Persistent settings for the brume texture processor.
//!
//! The device remembers one thing across power cycles: whether the
//! overdrive stage is engaged. This crate owns that record end to end -
//! the versioned 8-byte wire layout, the [`SettingsStore`] trait over
//! whatever medium holds it, and host-side backends.
//!
//! # Versioning
//!
//! The record carries a magic marker and a schema version. Loading is
//! all-or-nothing: any mismatch discards the stored record whole and the
//! built-in default applies. There is deliberately no field migration;
//! the record is small enough that losing it costs one button press.
//!
//! # Stores
//!
//! - Hardware implements [`SettingsStore`] over its reserved flash slot
//!   (outside this crate).
//! - [`MemStore`] backs tests and can simulate stale records and failed
//!   writes.
//! - [`FileStore`] (std) keeps the decoded record in a TOML file so host
//!   sessions persist the mode across runs.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod record;
pub mod store;

#[cfg(feature = "std")]
pub mod error;
#[cfg(feature = "std")]
pub mod file;

pub use record::{PersistentSettings, RECORD_LEN, SETTINGS_MAGIC, SETTINGS_VERSION};
pub use store::{MemStore, SettingsStore};

#[cfg(feature = "std")]
pub use error::SettingsError;
#[cfg(feature = "std")]
pub use file::FileStore;
