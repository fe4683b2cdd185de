//! Per-block engine for the brume texture processor.
//!
//! This crate ties the other brume crates together into the loop the
//! hardware actually runs: debounce the switches, sample and map the
//! panel controls, render one audio block through the texture chain, and
//! emit a diagnostic line. Around that loop it provides the two pieces
//! of plumbing the firmware shares with host builds - the atomic
//! [`SharedState`] crossing between the audio and background contexts,
//! and the poll-driven [`SettingsFlusher`] that persists mode changes.
//!
//! # Contexts
//!
//! Two execution contexts exist and [`SharedState`] is the only data
//! crossing between them:
//!
//! - the **audio context** runs [`BlockEngine::process_block`] once per
//!   driver callback and never blocks or allocates;
//! - the **background context** runs [`SettingsFlusher::poll`] on a
//!   millisecond clock and owns the settings store.
//!
//! # Hardware seam
//!
//! Platform crates implement [`ControlIo`](brume_controls::ControlIo)
//! over their ADCs and GPIOs, [`SettingsStore`](brume_settings::SettingsStore)
//! over their flash slot, and [`DiagSink`] over their transport. Host
//! code uses the same traits with scripted controls and files, so every
//! behavior here is testable off-target.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod diag;
pub mod persist;
pub mod scheduler;
pub mod shared;

pub use diag::{DiagSink, NullDiag};
pub use persist::{FlushOutcome, SettingsFlusher, FLUSH_INTERVAL_MS};
pub use scheduler::{BlockEngine, EngineConfig};
pub use shared::SharedState;

#[cfg(feature = "std")]
pub use diag::BufferDiag;
