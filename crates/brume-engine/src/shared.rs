//! State shared between the audio context and the background context.

use core::sync::atomic::{AtomicBool, Ordering};

/// The only data that crosses the context boundary.
///
/// The audio context (the block scheduler) writes the overdrive flag on a
/// button press and marks the settings dirty; the background context (the
/// settings flusher) takes the dirty flag and reads the value it should
/// persist. Both sides follow a small protocol:
///
/// - writer: store the new value with `Release`, then mark dirty with
///   `Release`;
/// - flusher: `swap` the dirty flag to false with `AcqRel`, then load the
///   value with `Acquire` and build the record from that single load.
///
/// A press landing between the swap and the load is picked up by the load
/// (newest value wins) and costs one redundant save at the next poll. A
/// press landing after the load re-marks dirty and is saved at the next
/// poll. The record is always built from one atomic load, so no torn
/// state is observable.
#[derive(Debug)]
pub struct SharedState {
    overdrive_enabled: AtomicBool,
    settings_dirty: AtomicBool,
}

impl SharedState {
    /// Shared state starting from `overdrive_enabled`, not dirty.
    ///
    /// `const` so firmware can place it in a `static`.
    pub const fn new(overdrive_enabled: bool) -> Self {
        Self {
            overdrive_enabled: AtomicBool::new(overdrive_enabled),
            settings_dirty: AtomicBool::new(false),
        }
    }

    /// Current overdrive flag.
    pub fn overdrive_enabled(&self) -> bool {
        self.overdrive_enabled.load(Ordering::Acquire)
    }

    /// Publish a new overdrive flag. Callers that want it persisted
    /// follow up with [`mark_dirty`](Self::mark_dirty).
    pub fn set_overdrive_enabled(&self, enabled: bool) {
        self.overdrive_enabled.store(enabled, Ordering::Release);
    }

    /// Request a settings save at the next flusher poll. Also used by the
    /// flusher itself to re-arm after a failed write.
    pub fn mark_dirty(&self) {
        self.settings_dirty.store(true, Ordering::Release);
    }

    /// Atomically consume the dirty flag, returning whether it was set.
    pub fn take_dirty(&self) -> bool {
        self.settings_dirty.swap(false, Ordering::AcqRel)
    }

    /// Peek at the dirty flag without consuming it.
    pub fn is_dirty(&self) -> bool {
        self.settings_dirty.load(Ordering::Acquire)
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new(false)
    }
}
