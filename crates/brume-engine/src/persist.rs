//! Background persistence of the settings record.

use brume_settings::{PersistentSettings, SettingsStore, SETTINGS_VERSION};

use crate::shared::SharedState;

/// Default milliseconds between dirty-flag checks.
pub const FLUSH_INTERVAL_MS: u64 = 250;

/// What a single [`SettingsFlusher::poll`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Not due yet; nothing was checked.
    Idle,
    /// Due, but the settings were not dirty.
    Clean,
    /// A record was written.
    Saved,
    /// A write was attempted and failed; the dirty flag is re-armed.
    Failed,
}

/// Poll-driven writer for the settings record.
///
/// The flusher owns the store and runs outside the audio context. It is
/// clocked by the caller: hand it a monotonic millisecond timestamp and
/// it decides whether a check is due. That keeps it agnostic about its
/// host - a superloop on hardware, a thread on a host, or a sample-clock
/// driven loop in tests and offline rendering.
///
/// Saves are never immediate. A mode change marks the shared state dirty
/// and the record is written at the next due poll, so a player stepping
/// repeatedly on the button costs at most one write per interval.
#[derive(Debug)]
pub struct SettingsFlusher<S: SettingsStore> {
    store: S,
    interval_ms: u64,
    next_due_ms: u64,
}

impl<S: SettingsStore> SettingsFlusher<S> {
    /// A flusher over `store` with the default interval. The first check
    /// is due one full interval after construction.
    pub fn new(store: S) -> Self {
        Self::with_interval_ms(store, FLUSH_INTERVAL_MS)
    }

    /// A flusher with a custom interval, for tests and hosts with other
    /// cadences. An interval of zero checks on every poll.
    pub fn with_interval_ms(store: S, interval_ms: u64) -> Self {
        Self {
            store,
            interval_ms,
            next_due_ms: interval_ms,
        }
    }

    /// Run one poll at monotonic time `now_ms`.
    ///
    /// When due, consumes the dirty flag and writes a record built from a
    /// single load of the shared value. A failed write re-marks dirty so
    /// the next poll retries; nothing is lost, only delayed.
    pub fn poll(&mut self, now_ms: u64, shared: &SharedState) -> FlushOutcome {
        if now_ms < self.next_due_ms {
            return FlushOutcome::Idle;
        }
        self.next_due_ms = now_ms.saturating_add(self.interval_ms);
        self.flush_now(shared)
    }

    /// Check and save immediately, ignoring the schedule. Hosts call this
    /// on session teardown so the last press is not lost to the interval.
    pub fn flush_now(&mut self, shared: &SharedState) -> FlushOutcome {
        if !shared.take_dirty() {
            return FlushOutcome::Clean;
        }

        let record = PersistentSettings {
            version: SETTINGS_VERSION,
            overdrive_enabled: shared.overdrive_enabled(),
        };
        if record.save(&mut self.store) {
            FlushOutcome::Saved
        } else {
            shared.mark_dirty();
            FlushOutcome::Failed
        }
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The wrapped store, mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the flusher, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brume_settings::MemStore;

    #[test]
    fn first_check_waits_one_full_interval() {
        let shared = SharedState::new(false);
        shared.mark_dirty();
        let mut flusher = SettingsFlusher::new(MemStore::new());

        assert_eq!(flusher.poll(0, &shared), FlushOutcome::Idle);
        assert_eq!(flusher.poll(FLUSH_INTERVAL_MS - 1, &shared), FlushOutcome::Idle);
        assert_eq!(flusher.poll(FLUSH_INTERVAL_MS, &shared), FlushOutcome::Saved);
        assert_eq!(flusher.store().writes(), 1);
    }

    #[test]
    fn quiescent_polls_stay_clean() {
        let shared = SharedState::new(false);
        let mut flusher = SettingsFlusher::new(MemStore::new());

        assert_eq!(flusher.poll(250, &shared), FlushOutcome::Clean);
        assert_eq!(flusher.poll(500, &shared), FlushOutcome::Clean);
        assert_eq!(flusher.store().writes(), 0);
    }

    #[test]
    fn saved_record_carries_the_shared_value() {
        let shared = SharedState::new(false);
        shared.set_overdrive_enabled(true);
        shared.mark_dirty();
        let mut flusher = SettingsFlusher::new(MemStore::new());

        assert_eq!(flusher.poll(250, &shared), FlushOutcome::Saved);
        let raw = flusher.store().raw().expect("record written");
        let record = PersistentSettings::decode(&raw).expect("record decodes");
        assert!(record.overdrive_enabled);
        assert_eq!(record.version, SETTINGS_VERSION);
    }

    #[test]
    fn failed_write_rearms_and_retries() {
        let shared = SharedState::new(true);
        shared.mark_dirty();
        let mut store = MemStore::new();
        store.set_fail_writes(true);
        let mut flusher = SettingsFlusher::new(store);

        assert_eq!(flusher.poll(250, &shared), FlushOutcome::Failed);
        assert!(shared.is_dirty(), "failed write must re-arm the dirty flag");

        flusher.store_mut().set_fail_writes(false);
        assert_eq!(flusher.poll(500, &shared), FlushOutcome::Saved);
        assert!(!shared.is_dirty());
    }

    #[test]
    fn repeated_presses_within_an_interval_cost_one_write() {
        let shared = SharedState::new(false);
        let mut flusher = SettingsFlusher::new(MemStore::new());

        for _ in 0..5 {
            shared.set_overdrive_enabled(!shared.overdrive_enabled());
            shared.mark_dirty();
        }
        assert_eq!(flusher.poll(250, &shared), FlushOutcome::Saved);
        assert_eq!(flusher.store().writes(), 1);

        // The written record reflects the newest value, not the first.
        let raw = flusher.store().raw().expect("record written");
        let record = PersistentSettings::decode(&raw).expect("record decodes");
        assert!(record.overdrive_enabled);
    }

    #[test]
    fn flush_now_ignores_the_schedule() {
        let shared = SharedState::new(true);
        shared.mark_dirty();
        let mut flusher = SettingsFlusher::new(MemStore::new());

        assert_eq!(flusher.poll(0, &shared), FlushOutcome::Idle);
        assert_eq!(flusher.flush_now(&shared), FlushOutcome::Saved);
        assert_eq!(flusher.flush_now(&shared), FlushOutcome::Clean);
    }

    #[test]
    fn zero_interval_checks_every_poll() {
        let shared = SharedState::new(false);
        let mut flusher = SettingsFlusher::with_interval_ms(MemStore::new(), 0);

        assert_eq!(flusher.poll(0, &shared), FlushOutcome::Clean);
        shared.mark_dirty();
        assert_eq!(flusher.poll(0, &shared), FlushOutcome::Saved);
    }
}
