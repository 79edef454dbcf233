// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without filesystem I/O.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use sweep_app_core::config::{ConfigError, ConfigStore};
use sweep_app_core::prefs::{SessionPrefs, SESSION_PREFS_KEY};

/// Which store operations should fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailOn {
    /// Fail every `load_raw`.
    pub load: bool,
    /// Fail every `save_raw` (nothing is written).
    pub save: bool,
}

/// Shared-state [`ConfigStore`] fake.
///
/// Clones see the same blobs, counters and failure switches, so a test can
/// hand one clone to a `ConfigService` and inspect the other.
///
/// # Example
///
/// ```
/// use sweep_app_core::config::ConfigService;
/// use sweep_app_core::prefs::{PrefsPort, SessionPrefs};
/// use sweep_dry_tests::InMemoryConfigStore;
///
/// let store = InMemoryConfigStore::new();
/// let service = ConfigService::new(store.clone());
///
/// service.save_prefs(&SessionPrefs::default()).unwrap();
/// assert_eq!(store.load_count(), 0);
/// assert_eq!(store.save_count(), 1);
/// assert_eq!(store.saved_prefs(), Some(SessionPrefs::default()));
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    blobs: BTreeMap<String, Vec<u8>>,
    loads: usize,
    saves: usize,
    fail: FailOn,
}

impl InMemoryConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding one raw blob (use for malformed or partial JSON).
    pub fn with_entry(key: &str, data: &[u8]) -> Self {
        let store = Self::new();
        store.state().blobs.insert(key.to_owned(), data.to_vec());
        store
    }

    /// Store already holding `prefs` under the session prefs key.
    pub fn with_prefs(prefs: &SessionPrefs) -> Self {
        // SessionPrefs is plain data; encoding cannot fail.
        let data = serde_json::to_vec(prefs).unwrap_or_default();
        Self::with_entry(SESSION_PREFS_KEY, &data)
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Switch simulated failures on or off.
    pub fn fail_on(&self, fail: FailOn) {
        self.state().fail = fail;
    }

    /// `load_raw` attempts, failed ones included.
    pub fn load_count(&self) -> usize {
        self.state().loads
    }

    /// `save_raw` attempts, failed ones included.
    pub fn save_count(&self) -> usize {
        self.state().saves
    }

    /// Whether a blob exists for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.state().blobs.contains_key(key)
    }

    /// Decodes the stored session prefs without touching the counters.
    pub fn saved_prefs(&self) -> Option<SessionPrefs> {
        let state = self.state();
        let blob = state.blobs.get(SESSION_PREFS_KEY)?;
        serde_json::from_slice(blob).ok()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut state = self.state();
        state.loads += 1;
        if state.fail.load {
            return Err(ConfigError::Other(format!("simulated load failure for {key}")));
        }
        state.blobs.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut state = self.state();
        state.saves += 1;
        if state.fail.save {
            return Err(ConfigError::Other(format!("simulated save failure for {key}")));
        }
        state.blobs.insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}
