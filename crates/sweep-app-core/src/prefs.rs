// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted session preferences: game constants, seed, autopilot.

use serde::{Deserialize, Serialize};
use sweep_core::GameConfig;

use crate::config::{ConfigDoc, ConfigError, ConfigService, ConfigStore};

/// Storage key for [`SessionPrefs`].
pub const SESSION_PREFS_KEY: &str = "session_prefs";

/// Saved preferences for starting a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionPrefs {
    /// Game constants.
    pub game: GameConfig,
    /// Fixed PRNG seed; `None` picks a fresh one per session.
    pub seed: Option<u64>,
    /// Let the built-in collector play.
    pub autopilot: bool,
}

impl ConfigDoc for SessionPrefs {
    const KEY: &'static str = SESSION_PREFS_KEY;

    fn check(&self) -> Result<(), ConfigError> {
        Ok(self.game.validate()?)
    }
}

/// Config-facing port for loading/saving session preferences.
pub trait PrefsPort {
    /// Load preferences. `Ok(None)` when nothing was saved yet.
    fn load_prefs(&self) -> Result<Option<SessionPrefs>, ConfigError>;
    /// Persist preferences.
    fn save_prefs(&self, prefs: &SessionPrefs) -> Result<(), ConfigError>;
}

impl<S: ConfigStore> PrefsPort for ConfigService<S> {
    fn load_prefs(&self) -> Result<Option<SessionPrefs>, ConfigError> {
        self.load()
    }

    fn save_prefs(&self, prefs: &SessionPrefs) -> Result<(), ConfigError> {
        self.save(prefs)
    }
}
