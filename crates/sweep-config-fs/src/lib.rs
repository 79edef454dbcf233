// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `ConfigStore` for Sweep (uses platform config dir).

use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use sweep_app_core::config::{ConfigError, ConfigStore};

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "SWEEP_CONFIG_DIR";

/// Store configs as JSON files under the platform config directory.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Create a store rooted at `$SWEEP_CONFIG_DIR` when set, otherwise the
    /// user config directory (e.g., `~/.config/Sweep`).
    pub fn new() -> Result<Self, ConfigError> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Self::at(PathBuf::from(dir));
        }
        let proj = ProjectDirs::from("dev", "flyingrobots", "Sweep")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Self::at(proj.config_dir().to_path_buf())
    }

    /// Create a store rooted at an explicit directory.
    pub fn at(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    /// Directory holding the JSON files.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }

    /// Delete the stored blob for `key`. Missing files are not an error.
    pub fn remove(&self, key: &str) -> Result<(), ConfigError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::at(dir.path().join("nested")).unwrap();
        assert!(matches!(store.load_raw("prefs"), Err(ConfigError::NotFound)));
    }

    #[test]
    fn save_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::at(dir.path().to_path_buf()).unwrap();
        store.save_raw("prefs", b"{}").unwrap();
        assert_eq!(store.load_raw("prefs").unwrap(), b"{}");
        assert!(dir.path().join("prefs.json").exists());
        store.remove("prefs").unwrap();
        store.remove("prefs").unwrap();
        assert!(matches!(store.load_raw("prefs"), Err(ConfigError::NotFound)));
    }
}
