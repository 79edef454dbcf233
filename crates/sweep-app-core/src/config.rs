// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed JSON documents over a raw blob storage port.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Storage port for raw config blobs (keyed by document name).
pub trait ConfigStore {
    /// Load a raw blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// A persisted document: fixed storage key plus its own validation.
pub trait ConfigDoc: Serialize + DeserializeOwned {
    /// Storage key.
    const KEY: &'static str;

    /// Rejects values that must never be loaded or saved.
    fn check(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Stored game constants are not playable.
    #[error("invalid game config: {0}")]
    Invalid(#[from] sweep_core::ConfigError),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Serializes [`ConfigDoc`]s and delegates storage to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consume the service and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: ConfigStore> ConfigService<S> {
    /// Load and check `T`. Missing or empty blobs read as `Ok(None)`.
    pub fn load<T: ConfigDoc>(&self) -> Result<Option<T>, ConfigError> {
        let bytes = match self.store.load_raw(T::KEY) {
            Ok(bytes) if bytes.is_empty() => return Ok(None),
            Ok(bytes) => bytes,
            Err(ConfigError::NotFound) => return Ok(None),
            Err(e) => return Err(e),
        };
        let doc: T = serde_json::from_slice(&bytes)?;
        doc.check()?;
        Ok(Some(doc))
    }

    /// Like [`ConfigService::load`], with `T::default()` for a missing document.
    pub fn load_or_default<T: ConfigDoc + Default>(&self) -> Result<T, ConfigError> {
        Ok(self.load()?.unwrap_or_default())
    }

    /// Check, serialize and persist `doc`. Nothing is written when the check fails.
    pub fn save<T: ConfigDoc>(&self, doc: &T) -> Result<(), ConfigError> {
        doc.check()?;
        let data = serde_json::to_vec_pretty(doc)?;
        self.store.save_raw(T::KEY, &data)
    }
}
