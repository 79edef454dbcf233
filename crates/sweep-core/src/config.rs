// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Game tuning constants.
use std::time::Duration;

use thiserror::Error;

/// Largest accepted grid side length.
pub const MAX_GRID_SIZE: u16 = 64;

/// Error returned by [`GameConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The grid must have at least one cell.
    #[error("grid size must be at least 1")]
    EmptyGrid,
    /// The grid side length exceeds [`MAX_GRID_SIZE`].
    #[error("grid size must be at most {max}, got {0}", max = MAX_GRID_SIZE)]
    GridTooLarge(u16),
    /// A probability lies outside `[0, 1]`.
    #[error("{name} must be within [0, 1], got {value}")]
    Probability {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f32,
    },
    /// The interval floor is above the starting interval (or zero).
    #[error("spawn interval floor {min_ms}ms must be in 1..={initial_ms}ms")]
    IntervalBounds {
        /// Starting interval.
        initial_ms: u64,
        /// Floor.
        min_ms: u64,
    },
    /// The score divisor for interval decay must be positive.
    #[error("interval decay divisor must be positive")]
    ZeroDecayDivisor,
    /// The system log must keep at least one message.
    #[error("log capacity must be at least 1")]
    ZeroLogCapacity,
}

/// Tunable constants for a session.
///
/// Defaults reproduce the classic 6×6 board.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Side length of the square grid.
    pub grid_size: u16,
    /// Spawn interval at score 0, in milliseconds.
    pub initial_spawn_interval_ms: u64,
    /// Lower bound of the spawn interval, in milliseconds.
    pub min_spawn_interval_ms: u64,
    /// The interval shrinks by `score / interval_decay_divisor` milliseconds.
    pub interval_decay_divisor: u64,
    /// Probability that a new object is born a root.
    pub root_probability: f32,
    /// Probability of one extra random reference per spawn.
    pub cross_edge_probability: f32,
    /// Probability of demoting a root per spawn.
    pub scope_exit_probability: f32,
    /// Scope exit only happens when strictly more roots than this exist.
    pub scope_exit_min_roots: usize,
    /// Score awarded per reclaimed object.
    pub delete_reward: u64,
    /// Cosmetic KB per score point and per cell.
    pub kb_per_unit: u64,
    /// Messages retained by the system log.
    pub log_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 6,
            initial_spawn_interval_ms: 2000,
            min_spawn_interval_ms: 500,
            interval_decay_divisor: 10,
            root_probability: 0.3,
            cross_edge_probability: 0.4,
            scope_exit_probability: 0.3,
            scope_exit_min_roots: 2,
            delete_reward: 100,
            kb_per_unit: 64,
            log_capacity: 5,
        }
    }
}

impl GameConfig {
    /// Number of cells (`grid_size²`).
    pub fn capacity(&self) -> usize {
        usize::from(self.grid_size) * usize::from(self.grid_size)
    }

    /// Spawn interval for a given score: linear decay clamped to the floor.
    pub fn spawn_interval(&self, score: u64) -> Duration {
        let decay = score / self.interval_decay_divisor.max(1);
        let ms = self
            .initial_spawn_interval_ms
            .saturating_sub(decay)
            .max(self.min_spawn_interval_ms);
        Duration::from_millis(ms)
    }

    /// Displayed heap size in KB.
    pub fn heap_size_kb(&self) -> u64 {
        self.capacity() as u64 * self.kb_per_unit
    }

    /// Checks that the constants describe a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge(self.grid_size));
        }
        for (name, value) in [
            ("root_probability", self.root_probability),
            ("cross_edge_probability", self.cross_edge_probability),
            ("scope_exit_probability", self.scope_exit_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }
        if self.min_spawn_interval_ms == 0
            || self.min_spawn_interval_ms > self.initial_spawn_interval_ms
        {
            return Err(ConfigError::IntervalBounds {
                initial_ms: self.initial_spawn_interval_ms,
                min_ms: self.min_spawn_interval_ms,
            });
        }
        if self.interval_decay_divisor == 0 {
            return Err(ConfigError::ZeroDecayDivisor);
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }
        Ok(())
    }
}
