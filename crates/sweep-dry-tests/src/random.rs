// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scripted random source for exact spawn sequences.

use std::collections::VecDeque;

use sweep_core::RandomSource;

/// Unit draw returned once the unit script runs dry. High enough that every
/// default probability roll fails.
pub const DEFAULT_UNIT: f32 = 0.99;

/// [`RandomSource`] that replays queued draws.
///
/// Unit and index draws come from two independent queues. Once a queue is
/// empty, units fall back to [`DEFAULT_UNIT`] and indices to `0`. Index draws
/// are clamped to `len - 1`, so a script written for a larger candidate list
/// still stays in range.
///
/// # Example
///
/// ```
/// use sweep_core::RandomSource;
/// use sweep_dry_tests::ScriptedRandom;
///
/// let mut rng = ScriptedRandom::new().units([0.1]).indices([7]);
/// assert!(rng.chance(0.3));
/// assert_eq!(rng.next_index(3), 2);
/// assert!(!rng.chance(0.3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    units: VecDeque<f32>,
    indices: VecDeque<usize>,
    unit_draws: usize,
    index_draws: usize,
}

impl ScriptedRandom {
    /// Empty script: every roll fails, every index is `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unit draws.
    pub fn units(mut self, units: impl IntoIterator<Item = f32>) -> Self {
        self.units.extend(units);
        self
    }

    /// Append index draws.
    pub fn indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    /// Queue more unit draws on an existing source.
    pub fn push_units(&mut self, units: impl IntoIterator<Item = f32>) {
        self.units.extend(units);
    }

    /// Queue more index draws on an existing source.
    pub fn push_indices(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.indices.extend(indices);
    }

    /// Scripted units not yet consumed.
    pub fn remaining_units(&self) -> usize {
        self.units.len()
    }

    /// Scripted indices not yet consumed.
    pub fn remaining_indices(&self) -> usize {
        self.indices.len()
    }

    /// Total unit draws so far (scripted or default).
    pub fn unit_draws(&self) -> usize {
        self.unit_draws
    }

    /// Total index draws so far (scripted or default).
    pub fn index_draws(&self) -> usize {
        self.index_draws
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        self.unit_draws += 1;
        self.units.pop_front().unwrap_or(DEFAULT_UNIT)
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.index_draws += 1;
        let raw = self.indices.pop_front().unwrap_or(0);
        raw.min(len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_after_script() {
        let mut rng = ScriptedRandom::new().units([0.0]).indices([1]);
        assert!(rng.chance(0.01));
        assert!(!rng.chance(0.5));
        assert_eq!(rng.next_index(4), 1);
        assert_eq!(rng.next_index(4), 0);
        assert_eq!(rng.unit_draws(), 2);
        assert_eq!(rng.index_draws(), 2);
    }
}
