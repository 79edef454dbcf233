// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Randomness for the mutation engine.
//!
//! Spawn content is random, but the core never reaches for a platform RNG:
//! every draw goes through [`RandomSource`] so a session can be replayed from
//! a seed and tests can script exact sequences.

mod prng;

pub use prng::Prng;

/// Source of uniform random draws consumed by the mutation engine.
pub trait RandomSource {
    /// Returns the next float in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// Returns the next index in `[0, len)`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize;

    /// Rolls a Bernoulli trial: `true` when the next unit draw is below
    /// `probability`.
    fn chance(&mut self, probability: f32) -> bool {
        self.next_unit() < probability
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }

    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }

    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}
