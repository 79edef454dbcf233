// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use super::RandomSource;

/// Stateful `xoroshiro128+` pseudo-random number generator for replayable
/// sessions.
///
/// * Not cryptographically secure; gameplay only.
/// * Matching seeds yield identical spawn sequences across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prng {
    state: [u64; 2],
}

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

impl Prng {
    /// Constructs a PRNG from a single 64-bit seed via SplitMix64 expansion.
    pub fn from_seed_u64(seed: u64) -> Self {
        fn splitmix64(state: &mut u64) -> u64 {
            *state = state.wrapping_add(GOLDEN_GAMMA);
            let mut z = *state;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            z ^ (z >> 31)
        }

        let mut sm_state = seed;
        let mut state = [splitmix64(&mut sm_state), splitmix64(&mut sm_state)];
        // All-zero state is a fixed point of xoroshiro.
        if state == [0, 0] {
            state[0] = GOLDEN_GAMMA;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(55) ^ s1 ^ (s1 << 14);
        self.state[1] = s1.rotate_left(36);

        result
    }
}

impl RandomSource for Prng {
    /// Uses the high 23 bits of the output to fill an `f32` mantissa.
    fn next_unit(&mut self) -> f32 {
        let raw = self.next_u64();
        #[allow(clippy::cast_possible_truncation)]
        let bits = ((raw >> 41) as u32) | 0x3f80_0000;
        f32::from_bits(bits) - 1.0
    }

    /// Rejection sampling keeps every index equally likely (no modulo bias).
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "next_index called with empty range");
        let span = len.max(1) as u64;
        if span == 1 {
            return 0;
        }
        let value = if span.is_power_of_two() {
            self.next_u64() & (span - 1)
        } else {
            let bound = u64::MAX - u64::MAX % span;
            loop {
                let candidate = self.next_u64();
                if candidate < bound {
                    break candidate % span;
                }
            }
        };
        usize::try_from(value).unwrap_or(0)
    }
}
