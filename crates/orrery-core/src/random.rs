// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic random source behind every `random*` factory.
//!
//! Each thread owns an independent `xoroshiro128+` generator seeded with
//! [`DEFAULT_SEED`]. Call [`reseed`] to make a thread's sequence
//! reproducible; nothing else shares state, so concurrent callers never
//! coordinate.

use std::cell::RefCell;

/// Seed every thread starts from until [`reseed`] is called.
pub const DEFAULT_SEED: u64 = 0x6f72_7265_7279_0001;

thread_local! {
    static SOURCE: RefCell<Prng> = RefCell::new(Prng::from_seed_u64(DEFAULT_SEED));
}

/// Stateful `xoroshiro128+` pseudo-random number generator.
///
/// * Not cryptographically secure; use only for sampling test geometry and
///   procedural placement.
/// * Matching seeds yield identical sequences across supported platforms.
#[derive(Debug, Clone, Copy)]
pub struct Prng {
    state: [u64; 2],
}

impl Prng {
    /// Constructs a PRNG from two 64-bit seeds.
    ///
    /// An all-zero state would lock the generator at zero, so it is replaced
    /// by a fixed non-zero constant.
    pub fn from_seed(seed0: u64, seed1: u64) -> Self {
        let mut state = [seed0, seed1];
        if state[0] == 0 && state[1] == 0 {
            state[0] = 0x9e37_79b9_7f4a_7c15;
        }
        Self { state }
    }

    /// Constructs a PRNG from a single 64-bit seed via SplitMix64 expansion.
    pub fn from_seed_u64(seed: u64) -> Self {
        fn splitmix64(state: &mut u64) -> u64 {
            *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = *state;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            z ^ (z >> 31)
        }

        let mut sm_state = seed;
        Self::from_seed(splitmix64(&mut sm_state), splitmix64(&mut sm_state))
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

    /// Returns the next float in `[0, 1)`.
    ///
    /// Uses the high 23 bits of the state to fill the mantissa, giving
    /// uniform float32 sampling without relying on platform RNGs.
    pub fn next_f32(&mut self) -> f32 {
        let raw = self.next_u64();
        let bits = ((raw >> 41) as u32) | 0x3f80_0000;
        f32::from_bits(bits) - 1.0
    }

    /// Returns the next float in `[min, max)`.
    ///
    /// Reversed bounds are allowed and sample the same interval.
    pub fn next_f32_in(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }
}

/// Re-seeds the calling thread's generator.
pub fn reseed(seed: u64) {
    SOURCE.with(|source| *source.borrow_mut() = Prng::from_seed_u64(seed));
}

/// Draws a float in `[0, 1)` from the calling thread's generator.
pub fn next_f32() -> f32 {
    SOURCE.with(|source| source.borrow_mut().next_f32())
}

/// Draws a float in `[min, max)` from the calling thread's generator.
pub fn next_f32_in(min: f32, max: f32) -> f32 {
    SOURCE.with(|source| source.borrow_mut().next_f32_in(min, max))
}

/// Draws a float in `[-1, 1)`.
pub fn next_signed_unit() -> f32 {
    next_f32_in(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seeds_do_not_lock_the_generator() {
        let mut prng = Prng::from_seed(0, 0);
        let draws: Vec<f32> = (0..4).map(|_| prng.next_f32()).collect();
        assert!(draws.iter().any(|v| *v != 0.0));
    }

    #[test]
    fn matching_seeds_produce_matching_sequences() {
        let mut a = Prng::from_seed_u64(42);
        let mut b = Prng::from_seed_u64(42);
        for _ in 0..16 {
            assert_eq!(a.next_f32().to_bits(), b.next_f32().to_bits());
        }
    }

    #[test]
    fn next_f32_in_stays_within_bounds() {
        let mut prng = Prng::from_seed(123, 456);
        for _ in 0..1_000 {
            let v = prng.next_f32_in(-3.0, 5.0);
            assert!((-3.0..5.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn reseed_replays_the_thread_sequence() {
        reseed(7);
        let first: Vec<f32> = (0..5).map(|_| next_f32()).collect();
        reseed(7);
        let second: Vec<f32> = (0..5).map(|_| next_f32()).collect();
        assert_eq!(first, second);
    }
}
