//! Deterministic PRNG for reproducible drop placement and palette picks.
//!
//! Xorshift64 with the standard (13, 7, 17) shift parameters. Same seed,
//! same sequence, on every platform; the simulation driver and the tests
//! rely on this to replay identical marbling runs. Not used inside the
//! deformation math itself, which samples a stateless noise field instead.

use serde::{Deserialize, Serialize};

/// Xorshift64 deterministic PRNG.
///
/// A seed of 0 is replaced with a fixed non-zero fallback, since the
/// all-zeros state is a fixed point of the xorshift step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

    /// Creates a new PRNG with the given seed (0 is replaced with a
    /// non-zero fallback).
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Returns a uniformly distributed f64 in [0, 1), using the upper
    /// 53 bits for full mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a uniformly distributed index in [0, len).
    ///
    /// # Panics
    ///
    /// Panics if `len` is 0.
    pub fn next_index(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_value_for_seed_42() {
        // Pin the algorithm: xorshift64 with shifts (13, 7, 17). If this
        // breaks, every seeded simulation replays differently.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_is_replaced() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift64::new(7);
        let mut b = Xorshift64::new(7);
        for i in 0..500 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at {i}");
        }
    }

    #[test]
    fn serde_round_trip_preserves_mid_stream_state() {
        let mut rng = Xorshift64::new(99);
        for _ in 0..25 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for _ in 0..50 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }

    #[test]
    fn next_index_covers_small_range() {
        let mut rng = Xorshift64::new(5);
        let mut seen = [false; 5];
        for _ in 0..200 {
            seen[rng.next_index(5)] = true;
        }
        assert!(seen.iter().all(|&s| s), "some indices never drawn: {seen:?}");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v));
                }
            }

            #[test]
            fn next_range_in_bounds(seed: u64, min in -1e3_f64..1e3, span in 0.1_f64..1e3) {
                let max = min + span;
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_range(min, max);
                    prop_assert!(v >= min && v < max);
                }
            }

            #[test]
            fn next_index_below_len(seed: u64, len in 1_usize..10_000) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    prop_assert!(rng.next_index(len) < len);
                }
            }
        }
    }
}
