//! Deterministic randomness.
//!
//! Nothing here reads ambient state: every value is a pure function of an
//! explicit seed, so a puzzle can be regenerated identically anywhere.

use std::ops::RangeInclusive;

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use sha2::{Digest, Sha256};

use crate::PuzzleDate;

/// Seed for [`pseudo_random()`].
pub type Seed = u64;

/// Returns a pseudorandom number in the half-open interval `[0, 1)`.
///
/// This is the fractional part of `sin(seed) * 10000`. It is not
/// cryptographically secure, and it isn't meant to be.
///
/// **Changing this will change every puzzle.**
pub fn pseudo_random(seed: Seed) -> f64 {
    let x = (seed as f64).sin() * 10_000.0;
    let ret = x - x.floor();
    // `x - x.floor()` rounds up to exactly 1 for tiny negative `x`.
    if ret < 1.0 { ret } else { 0.0 }
}

/// Returns a pseudorandom index less than `len`.
///
/// # Panics
///
/// Panics if `len` is zero.
pub fn pseudo_random_index(seed: Seed, len: usize) -> usize {
    assert!(len > 0, "cannot pick from an empty range");
    ((pseudo_random(seed) * len as f64).floor() as usize).min(len - 1)
}

/// Returns a pseudorandom integer in `range`.
pub fn pseudo_random_in(seed: Seed, range: RangeInclusive<u32>) -> u32 {
    let (lo, hi) = range.into_inner();
    let len = hi.saturating_sub(lo) as usize + 1;
    lo + pseudo_random_index(seed, len) as u32
}

/// Returns the RNG used to search for a solvable ordering of the puzzle for
/// `date`.
///
/// The RNG is seeded from a SHA-256 digest of the canonical date string, so
/// the search path is reproducible and not only its result.
pub fn search_rng(date: PuzzleDate) -> ChaCha12Rng {
    let digest = Sha256::digest(date.to_string().as_bytes());
    let mut seed = [0; 32];
    seed.copy_from_slice(&digest);
    ChaCha12Rng::from_seed(seed)
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_pseudo_random_is_pure() {
        for seed in [0, 1, 2045, 3245, 1 << 40] {
            assert_eq!(pseudo_random(seed).to_bits(), pseudo_random(seed).to_bits());
        }
        assert_eq!(0.0, pseudo_random(0));
    }

    #[test]
    fn test_pseudo_random_in_bounds() {
        for seed in 0..5000 {
            let n = pseudo_random_in(seed, 2..=9);
            assert!((2..=9).contains(&n), "{n} out of range for seed {seed}");
            assert!(pseudo_random_index(seed, 7) < 7);
        }
    }

    #[test]
    fn test_search_rng_is_reproducible() {
        let date: PuzzleDate = "2024-07-04".parse().unwrap();
        let a: [u64; 4] = search_rng(date).random();
        let b: [u64; 4] = search_rng(date).random();
        assert_eq!(a, b);

        let other: [u64; 4] = search_rng(date.succ().unwrap()).random();
        assert_ne!(a, other);
    }
}
