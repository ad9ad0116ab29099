//! Deterministic random numbers for deck shuffles.
//!
//! Given the same game seed, every reshuffle produces the same order. This
//! keeps runs reproducible for tests and replays.

/// Source of deterministic random numbers.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in `[0, bound)`. Returns 0 for an empty bound.
    fn below(&self, seed: u64, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32(seed) % bound
    }
}

/// PCG-XSH-RR: 64-bit state, 32-bit output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Mixes the game seed with a shuffle counter and a per-swap index.
pub fn compute_seed(game_seed: u64, shuffle: u64, index: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= shuffle.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (index as u64).wrapping_mul(0x517cc1b727220a95);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Fisher-Yates shuffle driven by `rng`.
pub fn shuffle<T>(items: &mut [T], rng: &impl RngOracle, game_seed: u64, shuffle_count: u64) {
    for i in (1..items.len()).rev() {
        let seed = compute_seed(game_seed, shuffle_count, i as u32);
        let j = rng.below(seed, i as u32 + 1) as usize;
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_order() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        shuffle(&mut a, &PcgRng, 42, 1);
        shuffle(&mut b, &PcgRng, 42, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..32).collect();
        shuffle(&mut items, &PcgRng, 7, 3);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn below_stays_in_bounds() {
        for seed in 0..100 {
            assert!(PcgRng.below(seed, 6) < 6);
        }
        assert_eq!(PcgRng.below(1, 0), 0);
    }
}
