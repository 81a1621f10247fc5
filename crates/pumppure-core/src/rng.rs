//! Seedable bounded random integer sampling.
//!
//! Three independent consumers share this utility: contamination delay
//! sampling, the per-round required-pump-count, and cosmetic variation in
//! the presentation layer. A fixed seed makes a whole round reproducible.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

/// Random number source for a game session.
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: Mcg128Xsl64,
}

impl GameRng {
    /// Create a new source. `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let inner = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self { inner }
    }

    /// Uniform integer in the inclusive range `[min, max]`.
    ///
    /// An inverted range is normalized rather than rejected, matching the
    /// clamp-don't-fail policy of the rest of the engine.
    pub fn between(&mut self, min: u64, max: u64) -> u64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.inner.gen_range(lo..=hi)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_within_inclusive_bounds() {
        let mut rng = GameRng::new(Some(42));
        for _ in 0..1000 {
            let v = rng.between(900, 2500);
            assert!((900..=2500).contains(&v));
        }
    }

    #[test]
    fn degenerate_range_returns_the_single_value() {
        let mut rng = GameRng::new(Some(1));
        assert_eq!(rng.between(25, 25), 25);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = GameRng::new(Some(7));
        let mut b = GameRng::new(Some(7));
        let seq_a: Vec<u64> = (0..16).map(|_| a.between(0, 1000)).collect();
        let seq_b: Vec<u64> = (0..16).map(|_| b.between(0, 1000)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn inverted_bounds_are_normalized() {
        let mut rng = GameRng::new(Some(3));
        let v = rng.between(35, 25);
        assert!((25..=35).contains(&v));
    }
}
