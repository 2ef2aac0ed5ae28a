//! Uniform random helpers shared by the generators.
//!
//! Everything that needs randomness takes `&mut R where R: Rng + ?Sized`, so
//! callers inject a seeded `ChaCha8Rng` for reproducible maps and tests.

use rand::seq::SliceRandom;
use rand::Rng;

/// The small set of draws the generators need, for any [`Rng`].
pub trait RandomSource {
    /// Uniform real in `[lo, hi)`; returns `lo` when the range is empty.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;

    /// Uniform index in `[0, n)`. `n` must be non-zero.
    fn index(&mut self, n: usize) -> usize;

    /// `true` with probability `p` (clamped to `[0, 1]`).
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform choice from a slice; `None` when it is empty.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi > lo {
            self.gen_range(lo..hi)
        } else {
            lo
        }
    }

    fn index(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.gen_bool(p.clamp(0.0, 1.0))
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_uniform_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rng.uniform(-2.0, 3.0);
            assert!((-2.0..3.0).contains(&v));
        }
        assert_eq!(rng.uniform(4.0, 4.0), 4.0);
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        let items = [1, 2, 3, 4, 5];
        for _ in 0..50 {
            assert_eq!(a.index(17), b.index(17));
            assert_eq!(a.pick(&items), b.pick(&items));
        }
        let empty: [u8; 0] = [];
        assert!(a.pick(&empty).is_none());
    }
}
