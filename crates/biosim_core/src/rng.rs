//! Randomness contract for the simulation.
//!
//! The engine only ever asks for two kinds of draws: a uniform real in
//! `[0, 1)` and a uniform integer in `[0, n)`. Outcomes are reproducible for a
//! fixed sequence of draws, so every [`crate::world::World`] owns its own
//! source instead of sharing a process-wide generator.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the random draws consumed by the yearly cycle.
pub trait RandomSource {
    /// Uniform real in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform integer in `[0, n)`. `n` must be positive.
    fn below(&mut self, n: usize) -> usize;

    /// Restarts the stream from `seed`.
    fn reseed(&mut self, seed: u64);
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }

    fn below(&mut self, n: usize) -> usize {
        (**self).below(n)
    }

    fn reseed(&mut self, seed: u64) {
        (**self).reseed(seed);
    }
}

/// Seeded ChaCha8 stream, the default source for simulation runs.
#[derive(Debug, Clone)]
pub struct ChaChaSource {
    rng: ChaCha8Rng,
}

impl ChaChaSource {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Default for ChaChaSource {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RandomSource for ChaChaSource {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn below(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}

/// Replays fixed cycles of draws.
///
/// Useful for scenarios whose outcome must not depend on a generator
/// algorithm: `ReplaySource::constant(0.0)` makes every probabilistic check
/// with a positive probability succeed, `constant(0.999_999)` makes nearly all
/// of them fail.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    uniforms: Vec<f64>,
    integers: Vec<usize>,
    uniform_pos: usize,
    integer_pos: usize,
    uniform_draws: usize,
}

impl ReplaySource {
    /// Cycles through `uniforms` for real draws and `integers` for integer
    /// draws (each integer is reduced modulo the requested bound).
    #[must_use]
    pub fn new(uniforms: Vec<f64>, integers: Vec<usize>) -> Self {
        Self {
            uniforms,
            integers,
            uniform_pos: 0,
            integer_pos: 0,
            uniform_draws: 0,
        }
    }

    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value], vec![0])
    }

    /// Number of uniform draws handed out so far.
    #[must_use]
    pub fn uniform_draws(&self) -> usize {
        self.uniform_draws
    }
}

impl RandomSource for ReplaySource {
    fn uniform(&mut self) -> f64 {
        self.uniform_draws += 1;
        if self.uniforms.is_empty() {
            return 0.0;
        }
        let value = self.uniforms[self.uniform_pos % self.uniforms.len()];
        self.uniform_pos += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }

    fn below(&mut self, n: usize) -> usize {
        if n <= 1 || self.integers.is_empty() {
            return 0;
        }
        let value = self.integers[self.integer_pos % self.integers.len()];
        self.integer_pos += 1;
        value % n
    }

    fn reseed(&mut self, _seed: u64) {
        self.uniform_pos = 0;
        self.integer_pos = 0;
        self.uniform_draws = 0;
    }
}

/// Fisher-Yates shuffle driven by the source's integer draw.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chacha_uniform_range() {
        let mut rng = ChaChaSource::new(7);
        for _ in 0..1000 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u));
            assert!(rng.below(4) < 4);
        }
    }

    #[test]
    fn test_chacha_reseed_repeats_stream() {
        let mut rng = ChaChaSource::new(99);
        let first: Vec<f64> = (0..5).map(|_| rng.uniform()).collect();
        rng.reseed(99);
        let second: Vec<f64> = (0..5).map(|_| rng.uniform()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_replay_cycles() {
        let mut rng = ReplaySource::new(vec![0.1, 0.9], vec![3, 5]);
        assert_eq!(rng.uniform(), 0.1);
        assert_eq!(rng.uniform(), 0.9);
        assert_eq!(rng.uniform(), 0.1);
        assert_eq!(rng.below(4), 3);
        assert_eq!(rng.below(4), 1);
        assert_eq!(rng.uniform_draws(), 3);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut items: Vec<usize> = (0..50).collect();
        let mut rng = ChaChaSource::new(3);
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(items, sorted, "50 elements should not shuffle to identity");
    }
}
