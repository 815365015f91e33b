use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for the computer opponent.
///
/// Easy and Medium draw from it; Hard never does. Tests plug in a scripted
/// implementation to force either side of a coin flip.
pub trait RandomSource {
    /// Returns `true` with the given probability in `[0, 1]`.
    fn chance(&mut self, probability: f64) -> bool;

    /// Returns an index uniformly distributed in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SessionRng {
    fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}
