//! Random number primitives
//!
//! Thin wrapper around a seedable `StdRng` exposing the rolls the rules use.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable random source for all game rolls
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: StdRng,
}

impl GameRng {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }

    /// Uniform in `1..n`; 1 when the range is empty
    pub fn rand_1n(&mut self, n: i32) -> i32 {
        if n <= 1 {
            return 1;
        }
        self.rng.gen_range(1..n)
    }

    /// Uniform in `0..n`; 0 when the range is empty
    pub fn rand_0n(&mut self, n: i32) -> i32 {
        if n <= 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform in `m..n`; m when the range is empty
    pub fn rand_m_n(&mut self, m: i32, n: i32) -> i32 {
        if n <= m {
            return m;
        }
        self.rng.gen_range(m..n)
    }

    /// True with the given percentage
    pub fn chance(&mut self, percent: i32) -> bool {
        self.rng.gen_range(0..100) < percent
    }
}
