//! # Popularity Adapter
//!
//! `rand`-backed [`PopularitySource`]. Seeded for reproducible runs, or from
//! OS entropy otherwise.

use crate::domain::value_objects::Popularity;
use crate::ports::outbound::PopularitySource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform draws over `[0, max]`.
#[derive(Debug, Clone)]
pub struct SeededPopularity {
    rng: StdRng,
}

impl SeededPopularity {
    /// Deterministic source.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded if `seed` is given, entropy otherwise.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }
}

impl PopularitySource for SeededPopularity {
    fn draw(&mut self, max: u8) -> Popularity {
        let max = max.min(Popularity::MAX);
        Popularity::saturating(self.rng.gen_range(0..=max))
    }
}

/// Always returns the same score. Useful when a test needs exact values.
#[derive(Debug, Clone, Copy)]
pub struct FixedPopularity(pub Popularity);

impl PopularitySource for FixedPopularity {
    fn draw(&mut self, max: u8) -> Popularity {
        Popularity::saturating(self.0.value().min(max))
    }
}
