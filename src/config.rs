// Runtime configuration for lesson sessions

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Default snapshot history budget (64 MiB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 64 * 1024 * 1024;

/// Settings shared by every lesson run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seed for lessons that draw random numbers; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Upper bound on the estimated size of the snapshot history, in bytes
    pub snapshot_limit: usize,
}

impl Config {
    /// Build the random source lessons draw from
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: None,
            snapshot_limit: DEFAULT_SNAPSHOT_LIMIT,
        }
    }
}
