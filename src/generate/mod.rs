pub mod follows;
pub mod identity;

use crate::core::clock::Clock;
use crate::core::model::Dataset;
use follows::build_follows;
use identity::{Vocabulary, build_persons};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_MAX_FOLLOWERS: usize = 15;

pub struct DatasetConfig {
    pub seed: u64,
    pub max_followers: usize,
}

impl DatasetConfig {
    /// Negative seeds keep their two's-complement bits as the `StdRng` seed,
    /// so every `i64` maps to a distinct stream and 42 stays 42. A negative
    /// follower bound is clamped to 0.
    pub fn new(seed: i64, max_followers: i64) -> Self {
        Self {
            seed: seed as u64,
            max_followers: max_followers.max(0) as usize,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_followers: DEFAULT_MAX_FOLLOWERS,
        }
    }
}

pub fn generate<C: Clock + ?Sized>(cfg: &DatasetConfig, vocab: &Vocabulary<'_>, clock: &C) -> Dataset {
    info!(
        seed = cfg.seed,
        max_followers = cfg.max_followers,
        first = vocab.first.len(),
        middle = vocab.middle.len(),
        last = vocab.last.len(),
        "generating dataset"
    );
    let mut rng = StdRng::seed_from_u64(cfg.seed);

    let persons = build_persons(vocab, &mut rng, clock);
    debug!(count = persons.len(), "persons built");
    let follows = build_follows(&persons, cfg.max_followers, &mut rng);
    debug!(count = follows.len(), "follows built");

    Dataset { persons, follows }
}
