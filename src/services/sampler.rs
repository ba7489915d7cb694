use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of uniform indices for the shuffle.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `0..=upper`.
    fn index_through(&self, upper: usize) -> usize;
}

/// Thread-local OS-seeded generator.
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index_through(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..=upper)
    }
}

/// Reproducible generator for tests and replayable deployments.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index_through(&self, upper: usize) -> usize {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..=upper),
            Err(poisoned) => poisoned.into_inner().gen_range(0..=upper),
        }
    }
}

pub struct StratifiedSampler {
    random: Arc<dyn RandomSource>,
}

impl StratifiedSampler {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(Arc::new(SeededRandom::new(seed))),
            None => Self::new(Arc::new(ThreadRandom)),
        }
    }

    /// Fisher–Yates: walk `i` from the end, swap with a uniform `j` in `[0, i]`.
    pub fn shuffle<T>(&self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.random.index_through(i);
            items.swap(i, j);
        }
    }

    /// Shuffles the whole pool once and keeps the first `min(quantity, len)`.
    pub fn sample<T>(&self, mut pool: Vec<T>, quantity: usize) -> Vec<T> {
        self.shuffle(&mut pool);
        pool.truncate(quantity);
        pool
    }

    /// Takes `min(quota, len)` from each partition, then reshuffles the combined
    /// list so partition order does not leak into the result.
    pub fn sample_by_quota<K: Ord, T>(
        &self,
        partitions: BTreeMap<K, Vec<T>>,
        quotas: &BTreeMap<K, usize>,
    ) -> Vec<T> {
        let mut combined = Vec::new();
        for (key, pool) in partitions {
            let quota = quotas.get(&key).copied().unwrap_or(0);
            if quota == 0 {
                continue;
            }
            combined.extend(self.sample(pool, quota));
        }
        self.shuffle(&mut combined);
        combined
    }
}
