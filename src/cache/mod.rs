//! Kernel value cache
//!
//! Stores kernel evaluations keyed by sample pair. Kernel matrices are
//! symmetric, so only K(i,j) with i <= j is kept and K(j,i) resolves to the
//! same entry. Entries are never evicted; the cache only grows until it is
//! cleared by re-attaching a dataset.

use std::collections::HashMap;

/// Upper bound on entries reserved when a cache is created
const MAX_RESERVED_PAIRS: usize = 1 << 16;

/// Cache key for kernel values, normalized so that i <= j
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey {
    i: usize,
    j: usize,
}

impl PairKey {
    /// Create a normalized key where i <= j
    pub fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { i, j }
        } else {
            Self { i: j, j: i }
        }
    }

    pub fn indices(&self) -> (usize, usize) {
        (self.i, self.j)
    }
}

/// Growing cache of kernel values for one attached dataset
#[derive(Debug, Default)]
pub struct KernelCache {
    values: HashMap<PairKey, f64>,
    hits: u64,
    misses: u64,
}

impl KernelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache sized for `num_samples` samples
    ///
    /// Reserves room for every pair only while that stays small; larger
    /// caches grow on demand as pairs are evaluated.
    pub fn for_samples(num_samples: usize) -> Self {
        Self {
            values: HashMap::with_capacity(num_pairs(num_samples).min(MAX_RESERVED_PAIRS)),
            hits: 0,
            misses: 0,
        }
    }

    /// Get a kernel value from cache, recording a hit or a miss
    pub fn get(&mut self, i: usize, j: usize) -> Option<f64> {
        match self.values.get(&PairKey::new(i, j)) {
            Some(&value) => {
                self.hits += 1;
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Look up a value without touching the statistics
    pub fn peek(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(&PairKey::new(i, j)).copied()
    }

    /// Put a kernel value into cache
    pub fn put(&mut self, i: usize, j: usize, value: f64) {
        self.values.insert(PairKey::new(i, j), value);
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.values.contains_key(&PairKey::new(i, j))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get cache hit rate
    pub fn hit_rate(&self) -> f64 {
        self.stats().hit_rate()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.values.len(),
        }
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.values.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// Number of distinct unordered pairs (with repetition) over `n` samples
///
/// Saturates at `usize::MAX` instead of overflowing.
pub fn num_pairs(n: usize) -> usize {
    if n % 2 == 0 {
        (n / 2).saturating_mul(n.saturating_add(1))
    } else {
        n.saturating_mul((n + 1) / 2)
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    /// Every miss is followed by exactly one kernel evaluation
    pub misses: u64,
    pub size: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_normalization() {
        let key1 = PairKey::new(1, 5);
        let key2 = PairKey::new(5, 1);
        assert_eq!(key1, key2);
        assert_eq!(key1.indices(), (1, 5));
        assert_eq!(PairKey::new(3, 3).indices(), (3, 3));
    }

    #[test]
    fn test_kernel_cache_basic() {
        let mut cache = KernelCache::new();

        // Cache miss
        assert_eq!(cache.get(0, 1), None);
        assert_eq!(cache.stats().misses, 1);

        // Put and get
        cache.put(0, 1, 5.0);
        assert_eq!(cache.get(0, 1), Some(5.0));
        assert_eq!(cache.stats().hits, 1);

        // Symmetric access
        assert_eq!(cache.get(1, 0), Some(5.0));
        assert_eq!(cache.stats().hits, 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_kernel_cache_never_evicts() {
        let mut cache = KernelCache::for_samples(4);

        for i in 0..4 {
            for j in i..4 {
                cache.put(i, j, (i * 10 + j) as f64);
            }
        }

        assert_eq!(cache.len(), num_pairs(4));
        assert_eq!(cache.peek(0, 0), Some(0.0));
        assert_eq!(cache.peek(3, 1), Some(13.0));
    }

    #[test]
    fn test_large_cache_starts_small() {
        let mut cache = KernelCache::for_samples(150_000);
        assert!(cache.is_empty());
        assert!(cache.values.capacity() < num_pairs(150_000));

        cache.put(0, 1, 2.0);
        assert_eq!(cache.peek(1, 0), Some(2.0));
        assert_eq!(num_pairs(usize::MAX), usize::MAX);
        assert_eq!(num_pairs(5), 15);
    }

    #[test]
    fn test_peek_does_not_count() {
        let mut cache = KernelCache::new();
        cache.put(2, 0, 1.5);

        assert_eq!(cache.peek(0, 2), Some(1.5));
        assert!(cache.contains(2, 0));
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(cache.stats().misses, 0);
    }

    #[test]
    fn test_hit_rate_calculation() {
        let mut cache = KernelCache::new();

        // No accesses yet
        assert_eq!(cache.hit_rate(), 0.0);

        // All misses
        cache.get(0, 1);
        cache.get(1, 2);
        assert_eq!(cache.hit_rate(), 0.0);

        cache.put(0, 1, 1.0);
        cache.get(0, 1);
        cache.get(1, 0);

        // 2 hits, 2 misses = 50%
        assert_eq!(cache.hit_rate(), 0.5);
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = KernelCache::new();
        cache.put(0, 1, 1.0);
        cache.get(0, 1);

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get(0, 1), None);
        assert_eq!(cache.stats().hits, 0);
        assert_eq!(cache.stats().misses, 1); // From the get after clear
    }

    #[test]
    fn test_num_pairs() {
        assert_eq!(num_pairs(0), 0);
        assert_eq!(num_pairs(1), 1);
        assert_eq!(num_pairs(50), 1275);
    }
}
