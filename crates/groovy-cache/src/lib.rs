//! Memoization for resolution results.
//!
//! The engine caches through the object-safe [`ResolutionCache`] trait so callers can swap a
//! bounded [`LruCache`] for a [`NoopCache`] (or their own store) without touching resolution code.
//! [`ResolutionCacheExt::get_or_put`] is the memoizing entry point.

mod lru_cache;
mod noop;

pub use lru_cache::LruCache;
pub use noop::NoopCache;

/// Counters describing how a cache has been used since creation or the last
/// [`ResolutionCache::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub puts: u64,
    pub evictions: u64,
    pub entries: usize,
}

impl CacheStats {
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit; `0.0` before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.requests() {
            0 => 0.0,
            n => self.hits as f64 / n as f64,
        }
    }

    pub fn miss_rate(&self) -> f64 {
        match self.requests() {
            0 => 0.0,
            n => self.misses as f64 / n as f64,
        }
    }
}

/// A thread-safe key/value store for resolution results.
///
/// Implementations may drop entries at any time; a miss only means the value has to be
/// recomputed.
pub trait ResolutionCache<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;

    fn put(&self, key: K, value: V);

    fn remove(&self, key: &K) -> Option<V>;

    fn contains(&self, key: &K) -> bool;

    /// Drops every entry and resets the counters.
    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> CacheStats;
}

pub trait ResolutionCacheExt<K, V>: ResolutionCache<K, V> {
    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// `compute` runs without any lock held, so it may itself use the cache. Two threads missing
    /// on the same key concurrently may both compute; the later `put` wins.
    fn get_or_put(&self, key: K, compute: impl FnOnce() -> V) -> V
    where
        V: Clone,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute();
        self.put(key, value.clone());
        value
    }

    /// Like [`get_or_put`](Self::get_or_put), but failed computations are not cached.
    fn get_or_try_put<E>(&self, key: K, compute: impl FnOnce() -> Result<V, E>) -> Result<V, E>
    where
        V: Clone,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = compute()?;
        self.put(key, value.clone());
        Ok(value)
    }
}

impl<K, V, C: ResolutionCache<K, V> + ?Sized> ResolutionCacheExt<K, V> for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn rates_are_zero_without_requests() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.miss_rate(), 0.0);
    }

    #[test]
    fn get_or_put_computes_once() {
        let cache: LruCache<&str, u32> = LruCache::new(8);
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            42
        };
        assert_eq!(cache.get_or_put("answer", compute), 42);
        assert_eq!(cache.get_or_put("answer", compute), 42);
        assert_eq!(calls.get(), 1);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.puts, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache: LruCache<u32, String> = LruCache::new(8);
        let failed: Result<String, &str> = cache.get_or_try_put(1, || Err("boom"));
        assert_eq!(failed, Err("boom"));
        assert!(!cache.contains(&1));

        let ok: Result<String, &str> = cache.get_or_try_put(1, || Ok("one".to_string()));
        assert_eq!(ok.as_deref(), Ok("one"));
        assert!(cache.contains(&1));
    }

    #[test]
    fn works_through_trait_objects() {
        let cache: Box<dyn ResolutionCache<u32, u32>> = Box::new(LruCache::new(2));
        assert_eq!(cache.get_or_put(1, || 10), 10);
        assert_eq!(cache.get_or_put(1, || 20), 10);
    }
}
