use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{CacheStats, ResolutionCache};

/// A cache that never stores anything. Used when caching is disabled.
#[derive(Debug)]
pub struct NoopCache<K, V> {
    misses: AtomicU64,
    _marker: PhantomData<fn(K) -> V>,
}

impl<K, V> NoopCache<K, V> {
    pub fn new() -> Self {
        Self {
            misses: AtomicU64::new(0),
            _marker: PhantomData,
        }
    }
}

impl<K, V> Default for NoopCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ResolutionCache<K, V> for NoopCache<K, V> {
    fn get(&self, _key: &K) -> Option<V> {
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    fn put(&self, _key: K, _value: V) {}

    fn remove(&self, _key: &K) -> Option<V> {
        None
    }

    fn contains(&self, _key: &K) -> bool {
        false
    }

    fn clear(&self) {
        self.misses.store(0, Ordering::Relaxed);
    }

    fn len(&self) -> usize {
        0
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            misses: self.misses.load(Ordering::Relaxed),
            ..CacheStats::default()
        }
    }
}
