use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::{CacheStats, ResolutionCache};

/// Bounded cache evicting the least-recently-used entry once `capacity` is exceeded.
///
/// A capacity of 0 stores nothing.
#[derive(Debug)]
pub struct LruCache<K: Hash + Eq, V> {
    capacity: usize,
    entries: Mutex<lru::LruCache<K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
    puts: AtomicU64,
    evictions: AtomicU64,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(lru::LruCache::unbounded()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            puts: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> ResolutionCache<K, V> for LruCache<K, V>
where
    K: Hash + Eq + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        let value = self.entries.lock().get(key).cloned();
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        value
    }

    fn put(&self, key: K, value: V) {
        self.puts.fetch_add(1, Ordering::Relaxed);
        let mut entries = self.entries.lock();
        if self.capacity == 0 {
            entries.pop(&key);
            return;
        }

        entries.put(key, value);
        while entries.len() > self.capacity {
            if entries.pop_lru().is_none() {
                break;
            }
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn remove(&self, key: &K) -> Option<V> {
        self.entries.lock().pop(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.entries.lock().contains(key)
    }

    fn clear(&self) {
        let mut entries = self.entries.lock();
        let dropped = entries.len();
        entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.puts.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        tracing::debug!(dropped, "cleared resolution cache");
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            puts: self.puts.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
