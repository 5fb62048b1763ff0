//! In-memory LRU response cache with a time-to-live.

use lru::LruCache;
use serde::Serialize;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Hit/miss counters and occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    /// Percentage, 0 when nothing was looked up yet.
    pub hit_rate: f64,
}

/// Bounded cache; entries older than `ttl` are treated as absent.
pub struct QueryCache<K: Hash + Eq, V: Clone> {
    entries: LruCache<K, Entry<V>>,
    ttl: Duration,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq, V: Clone> QueryCache<K, V> {
    /// A zero `capacity` is bumped to one.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            ttl,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns a clone of a fresh entry and marks it recently used. Expired entries are evicted.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                self.hits += 1;
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.pop(key);
        }
        self.misses += 1;
        None
    }

    /// Evicts the least recently used entry when full.
    pub fn insert(&mut self, key: K, value: V) {
        self.entries.put(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let lookups = self.hits + self.misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64 * 100.0
        };
        CacheStats {
            size: self.entries.len(),
            capacity: self.entries.cap().get(),
            hits: self.hits,
            misses: self.misses,
            hit_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_get_after_insert() {
        let mut cache = QueryCache::new(2, Duration::from_secs(60));
        cache.insert("a".to_string(), 1);
        assert_eq!(cache.get(&"a".to_string()), Some(1));
        assert_eq!(cache.get(&"b".to_string()), None);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate, 50.0);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = QueryCache::new(2, Duration::from_secs(60));
        cache.insert(1, "one");
        cache.insert(2, "two");
        // touch 1 so 2 becomes least recently used
        assert_eq!(cache.get(&1), Some("one"));
        cache.insert(3, "three");

        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&1), Some("one"));
        assert_eq!(cache.get(&3), Some("three"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_expired_entries_are_evicted() {
        let mut cache = QueryCache::new(4, Duration::from_millis(30));
        cache.insert("k", 7);
        thread::sleep(Duration::from_millis(60));

        assert_eq!(cache.get(&"k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut cache = QueryCache::new(0, Duration::from_secs(60));
        cache.insert(1, 1);
        cache.insert(2, 2);
        assert_eq!(cache.stats().capacity, 1);
        assert_eq!(cache.get(&2), Some(2));
    }

    #[test]
    fn test_empty_stats() {
        let cache: QueryCache<String, String> = QueryCache::new(3, Duration::from_secs(1));
        let stats = cache.stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.hit_rate, 0.0);
    }
}
