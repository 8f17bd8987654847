//! Bounded LRU caches.
//!
//! Parsing colors and styles and measuring cell widths are pure functions of
//! their input and sit on the hot path of every render. Results are memoized
//! here with a fixed capacity: once full, the least recently used entry is
//! evicted to make room.
//!
//! - [`LruCache`]: single-owner cache (`&mut self` access)
//! - [`SharedCache`]: process-wide, lazily created, mutex-guarded cache usable
//!   from a `static`

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::{Mutex, OnceLock};

/// A map holding at most `capacity` entries, evicting the least recently used.
///
/// Recency is tracked with a monotonically increasing tick per access; the
/// `order` index maps ticks back to keys so eviction is `O(log n)`.
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    entries: HashMap<K, (V, u64)>,
    order: BTreeMap<u64, K>,
    tick: u64,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty cache. A capacity of zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: BTreeMap::new(),
            tick: 0,
        }
    }

    /// Maximum number of entries held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check for a key without touching its recency.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Get a value, marking it as most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let tick = self.next_tick();
        let (_, last_used) = self.entries.get(key)?;
        self.order.remove(last_used);
        self.order.insert(tick, key.clone());
        let entry = self.entries.get_mut(key)?;
        entry.1 = tick;
        Some(&entry.0)
    }

    /// Insert a value, returning the entry evicted to make room (if any).
    ///
    /// Replacing an existing key never evicts.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        let tick = self.next_tick();
        if let Some((_, last_used)) = self.entries.get(&key) {
            self.order.remove(last_used);
            self.order.insert(tick, key.clone());
            self.entries.insert(key, (value, tick));
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.evict_oldest()
        } else {
            None
        };
        self.order.insert(tick, key.clone());
        self.entries.insert(key, (value, tick));
        evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn evict_oldest(&mut self) -> Option<(K, V)> {
        let (&oldest_tick, _) = self.order.iter().next()?;
        let key = self.order.remove(&oldest_tick)?;
        let (value, _) = self.entries.remove(&key)?;
        tracing::trace!(capacity = self.capacity, "lru cache evicted entry");
        Some((key, value))
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

/// A process-wide LRU cache that can live in a `static`.
///
/// The inner cache is created on first use. The lock is never held while the
/// value is being computed, so a computation may itself consult other caches.
pub struct SharedCache<K, V> {
    capacity: usize,
    inner: OnceLock<Mutex<LruCache<K, V>>>,
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: OnceLock::new(),
        }
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&self, key: K, compute: impl FnOnce(&K) -> V) -> V {
        let cache = self.inner.get_or_init(|| Mutex::new(LruCache::new(self.capacity)));
        {
            let mut guard = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(value) = guard.get(&key) {
                return value.clone();
            }
        }
        let value = compute(&key);
        let mut guard = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.insert(key, value.clone());
        value
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.inner.get().map_or(0, |cache| {
            cache
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .len()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_inserted_value() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"b"), None);
    }

    #[test]
    fn evicts_least_recently_inserted_when_untouched() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        let evicted = cache.insert("c", 3);

        assert_eq!(evicted, Some(("a", 1)));
        assert!(!cache.contains(&"a"));
        assert!(cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn get_refreshes_recency() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        // touching "a" makes "b" the eviction candidate
        cache.get(&"a");
        let evicted = cache.insert("c", 3);

        assert_eq!(evicted, Some(("b", 2)));
        assert!(cache.contains(&"a"));
        assert!(cache.contains(&"c"));
    }

    #[test]
    fn replacing_existing_key_does_not_evict() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        let evicted = cache.insert("a", 10);

        assert_eq!(evicted, None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), Some(&10));
        // "b" is now the oldest
        assert_eq!(cache.insert("c", 3), Some(("b", 2)));
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut cache = LruCache::new(3);
        for i in 0..100 {
            cache.insert(i, i * 2);
            assert!(cache.len() <= 3);
        }
        // only the three most recent survive
        assert!(cache.contains(&97));
        assert!(cache.contains(&98));
        assert!(cache.contains(&99));
        assert!(!cache.contains(&96));
    }

    #[test]
    fn zero_capacity_holds_one_entry() {
        let mut cache = LruCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.insert(1, "one");
        cache.insert(2, "two");
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&2));
    }

    #[test]
    fn clear_empties_cache() {
        let mut cache = LruCache::new(4);
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn shared_cache_computes_once_per_key() {
        static CACHE: SharedCache<u32, u32> = SharedCache::new(8);
        let mut calls = 0;
        let first = CACHE.get_or_insert_with(7, |k| {
            calls += 1;
            k * 3
        });
        let second = CACHE.get_or_insert_with(7, |k| {
            calls += 1;
            k * 3
        });
        assert_eq!(first, 21);
        assert_eq!(second, 21);
        assert_eq!(calls, 1);
    }

    #[test]
    fn shared_cache_evicts_at_capacity() {
        static CACHE: SharedCache<u32, u32> = SharedCache::new(2);
        for i in 0..10 {
            CACHE.get_or_insert_with(i, |k| *k);
        }
        assert_eq!(CACHE.len(), 2);
    }
}
