//! Expiring key-value cache used by the metadata and price resolvers.
//!
//! Eviction is lazy: an entry is dropped the first time it is read after
//! its deadline. There is no background sweeper.

use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Bounded-lifetime cache. Writes always overwrite (last writer wins).
pub struct TtlCache<K, V> {
    store: DashMap<K, CacheEntry<V>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }

    /// Get a live value, evicting it if expired
    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        // The read guard must be released before remove_if takes the shard lock
        let (value, expires_at) = {
            let entry = self.store.get(key)?;
            (entry.value.clone(), entry.expires_at)
        };

        if now > expires_at {
            self.store.remove_if(key, |_, entry| now > entry.expires_at);
            return None;
        }

        Some(value)
    }

    fn insert_at(&self, key: K, value: V, now: Instant) {
        self.store.insert(
            key,
            CacheEntry {
                value,
                expires_at: now + self.ttl,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_before_expiry() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let now = Instant::now();
        cache.insert_at("sol".to_string(), 150.0, now);

        assert_eq!(cache.get_at(&"sol".to_string(), now + Duration::from_secs(30)), Some(150.0));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let now = Instant::now();
        cache.insert_at("sol".to_string(), 150.0, now);

        assert_eq!(cache.get_at(&"sol".to_string(), now + Duration::from_secs(61)), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_overwrites_and_refreshes_expiry() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let now = Instant::now();
        cache.insert_at("jup", 1.0, now);
        cache.insert_at("jup", 2.0, now + Duration::from_secs(50));

        let later = now + Duration::from_secs(100);
        assert_eq!(cache.get_at(&"jup", later), Some(2.0));
    }

    #[test]
    fn test_non_debug_values_are_cacheable() {
        struct Opaque(u8);
        impl Clone for Opaque {
            fn clone(&self) -> Self {
                Opaque(self.0)
            }
        }

        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("mint".to_string(), Opaque(7));
        assert_eq!(cache.get(&"mint".to_string()).map(|o| o.0), Some(7));
    }

    #[test]
    fn test_missing_key() {
        let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(1));
        assert_eq!(cache.get(&"nope".to_string()), None);
    }
}
