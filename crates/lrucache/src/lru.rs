//! LRU (Least Recently Used) cache implementation
//!
//! Pairs an [`OrderedList`] of entries (front = most recently used) with a
//! hash index from key to list handle. Every mutation touches the list once
//! and the index once, so the two never disagree.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::error::Result;
use crate::list::{Handle, OrderedList};

/// Key/value pair stored in a list node
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// LRU cache with fixed capacity
///
/// Not internally synchronized. Wrap it in a lock, or use
/// [`SharedLruCache`](crate::SharedLruCache), to share it between threads.
#[derive(Debug)]
pub struct LruCache<K, V> {
    map: HashMap<K, Handle, RandomState>,
    list: OrderedList<Entry<K, V>>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(&CacheConfig::new(capacity))
    }

    /// Create a new LRU cache from a validated config
    pub fn with_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(config.capacity, RandomState::new()),
            list: OrderedList::with_capacity(config.capacity),
            capacity: config.capacity,
        })
    }

    /// Insert or update a key-value pair
    ///
    /// Returns `true` if the key was already present. An update replaces the
    /// value in place and never evicts; an insert that pushes the cache past
    /// capacity evicts exactly one entry, the least recently used.
    pub fn set(&mut self, key: K, value: V) -> bool {
        if let Some(&handle) = self.map.get(&key) {
            if let Some(entry) = self.list.get_mut(handle) {
                entry.value = value;
            }
            self.list.move_to_front(handle);
            return true;
        }

        let handle = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.map.insert(key, handle);

        if self.list.len() > self.capacity {
            self.evict();
        }

        false
    }

    /// Get a value and mark it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.map.get(key)?;
        self.list.move_to_front(handle);
        self.list.get(handle).map(|entry| &entry.value)
    }

    /// Get a value without touching recency
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = *self.map.get(key)?;
        self.list.get(handle).map(|entry| &entry.value)
    }

    /// Check if a key is cached, without touching recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Remove a key from the cache
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.map.remove(key)?;
        let entry = self.list.remove(handle)?;
        trace!(len = self.list.len(), "removed cache entry");
        Some(entry.value)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        let dropped = self.list.len();
        self.map.clear();
        while let Some(front) = self.list.front() {
            self.list.remove(front);
        }
        trace!(dropped, "cleared cache");
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Get the cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict(&mut self) {
        let Some(tail) = self.list.back() else {
            return;
        };
        if let Some(entry) = self.list.remove(tail) {
            self.map.remove(&entry.key);
            debug!(
                capacity = self.capacity,
                len = self.list.len(),
                evicted = 1,
                "evicted least recently used entry"
            );
        }
    }

    /// Check that the index and the list agree, and that capacity holds.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert!(self.list.len() <= self.capacity, "over capacity");
        assert_eq!(self.map.len(), self.list.len(), "index/list size mismatch");
        for (key, &handle) in &self.map {
            let entry = self.list.get(handle).expect("index points at vacant node");
            assert!(entry.key == *key, "index points at node for another key");
        }
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys_mru(&self) -> Vec<K> {
        self.list
            .handles()
            .into_iter()
            .filter_map(|h| self.list.get(h).map(|entry| entry.key.clone()))
            .collect()
    }
}
