//! SharedLruCache: lock-wrapped LRU cache for use across threads

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::lru::LruCache;

/// Cloneable handle to an [`LruCache`] serialized behind one mutex
///
/// Every operation takes the lock for its whole duration, so callers see the
/// same single-writer semantics as the bare cache. Reads hand back clones.
pub struct SharedLruCache<K, V> {
    inner: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> SharedLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new shared cache with the given capacity
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of items in cache
    ///
    /// # Returns
    /// * `Result<SharedLruCache>` - Error if capacity is zero
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(&CacheConfig::new(capacity))
    }

    /// Create a new shared cache from a config
    pub fn with_config(config: &CacheConfig) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Mutex::new(LruCache::with_config(config)?)),
        })
    }

    /// Insert or update a value
    ///
    /// # Returns
    /// * `bool` - Whether the key was already present
    pub fn set(&self, key: K, value: V) -> bool {
        self.inner.lock().set(key, value)
    }

    /// Get a copy of a value, marking it most recently used
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Remove a value
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().remove(key)
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }
}

impl<K, V> Clone for SharedLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
