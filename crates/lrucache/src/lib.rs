//! # lrucache
//!
//! Fixed-capacity LRU cache with O(1) `set`, `get` and eviction.
//!
//! ## Architecture
//! - **OrderedList**: arena-backed doubly-linked list, front = most recently used
//! - **Index**: AHash map from key to list handle
//! - **LruCache**: evicts the back of the list when an insert overflows capacity
//! - **SharedLruCache**: the same cache behind a `parking_lot` mutex
//!
//! ```
//! use lrucache::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.set("a".to_string(), 1);
//! cache.set("b".to_string(), 2);
//! cache.get("a");
//! cache.set("c".to_string(), 3); // evicts "b"
//!
//! assert_eq!(cache.get("b"), None);
//! assert_eq!(cache.get("a"), Some(&1));
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
pub mod list;
mod lru;

pub use cache::SharedLruCache;
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use lru::LruCache;
