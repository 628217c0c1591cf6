use lrucache::{CacheConfig, Error, LruCache};

#[test]
fn test_capacity_bound_holds() {
    let mut cache = LruCache::new(5).unwrap();

    for i in 0..200u32 {
        cache.set(format!("key{}", i % 37), i);
        assert!(cache.len() <= 5);
    }
    assert_eq!(cache.len(), 5);
}

#[test]
fn test_last_inserted_keys_survive() {
    let capacity = 4;
    let mut cache = LruCache::new(capacity).unwrap();

    for i in 0..10 {
        cache.set(format!("k{}", i), i);
    }

    for i in 0..6 {
        assert!(!cache.contains(format!("k{}", i).as_str()));
    }
    for i in 6..10 {
        assert!(cache.contains(format!("k{}", i).as_str()));
    }

    // k6 is the LRU entry: one more insert evicts it and nothing else
    cache.set("k10".to_string(), 10);
    assert!(!cache.contains("k6"));
    assert!(cache.contains("k7"));
}

#[test]
fn test_read_refreshes_recency() {
    let capacity = 3;
    let mut cache = LruCache::new(capacity).unwrap();

    cache.set("oldest".to_string(), 1);
    cache.set("second".to_string(), 2);
    cache.set("newest".to_string(), 3);

    assert_eq!(cache.get("oldest"), Some(&1));
    cache.set("extra".to_string(), 4);

    assert!(cache.contains("oldest"));
    assert!(!cache.contains("second"));
    assert_eq!(cache.len(), capacity);
}

#[test]
fn test_update_in_place() {
    let mut cache = LruCache::new(3).unwrap();

    cache.set("a".to_string(), "one");
    cache.set("b".to_string(), "two");
    let len_before = cache.len();

    assert!(cache.set("a".to_string(), "uno"));
    assert_eq!(cache.len(), len_before);
    assert_eq!(cache.get("a"), Some(&"uno"));
}

#[test]
fn test_clear_is_total() {
    let mut cache = LruCache::new(3).unwrap();
    let keys = ["a", "b", "c"];

    for (i, key) in keys.iter().enumerate() {
        cache.set(key.to_string(), i);
    }
    cache.clear();

    assert_eq!(cache.len(), 0);
    for key in keys {
        assert_eq!(cache.get(key), None);
    }

    // Behaves like a fresh cache
    assert!(!cache.set("a".to_string(), 10));
    assert!(!cache.set("b".to_string(), 11));
    assert!(!cache.set("c".to_string(), 12));
    assert!(!cache.set("d".to_string(), 13));
    assert!(!cache.contains("a"));
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_capacity_two_scenario() {
    let mut cache = LruCache::new(2).unwrap();

    assert!(!cache.set("A".to_string(), 1));
    assert!(!cache.set("B".to_string(), 2));
    assert!(!cache.set("C".to_string(), 3));
    assert_eq!(cache.get("A"), None);
    assert_eq!(cache.get("B"), Some(&2));
    assert!(!cache.set("D".to_string(), 4));

    assert!(!cache.contains("C"));
    assert!(cache.contains("B"));
    assert!(cache.contains("D"));

    // B is LRU, D is MRU
    cache.set("E".to_string(), 5);
    assert!(!cache.contains("B"));
    assert!(cache.contains("D"));
}

#[test]
fn test_zero_capacity_rejected() {
    assert_eq!(
        LruCache::<String, u8>::new(0).unwrap_err(),
        Error::InvalidCapacity(0)
    );
    assert!(LruCache::<String, u8>::with_config(&CacheConfig::new(0)).is_err());
}

#[test]
fn test_non_clone_values() {
    struct Blob(Vec<u8>);

    let mut cache = LruCache::new(2).unwrap();
    cache.set(1u64, Blob(vec![1, 2, 3]));

    assert_eq!(cache.get(&1).map(|b| b.0.len()), Some(3));
    assert_eq!(cache.remove(&1).map(|b| b.0), Some(vec![1, 2, 3]));
}
