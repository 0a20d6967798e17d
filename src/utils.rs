//! Utility functions and traits for [`ChainedHashMap`].

use crate::ChainedHashMap;
use crate::hasher::KeyHasher;

/// Extension trait for map implementations that provides snapshot
/// enumeration and presence checks.
pub trait HashMapExtensions<K, V> {
    /// Returns the keys of the map as a Vec, in bucket order.
    fn keys(&self) -> Vec<K>;

    /// Returns the values of the map as a Vec, in bucket order.
    fn values(&self) -> Vec<V>;

    /// Returns the key-value pairs of the map as a Vec, in bucket order.
    fn entries(&self) -> Vec<(K, V)>;

    /// Returns true if the map contains the given key.
    fn contains_key(&self, key: &str) -> bool;
}

impl<K, V, H> HashMapExtensions<K, V> for ChainedHashMap<K, V, H>
where
    K: AsRef<str> + Clone,
    V: Clone,
    H: KeyHasher,
{
    fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Creates a `ChainedHashMap` from an iterator of key-value pairs.
#[allow(dead_code)]
pub fn from_iter<K, V, I>(iter: I) -> ChainedHashMap<K, V>
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = ChainedHashMap::new();

    for (key, value) in iter {
        let _previous = map.insert(key, value);
    }

    map
}
