use std::{mem, slice};

use crate::hasher::{KeyHasher, PerCharHasher};

/// Number of buckets a fresh map starts with; `clear` falls back to it too.
const INITIAL_CAPACITY: usize = 16;

/// Occupancy ratio at which an insert doubles the bucket array.
const LOAD_FACTOR_THRESHOLD: f64 = 0.8;

/// A single key-value entry in a bucket chain.
#[derive(Debug, Clone)]
struct Entry<K, V> {
    /// The entry's key.
    key: K,
    /// The value associated with the key.
    value: V,
    /// The next entry in the same bucket, owned by this one.
    next: Link<K, V>,
}

/// A bucket slot: empty, or the owned head of an entry chain.
type Link<K, V> = Option<Box<Entry<K, V>>>;

/// A separate-chaining hash map over textual keys.
///
/// Each bucket owns a chain of entries; within a bucket, entries keep the
/// order they were inserted in. The bucket array starts at 16 slots and
/// doubles whenever an insert finds the load factor at or above 0.8, rehoming
/// every entry against the new capacity.
///
/// The hashing strategy is pluggable through [`KeyHasher`] and defaults to
/// [`PerCharHasher`], the original per-character hash (anagram keys collide;
/// see the hasher docs for alternatives).
///
/// Note: this implementation is not thread-safe. Concurrent access needs
/// external synchronization around the whole map.
#[derive(Debug, Clone)]
pub struct ChainedHashMap<K, V, H = PerCharHasher> {
    /// The bucket array; each slot owns its chain of entries.
    buckets: Vec<Link<K, V>>,
    /// Number of live entries across all chains.
    live: usize,
    /// Strategy used to hash keys before reduction to a bucket index.
    hasher: H,
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: AsRef<str>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> Extend<(K, V)> for ChainedHashMap<K, V, H>
where
    K: AsRef<str>,
    H: KeyHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            let _previous = self.insert(k, v);
        }
    }
}

impl<K, V> ChainedHashMap<K, V>
where
    K: AsRef<str>,
{
    /// Creates a new map with the default initial capacity and the default
    /// per-character hashing strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates a new map with the specified initial capacity, rounded up to a
    /// power of two.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, PerCharHasher)
    }
}

impl<K, V, H> ChainedHashMap<K, V, H>
where
    K: AsRef<str>,
    H: KeyHasher,
{
    /// Creates a new map with the default initial capacity and the given
    /// hashing strategy.
    #[must_use]
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_capacity_and_hasher(INITIAL_CAPACITY, hasher)
    }

    /// Creates a new map with the given capacity and hashing strategy.
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hasher: H) -> Self {
        // Capacity stays a power of two so the index mask is exact
        let capacity = capacity.max(1).next_power_of_two();
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);
        Self { buckets, live: 0, hasher }
    }

    /// Reduces the hash of `key` to a bucket index against the current
    /// capacity. Recomputed on every call; a resize changes the answer.
    #[allow(clippy::cast_possible_truncation)]
    fn bucket_index(&self, key: &str) -> usize {
        let hash = self.hasher.hash_key(key);
        (hash as usize) & (self.buckets.len().saturating_sub(1))
    }

    /// Inserts a key-value pair, returning the previous value if the key was
    /// already present.
    ///
    /// The load-factor check runs before the key is hashed, so an insert that
    /// crosses the 0.8 threshold already sees the doubled capacity.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if (self.live as f64) / (self.buckets.len() as f64) >= LOAD_FACTOR_THRESHOLD {
            self.resize();
        }

        let index = self.bucket_index(key.as_ref());
        // bucket_index masks into range, so the slot lookup cannot miss
        let mut cursor = self.buckets.get_mut(index)?;
        loop {
            match cursor {
                Some(entry) if entry.key.as_ref() == key.as_ref() => {
                    return Some(mem::replace(&mut entry.value, value));
                }
                Some(entry) => cursor = &mut entry.next,
                None => {
                    // New key: append at the chain tail
                    *cursor = Some(Box::new(Entry { key, value, next: None }));
                    self.live = self.live.saturating_add(1);
                    return None;
                }
            }
        }
    }

    /// Doubles the bucket array and rehomes every entry through the normal
    /// insert path, which recomputes each index against the new capacity.
    ///
    /// The live counter restarts at zero and grows back to its prior total,
    /// so the load-factor check cannot fire again while rehoming.
    fn resize(&mut self) {
        let new_capacity = self.buckets.len().saturating_mul(2);
        let mut old_buckets = mem::take(&mut self.buckets);
        self.buckets.resize_with(new_capacity, || None);
        self.live = 0;

        for slot in &mut old_buckets {
            let mut chain = slot.take();
            while let Some(mut entry) = chain {
                chain = entry.next.take();
                let _previous = self.insert(entry.key, entry.value);
            }
        }
    }

    /// Retrieves a reference to the value for `key`, or `None` if the key
    /// was never inserted. Absence is a normal result, not a failure.
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.bucket_index(key);
        let mut cursor = self.buckets.get(index)?.as_deref();
        while let Some(entry) = cursor {
            if entry.key.as_ref() == key {
                return Some(&entry.value);
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    /// Retrieves a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        let mut cursor = self.buckets.get_mut(index)?.as_deref_mut();
        while let Some(entry) = cursor {
            if entry.key.as_ref() == key {
                return Some(&mut entry.value);
            }
            cursor = entry.next.as_deref_mut();
        }
        None
    }

    /// Removes `key` from the map, returning its value.
    ///
    /// Unlinks the entry whether it is the sole node of its chain, a head
    /// with successors, or an interior node; every successful removal
    /// decrements the live counter. Removing a missing key is a no-op.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let mut cursor = self.buckets.get_mut(index)?;
        loop {
            let found = matches!(cursor.as_deref(), Some(entry) if entry.key.as_ref() == key);
            if found {
                let mut removed = cursor.take()?;
                // Splice the successor (if any) into the removed entry's place
                *cursor = removed.next.take();
                self.live = self.live.saturating_sub(1);
                return Some(removed.value);
            }
            cursor = match cursor {
                Some(entry) => &mut entry.next,
                None => return None,
            };
        }
    }

    /// Returns the number of live entries, tracked by counter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns true if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Counts entries by walking every bucket's full chain, independent of
    /// the live counter. Agrees with [`len`](Self::len) whenever the counter
    /// is consistent; kept as a cross-check path.
    #[must_use]
    pub fn scan_len(&self) -> usize {
        self.iter().count()
    }

    /// Drops every chain and resets the bucket array to the default initial
    /// capacity, even if the map was built with a larger one.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.buckets.resize_with(INITIAL_CAPACITY, || None);
        self.live = 0;
    }

    /// Returns the number of buckets in the map.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor of the map.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.live as f64 / self.buckets.len() as f64
    }

    /// Returns an iterator over the key-value pairs, in bucket-index order
    /// and, within a bucket, chain (insertion) order.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { buckets: self.buckets.iter(), entry: None }
    }
}

/// Iterator over the entries of a [`ChainedHashMap`].
///
/// Yields buckets in index order and each chain in insertion order. This is
/// a snapshot walk, not a restartable cursor.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Remaining bucket slots to visit.
    buckets: slice::Iter<'a, Link<K, V>>,
    /// Position within the current bucket's chain.
    entry: Option<&'a Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.entry {
                self.entry = entry.next.as_deref();
                return Some((&entry.key, &entry.value));
            }
            self.entry = self.buckets.next()?.as_deref();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[test]
    fn test_insert_and_get() {
        let mut map = ChainedHashMap::new();
        assert_eq!(map.insert("key1".to_string(), 1), None);
        assert_eq!(map.insert("key2".to_string(), 2), None);
        assert_eq!(map.insert("key3".to_string(), 3), None);

        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.get("key3"), Some(&3));
        assert_eq!(map.get("key4"), None);
    }

    #[test]
    fn test_update_keeps_one_entry() {
        let mut map = ChainedHashMap::new();
        assert_eq!(map.insert("key1".to_string(), 1), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.insert("key1".to_string(), 10), Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.scan_len(), 1);
        assert_eq!(map.get("key1"), Some(&10));
    }

    #[test]
    fn test_remove() {
        let mut map = ChainedHashMap::new();
        map.insert("key1".to_string(), 1);
        map.insert("key2".to_string(), 2);

        assert_eq!(map.remove("key1"), Some(1));
        assert!(map.get("key1").is_none());
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.remove("key1"), None);
        assert_eq!(map.len(), 1);
    }

    // "abc", "acb" and "bca" are anagrams, so the default hasher chains all
    // three in one bucket, in insertion order.
    #[test]
    fn test_remove_from_shared_chain() {
        let mut map = ChainedHashMap::new();
        map.insert("abc", 1);
        map.insert("acb", 2);
        map.insert("bca", 3);
        assert_eq!(map.len(), 3);

        // Interior / tail node
        assert_eq!(map.remove("bca"), Some(3));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("abc"), Some(&1));
        assert_eq!(map.get("acb"), Some(&2));

        // Head with a successor
        assert_eq!(map.remove("abc"), Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("acb"), Some(&2));

        // Sole node
        assert_eq!(map.remove("acb"), Some(2));
        assert!(map.is_empty());
        assert_eq!(map.scan_len(), 0);
    }

    #[test]
    fn test_resize_threshold() {
        let mut map = ChainedHashMap::new();
        assert_eq!(map.capacity(), 16);

        for i in 0..13 {
            map.insert(format!("key-{i}"), i);
        }
        // 13 live entries at 16 buckets is above the 0.8 threshold, so the
        // next insert doubles the table first
        assert_eq!(map.capacity(), 16);
        map.insert("key-13".to_string(), 13);
        assert_eq!(map.capacity(), 32);

        for i in 0..14 {
            assert_eq!(map.get(&format!("key-{i}")), Some(&i));
        }
        assert_eq!(map.len(), 14);
        assert_eq!(map.scan_len(), 14);
    }

    #[test]
    fn test_len_and_is_empty() {
        let mut map = ChainedHashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.scan_len(), 0);

        map.insert("key1".to_string(), 1);
        assert!(!map.is_empty());
        assert_eq!(map.len(), 1);

        map.insert("key2".to_string(), 2);
        assert_eq!(map.len(), 2);

        map.remove("key1");
        assert_eq!(map.len(), 1);

        map.remove("key2");
        assert!(map.is_empty());
    }

    #[test]
    fn test_iter() {
        let mut map = ChainedHashMap::new();
        map.insert("key1".to_string(), 1);
        map.insert("key2".to_string(), 2);
        map.insert("key3".to_string(), 3);

        let mut count = 0;
        let mut sum = 0;
        for (_, &value) in map.iter() {
            count += 1;
            sum += value;
        }

        assert_eq!(count, 3);
        assert_eq!(sum, 6);
    }

    #[test]
    fn test_get_mut() {
        let mut map = ChainedHashMap::new();
        map.insert("key1".to_string(), 1);

        if let Some(value) = map.get_mut("key1") {
            *value += 10;
        }

        assert_eq!(map.get("key1"), Some(&11));
        assert_eq!(map.get_mut("missing"), None);
    }

    #[test]
    fn test_clear_resets_capacity() {
        let mut map = ChainedHashMap::with_capacity(64);
        assert_eq!(map.capacity(), 64);
        map.insert("key1".to_string(), 1);
        map.insert("key2".to_string(), 2);

        map.clear();

        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 16);
        assert_eq!(map.get("key1"), None);
        assert_eq!(map.get("key2"), None);
        assert!(map.iter().next().is_none());
    }

    #[test]
    fn test_with_hasher() {
        let mut map = ChainedHashMap::with_hasher(crate::SipKeyHasher);
        map.insert("listen", 1);
        map.insert("silent", 2);
        assert_eq!(map.get("listen"), Some(&1));
        assert_eq!(map.get("silent"), Some(&2));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_extend() {
        let mut map = ChainedHashMap::new();
        map.extend(vec![("a".to_string(), 1), ("b".to_string(), 2), ("a".to_string(), 3)]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&3));
    }

    #[test]
    fn test_user_scenario() {
        let mut map = ChainedHashMap::new();
        map.insert("user1", "Birger");
        map.insert("user2", "Matias");
        map.insert("user3", "Tom");

        assert_eq!(map.get("user1"), Some(&"Birger"));
        assert_eq!(map.len(), 3);

        let mut keys: Vec<&str> = map.iter().map(|(&k, _)| k).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["user1", "user2", "user3"]);
    }

    proptest! {
        #[test]
        fn behaves_like_std_hashmap(
            ops in proptest::collection::vec((any::<u8>(), "[a-e]{1,3}", any::<i32>()), 0..200),
        ) {
            let mut map = ChainedHashMap::new();
            let mut model: HashMap<String, i32> = HashMap::new();

            for (op, key, value) in ops {
                match op % 3 {
                    0 => prop_assert_eq!(map.insert(key.clone(), value), model.insert(key, value)),
                    1 => prop_assert_eq!(map.get(&key), model.get(&key)),
                    _ => prop_assert_eq!(map.remove(&key), model.remove(&key)),
                }
                prop_assert_eq!(map.len(), model.len());
            }
            prop_assert_eq!(map.scan_len(), model.len());
        }
    }
}
