//! # Chainmap
//!
//! A Rust implementation of a separate-chaining hash map over textual keys.
//!
//! Each bucket owns a singly-linked chain of entries; within a bucket,
//! entries keep their insertion order. The bucket array starts at 16 slots
//! and doubles whenever an insert finds the load factor at or above 0.8,
//! rehoming every entry against the new capacity.
//!
//! Hashing is pluggable: the default [`PerCharHasher`] reproduces the
//! original per-character hash (deliberately weak; anagram keys share a
//! bucket), while [`PolynomialHasher`] and [`SipKeyHasher`] are stronger
//! drop-in strategies.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! // Create a new hash map
//! let mut map = ChainedHashMap::new();
//!
//! // Insert values
//! map.insert("apple".to_string(), 1);
//! map.insert("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.insert("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Enumeration
//!
//! ```rust
//! use chainmap::{ChainedHashMap, HashMapExtensions};
//!
//! let mut map = ChainedHashMap::new();
//! map.insert("user1", "Birger");
//! map.insert("user2", "Matias");
//! map.insert("user3", "Tom");
//!
//! // Snapshots walk buckets in index order, chains in insertion order
//! assert_eq!(map.keys().len(), 3);
//! assert_eq!(map.values().len(), 3);
//! assert!(map.contains_key("user2"));
//! ```
//!
//! ## Choosing a Hashing Strategy
//!
//! ```rust
//! use chainmap::{ChainedHashMap, KeyHasher, PerCharHasher, PolynomialHasher};
//!
//! // The default hash has no positional weighting, so anagrams collide
//! assert_eq!(PerCharHasher.hash_key("listen"), PerCharHasher.hash_key("silent"));
//!
//! // A rolling polynomial hash separates them without any table changes
//! let mut map = ChainedHashMap::with_hasher(PolynomialHasher);
//! map.insert("listen", 1);
//! map.insert("silent", 2);
//! assert_eq!(map.get("listen"), Some(&1));
//! ```
//!
//! This map is single-threaded; wrap it in a mutex if it must be shared
//! across threads.

/// Module implementing the separate-chaining hash map
mod chained_map;
/// Module implementing the pluggable key-hashing strategies
mod hasher;
/// Utility functions and traits for the hash map
mod utils;

pub use chained_map::{ChainedHashMap, Iter};
pub use hasher::{KeyHasher, PerCharHasher, PolynomialHasher, SipKeyHasher};
pub use utils::HashMapExtensions;
