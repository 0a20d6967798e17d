//! Key-hashing strategies for [`ChainedHashMap`](crate::ChainedHashMap).
//!
//! Hashing is decoupled from the table so a stronger hash can be swapped in
//! without touching any chain or resize logic.

use std::hash::{DefaultHasher, Hash, Hasher};

/// Fixed multiplier shared by the textual strategies.
const PRIME: u64 = 31;

/// A strategy that turns a textual key into a 64-bit hash.
///
/// The table reduces the hash to a bucket index against its *current*
/// capacity on every call, so implementations must be deterministic but are
/// free to use the full 64-bit range.
pub trait KeyHasher {
    /// Hashes `key` to a 64-bit value.
    fn hash_key(&self, key: &str) -> u64;
}

/// Per-character hash: the sum of `char * 31` over the key.
///
/// Each character contributes independently, with no positional weighting,
/// so any two anagrams land in the same bucket:
///
/// ```rust
/// use chainmap::{KeyHasher, PerCharHasher};
///
/// assert_eq!(PerCharHasher.hash_key("ab"), PerCharHasher.hash_key("ba"));
/// ```
///
/// This is a known weakness kept for compatibility with the original table
/// semantics. Prefer [`PolynomialHasher`] or [`SipKeyHasher`] when anagram
/// clustering matters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerCharHasher;

impl KeyHasher for PerCharHasher {
    fn hash_key(&self, key: &str) -> u64 {
        key.chars()
            .fold(0_u64, |acc, c| acc.saturating_add(u64::from(c).saturating_mul(PRIME)))
    }
}

/// Rolling polynomial hash: `h = h * 31 + char`, wrapping on overflow.
///
/// The position of every character affects the result, so anagrams hash
/// differently. A drop-in replacement for [`PerCharHasher`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolynomialHasher;

impl KeyHasher for PolynomialHasher {
    fn hash_key(&self, key: &str) -> u64 {
        key.chars().fold(0_u64, |acc, c| acc.wrapping_mul(PRIME).wrapping_add(u64::from(c)))
    }
}

/// Hashes keys through the standard library's [`DefaultHasher`] (SipHash).
///
/// The strongest of the bundled strategies; note it is still keyed with a
/// fixed seed here, so it offers no flooding resistance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SipKeyHasher;

impl KeyHasher for SipKeyHasher {
    fn hash_key(&self, key: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }
}
