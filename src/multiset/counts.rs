//! The operand side of the multiset algebra.
//!
//! [`Counts`] abstracts over "something with a count per key". The binary
//! operations of [`OrderedMultiset`](super::OrderedMultiset) accept any
//! implementor as their right-hand operand, so an operand that cannot look
//! up counts by key is rejected by the compiler instead of at run time.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use indexmap::IndexMap;

/// Count lookup by key plus iteration over `(key, count)` entries.
///
/// `count_entries` must yield each key at most once. Its order defines where
/// keys that only this operand holds end up in an operation result, so
/// implementors with a meaningful order (insertion order, sort order) get
/// deterministic results; `HashMap` operands are accepted but place their
/// unique keys in hash order.
///
/// # Examples
///
/// ```rust
/// use indexmap::IndexMap;
/// use ordered_counter::multiset::{Counts, OrderedMultiset};
///
/// let mut stock: IndexMap<&str, i64> = IndexMap::new();
/// stock.insert("apple", 2);
/// stock.insert("pear", 5);
/// assert_eq!(stock.count_of(&"pear"), 5);
/// assert_eq!(stock.count_of(&"plum"), 0);
///
/// let basket: OrderedMultiset<&str> = ["apple", "apple", "apple"].into_iter().collect();
/// let remaining = basket.subtract(&stock);
/// assert_eq!(remaining.to_pairs(), vec![("apple", 1)]);
/// ```
pub trait Counts<K> {
    /// Returns the count stored for `key`, or `0` when absent.
    fn count_of(&self, key: &K) -> i64;

    /// Iterates over every stored `(key, count)` entry in this operand's order.
    fn count_entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, i64)>
    where
        K: 'a;
}

impl<K: Hash + Eq, S: BuildHasher> Counts<K> for IndexMap<K, i64, S> {
    fn count_of(&self, key: &K) -> i64 {
        self.get(key).copied().unwrap_or(0)
    }

    fn count_entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, i64)>
    where
        K: 'a,
    {
        self.iter().map(|(key, count)| (key, *count))
    }
}

impl<K: Hash + Eq, S: BuildHasher> Counts<K> for HashMap<K, i64, S> {
    fn count_of(&self, key: &K) -> i64 {
        self.get(key).copied().unwrap_or(0)
    }

    fn count_entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, i64)>
    where
        K: 'a,
    {
        self.iter().map(|(key, count)| (key, *count))
    }
}

impl<K: Ord> Counts<K> for BTreeMap<K, i64> {
    fn count_of(&self, key: &K) -> i64 {
        self.get(key).copied().unwrap_or(0)
    }

    fn count_entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, i64)>
    where
        K: 'a,
    {
        self.iter().map(|(key, count)| (key, *count))
    }
}
