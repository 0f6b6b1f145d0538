//! Insertion-ordered multiset with order-aware multiset algebra.
//!
//! This module provides [`OrderedMultiset`], a counter backed by an
//! `IndexMap` from keys to signed counts.
//!
//! # Overview
//!
//! - Keys keep the position of their first write; later count changes never
//!   move them.
//! - Mutators (`increment`, `set_count`, `remove`, ...) work in place and may
//!   leave zero or negative counts behind.
//! - Algebraic operations (`add_counts`, `subtract`, `union`, `intersection`,
//!   `symmetric_difference`, `positive`, `negate`) never touch their inputs
//!   and only produce strictly positive counts.
//!
//! # Time Complexity
//!
//! | Operation              | Complexity |
//! |------------------------|------------|
//! | `get`                  | O(1)       |
//! | `increment`            | O(1)       |
//! | `set_count`            | O(1)       |
//! | `remove`               | O(n)       |
//! | `move_to_end`          | O(n)       |
//! | binary operations      | O(n + m)   |
//! | `positive` / `negate`  | O(n)       |
//! | `most_common`          | O(n log n) |
//!
//! Counts saturate at the bounds of `i64` instead of overflowing.

use std::borrow::Borrow;
use std::cmp::Reverse;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::ops::Index;

use indexmap::IndexMap;
use static_assertions::assert_impl_all;

use super::HashBuilder;
use super::counts::Counts;

/// Backing value for lookups of absent keys through `Index`.
static ZERO_COUNT: i64 = 0;

/// A counter that remembers the order in which keys were first seen.
///
/// Each distinct key maps to a signed count. Iteration, `Debug` output and
/// the layout of every operation result follow first-seen order. Equality
/// compares content only; use [`eq_ordered`](Self::eq_ordered) to compare
/// order as well.
///
/// # Type Parameters
///
/// * `K` - The key type. Must implement `Hash` and `Eq`; algebraic
///   operations additionally need `Clone`.
///
/// # Examples
///
/// ```rust
/// use ordered_counter::multiset::OrderedMultiset;
///
/// let mut letters: OrderedMultiset<char> = "abracadabra".chars().collect();
/// assert_eq!(letters.get(&'a'), 5);
/// assert_eq!(letters.get(&'z'), 0);
///
/// // Incrementing an existing key never moves it.
/// letters.increment('r');
/// let keys: Vec<char> = letters.keys().copied().collect();
/// assert_eq!(keys, vec!['a', 'b', 'r', 'c', 'd']);
/// ```
#[derive(Clone)]
pub struct OrderedMultiset<K> {
    entries: IndexMap<K, i64, HashBuilder>,
}

assert_impl_all!(OrderedMultiset<String>: Send, Sync, Clone, Default);

impl<K> OrderedMultiset<K> {
    /// Creates a new empty multiset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let tally: OrderedMultiset<String> = OrderedMultiset::new();
    /// assert!(tally.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::with_hasher(HashBuilder::default()),
        }
    }

    /// Creates an empty multiset with room for `capacity` distinct keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity_and_hasher(capacity, HashBuilder::default()),
        }
    }

    /// Returns the number of distinct keys, including keys whose count is
    /// zero or negative.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no key is stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, count)` entries in first-seen order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let tally: OrderedMultiset<char> = "bab".chars().collect();
    /// let entries: Vec<(&char, i64)> = tally.iter().collect();
    /// assert_eq!(entries, vec![(&'b', 2), (&'a', 1)]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> OrderedMultisetIterator<'_, K> {
        OrderedMultisetIterator {
            inner: self.entries.iter(),
        }
    }

    /// Iterates over keys in first-seen order.
    #[must_use]
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.entries.keys()
    }

    /// Iterates over counts in first-seen order of their keys.
    #[must_use]
    pub fn values(&self) -> impl DoubleEndedIterator<Item = i64> + ExactSizeIterator {
        self.entries.values().copied()
    }

    /// Iterates over every key repeated as many times as its count.
    ///
    /// Keys with a zero or negative count are skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let tally = OrderedMultiset::from_pairs([('x', 2), ('y', -1), ('z', 1)]);
    /// let expanded: String = tally.elements().collect();
    /// assert_eq!(expanded, "xxz");
    /// ```
    #[must_use]
    pub fn elements(&self) -> OrderedMultisetElements<'_, K> {
        OrderedMultisetElements {
            entries: self.entries.iter(),
            current: None,
        }
    }

    /// Returns the sum of all counts.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.entries
            .values()
            .fold(0_i64, |total, count| total.saturating_add(*count))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keeps only the entries for which `predicate` returns `true`.
    ///
    /// The relative order of kept entries is preserved.
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&K, i64) -> bool,
    {
        self.entries.retain(|key, count| predicate(key, *count));
    }

    /// Removes and returns the first-seen entry.
    pub fn pop_first(&mut self) -> Option<(K, i64)> {
        self.entries.shift_remove_index(0)
    }

    /// Removes and returns the most recently added entry.
    pub fn pop_last(&mut self) -> Option<(K, i64)> {
        self.entries.pop()
    }

    /// Returns up to `limit` entries ordered from the highest count to the
    /// lowest.
    ///
    /// Entries with equal counts stay in first-seen order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let tally: OrderedMultiset<char> = "abracadabra".chars().collect();
    /// assert_eq!(tally.most_common(3), vec![(&'a', 5), (&'b', 2), (&'r', 2)]);
    /// ```
    #[must_use]
    pub fn most_common(&self, limit: usize) -> Vec<(&K, i64)> {
        let mut ranked = self.most_common_all();
        ranked.truncate(limit);
        ranked
    }

    /// Returns every entry ordered from the highest count to the lowest.
    #[must_use]
    pub fn most_common_all(&self) -> Vec<(&K, i64)> {
        let mut ranked: Vec<(&K, i64)> = self.iter().collect();
        ranked.sort_by_key(|entry| Reverse(entry.1));
        ranked
    }

    /// Returns the entries as ordered `(key, count)` pairs, consuming `self`.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(K, i64)> {
        self.entries.into_iter().collect()
    }
}

impl<K: Hash + Eq> OrderedMultiset<K> {
    /// Builds a multiset by counting every occurrence in `keys`.
    ///
    /// Equivalent to `keys.into_iter().collect()`.
    #[must_use]
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut multiset = Self::new();
        multiset.update(keys);
        multiset
    }

    /// Builds a multiset from ordered `(key, count)` pairs.
    ///
    /// This is the reconstruction path used for cloning, deserializing and
    /// parsing. Counts are stored as given, including zero and negative
    /// ones. A repeated key keeps its first position and takes the last
    /// count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let tally = OrderedMultiset::from_pairs([("b", 2), ("a", 1), ("b", 7)]);
    /// assert_eq!(tally.into_pairs(), vec![("b", 7), ("a", 1)]);
    /// ```
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, i64)>,
    {
        let pairs = pairs.into_iter();
        let mut multiset = Self::with_capacity(pairs.size_hint().0);
        for (key, count) in pairs {
            if let Some(previous) = multiset.entries.insert(key, count) {
                log::trace!("repeated key in ordered pairs: count {previous} replaced by {count}");
            }
        }
        multiset
    }

    /// Returns the count of `key`, or `0` when absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let tally: OrderedMultiset<String> =
    ///     ["to", "be", "or", "not", "to", "be"].map(String::from).into_iter().collect();
    /// assert_eq!(tally.get("be"), 2);
    /// assert_eq!(tally.get("question"), 0);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> i64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).copied().unwrap_or(0)
    }

    /// Returns `true` if `key` has an entry, whatever its count.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Adds one to the count of `key`, appending it if it is new.
    pub fn increment(&mut self, key: K) {
        self.increment_by(key, 1);
    }

    /// Adds `delta` (which may be negative) to the count of `key`,
    /// appending it if it is new.
    pub fn increment_by(&mut self, key: K, delta: i64) {
        let count = self.entries.entry(key).or_insert(0);
        *count = count.saturating_add(delta);
    }

    /// Sets the count of `key` to `count`.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn set_count(&mut self, key: K, count: i64) {
        self.entries.insert(key, count);
    }

    /// Removes `key`, returning its count if it was present.
    ///
    /// The remaining keys keep their relative order.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<i64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.shift_remove(key)
    }

    /// Increments the count of every key yielded by `keys`, once per
    /// occurrence.
    pub fn update<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        for key in keys {
            self.increment(key);
        }
    }

    /// Moves `key` to the end of the order. Returns `false` if absent.
    pub fn move_to_end<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.entries.get_index_of(key) {
            Some(index) => {
                let last = self.entries.len() - 1;
                self.entries.move_index(index, last);
                true
            }
            None => false,
        }
    }

    /// Moves `key` to the front of the order. Returns `false` if absent.
    pub fn move_to_front<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.entries.get_index_of(key) {
            Some(index) => {
                self.entries.move_index(index, 0);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if both multisets hold the same entries in the same
    /// order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let ab: OrderedMultiset<char> = "ab".chars().collect();
    /// let ba: OrderedMultiset<char> = "ba".chars().collect();
    /// assert_eq!(ab, ba);
    /// assert!(!ab.eq_ordered(&ba));
    /// ```
    #[must_use]
    pub fn eq_ordered(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Hash + Eq + Clone> OrderedMultiset<K> {
    /// Copies an ordered key-to-count mapping.
    #[must_use]
    pub fn from_counts<C>(counts: &C) -> Self
    where
        C: Counts<K>,
    {
        Self::from_pairs(
            counts
                .count_entries()
                .map(|(key, count)| (key.clone(), count)),
        )
    }

    /// Returns the entries as ordered `(key, count)` pairs.
    ///
    /// Feeding the result to [`from_pairs`](Self::from_pairs) rebuilds an
    /// identical multiset.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(K, i64)> {
        self.iter().map(|(key, count)| (key.clone(), count)).collect()
    }

    /// Adds the counts of `other` in place, without dropping non-positive
    /// results.
    pub fn update_counts<C>(&mut self, other: &C)
    where
        C: Counts<K>,
    {
        for (key, count) in other.count_entries() {
            self.increment_by(key.clone(), count);
        }
    }

    /// Subtracts the counts of `other` in place, without dropping
    /// non-positive results.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let mut tally: OrderedMultiset<char> = "aab".chars().collect();
    /// tally.subtract_counts(&"abbc".chars().collect::<OrderedMultiset<char>>());
    /// assert_eq!(tally.to_pairs(), vec![('a', 1), ('b', -1), ('c', -1)]);
    /// ```
    pub fn subtract_counts<C>(&mut self, other: &C)
    where
        C: Counts<K>,
    {
        for (key, count) in other.count_entries() {
            self.increment_by(key.clone(), count.saturating_neg());
        }
    }

    /// Adds counts from both sides.
    ///
    /// Keys of `self` come first in `self`'s order, each kept when
    /// `self[key] + other[key] > 0`. Keys only `other` holds follow in
    /// `other`'s order, kept when their count is positive.
    ///
    /// # Ordering
    ///
    /// Keys only `other` holds follow `other`'s
    /// [`count_entries`](Counts::count_entries) order. For a `HashMap`
    /// operand that is hash order, so their placement is not reproducible.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let left: OrderedMultiset<char> = "abbbd".chars().collect();
    /// let right: OrderedMultiset<char> = "bcc".chars().collect();
    /// assert_eq!(
    ///     left.add_counts(&right).to_pairs(),
    ///     vec![('a', 1), ('b', 4), ('d', 1), ('c', 2)]
    /// );
    /// ```
    #[must_use]
    pub fn add_counts<C>(&self, other: &C) -> Self
    where
        C: Counts<K>,
    {
        self.merge_with(other, i64::saturating_add, Some)
    }

    /// Subtracts the counts of `other`, keeping only positive results.
    ///
    /// Keys only `other` holds are kept, negated, when their count in
    /// `other` is negative.
    ///
    /// # Ordering
    ///
    /// Keys only `other` holds follow `other`'s
    /// [`count_entries`](Counts::count_entries) order. For a `HashMap`
    /// operand that is hash order, so their placement is not reproducible.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let left: OrderedMultiset<char> = "abbbc".chars().collect();
    /// let right: OrderedMultiset<char> = "bccd".chars().collect();
    /// assert_eq!(left.subtract(&right).to_pairs(), vec![('a', 1), ('b', 2)]);
    /// ```
    #[must_use]
    pub fn subtract<C>(&self, other: &C) -> Self
    where
        C: Counts<K>,
    {
        self.merge_with(other, i64::saturating_sub, |count| {
            (count < 0).then(|| count.saturating_neg())
        })
    }

    /// Takes the maximum of the counts on either side.
    ///
    /// # Ordering
    ///
    /// Keys only `other` holds follow `other`'s
    /// [`count_entries`](Counts::count_entries) order. For a `HashMap`
    /// operand that is hash order, so their placement is not reproducible.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let left: OrderedMultiset<char> = "abbbd".chars().collect();
    /// let right: OrderedMultiset<char> = "bcc".chars().collect();
    /// assert_eq!(
    ///     left.union(&right).to_pairs(),
    ///     vec![('a', 1), ('b', 3), ('d', 1), ('c', 2)]
    /// );
    /// ```
    #[must_use]
    pub fn union<C>(&self, other: &C) -> Self
    where
        C: Counts<K>,
    {
        self.merge_with(other, i64::max, Some)
    }

    /// Takes the minimum of the counts on either side.
    ///
    /// Only keys of `self` are considered: a key absent from `self` has
    /// count zero there, so its minimum can never be positive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let left: OrderedMultiset<char> = "abbbc".chars().collect();
    /// let right: OrderedMultiset<char> = "bcc".chars().collect();
    /// assert_eq!(left.intersection(&right).to_pairs(), vec![('b', 1), ('c', 1)]);
    /// ```
    #[must_use]
    pub fn intersection<C>(&self, other: &C) -> Self
    where
        C: Counts<K>,
    {
        self.merge_with(other, i64::min, |_| None)
    }

    /// Returns `self.union(other)` minus `self.intersection(other)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let left: OrderedMultiset<char> = "abbbc".chars().collect();
    /// let right: OrderedMultiset<char> = "bcc".chars().collect();
    /// assert_eq!(
    ///     left.symmetric_difference(&right).to_pairs(),
    ///     vec![('a', 1), ('b', 2), ('c', 1)]
    /// );
    /// ```
    #[must_use]
    pub fn symmetric_difference<C>(&self, other: &C) -> Self
    where
        C: Counts<K>,
    {
        self.union(other).subtract(&self.intersection(other))
    }

    /// Returns the entries with a positive count, in their current order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let tally = OrderedMultiset::from_pairs([('a', 2), ('b', 0), ('c', -3), ('d', 1)]);
    /// assert_eq!(tally.positive().to_pairs(), vec![('a', 2), ('d', 1)]);
    /// ```
    #[must_use]
    pub fn positive(&self) -> Self {
        Self::from_pairs(
            self.iter()
                .filter(|(_, count)| *count > 0)
                .map(|(key, count)| (key.clone(), count)),
        )
    }

    /// Returns the entries with a negative count, with the sign flipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    ///
    /// let tally = OrderedMultiset::from_pairs([('a', 2), ('b', 0), ('c', -3), ('d', -1)]);
    /// assert_eq!(tally.negate().to_pairs(), vec![('c', 3), ('d', 1)]);
    /// ```
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::from_pairs(
            self.iter()
                .filter(|(_, count)| *count < 0)
                .map(|(key, count)| (key.clone(), count.saturating_neg())),
        )
    }

    /// Shared skeleton of the binary operations.
    ///
    /// `merge` combines the counts of a key `self` holds; `unique` maps the
    /// count of a key only `other` holds. Non-positive results are dropped.
    fn merge_with<C, M, U>(&self, other: &C, merge: M, unique: U) -> Self
    where
        C: Counts<K>,
        M: Fn(i64, i64) -> i64,
        U: Fn(i64) -> Option<i64>,
    {
        let mut result = Self::with_capacity(self.len());
        for (key, count) in self {
            let merged = merge(count, other.count_of(key));
            if merged > 0 {
                result.entries.insert(key.clone(), merged);
            }
        }
        for (key, count) in other.count_entries() {
            if self.entries.contains_key(key) {
                continue;
            }
            if let Some(kept) = unique(count).filter(|kept| *kept > 0) {
                result.entries.insert(key.clone(), kept);
            }
        }
        result
    }
}

impl<K: Hash + Eq> Counts<K> for OrderedMultiset<K> {
    fn count_of(&self, key: &K) -> i64 {
        self.get(key)
    }

    fn count_entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, i64)>
    where
        K: 'a,
    {
        self.iter()
    }
}

impl<K> Default for OrderedMultiset<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq> PartialEq for OrderedMultiset<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Hash + Eq> Eq for OrderedMultiset<K> {}

impl<K, Q> Index<&Q> for OrderedMultiset<K>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    type Output = i64;

    fn index(&self, key: &Q) -> &Self::Output {
        self.entries.get(key).unwrap_or(&ZERO_COUNT)
    }
}

impl<K: Hash + Eq> FromIterator<K> for OrderedMultiset<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

impl<K: Hash + Eq> Extend<K> for OrderedMultiset<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.update(iter);
    }
}

impl<K> IntoIterator for OrderedMultiset<K> {
    type Item = (K, i64);
    type IntoIter = OrderedMultisetIntoIterator<K>;

    fn into_iter(self) -> Self::IntoIter {
        OrderedMultisetIntoIterator {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, K> IntoIterator for &'a OrderedMultiset<K> {
    type Item = (&'a K, i64);
    type IntoIter = OrderedMultisetIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over `(key, count)` entries in first-seen order.
pub struct OrderedMultisetIterator<'a, K> {
    inner: indexmap::map::Iter<'a, K, i64>,
}

impl<'a, K> Iterator for OrderedMultisetIterator<'a, K> {
    type Item = (&'a K, i64);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, count)| (key, *count))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for OrderedMultisetIterator<'_, K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, count)| (key, *count))
    }
}

impl<K> ExactSizeIterator for OrderedMultisetIterator<'_, K> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for OrderedMultisetIterator<'_, K> {}

/// Owning iterator over `(key, count)` entries in first-seen order.
pub struct OrderedMultisetIntoIterator<K> {
    inner: indexmap::map::IntoIter<K, i64>,
}

impl<K> Iterator for OrderedMultisetIntoIterator<K> {
    type Item = (K, i64);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for OrderedMultisetIntoIterator<K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for OrderedMultisetIntoIterator<K> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for OrderedMultisetIntoIterator<K> {}

/// Iterator repeating each key as many times as its positive count.
///
/// Created by [`OrderedMultiset::elements`].
pub struct OrderedMultisetElements<'a, K> {
    entries: indexmap::map::Iter<'a, K, i64>,
    current: Option<(&'a K, u64)>,
}

impl<'a, K> Iterator for OrderedMultisetElements<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, remaining)) = self.current.as_mut()
                && *remaining > 0
            {
                *remaining -= 1;
                return Some(*key);
            }
            let (key, count) = self.entries.next()?;
            self.current = u64::try_from(*count).ok().map(|count| (key, count));
        }
    }
}

impl<K> FusedIterator for OrderedMultisetElements<'_, K> {}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K: serde::Serialize> serde::Serialize for OrderedMultiset<K> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, count) in self {
            map.serialize_entry(key, &count)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedMultisetVisitor<K> {
    marker: std::marker::PhantomData<K>,
}

#[cfg(feature = "serde")]
impl<K> OrderedMultisetVisitor<K> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K> serde::de::Visitor<'de> for OrderedMultisetVisitor<K>
where
    K: serde::Deserialize<'de> + Hash + Eq,
{
    type Value = OrderedMultiset<K>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a map from keys to integer counts")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut multiset = OrderedMultiset::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, count)) = map.next_entry::<K, i64>()? {
            multiset.set_count(key, count);
        }
        Ok(multiset)
    }
}

#[cfg(feature = "serde")]
impl<'de, K> serde::Deserialize<'de> for OrderedMultiset<K>
where
    K: serde::Deserialize<'de> + Hash + Eq,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMultisetVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tally(text: &str) -> OrderedMultiset<char> {
        text.chars().collect()
    }

    #[rstest]
    fn test_new_is_empty() {
        let multiset: OrderedMultiset<i32> = OrderedMultiset::new();
        assert!(multiset.is_empty());
        assert_eq!(multiset.len(), 0);
        assert_eq!(multiset.total(), 0);
    }

    #[rstest]
    fn test_from_keys_counts_occurrences_in_first_seen_order() {
        let multiset = tally("cabbac");
        assert_eq!(multiset.to_pairs(), vec![('c', 2), ('a', 2), ('b', 2)]);
    }

    #[rstest]
    fn test_increment_existing_key_keeps_position() {
        let mut multiset = tally("abc");
        multiset.increment('a');
        multiset.increment_by('b', 5);
        let keys: Vec<char> = multiset.keys().copied().collect();
        assert_eq!(keys, vec!['a', 'b', 'c']);
        assert_eq!(multiset.get(&'a'), 2);
        assert_eq!(multiset.get(&'b'), 6);
    }

    #[rstest]
    fn test_set_count_new_key_appends() {
        let mut multiset = tally("ab");
        multiset.set_count('z', -4);
        multiset.set_count('a', 0);
        assert_eq!(multiset.to_pairs(), vec![('a', 0), ('b', 1), ('z', -4)]);
    }

    #[rstest]
    fn test_index_returns_zero_for_missing_key() {
        let multiset = tally("aa");
        assert_eq!(multiset[&'a'], 2);
        assert_eq!(multiset[&'q'], 0);
    }

    #[rstest]
    fn test_remove_keeps_remaining_order() {
        let mut multiset = tally("abcd");
        assert_eq!(multiset.remove(&'b'), Some(1));
        assert_eq!(multiset.remove(&'b'), None);
        let keys: Vec<char> = multiset.keys().copied().collect();
        assert_eq!(keys, vec!['a', 'c', 'd']);
    }

    #[rstest]
    fn test_removed_key_is_appended_when_written_again() {
        let mut multiset = tally("abc");
        multiset.remove(&'a');
        multiset.increment('a');
        let keys: Vec<char> = multiset.keys().copied().collect();
        assert_eq!(keys, vec!['b', 'c', 'a']);
    }

    #[rstest]
    fn test_move_to_end_and_front() {
        let mut multiset = tally("abc");
        assert!(multiset.move_to_end(&'a'));
        assert!(multiset.move_to_front(&'c'));
        assert!(!multiset.move_to_end(&'x'));
        let keys: Vec<char> = multiset.keys().copied().collect();
        assert_eq!(keys, vec!['c', 'b', 'a']);
    }

    #[rstest]
    fn test_pop_first_and_last() {
        let mut multiset = tally("abbc");
        assert_eq!(multiset.pop_first(), Some(('a', 1)));
        assert_eq!(multiset.pop_last(), Some(('c', 1)));
        assert_eq!(multiset.to_pairs(), vec![('b', 2)]);

        let mut empty: OrderedMultiset<char> = OrderedMultiset::new();
        assert_eq!(empty.pop_first(), None);
        assert_eq!(empty.pop_last(), None);
    }

    #[rstest]
    fn test_retain_preserves_relative_order() {
        let mut multiset = tally("abbcddd");
        multiset.retain(|_, count| count != 2);
        assert_eq!(multiset.to_pairs(), vec![('a', 1), ('c', 1), ('d', 3)]);
    }

    #[rstest]
    fn test_elements_skips_non_positive_counts() {
        let multiset = OrderedMultiset::from_pairs([('a', 0), ('b', 2), ('c', -2), ('d', 1)]);
        let expanded: Vec<char> = multiset.elements().copied().collect();
        assert_eq!(expanded, vec!['b', 'b', 'd']);
    }

    #[rstest]
    fn test_total_sums_signed_counts() {
        let multiset = OrderedMultiset::from_pairs([('a', 4), ('b', -1)]);
        assert_eq!(multiset.total(), 3);
    }

    #[rstest]
    #[case(0, vec![])]
    #[case(1, vec![('b', 3)])]
    #[case(10, vec![('b', 3), ('a', 1), ('c', 1)])]
    fn test_most_common_limits_and_keeps_ties_in_order(
        #[case] limit: usize,
        #[case] expected: Vec<(char, i64)>,
    ) {
        let multiset = tally("abbbc");
        let ranked: Vec<(char, i64)> = multiset
            .most_common(limit)
            .into_iter()
            .map(|(key, count)| (*key, count))
            .collect();
        assert_eq!(ranked, expected);
    }

    #[rstest]
    fn test_update_counts_keeps_non_positive_results() {
        let mut multiset = tally("ab");
        multiset.update_counts(&OrderedMultiset::from_pairs([('a', -1), ('c', -2)]));
        assert_eq!(multiset.to_pairs(), vec![('a', 0), ('b', 1), ('c', -2)]);
    }

    #[rstest]
    fn test_equality_ignores_order_but_not_zero_counts() {
        assert_eq!(tally("ab"), tally("ba"));
        let mut with_zero = tally("ab");
        with_zero.set_count('c', 0);
        assert_ne!(with_zero, tally("ab"));
    }

    #[rstest]
    fn test_from_pairs_repeated_key_keeps_first_position_last_count() {
        let multiset = OrderedMultiset::from_pairs([('x', 1), ('y', 2), ('x', 9)]);
        assert_eq!(multiset.to_pairs(), vec![('x', 9), ('y', 2)]);
    }

    #[rstest]
    fn test_from_pairs_round_trips_to_pairs() {
        let original = OrderedMultiset::from_pairs([('q', 3), ('a', -1), ('m', 0)]);
        let rebuilt = OrderedMultiset::from_pairs(original.to_pairs());
        assert!(rebuilt.eq_ordered(&original));
    }

    #[rstest]
    fn test_counts_saturate_instead_of_overflowing() {
        let mut multiset = OrderedMultiset::from_pairs([('a', i64::MAX)]);
        multiset.increment('a');
        assert_eq!(multiset.get(&'a'), i64::MAX);

        let floor = OrderedMultiset::from_pairs([('b', i64::MIN)]);
        assert_eq!(floor.negate().get(&'b'), i64::MAX);
    }

    #[rstest]
    fn test_merge_with_drops_non_positive_results() {
        let left = OrderedMultiset::from_pairs([('a', 1), ('b', 2)]);
        let right = OrderedMultiset::from_pairs([('a', -1), ('c', 0), ('d', 3)]);
        let merged = left.merge_with(&right, i64::saturating_add, Some);
        assert_eq!(merged.to_pairs(), vec![('b', 2), ('d', 3)]);
    }

    #[rstest]
    fn test_into_iterator_yields_owned_pairs_in_order() {
        let pairs: Vec<(char, i64)> = tally("zzy").into_iter().collect();
        assert_eq!(pairs, vec![('z', 2), ('y', 1)]);
    }

    #[rstest]
    fn test_iterators_are_double_ended() {
        let multiset = tally("abc");
        let reversed: Vec<char> = multiset.iter().rev().map(|(key, _)| *key).collect();
        assert_eq!(reversed, vec!['c', 'b', 'a']);
        assert_eq!(multiset.iter().len(), 3);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_serialize_empty() {
        let multiset: OrderedMultiset<String> = OrderedMultiset::new();
        assert_eq!(serde_json::to_string(&multiset).unwrap(), "{}");
    }

    #[rstest]
    fn test_serialize_keeps_first_seen_order() {
        let multiset: OrderedMultiset<char> = "zzya".chars().collect();
        assert_eq!(
            serde_json::to_string(&multiset).unwrap(),
            r#"{"z":2,"y":1,"a":1}"#
        );
    }

    #[rstest]
    fn test_deserialize_keeps_document_order() {
        let multiset: OrderedMultiset<String> =
            serde_json::from_str(r#"{"pear":3,"apple":-1,"fig":0}"#).unwrap();
        assert_eq!(
            multiset.into_pairs(),
            vec![
                ("pear".to_string(), 3),
                ("apple".to_string(), -1),
                ("fig".to_string(), 0)
            ]
        );
    }

    #[rstest]
    fn test_round_trip_preserves_content_and_order() {
        let original = OrderedMultiset::from_pairs([(30, 1), (10, -2), (20, 5)]);
        let json = serde_json::to_string(&original).unwrap();
        let restored: OrderedMultiset<i32> = serde_json::from_str(&json).unwrap();
        assert!(restored.eq_ordered(&original));
    }

    #[rstest]
    fn test_deserialize_rejects_non_integer_count() {
        let result: Result<OrderedMultiset<String>, _> = serde_json::from_str(r#"{"a":"x"}"#);
        assert!(result.is_err());
    }
}
