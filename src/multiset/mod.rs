//! Insertion-ordered multisets.
//!
//! This module provides [`OrderedMultiset`], a counter that maps distinct keys
//! to signed counts and remembers the order in which each key was first seen.
//!
//! - [`OrderedMultiset`]: the counter itself
//! - [`Counts`]: anything that can serve as the right-hand operand of the
//!   multiset algebra (count lookup by key plus ordered iteration)
//! - [`ReprError`]: failure to parse the canonical textual representation
//!
//! # Result Ordering
//!
//! Every binary operation lays out its result the same way: keys of the
//! left operand first, in the left operand's order, followed by keys that
//! only the right operand holds, in the right operand's order. Keys whose
//! resulting count is not positive are dropped.
//!
//! # Examples
//!
//! ```rust
//! use ordered_counter::multiset::OrderedMultiset;
//!
//! let left: OrderedMultiset<char> = "abbbd".chars().collect();
//! let right: OrderedMultiset<char> = "bcc".chars().collect();
//!
//! let sum = &left + &right;
//! assert_eq!(sum.to_pairs(), vec![('a', 1), ('b', 4), ('d', 1), ('c', 2)]);
//!
//! let union = &left | &right;
//! assert_eq!(union.to_pairs(), vec![('a', 1), ('b', 3), ('d', 1), ('c', 2)]);
//!
//! // The representation parses back into the same counts in the same order.
//! let parsed: OrderedMultiset<char> = format!("{sum:?}").parse().unwrap();
//! assert!(parsed.eq_ordered(&sum));
//! ```
//!
//! # Thread Safety
//!
//! `OrderedMultiset<K>` is `Send` and `Sync` whenever `K` is. Mutation goes
//! through `&mut self`, so sharing one instance between threads that write to
//! it requires external synchronization (a `Mutex` or similar) supplied by the
//! caller.

// =============================================================================
// Hash Builder Selection
// =============================================================================

/// Hash builder used for the key index.
///
/// With the `fxhash` feature this is `rustc_hash::FxBuildHasher`; with the
/// `ahash` feature (and not `fxhash`) it is `ahash::RandomState`. Otherwise
/// the standard library's `RandomState` is used.
#[cfg(feature = "fxhash")]
pub(crate) type HashBuilder = rustc_hash::FxBuildHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub(crate) type HashBuilder = ahash::RandomState;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub(crate) type HashBuilder = std::hash::RandomState;

mod counts;
mod operators;
mod ordered_multiset;
mod repr;

pub use counts::Counts;
pub use ordered_multiset::OrderedMultiset;
pub use ordered_multiset::OrderedMultisetElements;
pub use ordered_multiset::OrderedMultisetIntoIterator;
pub use ordered_multiset::OrderedMultisetIterator;
pub use repr::ReprError;
