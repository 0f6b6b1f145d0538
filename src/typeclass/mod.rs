//! Algebraic type classes for counts.
//!
//! This module provides the two algebraic structures that the multiset
//! algebra plugs into:
//!
//! - [`Semigroup`]: Associative binary operations (`combine`)
//! - [`Monoid`]: Semigroup with identity element (`empty`)
//!
//! [`OrderedMultiset`](crate::multiset::OrderedMultiset) is a semigroup under
//! count addition and a monoid whose identity is the empty multiset, so whole
//! batches of tallies can be folded with [`Monoid::combine_all`].
//!
//! # Examples
//!
//! ```rust
//! use ordered_counter::multiset::OrderedMultiset;
//! use ordered_counter::typeclass::{Monoid, Semigroup};
//!
//! let morning: OrderedMultiset<char> = "abbbd".chars().collect();
//! let evening: OrderedMultiset<char> = "bcc".chars().collect();
//!
//! let day = morning.combine(evening);
//! assert_eq!(day.get(&'b'), 4);
//!
//! let nothing = OrderedMultiset::<char>::combine_all(Vec::new());
//! assert!(nothing.is_empty());
//! ```

mod monoid;
mod semigroup;

pub use monoid::Monoid;
pub use semigroup::Semigroup;
