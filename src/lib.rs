//! # ordered-counter
//!
//! An insertion-ordered multiset (counter) with order-aware multiset algebra.
//!
//! ## Overview
//!
//! [`OrderedMultiset`](multiset::OrderedMultiset) maps distinct keys to
//! signed counts and remembers the order in which each key was first seen.
//! On top of the counting mutators it provides:
//!
//! - **Multiset Algebra**: addition, subtraction, union (max), intersection
//!   (min), symmetric difference, and the unary `positive` / `negate`
//!   normalizations, all with a reproducible result order
//! - **Operators**: `+ - | & ^` and unary `-`, plus compound assignment
//! - **Canonical Representation**: a `Debug` form that parses back through
//!   `FromStr` with identical content and order
//! - **Type Classes**: `Semigroup` and `Monoid` instances for folding tallies
//!
//! ## Feature Flags
//!
//! - `typeclass`: `Semigroup` / `Monoid` traits and instances (default)
//! - `serde`: ordered map serialization
//! - `fxhash`: hash keys with `rustc-hash`
//! - `ahash`: hash keys with `ahash`
//! - `full`: `typeclass` and `serde`
//!
//! ## Example
//!
//! ```rust
//! use ordered_counter::prelude::*;
//!
//! let left: OrderedMultiset<char> = "abbbc".chars().collect();
//! let right: OrderedMultiset<char> = "bcc".chars().collect();
//!
//! let difference = &left ^ &right;
//! assert_eq!(difference.to_pairs(), vec![('a', 1), ('b', 2), ('c', 1)]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use ordered_counter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::multiset::*;

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;
}

pub mod multiset;

#[cfg(feature = "typeclass")]
pub mod typeclass;
