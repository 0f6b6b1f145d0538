//! `Monoid`: a [`Semigroup`] with a neutral starting value.
//!
//! Merging with [`Monoid::empty`] on either side must give back the other
//! operand unchanged:
//!
//! ```text
//! T::empty().combine(x) == x == x.combine(T::empty())
//! ```
//!
//! For multisets this holds for values whose counts are all positive;
//! adding the empty multiset strips zero and negative entries.

use super::semigroup::Semigroup;

/// Semigroups with a neutral value, so any number of items (zero included)
/// can be merged.
///
/// ```rust
/// use ordered_counter::multiset::OrderedMultiset;
/// use ordered_counter::typeclass::{Monoid, Semigroup};
///
/// let tally: OrderedMultiset<char> = "hello".chars().collect();
/// assert_eq!(OrderedMultiset::empty().combine(tally.clone()), tally);
/// assert_eq!(tally.clone().combine(OrderedMultiset::empty()), tally);
/// ```
pub trait Monoid: Semigroup {
    /// The neutral value.
    fn empty() -> Self;

    /// Merges every item left to right, starting from [`Monoid::empty`].
    fn combine_all<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        items.into_iter().fold(Self::empty(), Self::combine)
    }

    /// Whether `self` equals the neutral value.
    fn is_empty_value(&self) -> bool
    where
        Self: PartialEq + Sized,
    {
        Self::empty().eq(self)
    }
}

/// `None` is neutral, so absent batches vanish from a fold.
impl<T: Semigroup> Monoid for Option<T> {
    fn empty() -> Self {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multiset::OrderedMultiset;
    use rstest::rstest;

    fn tally(text: &str) -> OrderedMultiset<char> {
        text.chars().collect()
    }

    #[rstest]
    fn combine_all_of_nothing_is_empty() {
        let folded = OrderedMultiset::<char>::combine_all(Vec::new());
        assert!(folded.is_empty());
        assert!(folded.is_empty_value());
    }

    #[rstest]
    fn combine_all_sums_every_batch_in_first_seen_order() {
        let folded =
            OrderedMultiset::combine_all(vec![tally("ab"), tally("cb"), tally("da")]);
        assert_eq!(
            folded.to_pairs(),
            vec![('a', 2), ('b', 2), ('c', 1), ('d', 1)]
        );
    }

    #[rstest]
    fn option_monoid_skips_missing_batches() {
        let folded = Option::combine_all(vec![None, Some(tally("a")), None, Some(tally("a"))]);
        assert_eq!(folded, Some(tally("aa")));
    }

    #[rstest]
    fn non_empty_multiset_is_not_identity() {
        assert!(!tally("x").is_empty_value());
    }
}
