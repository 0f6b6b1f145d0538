//! `Semigroup`: merging two values of a type into one.
//!
//! Implementations promise that the merge is associative: grouping does not
//! matter, only the left-to-right sequence of operands does.
//!
//! ```text
//! x.combine(y).combine(z) == x.combine(y.combine(z))
//! ```
//!
//! Multisets only satisfy this law for non-negative counts: addition drops
//! non-positive intermediate results, so a negative count in the middle
//! operand can be discarded on one side of the equation and not the other.

/// Types whose values can be merged pairwise.
///
/// ```rust
/// use ordered_counter::multiset::OrderedMultiset;
/// use ordered_counter::typeclass::Semigroup;
///
/// let left: OrderedMultiset<char> = "ab".chars().collect();
/// let right: OrderedMultiset<char> = "bc".chars().collect();
///
/// let combined = left.combine(right);
/// assert_eq!(combined.get(&'b'), 2);
/// ```
pub trait Semigroup {
    /// Merges `other` into `self`, consuming both.
    #[must_use]
    fn combine(self, other: Self) -> Self;

    /// Merges borrowed operands.
    ///
    /// Falls back to cloning both sides; override when the merge can read
    /// its operands in place.
    #[must_use]
    fn combine_ref(&self, other: &Self) -> Self
    where
        Self: Clone,
    {
        Self::combine(self.clone(), other.clone())
    }

    /// Merges every item left to right, or `None` when there are no items.
    ///
    /// ```rust
    /// use ordered_counter::multiset::OrderedMultiset;
    /// use ordered_counter::typeclass::Semigroup;
    ///
    /// let batches: Vec<OrderedMultiset<char>> = vec![
    ///     "ab".chars().collect(),
    ///     "b".chars().collect(),
    /// ];
    /// let merged = OrderedMultiset::reduce_all(batches).unwrap();
    /// assert_eq!(merged.get(&'b'), 2);
    ///
    /// let nothing: Vec<OrderedMultiset<char>> = vec![];
    /// assert!(OrderedMultiset::reduce_all(nothing).is_none());
    /// ```
    fn reduce_all<I>(items: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        let mut items = items.into_iter();
        let first = items.next()?;
        Some(items.fold(first, Self::combine))
    }
}

/// A missing batch is skipped; two present batches are merged.
impl<T: Semigroup> Semigroup for Option<T> {
    fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Some(first), Some(second)) => Some(first.combine(second)),
            (present, None) | (None, present) => present,
        }
    }
}
