//! Operator overloads and typeclass instances for [`OrderedMultiset`].
//!
//! | Operator | Method                                                    |
//! |----------|-----------------------------------------------------------|
//! | `a + b`  | [`add_counts`](OrderedMultiset::add_counts)               |
//! | `a - b`  | [`subtract`](OrderedMultiset::subtract)                   |
//! | `a \| b` | [`union`](OrderedMultiset::union)                         |
//! | `a & b`  | [`intersection`](OrderedMultiset::intersection)           |
//! | `a ^ b`  | [`symmetric_difference`](OrderedMultiset::symmetric_difference) |
//! | `-a`     | [`negate`](OrderedMultiset::negate)                       |
//!
//! Rust has no unary `+`; use [`positive`](OrderedMultiset::positive).
//!
//! Every binary operator is implemented for owned and borrowed operands on
//! both sides, and has a compound-assignment form (`+=`, `-=`, `|=`, `&=`,
//! `^=`) that replaces the left operand with the result.

use std::hash::Hash;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Neg, Sub,
    SubAssign,
};

use paste::paste;

use super::ordered_multiset::OrderedMultiset;

macro_rules! impl_binary_operator {
    ($operator:ident, $method:ident, $algebra:ident) => {
        paste! {
            impl<K: Hash + Eq + Clone> $operator<&OrderedMultiset<K>> for &OrderedMultiset<K> {
                type Output = OrderedMultiset<K>;

                fn $method(self, other: &OrderedMultiset<K>) -> Self::Output {
                    self.$algebra(other)
                }
            }

            impl<K: Hash + Eq + Clone> $operator<&OrderedMultiset<K>> for OrderedMultiset<K> {
                type Output = Self;

                fn $method(self, other: &Self) -> Self::Output {
                    self.$algebra(other)
                }
            }

            impl<K: Hash + Eq + Clone> $operator<OrderedMultiset<K>> for &OrderedMultiset<K> {
                type Output = OrderedMultiset<K>;

                fn $method(self, other: OrderedMultiset<K>) -> Self::Output {
                    self.$algebra(&other)
                }
            }

            impl<K: Hash + Eq + Clone> $operator for OrderedMultiset<K> {
                type Output = Self;

                fn $method(self, other: Self) -> Self::Output {
                    self.$algebra(&other)
                }
            }

            impl<K: Hash + Eq + Clone> [<$operator Assign>]<&OrderedMultiset<K>> for OrderedMultiset<K> {
                fn [<$method _assign>](&mut self, other: &Self) {
                    *self = self.$algebra(other);
                }
            }

            impl<K: Hash + Eq + Clone> [<$operator Assign>] for OrderedMultiset<K> {
                fn [<$method _assign>](&mut self, other: Self) {
                    *self = self.$algebra(&other);
                }
            }
        }
    };
}

impl_binary_operator!(Add, add, add_counts);
impl_binary_operator!(Sub, sub, subtract);
impl_binary_operator!(BitOr, bitor, union);
impl_binary_operator!(BitAnd, bitand, intersection);
impl_binary_operator!(BitXor, bitxor, symmetric_difference);

impl<K: Hash + Eq + Clone> Neg for &OrderedMultiset<K> {
    type Output = OrderedMultiset<K>;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl<K: Hash + Eq + Clone> Neg for OrderedMultiset<K> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

// =============================================================================
// Typeclass Instances
// =============================================================================

/// Multisets form a semigroup under count addition.
#[cfg(feature = "typeclass")]
impl<K: Hash + Eq + Clone> crate::typeclass::Semigroup for OrderedMultiset<K> {
    fn combine(self, other: Self) -> Self {
        self.add_counts(&other)
    }

    fn combine_ref(&self, other: &Self) -> Self {
        self.add_counts(other)
    }
}

/// The empty multiset is the identity of count addition.
#[cfg(feature = "typeclass")]
impl<K: Hash + Eq + Clone> crate::typeclass::Monoid for OrderedMultiset<K> {
    fn empty() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tally(text: &str) -> OrderedMultiset<char> {
        text.chars().collect()
    }

    #[rstest]
    fn borrowed_operators_leave_operands_untouched() {
        let left = tally("abbbd");
        let right = tally("bcc");

        let sum = &left + &right;

        assert_eq!(sum.to_pairs(), vec![('a', 1), ('b', 4), ('d', 1), ('c', 2)]);
        assert!(left.eq_ordered(&tally("abbbd")));
        assert!(right.eq_ordered(&tally("bcc")));
    }

    #[rstest]
    #[case::add(tally("abbbd") + tally("bcc"), vec![('a', 1), ('b', 4), ('d', 1), ('c', 2)])]
    #[case::sub(tally("abbbc") - tally("bccd"), vec![('a', 1), ('b', 2)])]
    #[case::bitor(tally("abbbd") | tally("bcc"), vec![('a', 1), ('b', 3), ('d', 1), ('c', 2)])]
    #[case::bitand(tally("abbbc") & tally("bcc"), vec![('b', 1), ('c', 1)])]
    #[case::bitxor(tally("abbbc") ^ tally("bcc"), vec![('a', 1), ('b', 2), ('c', 1)])]
    fn owned_operators_match_named_methods(
        #[case] result: OrderedMultiset<char>,
        #[case] expected: Vec<(char, i64)>,
    ) {
        assert_eq!(result.to_pairs(), expected);
    }

    #[rstest]
    fn mixed_ownership_operators_agree() {
        let left = tally("aab");
        let right = tally("bc");
        let expected = &left - &right;

        assert!((left.clone() - &right).eq_ordered(&expected));
        assert!((&left - right.clone()).eq_ordered(&expected));
    }

    #[rstest]
    fn compound_assignment_replaces_left_operand() {
        let mut running = tally("ab");
        running += &tally("bc");
        assert_eq!(running.to_pairs(), vec![('a', 1), ('b', 2), ('c', 1)]);

        running -= tally("b");
        assert_eq!(running.to_pairs(), vec![('a', 1), ('b', 1), ('c', 1)]);

        running |= tally("ccc");
        assert_eq!(running.to_pairs(), vec![('a', 1), ('b', 1), ('c', 3)]);

        running &= tally("cbbx");
        assert_eq!(running.to_pairs(), vec![('b', 1), ('c', 1)]);

        running ^= tally("cd");
        assert_eq!(running.to_pairs(), vec![('b', 1), ('d', 1)]);
    }

    #[rstest]
    fn compound_assignment_strips_non_positive_entries() {
        let mut running = OrderedMultiset::from_pairs([('a', 0), ('b', -2), ('c', 1)]);
        running += OrderedMultiset::<char>::new();
        assert_eq!(running.to_pairs(), vec![('c', 1)]);
    }

    #[rstest]
    fn negation_flips_only_negative_counts() {
        let signed = OrderedMultiset::from_pairs([('a', 3), ('b', -2), ('c', 0), ('d', -1)]);
        assert_eq!((-&signed).to_pairs(), vec![('b', 2), ('d', 1)]);
        assert_eq!((-signed).to_pairs(), vec![('b', 2), ('d', 1)]);
    }
}
