//! # Finite sets under a pluggable equality
//!
//! A `FiniteSet` is an ordered, deduplicated, immutable list of elements. Membership and
//! position queries go through an [`ElementIndex`]: without one they fall back to a linear scan
//! under the caller's [`EqualPredicate`] (O(n) per query); [`FiniteSet::with_ordered_index`]
//! attaches a `BTreeMap` index with O(log n) lookups for element types whose `Ord` agrees with
//! the calculator's equality (permutations, residues).
use crate::algebra::equal_predicate::EqualPredicate;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Position lookup over the elements of a [`FiniteSet`].
pub trait ElementIndex<T> {
    fn position(&self, x: &T) -> Option<usize>;
}

/// `BTreeMap` from element to its position.
#[derive(Debug, Clone)]
pub struct OrderedIndex<T: Ord> {
    positions: BTreeMap<T, usize>,
}

impl<T: Ord + Clone> OrderedIndex<T> {
    pub fn build(elements: &[T]) -> Self {
        let positions = elements
            .iter()
            .enumerate()
            .map(|(i, x)| (x.clone(), i))
            .collect();
        Self { positions }
    }
}

impl<T: Ord> ElementIndex<T> for OrderedIndex<T> {
    fn position(&self, x: &T) -> Option<usize> {
        self.positions.get(x).copied()
    }
}

/// Ordered, deduplicated, immutable collection.
#[derive(Clone)]
pub struct FiniteSet<T> {
    elements: Vec<T>,
    index: Option<Arc<dyn ElementIndex<T>>>,
}

impl<T: fmt::Debug> fmt::Debug for FiniteSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FiniteSet")
            .field("elements", &self.elements)
            .field("indexed", &self.index.is_some())
            .finish()
    }
}

impl<T> FiniteSet<T> {
    /// Wraps elements that the caller guarantees to be pairwise distinct.
    pub fn from_distinct(elements: Vec<T>) -> Self {
        Self {
            elements,
            index: None,
        }
    }

    /// Collects `iter`, keeping the first occurrence of every element (O(n^2) scan).
    pub fn collect_distinct<E>(iter: impl IntoIterator<Item = T>, eq: &E) -> Self
    where
        E: EqualPredicate<T> + ?Sized,
    {
        let mut elements: Vec<T> = Vec::new();
        for x in iter {
            if !elements.iter().any(|y| eq.is_equal(y, &x)) {
                elements.push(x);
            }
        }
        Self::from_distinct(elements)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.elements.get(i)
    }

    pub fn first(&self) -> Option<&T> {
        self.elements.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }

    /// Attaches a custom index. Its positions must agree with the calculator's equality.
    pub fn with_index(mut self, index: Arc<dyn ElementIndex<T>>) -> Self {
        self.index = Some(index);
        self
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    pub fn position_of<E>(&self, x: &T, eq: &E) -> Option<usize>
    where
        E: EqualPredicate<T> + ?Sized,
    {
        match &self.index {
            Some(index) => index.position(x),
            None => self.elements.iter().position(|y| eq.is_equal(y, x)),
        }
    }

    pub fn contains<E>(&self, x: &T, eq: &E) -> bool
    where
        E: EqualPredicate<T> + ?Sized,
    {
        self.position_of(x, eq).is_some()
    }

    pub fn is_subset_of<E>(&self, other: &FiniteSet<T>, eq: &E) -> bool
    where
        E: EqualPredicate<T> + ?Sized,
    {
        self.elements.iter().all(|x| other.contains(x, eq))
    }

    /// Equality as sets: same size and mutual containment, order ignored.
    pub fn set_equals<E>(&self, other: &FiniteSet<T>, eq: &E) -> bool
    where
        E: EqualPredicate<T> + ?Sized,
    {
        self.len() == other.len() && self.is_subset_of(other, eq) && other.is_subset_of(self, eq)
    }
}

impl<T: Ord + Clone + 'static> FiniteSet<T> {
    /// Attaches an ordered index. `Ord` equality must coincide with the calculator's equality,
    /// which holds for permutations but not for residues compared modulo `n`.
    pub fn with_ordered_index(mut self) -> Self {
        self.index = Some(Arc::new(OrderedIndex::build(&self.elements)));
        self
    }
}

impl<'a, T> IntoIterator for &'a FiniteSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::equal_predicate::{FnEquality, NaturalEquality};

    #[test]
    fn test_collect_distinct_keeps_first_occurrence() {
        let set = FiniteSet::collect_distinct(vec![3, 1, 3, 2, 1], &NaturalEquality);
        assert_eq!(set.as_slice(), &[3, 1, 2]);
    }

    #[test]
    fn test_collect_distinct_under_custom_equality() {
        let mod3 = FnEquality::new(|a: &i32, b: &i32| (a - b).rem_euclid(3) == 0);
        let set = FiniteSet::collect_distinct(0..10, &mod3);
        assert_eq!(set.as_slice(), &[0, 1, 2]);
        assert!(set.contains(&7, &mod3));
        assert_eq!(set.position_of(&8, &mod3), Some(2));
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let a = FiniteSet::from_distinct(vec![1, 2, 3]);
        let b = FiniteSet::from_distinct(vec![3, 1, 2]);
        let c = FiniteSet::from_distinct(vec![1, 2]);
        assert!(a.set_equals(&b, &NaturalEquality));
        assert!(!a.set_equals(&c, &NaturalEquality));
        assert!(c.is_subset_of(&a, &NaturalEquality));
    }

    #[test]
    fn test_ordered_index_agrees_with_linear_scan() {
        let elements: Vec<u32> = (0..50).map(|i| (i * 7) % 50).collect();
        let linear = FiniteSet::from_distinct(elements.clone());
        let indexed = FiniteSet::from_distinct(elements).with_ordered_index();
        assert!(indexed.is_indexed());
        for x in 0..60u32 {
            assert_eq!(
                linear.position_of(&x, &NaturalEquality),
                indexed.position_of(&x, &NaturalEquality)
            );
        }
    }
}
