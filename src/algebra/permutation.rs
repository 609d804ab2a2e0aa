//! # Permutations of `{0, 1, ..., n-1}`
//!
//! A `Permutation` is an immutable image array: `p.apply(i)` is where `i` goes.
//! Composition follows the usual right-to-left convention:
//! - `p.compose(&q)` applies `q` first, then `p`;
//! - `p.and_then(&q)` applies `p` first, then `q`, i.e. `q.compose(&p)`.
//!
//! Cosets, group tables and the regular representation rely on this convention staying fixed.
use crate::algebra::error::{AlgebraError, AlgebraResult};
use itertools::Itertools;
use num::integer::lcm;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Permutation {
    images: Vec<usize>,
}

impl Permutation {
    pub fn identity(size: usize) -> Self {
        Self {
            images: (0..size).collect(),
        }
    }

    /// Transposition of `i` and `j` on `size` points; `i == j` gives the identity.
    pub fn swap(size: usize, i: usize, j: usize) -> AlgebraResult<Self> {
        if i >= size || j >= size {
            return Err(AlgebraError::InvalidArgument(format!(
                "swap({}, {}) out of range for {} points",
                i, j, size
            )));
        }
        let mut images: Vec<usize> = (0..size).collect();
        images.swap(i, j);
        Ok(Self { images })
    }

    /// The cycle `points[0] -> points[1] -> ... -> points[0]`.
    pub fn cycle(size: usize, points: &[usize]) -> AlgebraResult<Self> {
        if points.iter().any(|&p| p >= size) || !points.iter().all_unique() {
            return Err(AlgebraError::InvalidArgument(format!(
                "cycle {:?} is not a set of distinct points below {}",
                points, size
            )));
        }
        let mut images: Vec<usize> = (0..size).collect();
        for (k, &p) in points.iter().enumerate() {
            images[p] = points[(k + 1) % points.len()];
        }
        Ok(Self { images })
    }

    /// Validates that `images` is a bijection of `0..images.len()`.
    pub fn from_images(images: Vec<usize>) -> AlgebraResult<Self> {
        let n = images.len();
        let mut seen = vec![false; n];
        for &i in &images {
            if i >= n || seen[i] {
                return Err(AlgebraError::InvalidArgument(format!(
                    "{:?} is not a permutation of 0..{}",
                    images, n
                )));
            }
            seen[i] = true;
        }
        Ok(Self { images })
    }

    pub(crate) fn from_images_unchecked(images: Vec<usize>) -> Self {
        debug_assert!(Self::from_images(images.clone()).is_ok());
        Self { images }
    }

    pub fn size(&self) -> usize {
        self.images.len()
    }

    pub fn images(&self) -> &[usize] {
        &self.images
    }

    pub fn apply(&self, i: usize) -> usize {
        self.images[i]
    }

    /// Moves the item at position `i` to position `apply(i)`.
    pub fn apply_to_array<T: Clone>(&self, arr: &[T]) -> AlgebraResult<Vec<T>> {
        if arr.len() != self.size() {
            return Err(AlgebraError::InvalidArgument(format!(
                "array of length {} for a permutation of size {}",
                arr.len(),
                self.size()
            )));
        }
        let mut out = arr.to_vec();
        for (i, item) in arr.iter().enumerate() {
            out[self.images[i]] = item.clone();
        }
        Ok(out)
    }

    /// `self ∘ other`: apply `other`, then `self`.
    ///
    /// # Panics
    /// If the sizes differ.
    pub fn compose(&self, other: &Permutation) -> Permutation {
        assert_eq!(
            self.size(),
            other.size(),
            "cannot compose permutations of different sizes"
        );
        Permutation {
            images: other.images.iter().map(|&i| self.images[i]).collect(),
        }
    }

    /// `other ∘ self`: apply `self`, then `other`.
    pub fn and_then(&self, other: &Permutation) -> Permutation {
        other.compose(self)
    }

    pub fn inverse(&self) -> Permutation {
        let mut images = vec![0; self.size()];
        for (i, &j) in self.images.iter().enumerate() {
            images[j] = i;
        }
        Permutation { images }
    }

    pub fn is_identity(&self) -> bool {
        self.images.iter().enumerate().all(|(i, &j)| i == j)
    }

    /// Disjoint cycles of length >= 2, each starting at its smallest point.
    pub fn cycles(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.size()];
        let mut cycles = Vec::new();
        for start in 0..self.size() {
            if visited[start] {
                continue;
            }
            let mut cycle = vec![start];
            visited[start] = true;
            let mut next = self.images[start];
            while next != start {
                visited[next] = true;
                cycle.push(next);
                next = self.images[next];
            }
            if cycle.len() > 1 {
                cycles.push(cycle);
            }
        }
        cycles
    }

    /// A k-cycle is a product of k-1 transpositions.
    pub fn is_even(&self) -> bool {
        self.cycles().iter().map(|c| c.len() - 1).sum::<usize>() % 2 == 0
    }

    pub fn sign(&self) -> i32 {
        if self.is_even() { 1 } else { -1 }
    }

    /// lcm of the cycle lengths
    pub fn order(&self) -> usize {
        self.cycles().iter().fold(1, |acc, c| lcm(acc, c.len()))
    }
}

/// Cycle notation, `()` for the identity.
impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cycles = self.cycles();
        if cycles.is_empty() {
            return write!(f, "()");
        }
        for cycle in cycles {
            write!(f, "({})", cycle.iter().join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;

    #[test]
    fn test_compose_is_right_to_left() {
        // p = (0 1), q = (1 2): p∘q sends 2 -> 1 -> 0
        let p = Permutation::swap(3, 0, 1).unwrap();
        let q = Permutation::swap(3, 1, 2).unwrap();
        let pq = p.compose(&q);
        assert_eq!(pq.apply(2), 0);
        assert_eq!(pq.apply(0), 1);
        assert_eq!(pq.apply(1), 2);
        assert_eq!(p.and_then(&q), q.compose(&p));
        assert_ne!(p.compose(&q), q.compose(&p));
    }

    #[test]
    fn test_cycle_and_display() {
        let c = Permutation::cycle(5, &[0, 2, 4]).unwrap();
        assert_eq!(c.images(), &[2, 1, 4, 3, 0]);
        assert_eq!(c.to_string(), "(0 2 4)");
        assert_eq!(c.order(), 3);
        assert!(c.is_even());
        assert_eq!(Permutation::identity(4).to_string(), "()");
        let p = Permutation::from_images(vec![1, 0, 3, 4, 2]).unwrap();
        assert_eq!(p.to_string(), "(0 1)(2 3 4)");
        assert_eq!(p.order(), 6);
        assert_eq!(p.sign(), -1);
    }

    #[test]
    fn test_constructors_validate() {
        assert!(Permutation::swap(3, 0, 3).is_err());
        assert!(Permutation::cycle(4, &[0, 1, 0]).is_err());
        assert!(Permutation::from_images(vec![0, 0, 1]).is_err());
        assert!(Permutation::from_images(vec![0, 3, 1]).is_err());
        assert!(Permutation::swap(3, 1, 1).unwrap().is_identity());
    }

    #[test]
    fn test_apply_to_array() {
        let c = Permutation::cycle(3, &[0, 1, 2]).unwrap();
        assert_eq!(c.apply_to_array(&['a', 'b', 'c']).unwrap(), vec!['c', 'a', 'b']);
        assert!(c.apply_to_array(&[1, 2]).is_err());
    }

    #[test]
    fn test_inverse_round_trip_random() {
        let mut rng = rand::rng();
        for n in 1..12 {
            let mut images: Vec<usize> = (0..n).collect();
            images.shuffle(&mut rng);
            let p = Permutation::from_images(images).unwrap();
            assert_eq!(p.compose(&p.inverse()), Permutation::identity(n));
            assert_eq!(p.inverse().compose(&p), Permutation::identity(n));
            assert_eq!(p.inverse().inverse(), p);
        }
    }

    #[test]
    #[should_panic(expected = "different sizes")]
    fn test_compose_size_mismatch_panics() {
        Permutation::identity(2).compose(&Permutation::identity(3));
    }
}
