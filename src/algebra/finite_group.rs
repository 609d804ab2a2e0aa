//! # Finite groups over an arbitrary calculator
//!
//! [`FiniteGroup`] pairs a shared [`GroupCalculator`] with the [`FiniteSet`] of its elements.
//! Every algorithm here (cosets, the Cayley table, the regular representation, closure-based
//! generation) talks to the elements only through the calculator, so the same code serves
//! permutations, residues, matrices or symbolic values.
//!
//! Lookups go through [`FiniteSet::position_of`]: linear scans by default, ordered-index lookups
//! when the set carries one. With linear scans the costs are
//! - coset: O(|H|^2)
//! - group table: O(|G|^3)
//! - naive closure: O(|G|^3) per pass
//!
//! which is fine for the small groups this module is meant for.
use crate::algebra::calculator::GroupCalculator;
use crate::algebra::coset::Coset;
use crate::algebra::error::{AlgebraError, AlgebraResult};
use crate::algebra::finite_set::FiniteSet;
use crate::algebra::permutation::Permutation;
use crate::algebra::permutation_group::PermutationGroup;
use log::{debug, info};
use std::fmt;
use std::sync::Arc;
use tabled::{builder::Builder, settings::Style};

/// Which side the fixed element multiplies from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Finite group: a shared calculator plus its element set, identity first.
#[derive(Clone)]
pub struct FiniteGroup<T> {
    calculator: Arc<dyn GroupCalculator<T>>,
    set: FiniteSet<T>,
}

impl<T: fmt::Debug> fmt::Debug for FiniteGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FiniteGroup")
            .field("order", &self.set.len())
            .field("elements", &self.set)
            .finish()
    }
}

/// Thin data pointer of a shared calculator; two groups are comparable only if these match.
fn calculator_address<T>(calc: &Arc<dyn GroupCalculator<T>>) -> *const () {
    Arc::as_ptr(calc) as *const ()
}

impl<T: Clone + 'static> FiniteGroup<T> {
    /// Wraps a set the caller guarantees to be closed under `calculator`, identity first.
    pub fn from_checked_set(calculator: Arc<dyn GroupCalculator<T>>, set: FiniteSet<T>) -> Self {
        Self { calculator, set }
    }

    /// Smallest set containing the identity and `generators` that is closed under the operation.
    ///
    /// The carrier must be finite around the generators or this never returns; use
    /// [`FiniteGroup::create_group_with_limit`] when that is not certain.
    pub fn create_group(calculator: Arc<dyn GroupCalculator<T>>, generators: &[T]) -> Self {
        match Self::close(calculator, generators, None) {
            Ok(group) => group,
            Err(e) => unreachable!("closure without a limit cannot fail: {}", e),
        }
    }

    /// Like [`FiniteGroup::create_group`] but gives up once more than `limit` elements are found.
    pub fn create_group_with_limit(
        calculator: Arc<dyn GroupCalculator<T>>,
        generators: &[T],
        limit: usize,
    ) -> AlgebraResult<Self> {
        Self::close(calculator, generators, Some(limit))
    }

    /// Repeats passes over all ordered pairs until a pass adds nothing.
    fn close(
        calculator: Arc<dyn GroupCalculator<T>>,
        generators: &[T],
        limit: Option<usize>,
    ) -> AlgebraResult<Self> {
        let calc = calculator.as_ref();
        let start = std::iter::once(calc.identity()).chain(generators.iter().cloned());
        let mut elements = FiniteSet::collect_distinct(start, calc).into_vec();
        let mut pass = 0;
        loop {
            pass += 1;
            let n = elements.len();
            let mut added = false;
            for i in 0..n {
                for j in 0..n {
                    let product = calc.apply(&elements[i], &elements[j]);
                    if !elements.iter().any(|y| calc.is_equal(y, &product)) {
                        elements.push(product);
                        added = true;
                        if let Some(limit) = limit {
                            if elements.len() > limit {
                                return Err(AlgebraError::InvalidArgument(format!(
                                    "generated set exceeds {} elements, the generators may not lie in a finite group",
                                    limit
                                )));
                            }
                        }
                    }
                }
            }
            debug!("closure pass {}: {} elements", pass, elements.len());
            if !added {
                break;
            }
        }
        info!(
            "generated group of order {} from {} generators",
            elements.len(),
            generators.len()
        );
        Ok(Self::from_checked_set(
            calculator,
            FiniteSet::from_distinct(elements),
        ))
    }

    pub fn calculator(&self) -> &Arc<dyn GroupCalculator<T>> {
        &self.calculator
    }

    pub fn elements(&self) -> &FiniteSet<T> {
        &self.set
    }

    pub fn order(&self) -> usize {
        self.set.len()
    }

    pub fn identity(&self) -> T {
        self.calculator.identity()
    }

    pub fn index_of(&self, x: &T) -> Option<usize> {
        self.set.position_of(x, self.calculator.as_ref())
    }

    pub fn contains(&self, x: &T) -> bool {
        self.index_of(x).is_some()
    }

    /// Position of `x` in the element array; a miss means the set is not closed.
    fn index_or_panic(&self, x: &T, context: &str) -> usize {
        match self.index_of(x) {
            Some(i) => i,
            None => panic!(
                "{}: product not found among the {} elements, the set is not closed under the operation",
                context,
                self.order()
            ),
        }
    }

    /// The subgroup `{e}` sharing this group's calculator.
    pub fn trivial_subgroup(&self) -> FiniteGroup<T> {
        FiniteGroup::from_checked_set(
            self.calculator.clone(),
            FiniteSet::from_distinct(vec![self.identity()]),
        )
    }

    /// `xH` (left) or `Hx` (right), deduplicated under the calculator's equality.
    pub fn coset<'a>(&'a self, x: &T, subgroup: &'a FiniteGroup<T>, side: Side) -> Coset<'a, T> {
        let calc = self.calculator.as_ref();
        let products = subgroup.set.iter().map(|t| match side {
            Side::Left => calc.apply(x, t),
            Side::Right => calc.apply(t, x),
        });
        let elements = FiniteSet::collect_distinct(products, calc);
        Coset::new(self, subgroup, x.clone(), side, elements)
    }

    /// The partition of this group into cosets of `subgroup`, in order of first representative.
    pub fn cosets<'a>(&'a self, subgroup: &'a FiniteGroup<T>, side: Side) -> Vec<Coset<'a, T>> {
        let mut cosets: Vec<Coset<'a, T>> = Vec::new();
        for x in self.set.iter() {
            if cosets.iter().any(|c| c.contains(x)) {
                continue;
            }
            cosets.push(self.coset(x, subgroup, side));
        }
        cosets
    }

    /// `[G : H] = |G| / |H|`
    pub fn subgroup_index(&self, subgroup: &FiniteGroup<T>) -> AlgebraResult<usize> {
        if !self.is_subgroup(subgroup) {
            return Err(AlgebraError::InvalidArgument(
                "argument is not a subgroup of this group".to_string(),
            ));
        }
        Ok(self.order() / subgroup.order())
    }

    /// Cayley table: `table[i][j]` is the position of `elements[i] * elements[j]`.
    ///
    /// # Panics
    /// If some product is missing from the element set.
    pub fn group_table(&self) -> Vec<Vec<usize>> {
        let arr = self.set.as_slice();
        let calc = self.calculator.as_ref();
        arr.iter()
            .map(|a| {
                arr.iter()
                    .map(|b| self.index_or_panic(&calc.apply(a, b), "group table"))
                    .collect()
            })
            .collect()
    }

    /// The Cayley table as a text table with the elements as row and column headers.
    pub fn render_group_table(&self) -> String
    where
        T: fmt::Display,
    {
        let names: Vec<String> = self.set.iter().map(|x| x.to_string()).collect();
        let mut builder = Builder::default();
        builder.push_record(std::iter::once("*".to_string()).chain(names.iter().cloned()));
        for (i, row) in self.group_table().into_iter().enumerate() {
            builder.push_record(
                std::iter::once(names[i].clone()).chain(row.into_iter().map(|k| names[k].clone())),
            );
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }

    /// Cayley embedding into the symmetric group on `|G|` points.
    ///
    /// For every element `a` the permutation sends position `j` to the position of
    /// `elements[j] * a` (right) or `a^-1 * elements[j]` (left). In both cases
    /// `rep(a * b) == rep(a).and_then(&rep(b))`, and the result lists the permutations in the
    /// order of this group's elements.
    pub fn regular_represent(&self, side: Side) -> PermutationGroup {
        let arr = self.set.as_slice();
        let calc = self.calculator.as_ref();
        let permutations: Vec<Permutation> = arr
            .iter()
            .map(|a| {
                let images = match side {
                    Side::Right => arr
                        .iter()
                        .map(|x| self.index_or_panic(&calc.apply(x, a), "regular representation"))
                        .collect(),
                    Side::Left => {
                        let a_inv = calc.inverse(a);
                        arr.iter()
                            .map(|x| {
                                self.index_or_panic(&calc.apply(&a_inv, x), "regular representation")
                            })
                            .collect()
                    }
                };
                Permutation::from_images_unchecked(images)
            })
            .collect();
        PermutationGroup::from_closed_permutations(arr.len(), permutations)
    }

    /// `other` is a subgroup if it shares this group's calculator instance and all of its
    /// elements belong to this group. Calculators are compared by identity, not by behaviour.
    pub fn is_subgroup(&self, other: &FiniteGroup<T>) -> bool {
        if calculator_address(&self.calculator) != calculator_address(&other.calculator) {
            return false;
        }
        other.set.is_subset_of(&self.set, self.calculator.as_ref())
    }

    /// Smallest `k >= 1` with `x^k = e`.
    pub fn element_order(&self, x: &T) -> AlgebraResult<usize> {
        if !self.contains(x) {
            return Err(AlgebraError::InvalidArgument(
                "element does not belong to the group".to_string(),
            ));
        }
        let calc = self.calculator.as_ref();
        let mut power = x.clone();
        for k in 1..=self.order() {
            if calc.is_identity(&power) {
                return Ok(k);
            }
            power = calc.apply(&power, x);
        }
        panic!(
            "no power of the element up to {} is the identity, the set is not a group",
            self.order()
        )
    }

    pub fn is_abelian(&self) -> bool {
        let calc = self.calculator.as_ref();
        let arr = self.set.as_slice();
        arr.iter().enumerate().all(|(i, a)| {
            arr[i + 1..]
                .iter()
                .all(|b| calc.is_equal(&calc.apply(a, b), &calc.apply(b, a)))
        })
    }
}

/// Common surface of concrete finite groups; structural queries return plain [`FiniteGroup`]
/// handles rather than the concrete type.
pub trait FiniteGroupLike<T: Clone + 'static> {
    fn as_group(&self) -> &FiniteGroup<T>;

    fn group_order(&self) -> usize {
        self.as_group().order()
    }

    /// Degenerate default: only the group itself and the trivial subgroup.
    fn subgroups(&self) -> AlgebraResult<Vec<FiniteGroup<T>>> {
        let group = self.as_group();
        if group.order() == 1 {
            return Ok(vec![group.clone()]);
        }
        Ok(vec![group.clone(), group.trivial_subgroup()])
    }

    fn normal_subgroups(&self) -> AlgebraResult<Vec<FiniteGroup<T>>> {
        Err(AlgebraError::UnsupportedOperation(
            "normal subgroup enumeration".to_string(),
        ))
    }

    fn normalizer(&self, _subgroup: &FiniteGroup<T>) -> AlgebraResult<FiniteGroup<T>> {
        Err(AlgebraError::UnsupportedOperation("normalizer".to_string()))
    }

    fn centralizer(&self, _subgroup: &FiniteGroup<T>) -> AlgebraResult<FiniteGroup<T>> {
        Err(AlgebraError::UnsupportedOperation("centralizer".to_string()))
    }
}

impl<T: Clone + 'static> FiniteGroupLike<T> for FiniteGroup<T> {
    fn as_group(&self) -> &FiniteGroup<T> {
        self
    }
}
