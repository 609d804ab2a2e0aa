use crate::algebra::finite_group::{FiniteGroup, Side};
use crate::algebra::finite_set::FiniteSet;

/// Left coset `xH` or right coset `Hx` of a subgroup `H` inside a group `G`.
///
/// A transient view computed by [`FiniteGroup::coset`]; it borrows the group and subgroup it was
/// computed from and is never cached.
#[derive(Debug)]
pub struct Coset<'a, T> {
    group: &'a FiniteGroup<T>,
    subgroup: &'a FiniteGroup<T>,
    representative: T,
    side: Side,
    elements: FiniteSet<T>,
}

impl<'a, T: Clone + 'static> Coset<'a, T> {
    pub(crate) fn new(
        group: &'a FiniteGroup<T>,
        subgroup: &'a FiniteGroup<T>,
        representative: T,
        side: Side,
        elements: FiniteSet<T>,
    ) -> Self {
        Self {
            group,
            subgroup,
            representative,
            side,
            elements,
        }
    }

    pub fn group(&self) -> &'a FiniteGroup<T> {
        self.group
    }

    pub fn subgroup(&self) -> &'a FiniteGroup<T> {
        self.subgroup
    }

    pub fn representative(&self) -> &T {
        &self.representative
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn elements(&self) -> &FiniteSet<T> {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, x: &T) -> bool {
        self.elements.contains(x, self.group.calculator().as_ref())
    }

    /// Same set of elements, whichever representatives produced them.
    pub fn same_as(&self, other: &Coset<'_, T>) -> bool {
        self.elements
            .set_equals(&other.elements, self.group.calculator().as_ref())
    }
}
