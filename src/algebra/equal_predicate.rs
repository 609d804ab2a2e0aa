//! Pluggable equivalence relations.
//!
//! Element equality in this crate is decided by a calculator, never by `==` directly: two symbolic
//! polynomials, two floats within tolerance or two residues are "equal" only in the sense their
//! calculator defines. Implementations must be reflexive, symmetric and transitive; nothing checks it.

/// Equivalence relation over `T`.
pub trait EqualPredicate<T> {
    fn is_equal(&self, a: &T, b: &T) -> bool;
}

/// Equality given by the type's own `PartialEq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalEquality;

impl<T: PartialEq> EqualPredicate<T> for NaturalEquality {
    fn is_equal(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Equality given by a closure
pub struct FnEquality<F> {
    func: F,
}

impl<F> FnEquality<F> {
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<T, F> EqualPredicate<T> for FnEquality<F>
where
    F: Fn(&T, &T) -> bool,
{
    fn is_equal(&self, a: &T, b: &T) -> bool {
        (self.func)(a, b)
    }
}
