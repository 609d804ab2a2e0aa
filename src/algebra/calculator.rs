//! # Calculator hierarchy
//!
//! A calculator supplies the operations of an algebraic structure for some carrier type `T`.
//! Each level adds one capability to the level below it:
//!
//! | trait | adds |
//! |---|---|
//! | `SemigroupCalculator` | associative `apply`, positive powers |
//! | `MonoidCalculator` | `identity`, zero-th power |
//! | `GroupCalculator` | `inverse`, negative powers |
//! | `RingCalculator` | `add`, `negate`, `multiply` (plus `zero`/`one`) |
//! | `FieldCalculator` | `reciprocal`, `divide`, negative multiplicative powers |
//!
//! Powers use square-and-multiply so `x^n` costs O(log n) applications of the operation.
//! `AdditiveGroup` and `MultiplicativeGroup` view a ring or field as a group calculator.
use crate::algebra::equal_predicate::EqualPredicate;
use crate::algebra::error::{AlgebraError, AlgebraResult};

/// `x^n` for `n >= 1` by repeated squaring of `op`.
fn square_and_multiply<T: Clone>(x: &T, n: u64, op: impl Fn(&T, &T) -> T) -> T {
    debug_assert!(n >= 1);
    let mut result = x.clone();
    let mut base = x.clone();
    let mut e = n - 1;
    while e > 0 {
        if e & 1 == 1 {
            result = op(&result, &base);
        }
        e >>= 1;
        if e > 0 {
            base = op(&base, &base);
        }
    }
    result
}

/// Associative binary operation.
pub trait SemigroupCalculator<T: Clone>: EqualPredicate<T> {
    fn apply(&self, x: &T, y: &T) -> T;

    /// `x^n` for `n >= 1`.
    fn gpow_positive(&self, x: &T, n: u64) -> AlgebraResult<T> {
        if n == 0 {
            return Err(AlgebraError::InvalidArgument(
                "semigroup power requires a positive exponent".to_string(),
            ));
        }
        Ok(square_and_multiply(x, n, |a, b| self.apply(a, b)))
    }
}

/// Semigroup with an identity element.
pub trait MonoidCalculator<T: Clone>: SemigroupCalculator<T> {
    fn identity(&self) -> T;

    fn gpow_unsigned(&self, x: &T, n: u64) -> T {
        if n == 0 {
            self.identity()
        } else {
            square_and_multiply(x, n, |a, b| self.apply(a, b))
        }
    }

    fn is_identity(&self, x: &T) -> bool {
        self.is_equal(x, &self.identity())
    }
}

/// Monoid in which every element has an inverse.
pub trait GroupCalculator<T: Clone>: MonoidCalculator<T> {
    fn inverse(&self, x: &T) -> T;

    /// `x^n` for any `n`; `x^(-n) = inverse(x^n)`.
    ///
    /// `n.unsigned_abs()` keeps `i64::MIN` representable.
    fn gpow(&self, x: &T, n: i64) -> T {
        let p = self.gpow_unsigned(x, n.unsigned_abs());
        if n < 0 { self.inverse(&p) } else { p }
    }

    /// `x * y^-1`
    fn divide_right(&self, x: &T, y: &T) -> T {
        self.apply(x, &self.inverse(y))
    }
}

/// Ring with unity. Multiplication need not be commutative or invertible.
pub trait RingCalculator<T: Clone>: EqualPredicate<T> {
    fn zero(&self) -> T;
    fn one(&self) -> T;
    fn add(&self, x: &T, y: &T) -> T;
    fn negate(&self, x: &T) -> T;
    fn multiply(&self, x: &T, y: &T) -> T;

    fn subtract(&self, x: &T, y: &T) -> T {
        self.add(x, &self.negate(y))
    }

    fn is_zero(&self, x: &T) -> bool {
        self.is_equal(x, &self.zero())
    }

    /// `x^n` over multiplication, `n >= 0` only.
    fn pow(&self, x: &T, n: u64) -> T {
        if n == 0 {
            self.one()
        } else {
            square_and_multiply(x, n, |a, b| self.multiply(a, b))
        }
    }

    /// `x + x + ... + x` (`n` terms), negated for negative `n`.
    fn multiply_long(&self, x: &T, n: i64) -> T {
        let m = n.unsigned_abs();
        let sum = if m == 0 {
            self.zero()
        } else {
            square_and_multiply(x, m, |a, b| self.add(a, b))
        };
        if n < 0 { self.negate(&sum) } else { sum }
    }
}

/// Commutative ring in which every non-zero element has a multiplicative inverse.
pub trait FieldCalculator<T: Clone>: RingCalculator<T> {
    fn reciprocal(&self, x: &T) -> AlgebraResult<T>;

    fn divide(&self, x: &T, y: &T) -> AlgebraResult<T> {
        Ok(self.multiply(x, &self.reciprocal(y)?))
    }

    fn pow_signed(&self, x: &T, n: i64) -> AlgebraResult<T> {
        let p = self.pow(x, n.unsigned_abs());
        if n < 0 { self.reciprocal(&p) } else { Ok(p) }
    }

    fn square_root(&self, _x: &T) -> AlgebraResult<T> {
        Err(AlgebraError::UnsupportedCalculation(
            "square root is not available for this number model".to_string(),
        ))
    }
}

/// The additive group `(R, +)` of a ring.
#[derive(Debug, Clone, Default)]
pub struct AdditiveGroup<C> {
    ring: C,
}

impl<C> AdditiveGroup<C> {
    pub fn new(ring: C) -> Self {
        Self { ring }
    }

    pub fn ring(&self) -> &C {
        &self.ring
    }
}

impl<T: Clone, C: RingCalculator<T>> EqualPredicate<T> for AdditiveGroup<C> {
    fn is_equal(&self, a: &T, b: &T) -> bool {
        self.ring.is_equal(a, b)
    }
}

impl<T: Clone, C: RingCalculator<T>> SemigroupCalculator<T> for AdditiveGroup<C> {
    fn apply(&self, x: &T, y: &T) -> T {
        self.ring.add(x, y)
    }
}

impl<T: Clone, C: RingCalculator<T>> MonoidCalculator<T> for AdditiveGroup<C> {
    fn identity(&self) -> T {
        self.ring.zero()
    }
}

impl<T: Clone, C: RingCalculator<T>> GroupCalculator<T> for AdditiveGroup<C> {
    fn inverse(&self, x: &T) -> T {
        self.ring.negate(x)
    }

    fn gpow(&self, x: &T, n: i64) -> T {
        self.ring.multiply_long(x, n)
    }
}

/// The group of units `(F*, *)` of a field.
///
/// Only invertible elements belong to this group; asking for the inverse of zero is a broken
/// invariant of the caller and panics.
#[derive(Debug, Clone)]
pub struct MultiplicativeGroup<C> {
    field: C,
}

impl<C> MultiplicativeGroup<C> {
    pub fn new(field: C) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &C {
        &self.field
    }
}

impl<T: Clone, C: FieldCalculator<T>> EqualPredicate<T> for MultiplicativeGroup<C> {
    fn is_equal(&self, a: &T, b: &T) -> bool {
        self.field.is_equal(a, b)
    }
}

impl<T: Clone, C: FieldCalculator<T>> SemigroupCalculator<T> for MultiplicativeGroup<C> {
    fn apply(&self, x: &T, y: &T) -> T {
        self.field.multiply(x, y)
    }
}

impl<T: Clone, C: FieldCalculator<T>> MonoidCalculator<T> for MultiplicativeGroup<C> {
    fn identity(&self) -> T {
        self.field.one()
    }
}

impl<T: Clone, C: FieldCalculator<T>> GroupCalculator<T> for MultiplicativeGroup<C> {
    fn inverse(&self, x: &T) -> T {
        match self.field.reciprocal(x) {
            Ok(inv) => inv,
            Err(e) => panic!("element outside the group of units: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::number_calculators::{IntegerAddition, IntegerCalculator, ModularCalculator};

    /// string concatenation: a semigroup without identity
    struct Concat;
    impl EqualPredicate<String> for Concat {
        fn is_equal(&self, a: &String, b: &String) -> bool {
            a == b
        }
    }
    impl SemigroupCalculator<String> for Concat {
        fn apply(&self, x: &String, y: &String) -> String {
            format!("{}{}", x, y)
        }
    }

    #[test]
    fn test_semigroup_power() {
        let s = Concat.gpow_positive(&"ab".to_string(), 5).unwrap();
        assert_eq!(s, "ababababab");
        assert_eq!(Concat.gpow_positive(&"x".to_string(), 1).unwrap(), "x");
        assert!(matches!(
            Concat.gpow_positive(&"x".to_string(), 0),
            Err(AlgebraError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_square_and_multiply_matches_naive() {
        let ring = IntegerCalculator;
        for n in 1..40u64 {
            let fast = square_and_multiply(&3i64, n, |a, b| ring.add(a, b));
            assert_eq!(fast, 3 * n as i64);
        }
    }

    #[test]
    fn test_group_power_negative_and_min() {
        let z = IntegerAddition::default();
        assert_eq!(z.gpow(&7i64, 3), 21i64);
        assert_eq!(z.gpow(&7i64, -3), -21i64);
        assert_eq!(z.gpow(&7i64, 0), 0i64);
        // i64::MIN must not overflow when negated; 0 * anything stays 0
        assert_eq!(z.gpow(&0i64, i64::MIN), 0i64);
        let zn = AdditiveGroup::new(ModularCalculator::ring(10).unwrap());
        let expected: u64 = zn.inverse(&zn.gpow_unsigned(&3u64, 1u64 << 63));
        assert_eq!(zn.gpow(&3u64, i64::MIN), expected);
    }

    #[test]
    fn test_integer_power_at_min_exponent() {
        let z = IntegerAddition::default();
        assert_eq!(z.gpow(&1i64, i64::MIN), i64::MIN);
        // -(2^63) * -1 = 2^63, which wraps to i64::MIN
        assert_eq!(z.gpow(&-1i64, i64::MIN), i64::MIN);
        assert_eq!(z.gpow(&2i64, i64::MIN), 0i64);
        assert_eq!(z.gpow(&1i64, i64::MAX), i64::MAX);
    }

    #[test]
    fn test_ring_pow_and_multiply_long() {
        let ring = IntegerCalculator;
        assert_eq!(ring.pow(&2i64, 10), 1024);
        assert_eq!(ring.pow(&5i64, 0), 1);
        assert_eq!(ring.multiply_long(&4i64, -3), -12);
        assert_eq!(ring.subtract(&4i64, &9i64), -5);
    }

    #[test]
    fn test_units_of_z7() {
        let units = MultiplicativeGroup::new(ModularCalculator::field(7).unwrap());
        let one: u64 = units.identity();
        assert_eq!(one, 1);
        assert_eq!(units.apply(&3u64, &5u64), 1u64);
        assert_eq!(units.inverse(&3u64), 5u64);
        assert_eq!(units.gpow(&3u64, 6), 1u64);
        assert_eq!(units.gpow(&3u64, -1), 5u64);
        assert_eq!(units.divide_right(&1u64, &3u64), 5u64);
    }

    #[test]
    #[should_panic(expected = "outside the group of units")]
    fn test_units_reject_zero() {
        let units = MultiplicativeGroup::new(ModularCalculator::field(7).unwrap());
        units.inverse(&0u64);
    }
}
