//! Concrete number models: integers, residues modulo `n`, rationals and floating-point reals.
use crate::algebra::calculator::{AdditiveGroup, FieldCalculator, RingCalculator};
use crate::algebra::equal_predicate::EqualPredicate;
use crate::algebra::error::{AlgebraError, AlgebraResult};
use num::integer::{Integer, Roots};
use num::rational::Rational64;
use num_traits::{One, Signed, Zero};

/// The ring of integers over `i64`, wrapping on overflow (two's complement arithmetic).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerCalculator;

impl EqualPredicate<i64> for IntegerCalculator {
    fn is_equal(&self, a: &i64, b: &i64) -> bool {
        a == b
    }
}

impl RingCalculator<i64> for IntegerCalculator {
    fn zero(&self) -> i64 {
        0
    }
    fn one(&self) -> i64 {
        1
    }
    fn add(&self, x: &i64, y: &i64) -> i64 {
        x.wrapping_add(*y)
    }
    fn negate(&self, x: &i64) -> i64 {
        x.wrapping_neg()
    }
    fn multiply(&self, x: &i64, y: &i64) -> i64 {
        x.wrapping_mul(*y)
    }
}

/// `(Z, +)`
pub type IntegerAddition = AdditiveGroup<IntegerCalculator>;

pub(crate) fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3u64;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Residues modulo `n`, represented by `u64` values in `0..n`.
///
/// Built with [`ModularCalculator::ring`] for any modulus or [`ModularCalculator::field`] for a
/// prime one. Inputs outside `0..n` are reduced first, so `12` and `2` are equal modulo 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModularCalculator {
    modulus: u64,
}

impl ModularCalculator {
    /// Any positive modulus. The [`FieldCalculator`] methods are available on the result too,
    /// but for a composite modulus only residues coprime to it have a reciprocal: the others
    /// give `NotInvertible`, and wrapping such a calculator in a
    /// [`MultiplicativeGroup`](crate::algebra::calculator::MultiplicativeGroup) makes `inverse`
    /// panic on them. Use [`ModularCalculator::field`] when a field is meant.
    pub fn ring(modulus: u64) -> AlgebraResult<Self> {
        if modulus == 0 {
            return Err(AlgebraError::InvalidArgument(
                "modulus must be positive".to_string(),
            ));
        }
        Ok(Self { modulus })
    }

    pub fn field(prime: u64) -> AlgebraResult<Self> {
        if !is_prime(prime) {
            return Err(AlgebraError::InvalidArgument(format!(
                "{} is not prime, Z/{}Z is not a field",
                prime, prime
            )));
        }
        Ok(Self { modulus: prime })
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn reduce(&self, x: u64) -> u64 {
        x % self.modulus
    }

    /// maps a signed integer to its residue
    pub fn residue_of(&self, x: i64) -> u64 {
        (x as i128).rem_euclid(self.modulus as i128) as u64
    }
}

impl EqualPredicate<u64> for ModularCalculator {
    fn is_equal(&self, a: &u64, b: &u64) -> bool {
        self.reduce(*a) == self.reduce(*b)
    }
}

impl RingCalculator<u64> for ModularCalculator {
    fn zero(&self) -> u64 {
        0
    }
    fn one(&self) -> u64 {
        self.reduce(1)
    }
    fn add(&self, x: &u64, y: &u64) -> u64 {
        ((*x as u128 + *y as u128) % self.modulus as u128) as u64
    }
    fn negate(&self, x: &u64) -> u64 {
        (self.modulus - self.reduce(*x)) % self.modulus
    }
    fn multiply(&self, x: &u64, y: &u64) -> u64 {
        ((*x as u128 * *y as u128) % self.modulus as u128) as u64
    }
}

impl FieldCalculator<u64> for ModularCalculator {
    /// Extended Euclid; only residues coprime to the modulus are invertible.
    fn reciprocal(&self, x: &u64) -> AlgebraResult<u64> {
        let a = self.reduce(*x) as i128;
        let n = self.modulus as i128;
        let egcd = a.extended_gcd(&n);
        if egcd.gcd != 1 {
            return Err(AlgebraError::NotInvertible(format!(
                "{} mod {} (gcd = {})",
                x, self.modulus, egcd.gcd
            )));
        }
        Ok(egcd.x.rem_euclid(n) as u64)
    }
}

/// The field of rationals over `Rational64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RationalCalculator;

impl EqualPredicate<Rational64> for RationalCalculator {
    fn is_equal(&self, a: &Rational64, b: &Rational64) -> bool {
        a == b
    }
}

impl RingCalculator<Rational64> for RationalCalculator {
    fn zero(&self) -> Rational64 {
        Rational64::zero()
    }
    fn one(&self) -> Rational64 {
        Rational64::one()
    }
    fn add(&self, x: &Rational64, y: &Rational64) -> Rational64 {
        x + y
    }
    fn negate(&self, x: &Rational64) -> Rational64 {
        -x
    }
    fn multiply(&self, x: &Rational64, y: &Rational64) -> Rational64 {
        x * y
    }
    fn is_zero(&self, x: &Rational64) -> bool {
        x.is_zero()
    }
}

impl FieldCalculator<Rational64> for RationalCalculator {
    fn reciprocal(&self, x: &Rational64) -> AlgebraResult<Rational64> {
        if x.is_zero() {
            return Err(AlgebraError::NotInvertible("rational zero".to_string()));
        }
        Ok(x.recip())
    }

    /// exact roots only: both numerator and denominator must be perfect squares
    fn square_root(&self, x: &Rational64) -> AlgebraResult<Rational64> {
        if x.is_negative() {
            return Err(AlgebraError::OutOfDomain(format!("sqrt({})", x)));
        }
        let (n, d) = (*x.numer(), *x.denom());
        let (rn, rd) = (n.sqrt(), d.sqrt());
        if rn * rn == n && rd * rd == d {
            Ok(Rational64::new(rn, rd))
        } else {
            Err(AlgebraError::UnsupportedCalculation(format!(
                "sqrt({}) is not rational",
                x
            )))
        }
    }
}

/// The field of reals over `f64`; equality is relative with an absolute floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealCalculator {
    epsilon: f64,
    max_relative: f64,
}

impl Default for RealCalculator {
    fn default() -> Self {
        Self {
            epsilon: 1e-12,
            max_relative: 1e-10,
        }
    }
}

impl RealCalculator {
    pub fn with_tolerance(epsilon: f64, max_relative: f64) -> Self {
        Self {
            epsilon,
            max_relative,
        }
    }
}

impl EqualPredicate<f64> for RealCalculator {
    fn is_equal(&self, a: &f64, b: &f64) -> bool {
        approx::relative_eq!(
            *a,
            *b,
            epsilon = self.epsilon,
            max_relative = self.max_relative
        )
    }
}

impl RingCalculator<f64> for RealCalculator {
    fn zero(&self) -> f64 {
        0.0
    }
    fn one(&self) -> f64 {
        1.0
    }
    fn add(&self, x: &f64, y: &f64) -> f64 {
        x + y
    }
    fn negate(&self, x: &f64) -> f64 {
        -x
    }
    fn multiply(&self, x: &f64, y: &f64) -> f64 {
        x * y
    }
}

impl FieldCalculator<f64> for RealCalculator {
    fn reciprocal(&self, x: &f64) -> AlgebraResult<f64> {
        if self.is_zero(x) {
            return Err(AlgebraError::NotInvertible(format!("{} is zero", x)));
        }
        Ok(1.0 / x)
    }

    fn square_root(&self, x: &f64) -> AlgebraResult<f64> {
        if self.is_zero(x) {
            return Ok(0.0);
        }
        if *x < 0.0 {
            return Err(AlgebraError::OutOfDomain(format!("sqrt({})", x)));
        }
        Ok(x.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::calculator::{GroupCalculator, MultiplicativeGroup};
    use approx::assert_relative_eq;

    #[test]
    fn test_is_prime() {
        let primes: Vec<u64> = (0..30).filter(|n| is_prime(*n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_modular_ring_arithmetic() {
        let z10 = ModularCalculator::ring(10).unwrap();
        assert_eq!(z10.add(&7, &8), 5);
        assert_eq!(z10.negate(&3), 7);
        assert_eq!(z10.negate(&0), 0);
        assert_eq!(z10.multiply(&4, &3), 2);
        assert!(z10.is_equal(&12, &2));
        assert_eq!(z10.residue_of(-3), 7);
        assert_eq!(z10.pow(&3, 4), 1);
    }

    #[test]
    fn test_modular_reciprocal() {
        let z10 = ModularCalculator::ring(10).unwrap();
        assert_eq!(z10.reciprocal(&3).unwrap(), 7);
        assert!(matches!(z10.reciprocal(&4), Err(AlgebraError::NotInvertible(_))));
        let f13 = ModularCalculator::field(13).unwrap();
        for x in 1..13u64 {
            let r = f13.reciprocal(&x).unwrap();
            assert_eq!(f13.multiply(&x, &r), 1);
        }
        assert!(matches!(f13.reciprocal(&0), Err(AlgebraError::NotInvertible(_))));
        assert_eq!(f13.pow_signed(&2, -1).unwrap(), 7);
    }

    #[test]
    fn test_units_over_composite_ring_accept_coprime_residues() {
        let units = MultiplicativeGroup::new(ModularCalculator::ring(10).unwrap());
        assert_eq!(units.inverse(&3u64), 7u64);
        assert_eq!(units.inverse(&9u64), 9u64);
    }

    #[test]
    #[should_panic(expected = "outside the group of units")]
    fn test_units_over_composite_ring_reject_zero_divisors() {
        let units = MultiplicativeGroup::new(ModularCalculator::ring(10).unwrap());
        units.inverse(&2u64);
    }

    #[test]
    fn test_integer_ring_wraps_on_overflow() {
        let z = IntegerCalculator;
        assert_eq!(z.add(&i64::MAX, &1), i64::MIN);
        assert_eq!(z.negate(&i64::MIN), i64::MIN);
        assert_eq!(z.multiply(&i64::MAX, &2), -2);
    }

    #[test]
    fn test_modular_constructors_validate() {
        assert!(matches!(ModularCalculator::ring(0), Err(AlgebraError::InvalidArgument(_))));
        assert!(matches!(ModularCalculator::field(12), Err(AlgebraError::InvalidArgument(_))));
        assert_eq!(ModularCalculator::ring(1).unwrap().one(), 0);
    }

    #[test]
    fn test_rational_field() {
        let q = RationalCalculator;
        let a = Rational64::new(2, 3);
        let b = Rational64::new(3, 4);
        assert_eq!(q.divide(&a, &b).unwrap(), Rational64::new(8, 9));
        assert!(matches!(q.reciprocal(&q.zero()), Err(AlgebraError::NotInvertible(_))));
        assert_eq!(q.pow_signed(&a, -2).unwrap(), Rational64::new(9, 4));
        assert_eq!(q.square_root(&Rational64::new(9, 16)).unwrap(), Rational64::new(3, 4));
        assert!(matches!(
            q.square_root(&Rational64::new(-1, 4)),
            Err(AlgebraError::OutOfDomain(_))
        ));
        assert!(matches!(
            q.square_root(&Rational64::new(2, 1)),
            Err(AlgebraError::UnsupportedCalculation(_))
        ));
    }

    #[test]
    fn test_real_field_tolerance() {
        let r = RealCalculator::default();
        assert!(r.is_equal(&(0.1 + 0.2), &0.3));
        assert!(!r.is_equal(&1.0, &1.001));
        assert_relative_eq!(r.reciprocal(&4.0).unwrap(), 0.25);
        assert!(matches!(r.reciprocal(&0.0), Err(AlgebraError::NotInvertible(_))));
        assert_relative_eq!(r.square_root(&2.25).unwrap(), 1.5);
        assert!(matches!(r.square_root(&-1.0), Err(AlgebraError::OutOfDomain(_))));
        assert_relative_eq!(r.pow_signed(&2.0, -3).unwrap(), 0.125);
    }
}
