//! # Univariate polynomials over a coefficient calculator
//!
//! `Polynomial<T>` stores dense coefficients, lowest degree first. The polynomial arithmetic
//! lives in [`PolynomialCalculator`], which is itself a [`RingCalculator`] over polynomials, so
//! polynomials plug into everything that accepts a ring (powers, additive groups, ...).
//! Over a field the calculator adds Euclidean division and the monic GCD used by the
//! expression simplifier to cancel fractions.
use crate::algebra::calculator::{FieldCalculator, RingCalculator};
use crate::algebra::equal_predicate::EqualPredicate;
use crate::algebra::error::{AlgebraError, AlgebraResult};
use std::fmt;

/// Dense univariate polynomial; `coefficients[i]` multiplies `x^i`.
///
/// The zero polynomial has no coefficients. Values produced by a [`PolynomialCalculator`] never
/// carry trailing zero coefficients.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polynomial<T> {
    coefficients: Vec<T>,
}

impl<T> Polynomial<T> {
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    pub fn is_zero_polynomial(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// `None` for the zero polynomial
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    pub fn leading_coefficient(&self) -> Option<&T> {
        self.coefficients.last()
    }

    /// Renders the polynomial with the given variable name, highest degree first.
    pub fn display_with<'a>(&'a self, var: &'a str) -> PolynomialDisplay<'a, T> {
        PolynomialDisplay { poly: self, var }
    }
}

/// Adapter returned by [`Polynomial::display_with`].
pub struct PolynomialDisplay<'a, T> {
    poly: &'a Polynomial<T>,
    var: &'a str,
}

impl<T: fmt::Display> fmt::Display for PolynomialDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (power, c) in self.poly.coefficients.iter().enumerate().rev() {
            let text = c.to_string();
            if text == "0" {
                continue;
            }
            let (negative, magnitude) = match text.strip_prefix('-') {
                Some(rest) => (true, rest.to_string()),
                None => (false, text),
            };
            if first {
                if negative {
                    write!(f, "-")?;
                }
            } else {
                write!(f, "{}", if negative { " - " } else { " + " })?;
            }
            first = false;
            let needs_parens = magnitude.contains(&['+', '-', ' '][..]);
            let coefficient = if needs_parens {
                format!("({})", magnitude)
            } else {
                magnitude
            };
            match power {
                0 => write!(f, "{}", coefficient)?,
                _ => {
                    if coefficient != "1" {
                        write!(f, "{}*", coefficient)?;
                    }
                    if power == 1 {
                        write!(f, "{}", self.var)?;
                    } else {
                        write!(f, "{}^{}", self.var, power)?;
                    }
                }
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for Polynomial<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_with("x"))
    }
}

/// Polynomial arithmetic over the coefficient calculator `C`.
#[derive(Debug, Clone, Default)]
pub struct PolynomialCalculator<C> {
    coefficients: C,
}

impl<C> PolynomialCalculator<C> {
    pub fn new(coefficients: C) -> Self {
        Self { coefficients }
    }

    pub fn coefficient_calculator(&self) -> &C {
        &self.coefficients
    }
}

impl<C> PolynomialCalculator<C> {
    /// Builds a polynomial from coefficients (lowest degree first), trimming trailing zeros.
    pub fn from_coefficients<T: Clone>(&self, mut coefficients: Vec<T>) -> Polynomial<T>
    where
        C: RingCalculator<T>,
    {
        while let Some(last) = coefficients.last() {
            if self.coefficients.is_zero(last) {
                coefficients.pop();
            } else {
                break;
            }
        }
        Polynomial { coefficients }
    }

    pub fn constant<T: Clone>(&self, c: T) -> Polynomial<T>
    where
        C: RingCalculator<T>,
    {
        self.from_coefficients(vec![c])
    }

    /// `c * x^power`
    pub fn monomial<T: Clone>(&self, c: T, power: usize) -> Polynomial<T>
    where
        C: RingCalculator<T>,
    {
        let mut coefficients = vec![self.coefficients.zero(); power];
        coefficients.push(c);
        self.from_coefficients(coefficients)
    }

    /// Constant term of a polynomial of degree <= 0.
    pub fn as_constant<T: Clone>(&self, p: &Polynomial<T>) -> Option<T>
    where
        C: RingCalculator<T>,
    {
        match p.coefficients.len() {
            0 => Some(self.coefficients.zero()),
            1 => Some(p.coefficients[0].clone()),
            _ => None,
        }
    }

    /// Horner evaluation
    pub fn evaluate<T: Clone>(&self, p: &Polynomial<T>, x: &T) -> T
    where
        C: RingCalculator<T>,
    {
        let ring = &self.coefficients;
        p.coefficients
            .iter()
            .rev()
            .fold(ring.zero(), |acc, c| ring.add(&ring.multiply(&acc, x), c))
    }

    pub fn derivative<T: Clone>(&self, p: &Polynomial<T>) -> Polynomial<T>
    where
        C: RingCalculator<T>,
    {
        let ring = &self.coefficients;
        let coefficients = p
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, c)| ring.multiply_long(c, power as i64))
            .collect();
        self.from_coefficients(coefficients)
    }

    /// multiplies every coefficient by `k`
    pub fn scale<T: Clone>(&self, p: &Polynomial<T>, k: &T) -> Polynomial<T>
    where
        C: RingCalculator<T>,
    {
        let ring = &self.coefficients;
        self.from_coefficients(p.coefficients.iter().map(|c| ring.multiply(c, k)).collect())
    }
}

impl<C> PolynomialCalculator<C> {
    /// Euclidean division: `(q, r)` with `a = q*b + r` and `deg r < deg b`.
    pub fn div_rem<T: Clone>(
        &self,
        a: &Polynomial<T>,
        b: &Polynomial<T>,
    ) -> AlgebraResult<(Polynomial<T>, Polynomial<T>)>
    where
        C: FieldCalculator<T>,
    {
        let field = &self.coefficients;
        let (Some(deg_b), Some(lead_b)) = (b.degree(), b.leading_coefficient()) else {
            return Err(AlgebraError::NotInvertible(
                "division by the zero polynomial".to_string(),
            ));
        };
        let lead_inv = field.reciprocal(lead_b)?;
        let mut remainder = a.coefficients.clone();
        let quotient_len = remainder.len().saturating_sub(deg_b);
        let mut quotient = vec![field.zero(); quotient_len];
        for shift in (0..quotient_len).rev() {
            let top = &remainder[shift + deg_b];
            if field.is_zero(top) {
                continue;
            }
            let factor = field.multiply(top, &lead_inv);
            for (i, bc) in b.coefficients.iter().enumerate() {
                let product = field.multiply(&factor, bc);
                remainder[shift + i] = field.subtract(&remainder[shift + i], &product);
            }
            quotient[shift] = factor;
        }
        remainder.truncate(deg_b);
        Ok((
            self.from_coefficients(quotient),
            self.from_coefficients(remainder),
        ))
    }

    /// Divides by the leading coefficient; the zero polynomial stays zero.
    pub fn monic<T: Clone>(&self, p: &Polynomial<T>) -> AlgebraResult<Polynomial<T>>
    where
        C: FieldCalculator<T>,
    {
        match p.leading_coefficient() {
            None => Ok(p.clone()),
            Some(lead) => {
                let inv = self.coefficients.reciprocal(lead)?;
                Ok(self.scale(p, &inv))
            }
        }
    }

    /// Monic greatest common divisor; `gcd(0, 0) = 0`.
    pub fn gcd<T: Clone>(
        &self,
        a: &Polynomial<T>,
        b: &Polynomial<T>,
    ) -> AlgebraResult<Polynomial<T>>
    where
        C: FieldCalculator<T>,
    {
        let mut x = a.clone();
        let mut y = b.clone();
        while !y.is_zero_polynomial() {
            let (_, r) = self.div_rem(&x, &y)?;
            x = y;
            y = r;
        }
        self.monic(&x)
    }
}

impl<T: Clone, C: RingCalculator<T>> EqualPredicate<Polynomial<T>> for PolynomialCalculator<C> {
    fn is_equal(&self, a: &Polynomial<T>, b: &Polynomial<T>) -> bool {
        let ring = &self.coefficients;
        let zero = ring.zero();
        let n = a.coefficients.len().max(b.coefficients.len());
        (0..n).all(|i| {
            let x = a.coefficients.get(i).unwrap_or(&zero);
            let y = b.coefficients.get(i).unwrap_or(&zero);
            ring.is_equal(x, y)
        })
    }
}

impl<T: Clone, C: RingCalculator<T>> RingCalculator<Polynomial<T>> for PolynomialCalculator<C> {
    fn zero(&self) -> Polynomial<T> {
        Polynomial {
            coefficients: Vec::new(),
        }
    }

    fn one(&self) -> Polynomial<T> {
        self.constant(self.coefficients.one())
    }

    fn add(&self, x: &Polynomial<T>, y: &Polynomial<T>) -> Polynomial<T> {
        let ring = &self.coefficients;
        let n = x.coefficients.len().max(y.coefficients.len());
        let coefficients = (0..n)
            .map(|i| match (x.coefficients.get(i), y.coefficients.get(i)) {
                (Some(a), Some(b)) => ring.add(a, b),
                (Some(a), None) | (None, Some(a)) => a.clone(),
                (None, None) => ring.zero(),
            })
            .collect();
        self.from_coefficients(coefficients)
    }

    fn negate(&self, x: &Polynomial<T>) -> Polynomial<T> {
        let ring = &self.coefficients;
        self.from_coefficients(x.coefficients.iter().map(|c| ring.negate(c)).collect())
    }

    fn multiply(&self, x: &Polynomial<T>, y: &Polynomial<T>) -> Polynomial<T> {
        if x.is_zero_polynomial() || y.is_zero_polynomial() {
            return self.zero();
        }
        let ring = &self.coefficients;
        let mut coefficients = vec![ring.zero(); x.coefficients.len() + y.coefficients.len() - 1];
        for (i, a) in x.coefficients.iter().enumerate() {
            for (j, b) in y.coefficients.iter().enumerate() {
                coefficients[i + j] = ring.add(&coefficients[i + j], &ring.multiply(a, b));
            }
        }
        self.from_coefficients(coefficients)
    }

    fn is_zero(&self, x: &Polynomial<T>) -> bool {
        x.coefficients.iter().all(|c| self.coefficients.is_zero(c))
    }
}
