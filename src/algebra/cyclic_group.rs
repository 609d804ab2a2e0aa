//! Cyclic groups `<g>` inside the additive group `Z/mZ`.
//!
//! `CyclicGroup::create_group(n)` is `Z/nZ` itself (`g = 1`, `m = n`). Its subgroups keep the
//! same modulus and calculator instance, so `subgroups_as_cyclic` results are recognised by
//! [`FiniteGroup::is_subgroup`].
use crate::algebra::calculator::{AdditiveGroup, GroupCalculator};
use crate::algebra::error::{AlgebraError, AlgebraResult};
use crate::algebra::finite_group::{FiniteGroup, FiniteGroupLike};
use crate::algebra::finite_set::{ElementIndex, FiniteSet};
use crate::algebra::number_calculators::ModularCalculator;
use log::debug;
use num::integer::gcd;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Positions keyed by residue, so `x` and `x + m` hit the same entry.
#[derive(Debug, Clone)]
struct ResidueIndex {
    modulus: u64,
    positions: BTreeMap<u64, usize>,
}

impl ResidueIndex {
    fn build(elements: &[u64], modulus: u64) -> Self {
        let positions = elements
            .iter()
            .enumerate()
            .map(|(i, &x)| (x % modulus, i))
            .collect();
        Self { modulus, positions }
    }
}

impl ElementIndex<u64> for ResidueIndex {
    fn position(&self, x: &u64) -> Option<usize> {
        self.positions.get(&(x % self.modulus)).copied()
    }
}

#[derive(Debug, Clone)]
pub struct CyclicGroup {
    size: u64,
    generator: u64,
    modulus: u64,
    group: FiniteGroup<u64>,
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

/// Divisors of `n` in ascending order.
pub fn divisors(n: u64) -> Vec<u64> {
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1u64;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            small.push(d);
            if d != n / d {
                large.push(n / d);
            }
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    small
}

impl CyclicGroup {
    /// `Z/nZ` under addition.
    pub fn create_group(n: u64) -> AlgebraResult<Self> {
        if n == 0 {
            return Err(AlgebraError::InvalidArgument(
                "cyclic group order must be at least 1".to_string(),
            ));
        }
        let calculator: Arc<dyn GroupCalculator<u64>> =
            Arc::new(AdditiveGroup::new(ModularCalculator::ring(n)?));
        Ok(Self::with_calculator(calculator, n, 1, n))
    }

    /// The subgroup of `Z/mZ` generated by `generator`; its size is `m / gcd(generator, m)`.
    pub fn generated_by(generator: u64, modulus: u64) -> AlgebraResult<Self> {
        let calculator: Arc<dyn GroupCalculator<u64>> =
            Arc::new(AdditiveGroup::new(ModularCalculator::ring(modulus)?));
        let generator = generator % modulus;
        let size = modulus / gcd(generator, modulus);
        Ok(Self::with_calculator(calculator, size, generator, modulus))
    }

    fn with_calculator(
        calculator: Arc<dyn GroupCalculator<u64>>,
        size: u64,
        generator: u64,
        modulus: u64,
    ) -> Self {
        let elements: Vec<u64> = (0..size).map(|k| mul_mod(k, generator, modulus)).collect();
        let index = Arc::new(ResidueIndex::build(&elements, modulus));
        let set = FiniteSet::from_distinct(elements).with_index(index);
        Self {
            size,
            generator,
            modulus,
            group: FiniteGroup::from_checked_set(calculator, set),
        }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn generator(&self) -> u64 {
        self.generator
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// `0, g, 2g, ..., (size-1)g` modulo `m`.
    pub fn set(&self) -> &[u64] {
        self.group.elements().as_slice()
    }

    /// The elements `k*g` with `gcd(k, size) = 1`; there are `phi(size)` of them.
    pub fn generators(&self) -> Vec<u64> {
        if self.size == 1 {
            return vec![0];
        }
        (1..self.size)
            .filter(|&k| gcd(k, self.size) == 1)
            .map(|k| mul_mod(k, self.generator, self.modulus))
            .collect()
    }

    /// One subgroup per divisor `d` of the size, generated by `(size/d)*g`, ordered by `d`.
    pub fn subgroups_as_cyclic(&self) -> Vec<CyclicGroup> {
        let subgroups: Vec<CyclicGroup> = divisors(self.size)
            .into_iter()
            .map(|d| {
                let step = mul_mod(self.size / d, self.generator, self.modulus);
                Self::with_calculator(self.group.calculator().clone(), d, step, self.modulus)
            })
            .collect();
        debug!(
            "cyclic group of order {}: {} subgroups",
            self.size,
            subgroups.len()
        );
        subgroups
    }

    /// Membership up to reduction modulo `m`.
    pub fn contains(&self, x: &u64) -> bool {
        self.group.contains(&(x % self.modulus))
    }

    /// `m / gcd(x, m)`, which always divides the size.
    pub fn element_order(&self, x: u64) -> AlgebraResult<u64> {
        if !self.contains(&x) {
            return Err(AlgebraError::InvalidArgument(format!(
                "{} is not in the subgroup generated by {} mod {}",
                x, self.generator, self.modulus
            )));
        }
        Ok(self.modulus / gcd(x % self.modulus, self.modulus))
    }

    fn require_subgroup(&self, subgroup: &FiniteGroup<u64>) -> AlgebraResult<()> {
        if self.group.is_subgroup(subgroup) {
            Ok(())
        } else {
            Err(AlgebraError::InvalidArgument(
                "argument is not a subgroup of this cyclic group".to_string(),
            ))
        }
    }
}

impl FiniteGroupLike<u64> for CyclicGroup {
    fn as_group(&self) -> &FiniteGroup<u64> {
        &self.group
    }

    fn subgroups(&self) -> AlgebraResult<Vec<FiniteGroup<u64>>> {
        Ok(self
            .subgroups_as_cyclic()
            .into_iter()
            .map(|c| c.group)
            .collect())
    }

    /// Every subgroup of an abelian group is normal.
    fn normal_subgroups(&self) -> AlgebraResult<Vec<FiniteGroup<u64>>> {
        self.subgroups()
    }

    fn normalizer(&self, subgroup: &FiniteGroup<u64>) -> AlgebraResult<FiniteGroup<u64>> {
        self.require_subgroup(subgroup)?;
        Ok(self.group.clone())
    }

    fn centralizer(&self, subgroup: &FiniteGroup<u64>) -> AlgebraResult<FiniteGroup<u64>> {
        self.require_subgroup(subgroup)?;
        Ok(self.group.clone())
    }
}
