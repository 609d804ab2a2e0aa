//! # Permutation groups
//!
//! Subgroups of the symmetric group on `n` points. All groups of the same degree share one
//! [`PermutationCalculator`] instance taken from a process-wide [`CalculatorCache`], so that
//! subgroup tests, which compare calculators by identity, work across independently built groups.
//!
//! The product is `x * y = x.compose(y)`: apply `y` first, then `x`.
use crate::algebra::calculator::{GroupCalculator, MonoidCalculator, SemigroupCalculator};
use crate::algebra::equal_predicate::EqualPredicate;
use crate::algebra::error::{AlgebraError, AlgebraResult};
use crate::algebra::finite_group::{FiniteGroup, FiniteGroupLike};
use crate::algebra::finite_set::FiniteSet;
use crate::algebra::permutation::Permutation;
use itertools::Itertools;
use log::{debug, info};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, LazyLock, Mutex};

/// Largest degree accepted by [`PermutationGroup::symmetric_group`]; 12! is already 479001600.
pub const MAX_SYMMETRIC_DEGREE: usize = 12;

/// Group operations on permutations of a fixed size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationCalculator {
    size: usize,
}

impl PermutationCalculator {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl EqualPredicate<Permutation> for PermutationCalculator {
    fn is_equal(&self, a: &Permutation, b: &Permutation) -> bool {
        a == b
    }
}

impl SemigroupCalculator<Permutation> for PermutationCalculator {
    fn apply(&self, x: &Permutation, y: &Permutation) -> Permutation {
        x.compose(y)
    }
}

impl MonoidCalculator<Permutation> for PermutationCalculator {
    fn identity(&self) -> Permutation {
        Permutation::identity(self.size)
    }

    fn is_identity(&self, x: &Permutation) -> bool {
        x.is_identity()
    }
}

impl GroupCalculator<Permutation> for PermutationCalculator {
    fn inverse(&self, x: &Permutation) -> Permutation {
        x.inverse()
    }
}

/// One shared calculator per degree.
#[derive(Debug, Default)]
pub struct CalculatorCache {
    calculators: Mutex<HashMap<usize, Arc<PermutationCalculator>>>,
}

impl CalculatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, size: usize) -> Arc<PermutationCalculator> {
        let mut calculators = match self.calculators.lock() {
            Ok(guard) => guard,
            // the map is never left half-updated, so a poisoned lock is still usable
            Err(poisoned) => poisoned.into_inner(),
        };
        calculators
            .entry(size)
            .or_insert_with(|| {
                debug!("new permutation calculator for degree {}", size);
                Arc::new(PermutationCalculator::new(size))
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        match self.calculators.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static PERMUTATION_CALCULATORS: LazyLock<CalculatorCache> = LazyLock::new(CalculatorCache::new);

/// The process-wide calculator registry used by every [`PermutationGroup`] constructor.
pub fn permutation_calculators() -> &'static CalculatorCache {
    &PERMUTATION_CALCULATORS
}

fn shared_calculator(size: usize) -> Arc<dyn GroupCalculator<Permutation>> {
    permutation_calculators().get_or_create(size)
}

/// A finite group of permutations of `degree` points.
#[derive(Debug, Clone)]
pub struct PermutationGroup {
    degree: usize,
    group: FiniteGroup<Permutation>,
}

impl PermutationGroup {
    /// Wraps permutations known to form a group, identity first; attaches an ordered index.
    pub(crate) fn from_closed_permutations(degree: usize, permutations: Vec<Permutation>) -> Self {
        let set = FiniteSet::from_distinct(permutations).with_ordered_index();
        Self {
            degree,
            group: FiniteGroup::from_checked_set(shared_calculator(degree), set),
        }
    }

    /// All `n!` permutations of `n` points, identity first.
    pub fn symmetric_group(n: usize) -> AlgebraResult<Self> {
        if n == 0 || n > MAX_SYMMETRIC_DEGREE {
            return Err(AlgebraError::InvalidArgument(format!(
                "symmetric group degree must be in 1..={}, got {}",
                MAX_SYMMETRIC_DEGREE, n
            )));
        }
        // lexicographic order starts with 0, 1, ..., n-1, the identity
        let permutations: Vec<Permutation> = (0..n)
            .permutations(n)
            .map(Permutation::from_images_unchecked)
            .collect();
        info!("symmetric group S{}: {} elements", n, permutations.len());
        Ok(Self::from_closed_permutations(n, permutations))
    }

    /// The even permutations of `n` points.
    pub fn alternating_group(n: usize) -> AlgebraResult<Self> {
        let symmetric = Self::symmetric_group(n)?;
        let even: Vec<Permutation> = symmetric
            .group
            .elements()
            .iter()
            .filter(|p| p.is_even())
            .cloned()
            .collect();
        Ok(Self::from_closed_permutations(n, even))
    }

    /// Closure of `generators` under composition.
    ///
    /// Each newly found permutation is multiplied by every generator until nothing new appears;
    /// since every element of a finite group has finite order this also yields the inverses.
    pub fn generate_from(generators: &[Permutation]) -> AlgebraResult<Self> {
        let first = generators.first().ok_or_else(|| {
            AlgebraError::InvalidArgument("at least one generator is required".to_string())
        })?;
        let degree = first.size();
        if let Some(bad) = generators.iter().find(|g| g.size() != degree) {
            return Err(AlgebraError::InvalidArgument(format!(
                "generator {} has size {}, expected {}",
                bad,
                bad.size(),
                degree
            )));
        }
        let identity = Permutation::identity(degree);
        let mut seen: BTreeSet<Permutation> = BTreeSet::new();
        seen.insert(identity.clone());
        let mut elements = vec![identity];
        let mut frontier = 0;
        while frontier < elements.len() {
            let current = elements[frontier].clone();
            frontier += 1;
            for g in generators {
                let next = current.compose(g);
                if seen.insert(next.clone()) {
                    elements.push(next);
                }
            }
        }
        info!(
            "generated permutation group of order {} on {} points from {} generators",
            elements.len(),
            degree,
            generators.len()
        );
        Ok(Self::from_closed_permutations(degree, elements))
    }

    /// Wraps a set the caller asserts to be a group of permutations of `degree` points, without
    /// checking closure. The identity is moved to the front if it is present elsewhere.
    pub fn group_of_checked(degree: usize, permutations: Vec<Permutation>) -> AlgebraResult<Self> {
        if let Some(bad) = permutations.iter().find(|p| p.size() != degree) {
            return Err(AlgebraError::InvalidArgument(format!(
                "permutation {} has size {}, expected {}",
                bad,
                bad.size(),
                degree
            )));
        }
        let mut permutations: Vec<Permutation> = permutations.into_iter().unique().collect();
        match permutations.iter().position(|p| p.is_identity()) {
            Some(i) => permutations.swap(0, i),
            None => {
                return Err(AlgebraError::InvalidArgument(
                    "a group must contain the identity".to_string(),
                ));
            }
        }
        Ok(Self::from_closed_permutations(degree, permutations))
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn order(&self) -> usize {
        self.group.order()
    }

    pub fn permutations(&self) -> &[Permutation] {
        self.group.elements().as_slice()
    }

    pub fn contains(&self, p: &Permutation) -> bool {
        p.size() == self.degree && self.group.contains(p)
    }

    /// The subgroup generated by `generators`, sharing this group's calculator.
    pub fn subgroup_generated_by(&self, generators: &[Permutation]) -> AlgebraResult<Self> {
        if let Some(outside) = generators.iter().find(|g| !self.contains(g)) {
            return Err(AlgebraError::InvalidArgument(format!(
                "{} is not an element of the group",
                outside
            )));
        }
        if generators.is_empty() {
            return Ok(Self::from_closed_permutations(
                self.degree,
                vec![Permutation::identity(self.degree)],
            ));
        }
        Self::generate_from(generators)
    }
}

impl FiniteGroupLike<Permutation> for PermutationGroup {
    fn as_group(&self) -> &FiniteGroup<Permutation> {
        &self.group
    }
}
