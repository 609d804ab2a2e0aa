//! # Algebra core
//! Calculators describe how elements of a number model combine; finite sets and groups are
//! built on top of them.
//!
//! ```
//! use RustedAlgebra::algebra::cyclic_group::CyclicGroup;
//! use RustedAlgebra::algebra::permutation_group::PermutationGroup;
//! use RustedAlgebra::algebra::finite_group::FiniteGroupLike;
//! let z12 = CyclicGroup::create_group(12).unwrap();
//! assert_eq!(z12.subgroups_as_cyclic().len(), 6);
//! let s4 = PermutationGroup::symmetric_group(4).unwrap();
//! assert_eq!(s4.group_order(), 24);
//! ```
/// error kinds shared by calculators and group constructors
pub mod error;
/// caller-supplied equality
pub mod equal_predicate;
/// semigroup, monoid, group, ring and field calculators
pub mod calculator;
/// integers, residues, rationals and reals
pub mod number_calculators;
/// univariate polynomials over any field calculator, with division and GCD
pub mod polynomial;
pub mod finite_set;
/// closure, cosets, group table, regular representation
pub mod finite_group;
pub mod coset;
pub mod permutation;
/// symmetric, alternating and generated permutation groups; shared calculator cache
pub mod permutation_group;
pub mod cyclic_group;
