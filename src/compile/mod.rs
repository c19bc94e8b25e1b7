//! Lowering an [`Equation`] plus a [`Policy`] into a [`CspDescription`].
//!
//! The compiler is polymorphic over a [`ConstraintStrategy`], which dictates
//! only the *shape* of the emitted terms; the semantics (digits 0 through 9,
//! all letters distinct, the arithmetic equality) are identical across
//! strategies. The strategies are plain values composed into the compiler,
//! each returning its complete term set; there is no shared rule list to
//! append to or override.

pub mod generate_and_test;
pub mod propagation;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use generate_and_test::GenerateAndTest;
pub use propagation::Propagation;

use crate::{
    csp::{equation_sums, ConstraintTerm, CspDescription, DomainTerm, OperatorChain, Variable, WeightedSum},
    puzzle::Equation,
};

/// Zero-handling policy for a compilation.
///
/// The two flags are orthogonal: each contributes its own exclusion set
/// (every letter for `allow_zero = false`, every leading letter for
/// `allow_leading_zero = false`) and the sets are unioned. Allowing leading
/// zeros never re-admits a zero that the other flag forbids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub allow_zero: bool,
    pub allow_leading_zero: bool,
}

impl Default for Policy {
    /// Real-world semantics: zero is a digit like any other, but numbers do
    /// not start with it.
    fn default() -> Self {
        Self {
            allow_zero: true,
            allow_leading_zero: false,
        }
    }
}

impl Policy {
    /// Both flags on; nothing is excluded beyond distinctness.
    pub fn permissive() -> Self {
        Self {
            allow_zero: true,
            allow_leading_zero: true,
        }
    }
}

/// The shape vocabulary of one compilation strategy.
///
/// Each hook returns one complete term; the compiler decides which letters
/// the hooks are invoked for.
pub trait ConstraintStrategy: fmt::Debug {
    fn name(&self) -> &'static str;

    fn domain_term(&self, letter: Variable) -> DomainTerm;

    fn distinctness_term(&self, letters: Vec<Variable>) -> ConstraintTerm;

    fn zero_exclusion_term(&self, letter: Variable) -> ConstraintTerm;

    fn equality_term(&self, lhs: OperatorChain, rhs: WeightedSum) -> ConstraintTerm;
}

/// Compiles the equation into an immutable CSP description. Deterministic:
/// letters are visited in sorted order, so two compilations of the same
/// inputs are equal.
pub fn compile(
    equation: &Equation,
    policy: Policy,
    strategy: &dyn ConstraintStrategy,
) -> CspDescription {
    let letters = equation.letters();

    let domains = letters
        .iter()
        .map(|&letter| strategy.domain_term(letter))
        .collect();

    let mut constraints = Vec::new();
    constraints.push(strategy.distinctness_term(letters.iter().copied().collect()));

    let mut excluded: BTreeSet<Variable> = BTreeSet::new();
    if !policy.allow_zero {
        excluded.extend(letters.iter().copied());
    }
    if !policy.allow_leading_zero {
        excluded.extend(equation.leading_letters().iter().copied());
    }
    for letter in excluded {
        constraints.push(strategy.zero_exclusion_term(letter));
    }

    let (lhs, rhs) = equation_sums(equation);
    constraints.push(strategy.equality_term(lhs, rhs));

    CspDescription {
        domains,
        constraints,
    }
}
