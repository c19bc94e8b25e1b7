//! The generate-and-test compilation strategy.

use crate::{
    compile::ConstraintStrategy,
    csp::{ConstraintTerm, DomainTerm, EvalMode, OperatorChain, Variable, WeightedSum},
};

/// Emits enumeration-shaped terms: each letter is a member of an explicit
/// digit list, and distinctness and the arithmetic equality are deferred
/// until every letter is bound. Correctness needs nothing from a backend
/// beyond exhaustive generation and filtering, which makes this strategy the
/// reference oracle for the others.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateAndTest;

impl ConstraintStrategy for GenerateAndTest {
    fn name(&self) -> &'static str {
        "generate-and-test"
    }

    fn domain_term(&self, letter: Variable) -> DomainTerm {
        DomainTerm::Enumerated {
            var: letter,
            digits: (0..=9).collect(),
        }
    }

    fn distinctness_term(&self, letters: Vec<Variable>) -> ConstraintTerm {
        ConstraintTerm::AllDifferent {
            vars: letters,
            mode: EvalMode::Deferred,
        }
    }

    fn zero_exclusion_term(&self, letter: Variable) -> ConstraintTerm {
        ConstraintTerm::ExcludeDigit {
            var: letter,
            digit: 0,
        }
    }

    fn equality_term(&self, lhs: OperatorChain, rhs: WeightedSum) -> ConstraintTerm {
        ConstraintTerm::Equality {
            lhs,
            rhs,
            mode: EvalMode::Deferred,
        }
    }
}
