//! The propagation compilation strategy.

use crate::{
    compile::ConstraintStrategy,
    csp::{ConstraintTerm, DomainTerm, EvalMode, OperatorChain, Variable, WeightedSum},
};

/// Emits the same semantic constraints as
/// [`GenerateAndTest`](crate::compile::GenerateAndTest) but shaped for an
/// incremental backend: interval domains and equality/distinctness terms a
/// solver may partially evaluate against an unfinished assignment to narrow
/// domains mid-search. A representational hint only; the accepted solution
/// set is identical for every equation and policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Propagation;

impl ConstraintStrategy for Propagation {
    fn name(&self) -> &'static str {
        "propagation"
    }

    fn domain_term(&self, letter: Variable) -> DomainTerm {
        DomainTerm::Interval {
            var: letter,
            lo: 0,
            hi: 9,
        }
    }

    fn distinctness_term(&self, letters: Vec<Variable>) -> ConstraintTerm {
        ConstraintTerm::AllDifferent {
            vars: letters,
            mode: EvalMode::Incremental,
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
            mode: EvalMode::Incremental,
        }
    }
}
