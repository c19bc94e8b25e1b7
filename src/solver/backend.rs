//! The boundary between compiled constraint terms and executable search.

use im::HashMap;

use crate::{
    csp::{Binding, ConstraintTerm, CspDescription, DomainTerm},
    solver::{
        constraint::Constraint,
        constraints::{
            all_different::AllDifferentConstraint, equation::EquationConstraint,
            exclude_digit::ExcludeDigitConstraint,
        },
        domain::DigitDomain,
        engine::SearchIter,
        heuristics::{heuristic_for, HeuristicKind},
        state::SearchState,
    },
};

/// The external-collaborator contract: consumes a CSP description, produces
/// a lazy sequence of raw bindings.
///
/// The sequence terminates after the last satisfying binding; its order is
/// unspecified and callers must not rely on it. Calling [`solve`] again
/// restarts the enumeration from scratch. Bindings are raw backend output;
/// vetting them against the puzzle is the solution adapter's job.
///
/// [`solve`]: SolvingBackend::solve
pub trait SolvingBackend {
    fn solve(&self, csp: &CspDescription) -> Box<dyn Iterator<Item = Binding>>;
}

/// The bundled backend: backtracking search with AC-3 propagation over
/// ten-bit digit domains. `Deferred` terms are only evaluated on complete
/// assignments, so generate-and-test descriptions really are solved by
/// generate-then-filter; `Incremental` terms prune mid-search.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackingBackend {
    heuristic: HeuristicKind,
}

impl BacktrackingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heuristic(heuristic: HeuristicKind) -> Self {
        Self { heuristic }
    }

    /// Like [`SolvingBackend::solve`] but returns the concrete iterator,
    /// which also exposes search statistics and constraint descriptors.
    pub fn search(&self, csp: &CspDescription) -> SearchIter {
        let domains: HashMap<_, _> = csp
            .domains
            .iter()
            .map(|term| (term.variable(), build_domain(term)))
            .collect();
        let constraints = csp.constraints.iter().map(build_constraint).collect();

        SearchIter::new(
            constraints,
            SearchState::new(domains),
            heuristic_for(self.heuristic),
        )
    }
}

impl SolvingBackend for BacktrackingBackend {
    fn solve(&self, csp: &CspDescription) -> Box<dyn Iterator<Item = Binding>> {
        Box::new(self.search(csp))
    }
}

fn build_domain(term: &DomainTerm) -> DigitDomain {
    match term {
        DomainTerm::Enumerated { digits, .. } => digits.iter().copied().collect(),
        DomainTerm::Interval { lo, hi, .. } => DigitDomain::interval(*lo, *hi),
    }
}

fn build_constraint(term: &ConstraintTerm) -> Box<dyn Constraint> {
    match term {
        ConstraintTerm::AllDifferent { vars, mode } => {
            Box::new(AllDifferentConstraint::new(vars.clone(), *mode))
        }
        ConstraintTerm::ExcludeDigit { var, digit } => {
            Box::new(ExcludeDigitConstraint::new(*var, *digit))
        }
        ConstraintTerm::Equality { lhs, rhs, mode } => {
            Box::new(EquationConstraint::new(lhs.clone(), rhs.clone(), *mode))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        compile::{compile, GenerateAndTest, Policy, Propagation},
        puzzle::Equation,
    };

    #[test]
    fn enumerates_an_exhaustive_solution_set() {
        let equation = Equation::parse("A+B=C").unwrap();
        let csp = compile(&equation, Policy::permissive(), &Propagation);
        let backend = BacktrackingBackend::new();

        let solutions: BTreeSet<Binding> = backend.solve(&csp).collect();
        assert!(!solutions.is_empty());
        for binding in &solutions {
            assert_eq!(binding[&'A'] + binding[&'B'], binding[&'C']);
            assert_ne!(binding[&'A'], binding[&'B']);
        }
    }

    #[test]
    fn solving_twice_restarts_the_enumeration() {
        let equation = Equation::parse("A+B=C").unwrap();
        let csp = compile(&equation, Policy::default(), &Propagation);
        let backend = BacktrackingBackend::new();

        let first: BTreeSet<Binding> = backend.solve(&csp).collect();
        let second: BTreeSet<Binding> = backend.solve(&csp).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn deferred_descriptions_produce_the_same_set() {
        let equation = Equation::parse("A+B=C").unwrap();
        let backend = BacktrackingBackend::new();

        let tested: BTreeSet<Binding> = backend
            .solve(&compile(&equation, Policy::default(), &GenerateAndTest))
            .collect();
        let propagated: BTreeSet<Binding> = backend
            .solve(&compile(&equation, Policy::default(), &Propagation))
            .collect();
        assert_eq!(tested, propagated);
    }

    #[test]
    fn search_iter_reports_statistics() {
        let equation = Equation::parse("A+B=C").unwrap();
        let csp = compile(&equation, Policy::default(), &Propagation);
        let backend = BacktrackingBackend::new();

        let mut search = backend.search(&csp);
        let count = search.by_ref().count() as u64;
        assert_eq!(search.stats().solutions_found, count);
        assert!(search.stats().nodes_visited >= count);
    }
}
