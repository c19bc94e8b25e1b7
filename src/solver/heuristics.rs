//! Variable-selection heuristics for the bundled backend.

use crate::{csp::Variable, solver::state::SearchState};

/// Chooses the next unassigned variable to branch on. Returns `None` when
/// every domain is a singleton.
pub trait VariableSelectionHeuristic {
    fn select_variable(&self, state: &SearchState) -> Option<Variable>;
}

/// Deterministic baseline: the alphabetically first unassigned variable.
pub struct SelectFirstHeuristic;

impl VariableSelectionHeuristic for SelectFirstHeuristic {
    fn select_variable(&self, state: &SearchState) -> Option<Variable> {
        state
            .domains
            .iter()
            .filter(|(_, domain)| domain.len() > 1)
            .map(|(&var, _)| var)
            .min()
    }
}

/// Fail-first: the unassigned variable with the fewest remaining digits,
/// ties broken alphabetically for determinism.
pub struct MinimumRemainingValuesHeuristic;

impl VariableSelectionHeuristic for MinimumRemainingValuesHeuristic {
    fn select_variable(&self, state: &SearchState) -> Option<Variable> {
        state
            .domains
            .iter()
            .filter(|(_, domain)| domain.len() > 1)
            .min_by_key(|(&var, domain)| (domain.len(), var))
            .map(|(&var, _)| var)
    }
}

/// A uniformly random unassigned variable. Changes the exploration order,
/// never the solution set.
pub struct RandomVariableHeuristic;

impl VariableSelectionHeuristic for RandomVariableHeuristic {
    fn select_variable(&self, state: &SearchState) -> Option<Variable> {
        use rand::seq::IteratorRandom;

        state
            .domains
            .iter()
            .filter(|(_, domain)| domain.len() > 1)
            .map(|(&var, _)| var)
            .choose(&mut rand::thread_rng())
    }
}

/// Selector for configuring a backend without passing trait objects around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeuristicKind {
    First,
    #[default]
    MinimumRemainingValues,
    Random,
}

pub fn heuristic_for(kind: HeuristicKind) -> Box<dyn VariableSelectionHeuristic> {
    match kind {
        HeuristicKind::First => Box::new(SelectFirstHeuristic),
        HeuristicKind::MinimumRemainingValues => Box::new(MinimumRemainingValuesHeuristic),
        HeuristicKind::Random => Box::new(RandomVariableHeuristic),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::domain::DigitDomain;

    fn state() -> SearchState {
        SearchState::new(im::hashmap! {
            'A' => DigitDomain::interval(0, 9),
            'B' => DigitDomain::singleton(3),
            'C' => DigitDomain::interval(0, 2),
        })
    }

    #[test]
    fn select_first_picks_alphabetically() {
        assert_eq!(SelectFirstHeuristic.select_variable(&state()), Some('A'));
    }

    #[test]
    fn mrv_picks_the_tightest_domain() {
        assert_eq!(
            MinimumRemainingValuesHeuristic.select_variable(&state()),
            Some('C')
        );
    }

    #[test]
    fn random_only_picks_unassigned_variables() {
        for _ in 0..20 {
            let picked = RandomVariableHeuristic.select_variable(&state());
            assert!(matches!(picked, Some('A') | Some('C')));
        }
    }

    #[test]
    fn nothing_to_select_in_a_complete_state() {
        let complete = SearchState::new(im::hashmap! {
            'A' => DigitDomain::singleton(1),
        });
        assert_eq!(
            MinimumRemainingValuesHeuristic.select_variable(&complete),
            None
        );
    }
}
