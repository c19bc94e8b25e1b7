//! Pairwise distinctness over a set of variables.

use crate::{
    csp::{EvalMode, Variable},
    solver::{
        constraint::{Constraint, ConstraintDescriptor},
        domain::DigitDomain,
        state::SearchState,
    },
};

/// Requires every variable in `vars` to take a distinct digit.
///
/// In `Incremental` mode, consistency is achieved by waiting for a variable
/// in the set to become a singleton and pruning that digit from the domains
/// of its peers. In `Deferred` mode the constraint is a pure leaf test: it
/// does nothing until every variable is bound, then rejects assignments with
/// a repeated digit.
#[derive(Debug, Clone)]
pub struct AllDifferentConstraint {
    vars: Vec<Variable>,
    mode: EvalMode,
}

impl AllDifferentConstraint {
    pub fn new(vars: Vec<Variable>, mode: EvalMode) -> Self {
        Self { vars, mode }
    }

    fn revise_incremental(&self, target: Variable, state: &SearchState) -> Option<SearchState> {
        // Digits already fixed by other variables in the group.
        let mut fixed = DigitDomain::EMPTY;
        for &var in &self.vars {
            if var != target {
                if let Some(digit) = state.domain(var).singleton_value() {
                    fixed = fixed.with(digit);
                }
            }
        }
        if fixed.is_empty() {
            return None;
        }

        let target_domain = state.domain(target);
        let narrowed = target_domain.difference(fixed);
        if narrowed.len() < target_domain.len() {
            Some(state.with_domain(target, narrowed))
        } else {
            None
        }
    }

    fn revise_deferred(&self, target: Variable, state: &SearchState) -> Option<SearchState> {
        let mut seen = DigitDomain::EMPTY;
        for &var in &self.vars {
            // Not all bound yet: the test has nothing to say.
            let digit = state.domain(var).singleton_value()?;
            if seen.contains(digit) {
                return Some(state.with_domain(target, DigitDomain::EMPTY));
            }
            seen = seen.with(digit);
        }
        None
    }
}

impl Constraint for AllDifferentConstraint {
    fn variables(&self) -> &[Variable] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        let vars = self
            .vars
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        ConstraintDescriptor {
            name: "AllDifferent".to_string(),
            description: format!("AllDifferent({})", vars),
        }
    }

    fn revise(&self, target: Variable, state: &SearchState) -> Option<SearchState> {
        if !self.vars.contains(&target) {
            return None;
        }
        match self.mode {
            EvalMode::Incremental => self.revise_incremental(target, state),
            EvalMode::Deferred => self.revise_deferred(target, state),
        }
    }
}
