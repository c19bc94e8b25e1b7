//! Unary digit exclusion, used for the zero policy terms.

use crate::{
    csp::Variable,
    solver::{
        constraint::{Constraint, ConstraintDescriptor},
        state::SearchState,
    },
};

/// `var != digit`. Fires once, on the first revision of its variable.
#[derive(Debug, Clone)]
pub struct ExcludeDigitConstraint {
    vars: [Variable; 1],
    digit: u8,
}

impl ExcludeDigitConstraint {
    pub fn new(var: Variable, digit: u8) -> Self {
        Self { vars: [var], digit }
    }
}

impl Constraint for ExcludeDigitConstraint {
    fn variables(&self) -> &[Variable] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "ExcludeDigit".to_string(),
            description: format!("{} != {}", self.vars[0], self.digit),
        }
    }

    fn revise(&self, target: Variable, state: &SearchState) -> Option<SearchState> {
        if target != self.vars[0] {
            return None;
        }
        let domain = state.domain(target);
        if domain.contains(self.digit) {
            Some(state.with_domain(target, domain.without(self.digit)))
        } else {
            None
        }
    }
}
