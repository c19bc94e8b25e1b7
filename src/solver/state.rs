//! Immutable search states.

use im::HashMap;

use crate::{
    csp::{Binding, Variable},
    solver::domain::DigitDomain,
};

/// One point in the search space: the current domain of every variable.
///
/// Backed by a persistent map, so cloning a state when branching shares
/// structure with its parent instead of copying it. Narrowing a domain
/// produces a new state; existing states are never mutated.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub domains: HashMap<Variable, DigitDomain>,
}

impl SearchState {
    pub fn new(domains: HashMap<Variable, DigitDomain>) -> Self {
        Self { domains }
    }

    /// The current domain of `var`. A variable the state does not track is
    /// unconstrained.
    pub fn domain(&self, var: Variable) -> DigitDomain {
        self.domains
            .get(&var)
            .copied()
            .unwrap_or_else(DigitDomain::all)
    }

    pub fn with_domain(&self, var: Variable, domain: DigitDomain) -> Self {
        Self {
            domains: self.domains.update(var, domain),
        }
    }

    pub fn assign(&self, var: Variable, digit: u8) -> Self {
        self.with_domain(var, DigitDomain::singleton(digit))
    }

    /// True when every tracked domain is a singleton.
    pub fn is_complete(&self) -> bool {
        self.domains.values().all(|d| d.is_singleton())
    }

    /// The assignment this state denotes. Only meaningful when
    /// [`is_complete`](Self::is_complete) holds; unassigned variables are
    /// omitted.
    pub fn binding(&self) -> Binding {
        self.domains
            .iter()
            .filter_map(|(&var, domain)| domain.singleton_value().map(|d| (var, d)))
            .collect()
    }
}
