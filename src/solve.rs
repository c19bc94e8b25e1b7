//! The end-to-end facade: equation in, validated assignments out.

use crate::{
    adapter::{adapt, Assignment},
    compile::{compile, ConstraintStrategy, Policy},
    csp::Binding,
    error::Result,
    puzzle::Equation,
    solver::backend::{BacktrackingBackend, SolvingBackend},
};

/// Wires the compiler, a solving backend, and the solution adapter together.
///
/// The compiler and adapter are pure; all search cost lives in the backend's
/// lazy iterator, so a `Solver` is cheap to construct and safe to share.
pub struct Solver<B: SolvingBackend = BacktrackingBackend> {
    backend: B,
}

impl Default for Solver<BacktrackingBackend> {
    fn default() -> Self {
        Self::new(BacktrackingBackend::new())
    }
}

impl<B: SolvingBackend> Solver<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Compiles the equation under the policy and strategy and starts a lazy
    /// enumeration of its solutions. Each call restarts from scratch.
    pub fn solve(
        &self,
        equation: &Equation,
        policy: Policy,
        strategy: &dyn ConstraintStrategy,
    ) -> Solutions {
        let csp = compile(equation, policy, strategy);
        Solutions {
            bindings: self.backend.solve(&csp),
            equation: equation.clone(),
        }
    }
}

/// The lazy stream of a puzzle's solutions, adapted and vetted one pull at a
/// time. Dropping it cancels the remaining search.
pub struct Solutions {
    bindings: Box<dyn Iterator<Item = Binding>>,
    equation: Equation,
}

impl Iterator for Solutions {
    type Item = Result<Assignment>;

    fn next(&mut self) -> Option<Self::Item> {
        let binding = self.bindings.next()?;
        Some(adapt(&binding, &self.equation).map_err(Into::into))
    }
}
