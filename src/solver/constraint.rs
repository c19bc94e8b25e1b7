use crate::{csp::Variable, solver::state::SearchState};

/// Human-readable identification of a constraint, for diagnostics and the
/// statistics table.
#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub description: String,
}

/// An executable constraint inside the bundled backend.
pub trait Constraint: std::fmt::Debug {
    /// The variables this constraint touches. Revision is only ever
    /// requested for one of these.
    fn variables(&self) -> &[Variable];

    fn descriptor(&self) -> ConstraintDescriptor;

    /// Narrows the domain of `target` against the rest of the state.
    ///
    /// Returns `Some(new_state)` only when the target's domain actually
    /// shrank; `None` means no change. Signalling a contradiction is done by
    /// returning a state in which the target's domain is empty.
    fn revise(&self, target: Variable, state: &SearchState) -> Option<SearchState>;
}
