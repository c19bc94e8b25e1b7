//! The backtracking search at the core of the bundled backend.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, trace};

use crate::{
    csp::{Binding, Variable},
    solver::{
        constraint::Constraint,
        heuristics::VariableSelectionHeuristic,
        state::SearchState,
        stats::SearchStats,
        work_list::WorkList,
    },
};

pub type ConstraintId = usize;

/// Lazily enumerates every complete, consistent assignment of a problem.
///
/// Each pull pops candidate states off an explicit stack, runs the AC-3
/// propagation loop over them, and either emits a complete state's binding
/// or branches on an unassigned variable. Work stops between pulls, so a
/// caller that stops consuming pays for at most one further solution's worth
/// of search.
pub struct SearchIter {
    constraints: Vec<Box<dyn Constraint>>,
    dependency_graph: HashMap<Variable, Vec<ConstraintId>>,
    heuristic: Box<dyn VariableSelectionHeuristic>,
    stack: Vec<SearchState>,
    stats: SearchStats,
}

impl SearchIter {
    pub fn new(
        constraints: Vec<Box<dyn Constraint>>,
        initial: SearchState,
        heuristic: Box<dyn VariableSelectionHeuristic>,
    ) -> Self {
        let mut dependency_graph: HashMap<Variable, Vec<ConstraintId>> = HashMap::new();
        for (id, constraint) in constraints.iter().enumerate() {
            for &var in constraint.variables() {
                dependency_graph.entry(var).or_default().push(id);
            }
        }

        Self {
            constraints,
            dependency_graph,
            heuristic,
            stack: vec![initial],
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn constraints(&self) -> &[Box<dyn Constraint>] {
        &self.constraints
    }

    /// AC-3: revises (variable, constraint) arcs to a fixpoint. Returns
    /// `None` when some domain empties, i.e. the state is contradictory.
    fn propagate(&mut self, initial: SearchState) -> Option<SearchState> {
        let mut state = initial;

        let mut worklist = WorkList::new();
        for (constraint_id, constraint) in self.constraints.iter().enumerate() {
            for &var in constraint.variables() {
                worklist.push_back(var, constraint_id);
            }
        }

        while let Some((target, constraint_id)) = worklist.pop_front() {
            let constraint = &self.constraints[constraint_id];
            let constraint_stats = self.stats.constraint_stats.entry(constraint_id).or_default();

            let started = Instant::now();
            constraint_stats.revisions += 1;

            if let Some(revised) = constraint.revise(target, &state) {
                constraint_stats.prunings += 1;
                constraint_stats.time_spent_micros += started.elapsed().as_micros() as u64;

                if revised.domain(target).is_empty() {
                    trace!(%target, "domain emptied, backtracking");
                    return None;
                }
                state = revised;

                // The target shrank: requeue every other arc of every
                // constraint that watches it.
                if let Some(dependents) = self.dependency_graph.get(&target) {
                    for &dependent_id in dependents {
                        for &neighbour in self.constraints[dependent_id].variables() {
                            if neighbour != target {
                                worklist.push_back(neighbour, dependent_id);
                            }
                        }
                    }
                }
            } else {
                constraint_stats.time_spent_micros += started.elapsed().as_micros() as u64;
            }
        }

        Some(state)
    }
}

impl Iterator for SearchIter {
    type Item = Binding;

    fn next(&mut self) -> Option<Binding> {
        while let Some(candidate) = self.stack.pop() {
            self.stats.nodes_visited += 1;

            let Some(state) = self.propagate(candidate) else {
                self.stats.dead_ends += 1;
                continue;
            };

            if state.is_complete() {
                self.stats.solutions_found += 1;
                debug!(
                    nodes = self.stats.nodes_visited,
                    solutions = self.stats.solutions_found,
                    "solution found"
                );
                return Some(state.binding());
            }

            let Some(branch_var) = self.heuristic.select_variable(&state) else {
                // Unreachable: an incomplete state always has a wide domain.
                continue;
            };
            trace!(%branch_var, "branching");

            // Push in descending digit order so smaller digits pop first.
            for digit in state.domain(branch_var).iter().rev() {
                self.stack.push(state.assign(branch_var, digit));
            }
        }

        debug!(
            nodes = self.stats.nodes_visited,
            dead_ends = self.stats.dead_ends,
            solutions = self.stats.solutions_found,
            "search space exhausted"
        );
        None
    }
}
