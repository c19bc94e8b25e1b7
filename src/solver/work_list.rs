use std::collections::{HashSet, VecDeque};

use crate::{csp::Variable, solver::engine::ConstraintId};

/// FIFO queue of (variable, constraint) arcs awaiting revision, with
/// membership tracking so an arc is never queued twice.
pub struct WorkList {
    queue: VecDeque<(Variable, ConstraintId)>,
    members: HashSet<(Variable, ConstraintId)>,
}

impl WorkList {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            members: HashSet::new(),
        }
    }

    pub fn push_back(&mut self, variable: Variable, constraint: ConstraintId) {
        if self.members.insert((variable, constraint)) {
            self.queue.push_back((variable, constraint));
        }
    }

    pub fn pop_front(&mut self) -> Option<(Variable, ConstraintId)> {
        let item = self.queue.pop_front()?;
        self.members.remove(&item);
        Some(item)
    }
}

impl Default for WorkList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_queued_arcs() {
        let mut worklist = WorkList::new();
        worklist.push_back('A', 0);
        worklist.push_back('A', 0);
        worklist.push_back('B', 0);

        assert_eq!(worklist.pop_front(), Some(('A', 0)));
        assert_eq!(worklist.pop_front(), Some(('B', 0)));
        assert_eq!(worklist.pop_front(), None);
    }

    #[test]
    fn arcs_can_requeue_after_popping() {
        let mut worklist = WorkList::new();
        worklist.push_back('A', 0);
        assert_eq!(worklist.pop_front(), Some(('A', 0)));
        worklist.push_back('A', 0);
        assert_eq!(worklist.pop_front(), Some(('A', 0)));
    }
}
