//! The arithmetic equality at the heart of a cryptarithm.

use std::collections::BTreeSet;

use crate::{
    csp::{EvalMode, OperatorChain, Variable, WeightedSum},
    puzzle::Operator,
    solver::{
        constraint::{Constraint, ConstraintDescriptor},
        domain::DigitDomain,
        state::SearchState,
    },
};

/// `lhs = rhs`, where `lhs` is the left-to-right operator chain over the
/// operand words and `rhs` the result word's weighted sum.
///
/// A complete assignment is always checked exactly, whatever the mode. In
/// `Incremental` mode the constraint additionally narrows the target's
/// domain mid-search: a digit survives only if the interval estimates of the
/// two sides still overlap with the target pinned to it. Division and
/// remainder defeat useful interval reasoning, so chains containing them
/// fall back to the exact leaf check (sound, just less eager).
#[derive(Debug, Clone)]
pub struct EquationConstraint {
    lhs: OperatorChain,
    rhs: WeightedSum,
    mode: EvalMode,
    vars: Vec<Variable>,
}

impl EquationConstraint {
    pub fn new(lhs: OperatorChain, rhs: WeightedSum, mode: EvalMode) -> Self {
        let vars: BTreeSet<Variable> = lhs.variables().chain(rhs.variables()).collect();
        Self {
            lhs,
            rhs,
            mode,
            vars: vars.into_iter().collect(),
        }
    }

    fn revise_complete(&self, target: Variable, state: &SearchState) -> Option<SearchState> {
        let digit = |v: Variable| state.domain(v).singleton_value().unwrap_or(0);
        let holds = match (self.lhs.evaluate(&digit), self.rhs.evaluate(&digit)) {
            (Some(left), Some(right)) => left == right,
            // Overflow or division by zero: the assignment is rejected.
            _ => false,
        };
        if holds {
            None
        } else {
            Some(state.with_domain(target, DigitDomain::EMPTY))
        }
    }

    fn revise_incremental(&self, target: Variable, state: &SearchState) -> Option<SearchState> {
        let target_domain = state.domain(target);
        let narrowed = target_domain.retain(|candidate| {
            let range = |v: Variable| {
                if v == target {
                    (candidate, candidate)
                } else {
                    let domain = state.domain(v);
                    (domain.min().unwrap_or(0), domain.max().unwrap_or(9))
                }
            };
            chain_bounds(&self.lhs, &range).intersects(sum_bounds(&self.rhs, &range))
        });

        if narrowed.len() < target_domain.len() {
            Some(state.with_domain(target, narrowed))
        } else {
            None
        }
    }
}

impl Constraint for EquationConstraint {
    fn variables(&self) -> &[Variable] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "Equation".to_string(),
            description: format!("{} = {}", self.lhs, self.rhs),
        }
    }

    fn revise(&self, target: Variable, state: &SearchState) -> Option<SearchState> {
        if !self.vars.contains(&target) {
            return None;
        }

        let complete = self
            .vars
            .iter()
            .all(|&v| state.domain(v).is_singleton());
        if complete {
            return self.revise_complete(target, state);
        }

        match self.mode {
            EvalMode::Deferred => None,
            EvalMode::Incremental => self.revise_incremental(target, state),
        }
    }
}

/// Headroom so saturating interval arithmetic can never wrap.
const SPAN: i64 = i64::MAX / 4;

/// A conservative closed interval estimate of a partially assigned
/// expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Bounds {
    lo: i64,
    hi: i64,
}

impl Bounds {
    fn top() -> Self {
        Bounds { lo: -SPAN, hi: SPAN }
    }

    fn clamp(self) -> Self {
        Bounds {
            lo: self.lo.clamp(-SPAN, SPAN),
            hi: self.hi.clamp(-SPAN, SPAN),
        }
    }

    fn add(self, other: Self) -> Self {
        Bounds {
            lo: self.lo.saturating_add(other.lo),
            hi: self.hi.saturating_add(other.hi),
        }
        .clamp()
    }

    fn sub(self, other: Self) -> Self {
        Bounds {
            lo: self.lo.saturating_sub(other.hi),
            hi: self.hi.saturating_sub(other.lo),
        }
        .clamp()
    }

    fn mul(self, other: Self) -> Self {
        let corners = [
            self.lo.saturating_mul(other.lo),
            self.lo.saturating_mul(other.hi),
            self.hi.saturating_mul(other.lo),
            self.hi.saturating_mul(other.hi),
        ];
        Bounds {
            lo: corners.into_iter().min().unwrap_or(-SPAN),
            hi: corners.into_iter().max().unwrap_or(SPAN),
        }
        .clamp()
    }

    fn intersects(self, other: Self) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }
}

/// Interval of a weighted sum given per-variable digit ranges. Coefficients
/// are positive, so the extremes come straight from the variables' extremes.
fn sum_bounds<F: Fn(Variable) -> (u8, u8)>(sum: &WeightedSum, range: &F) -> Bounds {
    let mut lo: i64 = 0;
    let mut hi: i64 = 0;
    for &(coefficient, var) in &sum.terms {
        let (var_lo, var_hi) = range(var);
        lo = lo.saturating_add(coefficient.saturating_mul(var_lo as i64));
        hi = hi.saturating_add(coefficient.saturating_mul(var_hi as i64));
    }
    Bounds { lo, hi }.clamp()
}

fn chain_bounds<F: Fn(Variable) -> (u8, u8)>(chain: &OperatorChain, range: &F) -> Bounds {
    let mut bounds = sum_bounds(&chain.first, range);
    for (op, sum) in &chain.rest {
        let operand = sum_bounds(sum, range);
        bounds = match op {
            Operator::Add => bounds.add(operand),
            Operator::Sub => bounds.sub(operand),
            Operator::Mul => bounds.mul(operand),
            // Truncating division and remainder: no useful narrowing.
            Operator::Div | Operator::Rem => Bounds::top(),
        };
    }
    bounds
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{csp::equation_sums, puzzle::Equation};

    fn constraint(text: &str, mode: EvalMode) -> EquationConstraint {
        let equation = Equation::parse(text).unwrap();
        let (lhs, rhs) = equation_sums(&equation);
        EquationConstraint::new(lhs, rhs, mode)
    }

    fn complete_state(pairs: &[(char, u8)]) -> SearchState {
        SearchState::new(
            pairs
                .iter()
                .map(|&(c, d)| (c, DigitDomain::singleton(d)))
                .collect(),
        )
    }

    #[test]
    fn variables_are_deduplicated_and_sorted() {
        let constraint = constraint("SEND+MORE=MONEY", EvalMode::Deferred);
        assert_eq!(
            constraint.variables(),
            &['D', 'E', 'M', 'N', 'O', 'R', 'S', 'Y']
        );
    }

    #[test]
    fn accepts_an_exact_complete_assignment() {
        let constraint = constraint("A+B=C", EvalMode::Deferred);
        let state = complete_state(&[('A', 2), ('B', 3), ('C', 5)]);
        assert!(constraint.revise('C', &state).is_none());
    }

    #[test]
    fn rejects_a_false_complete_assignment() {
        let constraint = constraint("A+B=C", EvalMode::Deferred);
        let state = complete_state(&[('A', 2), ('B', 3), ('C', 6)]);
        let revised = constraint.revise('C', &state).unwrap();
        assert!(revised.domain('C').is_empty());
    }

    #[test]
    fn rejects_division_by_zero_at_the_leaf() {
        let constraint = constraint("A/B=C", EvalMode::Incremental);
        let state = complete_state(&[('A', 4), ('B', 0), ('C', 4)]);
        let revised = constraint.revise('A', &state).unwrap();
        assert!(revised.domain('A').is_empty());
    }

    #[test]
    fn deferred_mode_never_narrows_a_partial_state() {
        let constraint = constraint("A+B=C", EvalMode::Deferred);
        let state = SearchState::new(im::hashmap! {
            'A' => DigitDomain::singleton(9),
            'B' => DigitDomain::singleton(9),
            'C' => DigitDomain::interval(0, 9),
        });
        // A+B=18 is impossible for any digit C, but the deferred constraint
        // only notices once C is bound.
        assert!(constraint.revise('C', &state).is_none());
    }

    #[test]
    fn incremental_mode_narrows_by_interval_overlap() {
        let constraint = constraint("A+B=C", EvalMode::Incremental);
        let state = SearchState::new(im::hashmap! {
            'A' => DigitDomain::singleton(9),
            'B' => DigitDomain::interval(0, 9),
            'C' => DigitDomain::interval(0, 9),
        });
        // C = 9 + B, so C can only be 9 (with B = 0); smaller digits have no
        // overlapping interval.
        let revised = constraint.revise('C', &state).unwrap();
        assert_eq!(revised.domain('C').singleton_value(), Some(9));
    }

    #[test]
    fn incremental_mode_pins_the_carry_letter() {
        // The classic first deduction: SEND+MORE < 20000, so M must be 1
        // once 0 is excluded for the leading letters.
        let constraint = constraint("SEND+MORE=MONEY", EvalMode::Incremental);
        let mut domains = im::HashMap::new();
        for letter in ['D', 'E', 'N', 'O', 'R', 'Y'] {
            domains.insert(letter, DigitDomain::all());
        }
        domains.insert('S', DigitDomain::interval(1, 9));
        domains.insert('M', DigitDomain::interval(1, 9));
        let state = SearchState::new(domains);

        let revised = constraint.revise('M', &state).unwrap();
        assert_eq!(revised.domain('M').singleton_value(), Some(1));
    }

    #[test]
    fn incremental_narrowing_never_loses_a_real_solution() {
        let constraint = constraint("A+B=C", EvalMode::Incremental);
        let state = SearchState::new(im::hashmap! {
            'A' => DigitDomain::interval(0, 9),
            'B' => DigitDomain::interval(0, 9),
            'C' => DigitDomain::interval(0, 9),
        });
        // Fully unassigned: every digit of C is still reachable.
        assert!(constraint.revise('C', &state).is_none());
    }
}
