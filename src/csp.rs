//! Backend-agnostic description of a compiled puzzle.
//!
//! The compiler lowers an [`Equation`] into typed constraint terms rather
//! than into any particular solver's API. A [`crate::solver::backend::SolvingBackend`]
//! translates the terms into whatever executable form it wants; the terms
//! themselves are immutable value objects and carry no solving logic beyond
//! exact evaluation of the arithmetic.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::puzzle::{Equation, Operator, Word};

/// A constraint variable. Letters are their own variable names; there is no
/// separate id space to map back and forth through.
pub type Variable = char;

/// A raw letter-to-digit binding as produced by a backend, before the
/// solution adapter has vetted it.
pub type Binding = BTreeMap<Variable, u8>;

/// How a backend is invited to evaluate a term.
///
/// `Deferred` terms are checked only once every variable is bound (generate
/// and test); `Incremental` terms may be used to narrow domains during
/// search. The two modes never change which assignments are accepted, only
/// when a backend may notice a dead end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    Deferred,
    Incremental,
}

/// The initial domain of one variable. Both shapes denote digits `0..=9`;
/// the shape tells the backend whether the strategy thinks of the domain as
/// an enumerable set or as an ordered interval it can tighten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainTerm {
    Enumerated { var: Variable, digits: Vec<u8> },
    Interval { var: Variable, lo: u8, hi: u8 },
}

impl DomainTerm {
    pub fn variable(&self) -> Variable {
        match self {
            DomainTerm::Enumerated { var, .. } => *var,
            DomainTerm::Interval { var, .. } => *var,
        }
    }
}

/// One constraint over the puzzle's variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintTerm {
    /// Pairwise-distinct digits across `vars`.
    AllDifferent { vars: Vec<Variable>, mode: EvalMode },
    /// `var` may not take `digit`. Used for the zero-exclusion policy terms.
    ExcludeDigit { var: Variable, digit: u8 },
    /// The puzzle arithmetic: left-hand chain equals right-hand sum.
    Equality {
        lhs: OperatorChain,
        rhs: WeightedSum,
        mode: EvalMode,
    },
}

impl fmt::Display for ConstraintTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintTerm::AllDifferent { vars, .. } => {
                write!(f, "AllDifferent(")?;
                for (i, v) in vars.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, ")")
            }
            ConstraintTerm::ExcludeDigit { var, digit } => write!(f, "{} != {}", var, digit),
            ConstraintTerm::Equality { lhs, rhs, .. } => write!(f, "{} = {}", lhs, rhs),
        }
    }
}

/// A word as a linear form: digit at position `i` from the right contributes
/// `digit * 10^i`. Coefficients are always positive powers of ten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedSum {
    pub terms: Vec<(i64, Variable)>,
}

impl WeightedSum {
    pub fn of_word(word: &Word) -> Self {
        let n = word.len();
        let terms = word
            .letters()
            .iter()
            .enumerate()
            .map(|(i, &c)| (10i64.pow((n - 1 - i) as u32), c))
            .collect();
        Self { terms }
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.terms.iter().map(|&(_, v)| v)
    }

    /// Exact checked evaluation; `None` on `i64` overflow.
    pub fn evaluate<F: Fn(Variable) -> u8>(&self, digit: &F) -> Option<i64> {
        let mut total: i64 = 0;
        for &(coefficient, var) in &self.terms {
            let term = coefficient.checked_mul(digit(var) as i64)?;
            total = total.checked_add(term)?;
        }
        Some(total)
    }
}

impl fmt::Display for WeightedSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &(coefficient, var)) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            if coefficient == 1 {
                write!(f, "{}", var)?;
            } else {
                write!(f, "{}*{}", coefficient, var)?;
            }
        }
        Ok(())
    }
}

/// The left-hand side of the equality: word sums combined strictly left to
/// right by the equation's operators. No precedence, matching the puzzle
/// grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorChain {
    pub first: WeightedSum,
    pub rest: Vec<(Operator, WeightedSum)>,
}

impl OperatorChain {
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.first
            .variables()
            .chain(self.rest.iter().flat_map(|(_, sum)| sum.variables()))
    }

    /// Exact checked evaluation. `None` on overflow or on division or
    /// remainder by zero; such a candidate assignment is rejected.
    pub fn evaluate<F: Fn(Variable) -> u8>(&self, digit: &F) -> Option<i64> {
        let mut value = self.first.evaluate(digit)?;
        for (op, sum) in &self.rest {
            let operand = sum.evaluate(digit)?;
            value = op.apply(value, operand)?;
        }
        Some(value)
    }
}

impl fmt::Display for OperatorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.first)?;
        for (op, sum) in &self.rest {
            write!(f, " {} ({})", op, sum)?;
        }
        Ok(())
    }
}

/// Builds the weighted-sum encoding of an equation: the left-hand operator
/// chain and the right-hand result sum.
pub fn equation_sums(equation: &Equation) -> (OperatorChain, WeightedSum) {
    let mut sums = equation.lhs().iter().map(WeightedSum::of_word);
    let first = sums
        .next()
        .expect("a validated equation has at least one left-hand word");
    let rest = equation.operators().iter().copied().zip(sums).collect();

    let lhs = OperatorChain { first, rest };
    let rhs = WeightedSum::of_word(equation.rhs());
    (lhs, rhs)
}

/// A full constraint-satisfaction description of one puzzle under one policy
/// and one strategy. Immutable; rebuild it to change anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CspDescription {
    pub domains: Vec<DomainTerm>,
    pub constraints: Vec<ConstraintTerm>,
}

impl CspDescription {
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.domains.iter().map(DomainTerm::variable).collect()
    }
}
