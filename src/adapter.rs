//! Vetting raw backend bindings against the original equation.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::{
    csp::{equation_sums, Binding, Variable},
    error::IncompleteAssignmentError,
    puzzle::Equation,
};

/// A validated solution: a bijection from the puzzle's letters onto a
/// same-sized subset of the digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Assignment(BTreeMap<char, u8>);

impl Assignment {
    pub fn digit(&self, letter: char) -> Option<u8> {
        self.0.get(&letter).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, u8)> + '_ {
        self.0.iter().map(|(&letter, &digit)| (letter, digit))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Re-evaluates the equation's operator chain under this assignment.
    pub fn satisfies(&self, equation: &Equation) -> bool {
        if !equation.letters().iter().all(|l| self.0.contains_key(l)) {
            return false;
        }
        let digit = |v: Variable| self.0.get(&v).copied().unwrap_or(0);
        let (lhs, rhs) = equation_sums(equation);
        match (lhs.evaluate(&digit), rhs.evaluate(&digit)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (letter, digit)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", letter, digit)?;
        }
        Ok(())
    }
}

/// Maps a backend binding back onto the equation's letters.
///
/// The binding is restricted to letters actually in the equation; any extra
/// variables a backend might carry are dropped. A missing letter, an
/// out-of-range digit, or a repeated digit is a backend contract violation
/// and surfaces as a hard [`IncompleteAssignmentError`], never as a silent
/// repair.
pub fn adapt(
    binding: &Binding,
    equation: &Equation,
) -> Result<Assignment, IncompleteAssignmentError> {
    let mut mapping = BTreeMap::new();
    let mut owners: BTreeMap<u8, char> = BTreeMap::new();

    for &letter in equation.letters() {
        let Some(&digit) = binding.get(&letter) else {
            return Err(IncompleteAssignmentError::MissingLetter { letter });
        };
        if digit > 9 {
            return Err(IncompleteAssignmentError::DigitOutOfRange { letter, digit });
        }
        if let Some(&first) = owners.get(&digit) {
            return Err(IncompleteAssignmentError::DuplicateDigit {
                first,
                second: letter,
                digit,
            });
        }
        owners.insert(digit, letter);
        mapping.insert(letter, digit);
    }

    Ok(Assignment(mapping))
}
