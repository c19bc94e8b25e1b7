//! Parsing and validation of cryptarithm puzzle text.
//!
//! A puzzle such as `SEND+MORE=MONEY` is modelled as an [`Equation`]: a
//! left-hand sequence of words joined by arithmetic operators, equated to a
//! single result word. The model is immutable once parsed; everything
//! downstream (compilation, solving) derives from it.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::ValidationError;

/// Ten digits, so at most ten distinct letters can be injectively assigned.
pub const MAX_LETTERS: usize = 10;

/// Longest word whose weighted sum is guaranteed to fit in an `i64`. An
/// 18-letter word tops out at `10^18 - 1`, well inside range.
pub const MAX_WORD_LEN: usize = 18;

/// An arithmetic operator joining two left-hand words.
///
/// `=` is not an operator; it is the single separator between the left-hand
/// expression and the result word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl Operator {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '%' => Some(Operator::Rem),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Rem => '%',
        }
    }

    /// Applies the operator with checked `i64` arithmetic. Returns `None` on
    /// overflow or on division/remainder by zero; a candidate assignment that
    /// hits either is unsatisfiable, not an error.
    pub fn apply(&self, lhs: i64, rhs: i64) -> Option<i64> {
        match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Sub => lhs.checked_sub(rhs),
            Operator::Mul => lhs.checked_mul(rhs),
            Operator::Div => lhs.checked_div(rhs),
            Operator::Rem => lhs.checked_rem(rhs),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A maximal run of letters. Always non-empty; order within the word is the
/// digit significance (first letter is most significant).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(Vec<char>);

impl Word {
    pub fn letters(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most significant letter, conventionally forbidden from binding
    /// to zero.
    pub fn leading(&self) -> char {
        self.0[0]
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// How puzzle text is normalized before validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// When `true`, `a` and `A` denote distinct variables. Off by default;
    /// the text is folded to uppercase.
    pub case_sensitive: bool,
}

/// A validated cryptarithm equation.
///
/// Invariants, established by [`Equation::parse_with`] and never broken
/// afterwards: at least one left-hand word, `operators.len() == lhs.len() - 1`,
/// all words non-empty, every word's letters are a subset of `letters`, and
/// `letters.len() <= MAX_LETTERS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    lhs: Vec<Word>,
    operators: Vec<Operator>,
    rhs: Word,
    letters: BTreeSet<char>,
    leading_letters: BTreeSet<char>,
}

impl Equation {
    /// Parses case-insensitively with default options.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        Self::parse_with(text, ParseOptions::default())
    }

    pub fn parse_with(text: &str, options: ParseOptions) -> Result<Self, ValidationError> {
        let puzzle = || text.trim().to_string();

        let stripped: String = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                if options.case_sensitive {
                    c
                } else {
                    c.to_ascii_uppercase()
                }
            })
            .collect();

        let equals = stripped.chars().filter(|&c| c == '=').count();
        if equals != 1 {
            return Err(ValidationError::EqualsCount {
                puzzle: puzzle(),
                found: equals,
            });
        }

        for c in stripped.chars() {
            if !c.is_ascii_alphabetic() && c != '=' && Operator::from_symbol(c).is_none() {
                return Err(ValidationError::DisallowedCharacter {
                    puzzle: puzzle(),
                    character: c,
                });
            }
        }

        let Some((lhs_text, rhs_text)) = stripped.split_once('=') else {
            // Unreachable after the equals-count check, but kept total.
            return Err(ValidationError::MalformedEquation { puzzle: puzzle() });
        };

        let (lhs, operators) = tokenize_expression(lhs_text)
            .ok_or_else(|| ValidationError::MalformedEquation { puzzle: puzzle() })?;

        // The right-hand side is a single result word, no operators.
        if rhs_text.is_empty() || !rhs_text.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::MalformedEquation { puzzle: puzzle() });
        }
        let rhs = Word(rhs_text.chars().collect());

        for word in lhs.iter().chain(std::iter::once(&rhs)) {
            if word.len() > MAX_WORD_LEN {
                return Err(ValidationError::WordTooLong {
                    word: word.to_string(),
                    max: MAX_WORD_LEN,
                });
            }
        }

        let mut letters = BTreeSet::new();
        let mut leading_letters = BTreeSet::new();
        for word in lhs.iter().chain(std::iter::once(&rhs)) {
            letters.extend(word.letters().iter().copied());
            leading_letters.insert(word.leading());
        }

        if letters.len() > MAX_LETTERS {
            return Err(ValidationError::TooManyLetters {
                puzzle: puzzle(),
                count: letters.len(),
            });
        }

        Ok(Equation {
            lhs,
            operators,
            rhs,
            letters,
            leading_letters,
        })
    }

    /// Left-hand words in textual order. Never empty.
    pub fn lhs(&self) -> &[Word] {
        &self.lhs
    }

    /// Operators joining the left-hand words, left to right. Exactly one
    /// fewer than `lhs().len()`.
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// The result word on the right of `=`.
    pub fn rhs(&self) -> &Word {
        &self.rhs
    }

    /// Every distinct letter in the puzzle, sorted.
    pub fn letters(&self) -> &BTreeSet<char> {
        &self.letters
    }

    /// First letter of every word, left-hand and result.
    pub fn leading_letters(&self) -> &BTreeSet<char> {
        &self.leading_letters
    }

    /// The set of distinct words (a repeated operand like `A+A=B` appears
    /// once here but twice in `lhs()`).
    pub fn words(&self) -> BTreeSet<&Word> {
        self.lhs
            .iter()
            .chain(std::iter::once(&self.rhs))
            .collect()
    }

    pub fn letter_count(&self) -> usize {
        self.letters.len()
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lhs[0])?;
        for (op, word) in self.operators.iter().zip(self.lhs.iter().skip(1)) {
            write!(f, "{}{}", op, word)?;
        }
        write!(f, "={}", self.rhs)
    }
}

/// Splits `word (op word)*` into words and operators. Returns `None` when the
/// text has an empty word (leading, trailing, or doubled operator).
fn tokenize_expression(text: &str) -> Option<(Vec<Word>, Vec<Operator>)> {
    let mut words = Vec::new();
    let mut operators = Vec::new();
    let mut current = Vec::new();

    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            current.push(c);
        } else if let Some(op) = Operator::from_symbol(c) {
            if current.is_empty() {
                return None;
            }
            words.push(Word(std::mem::take(&mut current)));
            operators.push(op);
        } else {
            return None;
        }
    }
    if current.is_empty() {
        return None;
    }
    words.push(Word(current));

    Some((words, operators))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parses_the_classic_puzzle() {
        let equation = Equation::parse("SEND + MORE = MONEY").unwrap();

        assert_eq!(equation.lhs().len(), 2);
        assert_eq!(equation.operators(), &[Operator::Add]);
        assert_eq!(equation.rhs().to_string(), "MONEY");
        assert_eq!(
            equation.letters().iter().collect::<String>(),
            "DEMNORSY".chars().collect::<String>()
        );
        assert_eq!(
            equation.leading_letters().iter().copied().collect::<Vec<_>>(),
            vec!['M', 'S']
        );
        assert_eq!(equation.to_string(), "SEND+MORE=MONEY");
    }

    #[test]
    fn folds_case_by_default() {
        let folded = Equation::parse("send+more=money").unwrap();
        let upper = Equation::parse("SEND+MORE=MONEY").unwrap();
        assert_eq!(folded, upper);
    }

    #[test]
    fn case_sensitive_mode_keeps_cases_distinct() {
        let options = ParseOptions {
            case_sensitive: true,
        };
        let equation = Equation::parse_with("a+A=Ab", options).unwrap();
        assert_eq!(equation.letter_count(), 3);
        assert!(equation.letters().contains(&'a'));
        assert!(equation.letters().contains(&'A'));
        assert!(equation.letters().contains(&'b'));
    }

    #[test]
    fn repeated_operand_words_are_kept_in_order() {
        let equation = Equation::parse("A+A=B").unwrap();
        assert_eq!(equation.lhs().len(), 2);
        assert_eq!(equation.words().len(), 2);
    }

    #[test]
    fn rejects_two_equals_signs() {
        let err = Equation::parse("SEND+MORE=MONEY=").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::EqualsCount { found: 2, .. }
        ));
    }

    #[test]
    fn rejects_missing_equals_sign() {
        let err = Equation::parse("SEND+MORE").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::EqualsCount { found: 0, .. }
        ));
    }

    #[test]
    fn rejects_disallowed_characters() {
        let err = Equation::parse("S3ND+MORE=MONEY").unwrap_err();
        assert_eq!(
            err,
            ValidationError::DisallowedCharacter {
                puzzle: "S3ND+MORE=MONEY".to_string(),
                character: '3',
            }
        );
    }

    #[test]
    fn rejects_doubled_and_dangling_operators() {
        for text in ["A++B=C", "+A=B", "A+=B", "A+B=", "=A", "A+B=C+", "A%=B"] {
            let err = Equation::parse(text).unwrap_err();
            assert!(
                matches!(err, ValidationError::MalformedEquation { .. }),
                "{text} should be malformed, got {err:?}"
            );
        }
    }

    #[test]
    fn rejects_operators_in_the_result() {
        let err = Equation::parse("A+B=C+D").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedEquation { .. }));
    }

    #[test]
    fn rejects_more_than_ten_distinct_letters() {
        let err = Equation::parse("ABCDEF+GHIJK=LMNOP").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooManyLetters { count: 16, .. }
        ));
    }

    #[test]
    fn accepts_exactly_ten_distinct_letters() {
        assert!(Equation::parse("ABCDE+FGHIJ=ABCDE").is_ok());
    }

    #[test]
    fn rejects_words_too_long_to_weight() {
        let long = "A".repeat(MAX_WORD_LEN + 1);
        let err = Equation::parse(&format!("{long}+B=C")).unwrap_err();
        assert!(matches!(err, ValidationError::WordTooLong { .. }));
    }

    #[test]
    fn whitespace_is_stripped_everywhere() {
        let spaced = Equation::parse("  S E ND\t+ MORE\n= MON EY ").unwrap();
        let plain = Equation::parse("SEND+MORE=MONEY").unwrap();
        assert_eq!(spaced, plain);
    }

    #[test]
    fn all_five_operators_parse() {
        let equation = Equation::parse("A+B-C*D/E%F=G").unwrap();
        assert_eq!(
            equation.operators(),
            &[
                Operator::Add,
                Operator::Sub,
                Operator::Mul,
                Operator::Div,
                Operator::Rem,
            ]
        );
    }

    fn puzzle_text() -> impl Strategy<Value = String> {
        let word = proptest::collection::vec(
            proptest::sample::select(vec!['A', 'B', 'C', 'D']),
            1..=4,
        )
        .prop_map(|chars| chars.into_iter().collect::<String>());
        let op = proptest::sample::select(vec!['+', '-', '*', '/', '%']);

        (word.clone(), op, word.clone(), word)
            .prop_map(|(w1, op, w2, rhs)| format!("{w1}{op}{w2}={rhs}"))
    }

    proptest! {
        /// Re-parsing the displayed form of a parsed equation reproduces the
        /// same model.
        #[test]
        fn parse_is_idempotent_over_its_round_trip(text in puzzle_text()) {
            let first = Equation::parse(&text).unwrap();
            let second = Equation::parse(&first.to_string()).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
