use crate::puzzle::MAX_LETTERS;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Rejection of a puzzle string before any constraint is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("puzzle must contain exactly one '=', found {found}: {puzzle:?}")]
    EqualsCount { puzzle: String, found: usize },

    #[error("character {character:?} is not a letter or one of '+ - * / % =': {puzzle:?}")]
    DisallowedCharacter { puzzle: String, character: char },

    #[error("puzzle does not match WORD (OP WORD)* = WORD: {puzzle:?}")]
    MalformedEquation { puzzle: String },

    #[error("{count} distinct letters cannot map injectively onto {MAX_LETTERS} digits: {puzzle:?}")]
    TooManyLetters { puzzle: String, count: usize },

    #[error("word {word:?} is longer than {max} letters; its weighted sum would overflow")]
    WordTooLong { word: String, max: usize },
}

/// A backend handed back a binding that violates its contract. This is a
/// backend bug, not a puzzle without solutions, and is never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IncompleteAssignmentError {
    #[error("binding is missing letter {letter:?}")]
    MissingLetter { letter: char },

    #[error("letter {letter:?} is bound to {digit}, outside 0..=9")]
    DigitOutOfRange { letter: char, digit: u8 },

    #[error("letters {first:?} and {second:?} are both bound to {digit}")]
    DuplicateDigit { first: char, second: char, digit: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    IncompleteAssignment(#[from] IncompleteAssignmentError),
}
