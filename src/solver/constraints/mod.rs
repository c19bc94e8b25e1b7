//! The constraint library of the bundled backend.

pub mod all_different;
pub mod equation;
pub mod exclude_digit;
