//! Cryptarith solves cryptarithm puzzles: arithmetic equations such as
//! `SEND+MORE=MONEY` in which every distinct letter stands for a distinct
//! decimal digit.
//!
//! The crate is a pipeline of small, pure stages:
//!
//! - **[`puzzle::Equation`]**: the validated puzzle model — words, operators,
//!   letters, leading letters.
//! - **[`compile`]**: lowers an equation plus a zero-handling
//!   [`Policy`](compile::Policy) into a backend-agnostic
//!   [`csp::CspDescription`], under a pluggable
//!   [`ConstraintStrategy`](compile::ConstraintStrategy)
//!   ([`GenerateAndTest`](compile::GenerateAndTest) or
//!   [`Propagation`](compile::Propagation)).
//! - **[`solver`]**: the [`SolvingBackend`](solver::backend::SolvingBackend)
//!   boundary plus a bundled backtracking-with-propagation backend that
//!   lazily enumerates satisfying bindings.
//! - **[`adapter`]**: vets each raw binding into a validated
//!   [`Assignment`](adapter::Assignment).
//!
//! # Example
//!
//! ```
//! use cryptarith::{Equation, Policy, Propagation, Solver};
//!
//! # fn main() -> cryptarith::Result<()> {
//! let equation = Equation::parse("SEND+MORE=MONEY")?;
//! let solver = Solver::default();
//!
//! let mut solutions = solver.solve(&equation, Policy::default(), &Propagation);
//! let assignment = solutions.next().expect("the classic puzzle has a solution")?;
//!
//! assert_eq!(assignment.digit('M'), Some(1));
//! assert_eq!(assignment.digit('Y'), Some(2));
//! assert!(solutions.next().is_none()); // and it is unique
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod compile;
pub mod csp;
pub mod error;
pub mod puzzle;
pub mod solve;
pub mod solver;

pub use adapter::Assignment;
pub use compile::{GenerateAndTest, Policy, Propagation};
pub use error::{Error, Result};
pub use puzzle::Equation;
pub use solve::{Solutions, Solver};
