//! The bundled solving backend.
//!
//! The compiler targets the abstract [`backend::SolvingBackend`] boundary;
//! this module also ships a concrete implementation so the crate is useful
//! out of the box: persistent search states over ten-bit digit domains, a
//! small constraint library, and a lazy backtracking-with-propagation
//! engine.

pub mod backend;
pub mod constraint;
pub mod constraints;
pub mod domain;
pub mod engine;
pub mod heuristics;
pub mod state;
pub mod stats;
pub mod work_list;
