#![doc = include_str!("../README.md")]

//! Solver integration for first-order theories over uninterpreted and
//! enumerated sorts.
//!
//! Formulas are expressed once as [`terms::SmtTerm`] values and can be
//! discharged by the in-process Z3 backend or by any SMT-LIB2 solver running
//! as a child process.

pub mod backends;
pub mod decls;
pub mod solver;
pub mod sorts;
pub mod terms;
