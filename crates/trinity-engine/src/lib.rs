#![doc = include_str!("../README.md")]

//! Trinity consistency engine.
//!
//! This crate builds the axiom set, runs the base and heresy checks through
//! any `trinity_smt::solver::SmtSolver`, and renders the results.

pub mod axioms;
pub mod error;
pub mod facts;
pub mod heresy;
pub mod report;
pub mod runner;
pub mod session;
pub mod vocabulary;
