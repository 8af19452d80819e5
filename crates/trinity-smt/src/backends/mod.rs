//! Concrete solver backends and the SMT-LIB2 printer they share.

pub mod process_backend;
pub mod recording_backend;
pub mod smtlib_printer;
pub mod z3_backend;
