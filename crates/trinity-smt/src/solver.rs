use crate::sorts::SmtSort;
use crate::terms::SmtTerm;

/// Result of a satisfiability check.
#[derive(Debug, Clone, PartialEq)]
pub enum SatResult {
    Sat,
    Unsat,
    Unknown(String),
}

impl SatResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, SatResult::Sat)
    }
}

/// Whether model evaluation may invent values for symbols the assertions
/// leave unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelCompletion {
    /// Unconstrained symbols receive some definite value.
    #[default]
    Complete,
    /// Unconstrained symbols stay symbolic; evaluation may be indefinite.
    Partial,
}

impl ModelCompletion {
    pub fn is_complete(self) -> bool {
        self == ModelCompletion::Complete
    }
}

/// Abstract SMT solver interface.
pub trait SmtSolver {
    type Error: std::error::Error;

    /// Declare an uninterpreted sort.
    fn declare_sort(&mut self, name: &str) -> Result<(), Self::Error>;

    /// Declare a finite sort with pairwise-distinct members, each usable as a
    /// constant afterwards.
    fn declare_enum_sort(&mut self, name: &str, members: &[&str]) -> Result<(), Self::Error>;

    /// Declare an uninterpreted function. An empty domain declares a constant.
    fn declare_fun(
        &mut self,
        name: &str,
        domain: &[SmtSort],
        range: &SmtSort,
    ) -> Result<(), Self::Error>;

    /// Declare a constant.
    fn declare_const(&mut self, name: &str, sort: &SmtSort) -> Result<(), Self::Error> {
        self.declare_fun(name, &[], sort)
    }

    /// Assert a constraint.
    fn assert(&mut self, term: &SmtTerm) -> Result<(), Self::Error>;

    /// Push a new scope.
    fn push(&mut self) -> Result<(), Self::Error>;

    /// Pop a scope.
    fn pop(&mut self) -> Result<(), Self::Error>;

    /// Check satisfiability.
    fn check_sat(&mut self) -> Result<SatResult, Self::Error>;

    /// Evaluate a closed Boolean term in the model of the last `check_sat`.
    ///
    /// Fails when the last check did not return `Sat`.
    fn eval_bool(
        &mut self,
        term: &SmtTerm,
        completion: ModelCompletion,
    ) -> Result<bool, Self::Error>;

    /// Reset the solver state, dropping all declarations and assertions.
    fn reset(&mut self) -> Result<(), Self::Error>;
}
