use thiserror::Error;

use crate::backends::smtlib_printer::{declaration_to_smtlib, to_smtlib};
use crate::decls::Declaration;
use crate::solver::{ModelCompletion, SatResult, SmtSolver};
use crate::sorts::SmtSort;
use crate::terms::SmtTerm;

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("recording solver has no model")]
    NoModel,
}

/// Dry-run backend: records every command as SMT-LIB2 text instead of
/// solving. `check_sat` always answers `Unknown`.
#[derive(Debug, Default, Clone)]
pub struct RecordingSolver {
    commands: Vec<String>,
}

impl RecordingSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// The recorded commands, one per line.
    pub fn into_script(self) -> String {
        let mut out = self.commands.join("\n");
        out.push('\n');
        out
    }
}

impl SmtSolver for RecordingSolver {
    type Error = RecordingError;

    fn declare_sort(&mut self, name: &str) -> Result<(), RecordingError> {
        self.commands.push(declaration_to_smtlib(&Declaration::sort(name)));
        Ok(())
    }

    fn declare_enum_sort(&mut self, name: &str, members: &[&str]) -> Result<(), RecordingError> {
        let decl = Declaration::enum_sort(name, members);
        self.commands.push(declaration_to_smtlib(&decl));
        Ok(())
    }

    fn declare_fun(
        &mut self,
        name: &str,
        domain: &[SmtSort],
        range: &SmtSort,
    ) -> Result<(), RecordingError> {
        self.commands.push(declaration_to_smtlib(&Declaration::fun(
            name,
            domain.to_vec(),
            range.clone(),
        )));
        Ok(())
    }

    fn assert(&mut self, term: &SmtTerm) -> Result<(), RecordingError> {
        self.commands.push(format!("(assert {})", to_smtlib(term)));
        Ok(())
    }

    fn push(&mut self) -> Result<(), RecordingError> {
        self.commands.push("(push 1)".to_string());
        Ok(())
    }

    fn pop(&mut self) -> Result<(), RecordingError> {
        self.commands.push("(pop 1)".to_string());
        Ok(())
    }

    fn check_sat(&mut self) -> Result<SatResult, RecordingError> {
        self.commands.push("(check-sat)".to_string());
        Ok(SatResult::Unknown("recorded, not solved".to_string()))
    }

    fn eval_bool(
        &mut self,
        _term: &SmtTerm,
        _completion: ModelCompletion,
    ) -> Result<bool, RecordingError> {
        Err(RecordingError::NoModel)
    }

    fn reset(&mut self) -> Result<(), RecordingError> {
        self.commands.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_commands_in_order() {
        let mut solver = RecordingSolver::new();
        solver.declare_sort("S").unwrap();
        solver.declare_const("c", &SmtSort::named("S")).unwrap();
        solver.assert(&SmtTerm::var("c").eq(SmtTerm::var("c"))).unwrap();
        let verdict = solver.check_sat().unwrap();
        assert!(matches!(verdict, SatResult::Unknown(_)));
        assert_eq!(
            solver.into_script(),
            "(declare-sort S 0)\n(declare-fun c () S)\n(assert (= c c))\n(check-sat)\n"
        );
    }

    #[test]
    fn never_produces_a_model() {
        let mut solver = RecordingSolver::new();
        assert!(solver
            .eval_bool(&SmtTerm::bool(true), ModelCompletion::Complete)
            .is_err());
        solver.reset().unwrap();
        assert!(solver.commands().is_empty());
    }
}
