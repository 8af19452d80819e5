//! A single, isolated solver session loaded with the Nicene axioms.

use tracing::{debug, info, warn};
use trinity_smt::decls::Declaration;
use trinity_smt::solver::{ModelCompletion, SmtSolver};
use trinity_smt::terms::SmtTerm;

use crate::axioms::{nicene_axioms, Axiom};
use crate::error::{solver_error, EngineError};
use crate::facts::creedal_facts;
use crate::report::{Fact, Verdict};
use crate::vocabulary::Vocabulary;

/// An assertion as it was sent to the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Assertion {
    pub label: String,
    pub term: SmtTerm,
}

/// Owns one solver and everything declared or asserted in it.
///
/// Sessions are never shared: each check that needs a different assertion
/// set opens a new one.
pub struct Session<S: SmtSolver> {
    solver: S,
    vocabulary: Vocabulary,
    declarations: Vec<Declaration>,
    assertions: Vec<Assertion>,
    last_verdict: Option<Verdict>,
}

impl<S: SmtSolver> Session<S> {
    /// Declare the Trinitarian vocabulary in `solver` and assert every
    /// Nicene axiom.
    pub fn open(solver: S) -> Result<Self, EngineError> {
        let vocabulary = Vocabulary::nicene();
        let axioms = nicene_axioms(&vocabulary);
        Self::with_axioms(solver, vocabulary, axioms)
    }

    /// Like [`Session::open`] but with an explicit axiom list, asserted in
    /// the given order.
    pub fn with_axioms(
        solver: S,
        vocabulary: Vocabulary,
        axioms: Vec<Axiom>,
    ) -> Result<Self, EngineError> {
        let mut session = Self {
            solver,
            vocabulary,
            declarations: Vec::new(),
            assertions: Vec::new(),
            last_verdict: None,
        };
        for decl in session.vocabulary.declarations() {
            session.declare(decl)?;
        }
        for axiom in axioms {
            session.assert_labeled(axiom.id.code(), axiom.term)?;
        }
        Ok(session)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    pub fn last_verdict(&self) -> Option<&Verdict> {
        self.last_verdict.as_ref()
    }

    /// Add a symbol beyond the base vocabulary.
    pub fn declare(&mut self, decl: Declaration) -> Result<(), EngineError> {
        debug!(symbol = decl.name(), "declare");
        decl.declare_into(&mut self.solver).map_err(solver_error)?;
        self.declarations.push(decl);
        self.last_verdict = None;
        Ok(())
    }

    /// Append an assertion on top of the axioms.
    pub fn assert_extra(
        &mut self,
        label: impl Into<String>,
        term: SmtTerm,
    ) -> Result<(), EngineError> {
        self.assert_labeled(label, term)
    }

    fn assert_labeled(
        &mut self,
        label: impl Into<String>,
        term: SmtTerm,
    ) -> Result<(), EngineError> {
        let label = label.into();
        debug!(label = %label, term = %term, "assert");
        self.solver.assert(&term).map_err(solver_error)?;
        self.assertions.push(Assertion { label, term });
        self.last_verdict = None;
        Ok(())
    }

    /// Ask the solver for a verdict. `Unknown` is returned, not raised.
    pub fn check(&mut self) -> Result<Verdict, EngineError> {
        let verdict = Verdict::from(self.solver.check_sat().map_err(solver_error)?);
        if let Verdict::Unknown { reason } = &verdict {
            warn!(reason = %reason, "solver could not decide");
        }
        info!(assertions = self.assertions.len(), verdict = %verdict, "check complete");
        self.last_verdict = Some(verdict.clone());
        Ok(verdict)
    }

    /// Evaluate a closed formula in the current model.
    ///
    /// Returns `None` unless the most recent check was `sat`; the solver is
    /// never asked for a model it does not have.
    pub fn evaluate(
        &mut self,
        term: &SmtTerm,
        completion: ModelCompletion,
    ) -> Result<Option<bool>, EngineError> {
        if self.last_verdict != Some(Verdict::Sat) {
            return Ok(None);
        }
        self.solver
            .eval_bool(term, completion)
            .map(Some)
            .map_err(solver_error)
    }

    /// Evaluate the creedal facts under model completion, or `None` when the
    /// session is not known to be satisfiable.
    pub fn facts(&mut self) -> Result<Option<Vec<Fact>>, EngineError> {
        if self.last_verdict != Some(Verdict::Sat) {
            return Ok(None);
        }
        let queries = creedal_facts(&self.vocabulary);
        let mut facts = Vec::with_capacity(queries.len());
        for query in queries {
            let holds = self
                .evaluate(&query.term, ModelCompletion::Complete)?
                .ok_or_else(|| EngineError::Solver("model vanished during evaluation".into()))?;
            facts.push(Fact {
                statement: query.statement.to_string(),
                holds,
            });
        }
        Ok(Some(facts))
    }

    /// Give back the solver, ending the session.
    pub fn into_solver(self) -> S {
        self.solver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axioms::AxiomId;
    use crate::vocabulary::Person;
    use trinity_smt::backends::recording_backend::RecordingSolver;
    use trinity_smt::backends::z3_backend::Z3Solver;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn open_asserts_every_axiom_once() -> TestResult {
        let session = Session::open(RecordingSolver::new())?;
        let labels: Vec<&str> = session.assertions().iter().map(|a| a.label.as_str()).collect();
        let codes: Vec<&str> = AxiomId::ALL.iter().map(|id| id.code()).collect();
        assert_eq!(labels, codes);
        assert_eq!(session.declarations().len(), 12);
        Ok(())
    }

    #[test]
    fn recorded_script_declares_before_asserting() -> TestResult {
        let mut session = Session::open(RecordingSolver::new())?;
        session.check()?;
        let script = session.into_solver().into_script();
        let first_assert = script.find("(assert").ok_or("no assert recorded")?;
        let last_decl = script.rfind("(declare-").ok_or("no declaration recorded")?;
        assert!(last_decl < first_assert);
        assert!(script.ends_with("(check-sat)\n"));
        Ok(())
    }

    #[test]
    fn facts_are_withheld_without_a_sat_verdict() -> TestResult {
        let mut session = Session::open(RecordingSolver::new())?;
        assert!(session.facts()?.is_none(), "no check has run yet");
        let verdict = session.check()?;
        assert!(matches!(verdict, Verdict::Unknown { .. }));
        assert!(session.facts()?.is_none(), "unknown leaves no model");
        Ok(())
    }

    #[test]
    fn base_session_is_sat_with_all_facts_true() -> TestResult {
        let mut session = Session::open(Z3Solver::new())?;
        assert_eq!(session.check()?, Verdict::Sat);
        let facts = session.facts()?.ok_or("sat session should report facts")?;
        assert_eq!(facts.len(), 10);
        for fact in &facts {
            assert!(fact.holds, "{} should hold", fact.statement);
        }
        Ok(())
    }

    #[test]
    fn unsat_session_is_never_evaluated() -> TestResult {
        let mut session = Session::open(Z3Solver::new())?;
        let vocab = session.vocabulary().clone();
        session.assert_extra(
            "begets-both-ways",
            vocab.begets(vocab.person(Person::Son), vocab.person(Person::Father)),
        )?;
        assert_eq!(session.check()?, Verdict::Unsat);
        assert_eq!(
            session.evaluate(&SmtTerm::bool(true), ModelCompletion::Complete)?,
            None
        );
        assert!(session.facts()?.is_none());
        Ok(())
    }

    #[test]
    fn new_assertion_invalidates_previous_verdict() -> TestResult {
        let mut session = Session::open(Z3Solver::new())?;
        assert_eq!(session.check()?, Verdict::Sat);
        session.assert_extra("trivial", SmtTerm::bool(true))?;
        assert!(session.last_verdict().is_none());
        assert!(session.facts()?.is_none());
        Ok(())
    }
}
