//! Runs the base model and each heresy in its own session.

use tracing::{info, warn};
use trinity_smt::backends::process_backend::{ProcessSolver, SolverCommand};
use trinity_smt::backends::recording_backend::RecordingSolver;
use trinity_smt::backends::z3_backend::Z3Solver;
use trinity_smt::solver::SmtSolver;

use crate::error::EngineError;
use crate::heresy::Heresy;
use crate::report::{
    axiom_summaries, Expectation, RunReport, SelectionReport, SuiteReport, REPORT_SCHEMA_VERSION,
};
use crate::session::Session;

pub const BASE_NAME: &str = "core";
pub const BASE_LABEL: &str = "Core model";
pub const BASE_DESCRIPTION: &str = "the Nicene axioms alone, without the Filioque";

/// Which solver backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverChoice {
    /// In-process Z3 through libz3.
    #[default]
    Z3,
    /// cvc5 child process speaking SMT-LIB2.
    Cvc5,
}

impl SolverChoice {
    pub fn name(self) -> &'static str {
        match self {
            SolverChoice::Z3 => "z3",
            SolverChoice::Cvc5 => "cvc5",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SuiteOptions {
    pub solver: SolverChoice,
    /// Per-check time limit; 0 disables it.
    pub timeout_secs: u64,
}

/// Check the axioms alone and, when satisfiable, evaluate the facts.
pub fn run_base<S: SmtSolver>(solver: S) -> Result<RunReport, EngineError> {
    let mut session = Session::open(solver)?;
    let verdict = session.check()?;
    let facts = session.facts()?;
    Ok(finish(RunReport {
        name: BASE_NAME.to_string(),
        label: BASE_LABEL.to_string(),
        description: BASE_DESCRIPTION.to_string(),
        verdict,
        expected: Expectation::Consistent,
        facts,
    }))
}

/// Check the axioms plus one heresy. No model is extracted.
pub fn run_heresy<S: SmtSolver>(solver: S, heresy: Heresy) -> Result<RunReport, EngineError> {
    let mut session = Session::open(solver)?;
    heresy.apply(&mut session)?;
    let verdict = session.check()?;
    Ok(finish(RunReport {
        name: heresy.name().to_string(),
        label: heresy.label().to_string(),
        description: heresy.description().to_string(),
        verdict,
        expected: heresy.expected(),
        facts: None,
    }))
}

/// Check the axioms plus every heresy in `heresies`, all in one session.
///
/// Duplicates are applied once. The empty selection is the base model and
/// reports facts when satisfiable; any other selection expects a
/// contradiction.
pub fn run_heresies<S: SmtSolver>(
    solver: S,
    heresies: &[Heresy],
) -> Result<RunReport, EngineError> {
    let selected = dedup(heresies);
    let mut session = selection_session(solver, &selected)?;
    let verdict = session.check()?;

    let report = match selected.as_slice() {
        [] => RunReport {
            name: BASE_NAME.to_string(),
            label: BASE_LABEL.to_string(),
            description: BASE_DESCRIPTION.to_string(),
            facts: session.facts()?,
            verdict,
            expected: Expectation::Consistent,
        },
        [single] => RunReport {
            name: single.name().to_string(),
            label: single.label().to_string(),
            description: single.description().to_string(),
            verdict,
            expected: single.expected(),
            facts: None,
        },
        many => {
            let names: Vec<&str> = many.iter().map(|h| h.name()).collect();
            let descriptions: Vec<&str> = many.iter().map(|h| h.description()).collect();
            RunReport {
                name: names.join("+"),
                label: format!("Combined heresies forced ({})", names.join(", ")),
                description: descriptions.join("; "),
                verdict,
                expected: Expectation::Contradiction,
                facts: None,
            }
        }
    };
    Ok(finish(report))
}

fn dedup(heresies: &[Heresy]) -> Vec<Heresy> {
    let mut selected = Vec::with_capacity(heresies.len());
    for &heresy in heresies {
        if !selected.contains(&heresy) {
            selected.push(heresy);
        }
    }
    selected
}

fn selection_session<S: SmtSolver>(
    solver: S,
    heresies: &[Heresy],
) -> Result<Session<S>, EngineError> {
    let mut session = Session::open(solver)?;
    for heresy in heresies {
        heresy.apply(&mut session)?;
    }
    Ok(session)
}

fn finish(report: RunReport) -> RunReport {
    if report.as_expected() {
        info!(run = %report.name, verdict = %report.verdict, "run finished");
    } else {
        warn!(
            run = %report.name,
            verdict = %report.verdict,
            expected = ?report.expected,
            "run did not produce its expected verdict"
        );
    }
    report
}

/// Run the base model and all heresies, asking `make_solver` for a fresh
/// backend before every run.
pub fn run_suite<S, F>(solver_name: &str, mut make_solver: F) -> Result<SuiteReport, EngineError>
where
    S: SmtSolver,
    F: FnMut() -> Result<S, EngineError>,
{
    let base = run_base(make_solver()?)?;
    let heresies = Heresy::ALL
        .iter()
        .map(|&heresy| run_heresy(make_solver()?, heresy))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SuiteReport {
        schema_version: REPORT_SCHEMA_VERSION,
        solver: solver_name.to_string(),
        axioms: axiom_summaries(),
        base,
        heresies,
    })
}

pub fn run_suite_with(options: &SuiteOptions) -> Result<SuiteReport, EngineError> {
    info!(
        solver = options.solver.name(),
        timeout_secs = options.timeout_secs,
        "Starting consistency suite..."
    );
    let timeout_secs = options.timeout_secs;
    match options.solver {
        SolverChoice::Z3 => run_suite(options.solver.name(), || {
            Ok(Z3Solver::with_timeout_secs(timeout_secs))
        }),
        SolverChoice::Cvc5 => run_suite(options.solver.name(), || cvc5_solver(timeout_secs)),
    }
}

/// Check one chosen combination of heresies on the configured backend.
pub fn run_selection_with(
    options: &SuiteOptions,
    heresies: &[Heresy],
) -> Result<SelectionReport, EngineError> {
    info!(
        solver = options.solver.name(),
        timeout_secs = options.timeout_secs,
        selected = heresies.len(),
        "Starting heresy selection check..."
    );
    let run = match options.solver {
        SolverChoice::Z3 => {
            run_heresies(Z3Solver::with_timeout_secs(options.timeout_secs), heresies)?
        }
        SolverChoice::Cvc5 => run_heresies(cvc5_solver(options.timeout_secs)?, heresies)?,
    };
    Ok(SelectionReport {
        schema_version: REPORT_SCHEMA_VERSION,
        solver: options.solver.name().to_string(),
        axioms: axiom_summaries(),
        heresies: dedup(heresies),
        run,
    })
}

fn cvc5_solver(timeout_secs: u64) -> Result<ProcessSolver, EngineError> {
    ProcessSolver::with_timeout_secs(SolverCommand::cvc5(), timeout_secs)
        .map_err(|e| EngineError::Unavailable(e.to_string()))
}

/// SMT-LIB2 scripts for the base model and each heresy, keyed by run name,
/// without invoking a solver.
pub fn emit_smtlib_scripts() -> Result<Vec<(String, String)>, EngineError> {
    let mut scripts = Vec::with_capacity(Heresy::ALL.len() + 1);
    scripts.push(emit_selection_script(&[])?);
    for heresy in Heresy::ALL {
        scripts.push(emit_selection_script(&[heresy])?);
    }
    Ok(scripts)
}

/// SMT-LIB2 script for the axioms plus a chosen set of heresies.
pub fn emit_selection_script(heresies: &[Heresy]) -> Result<(String, String), EngineError> {
    let selected = dedup(heresies);
    let mut session = selection_session(RecordingSolver::new(), &selected)?;
    session.check()?;
    let name = if selected.is_empty() {
        BASE_NAME.to_string()
    } else {
        selected.iter().map(|h| h.name()).collect::<Vec<_>>().join("+")
    };
    Ok((name, session.into_solver().into_script()))
}
