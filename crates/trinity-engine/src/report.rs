use serde::Serialize;
use std::fmt;
use trinity_smt::solver::SatResult;

use crate::axioms::{AxiomId, AxiomSummary};
use crate::heresy::Heresy;

/// JSON schema version for suite reports.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Outcome of one satisfiability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum Verdict {
    Sat,
    Unsat,
    /// The solver gave up (incompleteness or timeout). Not an error.
    Unknown { reason: String },
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Sat => "sat",
            Verdict::Unsat => "unsat",
            Verdict::Unknown { .. } => "unknown",
        }
    }

    pub fn classification(&self) -> &'static str {
        match self {
            Verdict::Sat => "OK: Consistent (SAT)",
            Verdict::Unsat => "CONTRADICTION: (UNSAT)",
            Verdict::Unknown { .. } => "Unknown (solver could not decide)",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SatResult> for Verdict {
    fn from(result: SatResult) -> Self {
        match result {
            SatResult::Sat => Verdict::Sat,
            SatResult::Unsat => Verdict::Unsat,
            SatResult::Unknown(reason) => Verdict::Unknown { reason },
        }
    }
}

/// Verdict a run is meant to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    Consistent,
    Contradiction,
}

impl Expectation {
    /// `Unknown` never meets an expectation.
    pub fn is_met_by(self, verdict: &Verdict) -> bool {
        matches!(
            (self, verdict),
            (Expectation::Consistent, Verdict::Sat) | (Expectation::Contradiction, Verdict::Unsat)
        )
    }
}

/// A creedal proposition evaluated in a satisfying model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    pub statement: String,
    pub holds: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub name: String,
    pub label: String,
    /// What was added on top of the axioms, in prose.
    pub description: String,
    pub verdict: Verdict,
    pub expected: Expectation,
    /// Present only when the verdict is `sat`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facts: Option<Vec<Fact>>,
}

impl RunReport {
    pub fn as_expected(&self) -> bool {
        self.expected.is_met_by(&self.verdict)
    }
}

/// Summaries of every axiom group, in assertion order.
pub fn axiom_summaries() -> Vec<AxiomSummary> {
    AxiomId::ALL.into_iter().map(AxiomSummary::from).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub schema_version: u32,
    pub solver: String,
    pub axioms: Vec<AxiomSummary>,
    pub base: RunReport,
    pub heresies: Vec<RunReport>,
}

impl SuiteReport {
    pub fn runs(&self) -> impl Iterator<Item = &RunReport> {
        std::iter::once(&self.base).chain(self.heresies.iter())
    }

    /// Runs whose verdict differs from their expectation.
    pub fn unexpected(&self) -> Vec<&RunReport> {
        self.runs().filter(|r| !r.as_expected()).collect()
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Base (Non-Filioque) Trinity Model ===\n");
        push_verdict(&mut out, &self.base);

        out.push_str("\n--- Facts (Base Trinitarian Model) ---\n");
        match &self.base.facts {
            Some(facts) => push_facts(&mut out, facts),
            None => out.push_str("Model not SAT; cannot print facts.\n"),
        }

        out.push_str("\n=== Anti-heresy Safety Tests (should all be UNSAT) ===\n");
        for run in &self.heresies {
            push_verdict(&mut out, run);
        }
        out
    }
}

/// One check of the axioms together with a chosen set of heresies.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub schema_version: u32,
    pub solver: String,
    pub axioms: Vec<AxiomSummary>,
    pub heresies: Vec<Heresy>,
    pub run: RunReport,
}

impl SelectionReport {
    pub fn unexpected(&self) -> Vec<&RunReport> {
        std::iter::once(&self.run).filter(|r| !r.as_expected()).collect()
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Selected Heresies ===\n");
        if self.heresies.is_empty() {
            out.push_str("(none)\n");
        }
        for heresy in &self.heresies {
            out.push_str(&format!("{}: {}\n", heresy.label(), heresy.description()));
        }
        out.push('\n');
        push_verdict(&mut out, &self.run);
        if let Some(facts) = &self.run.facts {
            out.push_str("\n--- Facts (Base Trinitarian Model) ---\n");
            push_facts(&mut out, facts);
        }
        out
    }
}

fn push_verdict(out: &mut String, run: &RunReport) {
    out.push_str(&format!("{}: {}\n", run.label, run.verdict));
    out.push_str(&format!("  {}\n", run.verdict.classification()));
}

fn push_facts(out: &mut String, facts: &[Fact]) {
    for fact in facts {
        out.push_str(&format!("{}: {}\n", fact.statement, fact.holds));
    }
}
