#![doc = include_str!("../README.md")]

mod helpers;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use helpers::{
    exit_status, parse_heresy_selection, parse_output_format, parse_solver_choice, render_scripts,
    scripts_to_json, OutputFormat,
};
use trinity_engine::report::RunReport;
use trinity_engine::runner::{
    emit_selection_script, emit_smtlib_scripts, run_selection_with, run_suite_with, SuiteOptions,
};

#[derive(Parser)]
#[command(name = "trinity")]
#[command(about = "Check the Nicene axioms of the Trinity for consistency with an SMT solver")]
#[command(
    long_about = "Check the Nicene axioms of the Trinity for consistency with an SMT solver.\n\n\
    The axioms are checked alone (expected: sat), then once per heresy with the\n\
    heretical claim added (expected: unsat). With --heresy, only the axioms plus\n\
    the listed heresies are checked, together in one query. Verdicts never\n\
    affect the exit code unless --strict is given."
)]
#[command(version)]
pub(crate) struct Cli {
    /// Solver backend to use: z3 | cvc5
    #[arg(long, default_value = "z3")]
    pub(crate) solver: String,

    /// Per-check timeout in seconds (0 = none); a timeout is reported as unknown
    #[arg(long, default_value_t = 0)]
    pub(crate) timeout: u64,

    /// Output format: text | json
    #[arg(long, default_value = "text")]
    pub(crate) format: String,

    /// Check the axioms plus these heresies together, e.g. `modalism,tritheism`
    /// (`none` checks the axioms alone)
    #[arg(long, value_name = "LIST")]
    pub(crate) heresy: Option<String>,

    /// Print the SMT-LIB2 script of every run instead of solving
    #[arg(long, default_value_t = false)]
    pub(crate) emit_smtlib: bool,

    /// Exit with status 2 when any verdict differs from its expected one
    #[arg(long, default_value_t = false)]
    pub(crate) strict: bool,
}

fn main() -> miette::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = parse_output_format(&cli.format);
    let options = SuiteOptions {
        solver: parse_solver_choice(&cli.solver),
        timeout_secs: cli.timeout,
    };
    let selection = cli.heresy.as_deref().map(parse_heresy_selection);

    if cli.emit_smtlib {
        let scripts = match &selection {
            Some(heresies) => emit_selection_script(heresies).map(|script| vec![script]),
            None => emit_smtlib_scripts(),
        }
        .map_err(|e| miette::miette!("Script generation failed: {e}"))?;
        match format {
            OutputFormat::Text => print!("{}", render_scripts(&scripts)),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&scripts_to_json(&scripts))
                    .into_diagnostic()?;
                println!("{json}");
            }
        }
        return Ok(());
    }

    let (rendered, unexpected): (String, Vec<RunReport>) = match &selection {
        Some(heresies) => {
            let report =
                run_selection_with(&options, heresies).map_err(|e| miette::miette!("{e}"))?;
            let unexpected = report.unexpected().into_iter().cloned().collect();
            (render(&report, report.render_text(), format)?, unexpected)
        }
        None => {
            let report = run_suite_with(&options).map_err(|e| miette::miette!("{e}"))?;
            let unexpected = report.unexpected().into_iter().cloned().collect();
            (render(&report, report.render_text(), format)?, unexpected)
        }
    };
    print!("{rendered}");

    let unexpected: Vec<&RunReport> = unexpected.iter().collect();
    if let Some(code) = exit_status(&unexpected, cli.strict) {
        for run in &unexpected {
            tracing::error!(
                run = %run.name,
                verdict = %run.verdict,
                "verdict differs from expectation"
            );
        }
        std::process::exit(code);
    }
    Ok(())
}

fn render<T: serde::Serialize>(
    report: &T,
    text: String,
    format: OutputFormat,
) -> miette::Result<String> {
    match format {
        OutputFormat::Text => Ok(text),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).into_diagnostic()?;
            Ok(format!("{json}\n"))
        }
    }
}
