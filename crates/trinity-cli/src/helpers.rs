use serde_json::{json, Value};
use trinity_engine::heresy::Heresy;
use trinity_engine::report::RunReport;
use trinity_engine::runner::SolverChoice;

/// Exit status for `--strict` when a run misses its expected verdict.
pub(crate) const EXIT_UNEXPECTED_VERDICT: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

pub(crate) fn parse_solver_choice(raw: &str) -> SolverChoice {
    match raw {
        "z3" => SolverChoice::Z3,
        "cvc5" => SolverChoice::Cvc5,
        other => {
            eprintln!("Unknown solver: {other}. Use 'z3' or 'cvc5'.");
            std::process::exit(1);
        }
    }
}

pub(crate) fn parse_output_format(raw: &str) -> OutputFormat {
    match raw {
        "text" => OutputFormat::Text,
        "json" => OutputFormat::Json,
        other => {
            eprintln!("Unknown output format: {other}. Use 'text' or 'json'.");
            std::process::exit(1);
        }
    }
}

/// Parse a comma-separated heresy list. `none` and the empty string select
/// no heresy at all.
pub(crate) fn parse_heresy_selection(raw: &str) -> Vec<Heresy> {
    let mut selection = Vec::new();
    for part in raw.split(',').map(str::trim) {
        if part.is_empty() || part == "none" {
            continue;
        }
        match Heresy::from_name(part) {
            Some(heresy) => selection.push(heresy),
            None => {
                eprintln!(
                    "Unknown heresy: {part}. Use a comma-separated list of \
                     'modalism', 'tritheism', 'subordinationism', or 'none'."
                );
                std::process::exit(1);
            }
        }
    }
    selection
}

/// Process exit status owed for `unexpected` runs, or `None` to exit normally.
pub(crate) fn exit_status(unexpected: &[&RunReport], strict: bool) -> Option<i32> {
    if strict && !unexpected.is_empty() {
        Some(EXIT_UNEXPECTED_VERDICT)
    } else {
        None
    }
}

/// Concatenate dry-run scripts, each preceded by a comment naming its run.
pub(crate) fn render_scripts(scripts: &[(String, String)]) -> String {
    let mut out = String::new();
    for (index, (name, script)) in scripts.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!("; --- {name} ---\n"));
        out.push_str(script);
    }
    out
}

pub(crate) fn scripts_to_json(scripts: &[(String, String)]) -> Value {
    Value::Array(
        scripts
            .iter()
            .map(|(name, script)| json!({ "name": name, "script": script }))
            .collect(),
    )
}
