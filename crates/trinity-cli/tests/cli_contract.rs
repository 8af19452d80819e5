use serde_json::Value;
use std::process::Command;

fn trinity(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_trinity"))
        .args(args)
        .output()
        .expect("failed to execute trinity")
}

#[test]
fn default_run_prints_all_verdicts_and_exits_zero() {
    let output = trinity(&[]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    for expected in [
        "Core model: sat",
        "Modalism forced (Father = Son): unsat",
        "Tritheism forced (Second essence E2 != E): unsat",
        "Subordinationism forced (Son lacks an essential attribute): unsat",
    ] {
        assert!(stdout.contains(expected), "missing `{expected}` in:\n{stdout}");
    }
}

#[test]
fn default_run_output_order() {
    let output = trinity(&[]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let core = stdout.find("Core model: sat").expect("base verdict");
    let facts = stdout
        .find("The Father is God (fully possesses the one divine essence): true")
        .expect("facts block");
    let modalism = stdout.find("Modalism forced").expect("modalism verdict");
    let tritheism = stdout.find("Tritheism forced").expect("tritheism verdict");
    let subordinationism = stdout
        .find("Subordinationism forced")
        .expect("subordinationism verdict");
    assert!(core < facts && facts < modalism);
    assert!(modalism < tritheism && tritheism < subordinationism);

    let fact_lines = stdout
        .lines()
        .filter(|l| l.ends_with(": true") || l.ends_with(": false"))
        .count();
    assert_eq!(fact_lines, 10);
    assert_eq!(stdout.matches("CONTRADICTION: (UNSAT)").count(), 3);
    assert_eq!(stdout.matches("OK: Consistent (SAT)").count(), 1);
}

#[test]
fn json_report_exposes_verdicts() {
    let output = trinity(&["--format", "json"]);
    assert_eq!(output.status.code(), Some(0));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "output should be JSON (stderr={}). parse error: {e}",
            String::from_utf8_lossy(&output.stderr)
        )
    });
    assert_eq!(report["solver"], "z3");
    assert_eq!(report["base"]["verdict"]["result"], "sat");
    let facts = report["base"]["facts"]
        .as_array()
        .expect("base.facts should be an array");
    assert_eq!(facts.len(), 10);
    let heresies = report["heresies"]
        .as_array()
        .expect("heresies should be an array");
    assert_eq!(heresies.len(), 3);
    for heresy in heresies {
        assert_eq!(heresy["verdict"]["result"], "unsat");
        assert_eq!(heresy["expected"], "contradiction");
        assert!(heresy["description"].as_str().is_some_and(|d| !d.is_empty()));
    }
    assert_eq!(report["axioms"].as_array().map(Vec::len), Some(6));
}

#[test]
fn strict_mode_passes_when_verdicts_match() {
    let output = trinity(&["--strict"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn emit_smtlib_prints_scripts_without_solving() {
    let output = trinity(&["--emit-smtlib"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("; --- core ---"));
    assert!(stdout.contains("(declare-datatypes ((Person 0)) (((Father) (Son) (Spirit))))"));
    assert!(stdout.contains("(assert (forall ((x Essence)) (= x E)))"));
    assert!(stdout.contains("(assert (= Father Son))"));
    assert_eq!(stdout.matches("(check-sat)").count(), 4);
    assert!(!stdout.contains("Core model"));
}

#[test]
fn unknown_solver_is_rejected() {
    let output = trinity(&["--solver", "vampire"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown solver: vampire"), "stderr={stderr}");
}

#[test]
fn emit_smtlib_still_validates_solver() {
    let output = trinity(&["--emit-smtlib", "--solver", "vampire"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn emit_smtlib_honours_json_format() {
    let output = trinity(&["--emit-smtlib", "--format", "json"]);
    assert_eq!(output.status.code(), Some(0));
    let scripts: Value = serde_json::from_slice(&output.stdout).expect("scripts should be JSON");
    let scripts = scripts.as_array().expect("an array of scripts");
    let names: Vec<&str> = scripts.iter().filter_map(|s| s["name"].as_str()).collect();
    assert_eq!(names, vec!["core", "modalism", "tritheism", "subordinationism"]);
    for script in scripts {
        let text = script["script"].as_str().expect("script text");
        assert!(text.ends_with("(check-sat)\n"));
    }
}

#[test]
fn combined_heresies_are_checked_together() {
    let output = trinity(&["--heresy", "modalism,tritheism", "--strict"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Combined heresies forced (modalism, tritheism): unsat"));
    assert!(stdout.contains("CONTRADICTION: (UNSAT)"));
    assert!(!stdout.contains("Core model"));
}

#[test]
fn empty_heresy_selection_checks_the_axioms_alone() {
    let output = trinity(&["--heresy", "none", "--format", "json"]);
    assert_eq!(output.status.code(), Some(0));
    let report: Value = serde_json::from_slice(&output.stdout).expect("report should be JSON");
    assert_eq!(report["heresies"].as_array().map(Vec::len), Some(0));
    assert_eq!(report["run"]["verdict"]["result"], "sat");
    assert_eq!(report["run"]["facts"].as_array().map(Vec::len), Some(10));
}

#[test]
fn combined_heresy_script_is_emitted_once() {
    let output = trinity(&["--emit-smtlib", "--heresy", "tritheism,subordinationism"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("; --- tritheism+subordinationism ---\n"));
    assert_eq!(stdout.matches("(check-sat)").count(), 1);
}

#[test]
fn unknown_heresy_is_rejected() {
    let output = trinity(&["--heresy", "modalism,arianism"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown heresy: arianism"), "stderr={stderr}");
}
