use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::backends::smtlib_printer::{declaration_to_smtlib, sort_to_smtlib, to_smtlib};
use crate::decls::Declaration;
use crate::solver::{ModelCompletion, SatResult, SmtSolver};
use crate::sorts::SmtSort;
use crate::terms::SmtTerm;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("solver I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("solver not found: {0}")]
    NotFound(String),
    #[error("solver error: {0}")]
    SolverError(String),
    #[error("failed to parse solver output: {0}")]
    ParseError(String),
    #[error("no model available: last check was not sat")]
    NoModel,
}

/// How to launch an SMT-LIB2 solver in incremental, interactive mode.
#[derive(Debug, Clone)]
pub struct SolverCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Logic announced with `set-logic`; `None` leaves the solver's default.
    pub logic: Option<String>,
    /// Formats a per-query time limit in milliseconds as extra arguments.
    pub timeout_arg: fn(u64) -> String,
}

impl SolverCommand {
    pub fn cvc5() -> Self {
        Self {
            program: "cvc5".to_string(),
            args: [
                "--lang",
                "smt2",
                "--incremental",
                "--produce-models",
                "--finite-model-find",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            logic: Some("ALL".to_string()),
            timeout_arg: |ms| format!("--tlimit-per={ms}"),
        }
    }

    pub fn z3_binary() -> Self {
        Self {
            program: "z3".to_string(),
            args: vec!["-in".to_string(), "-smt2".to_string()],
            logic: None,
            timeout_arg: |ms| format!("-t:{ms}"),
        }
    }
}

/// How long `Drop` waits for the solver to honour `(exit)` before killing it.
const EXIT_GRACE: Duration = Duration::from_millis(500);

/// Any SMT-LIB2 solver driven over a pipe.
pub struct ProcessSolver {
    command: SolverCommand,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    /// Filled by a background reader so the solver never blocks on stderr.
    stderr: Arc<Mutex<String>>,
    sorts: HashSet<String>,
    has_model: bool,
}

impl ProcessSolver {
    pub fn cvc5() -> Result<Self, ProcessError> {
        Self::with_command(SolverCommand::cvc5(), None)
    }

    pub fn z3_binary() -> Result<Self, ProcessError> {
        Self::with_command(SolverCommand::z3_binary(), None)
    }

    pub fn with_timeout_secs(
        command: SolverCommand,
        timeout_secs: u64,
    ) -> Result<Self, ProcessError> {
        if timeout_secs == 0 {
            return Self::with_command(command, None);
        }
        Self::with_command(command, Some(timeout_secs.saturating_mul(1000)))
    }

    pub fn with_command(
        command: SolverCommand,
        timeout_ms: Option<u64>,
    ) -> Result<Self, ProcessError> {
        let mut args = command.args.clone();
        if let Some(ms) = timeout_ms {
            args.push((command.timeout_arg)(ms));
        }

        let mut child = Command::new(&command.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ProcessError::NotFound(format!("{}: {e}", command.program)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ProcessError::SolverError("failed to capture solver stdin".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ProcessError::SolverError("failed to capture solver stdout".into()))?;
        let stderr = Arc::new(Mutex::new(String::new()));
        if let Some(mut pipe) = child.stderr.take() {
            let sink = Arc::clone(&stderr);
            thread::spawn(move || {
                let mut chunk = [0u8; 4096];
                while let Ok(read) = pipe.read(&mut chunk) {
                    if read == 0 {
                        break;
                    }
                    if let Ok(mut buffer) = sink.lock() {
                        buffer.push_str(&String::from_utf8_lossy(&chunk[..read]));
                    }
                }
            });
        }

        let mut solver = Self {
            command,
            child,
            stdin,
            stdout: BufReader::new(stdout),
            stderr,
            sorts: HashSet::new(),
            has_model: false,
        };
        solver.preamble()?;
        Ok(solver)
    }

    fn preamble(&mut self) -> Result<(), ProcessError> {
        self.send_command_no_response("(set-option :print-success false)")?;
        self.send_command_no_response("(set-option :produce-models true)")?;
        if let Some(logic) = self.command.logic.clone() {
            self.send_command_no_response(&format!("(set-logic {logic})"))?;
        }
        Ok(())
    }

    /// Send `cmd` and read one complete S-expression or atom in reply.
    fn send_command(&mut self, cmd: &str) -> Result<String, ProcessError> {
        writeln!(self.stdin, "{cmd}")?;
        self.stdin.flush()?;

        let mut response = String::new();
        let mut depth: i64 = 0;
        loop {
            let mut line = String::new();
            let read = self.stdout.read_line(&mut line)?;
            if read == 0 {
                let stderr = self.drain_stderr();
                return Err(ProcessError::SolverError(format!(
                    "No response from {} for command `{cmd}`. stderr: {}",
                    self.command.program,
                    stderr.trim()
                )));
            }
            depth += paren_balance(&line);
            response.push_str(&line);
            if depth <= 0 && !response.trim().is_empty() {
                break;
            }
        }
        let response = response.trim().to_string();
        if response.starts_with("(error") {
            return Err(ProcessError::SolverError(response));
        }
        Ok(response)
    }

    fn send_command_no_response(&mut self, cmd: &str) -> Result<(), ProcessError> {
        writeln!(self.stdin, "{cmd}")?;
        self.stdin.flush()?;
        Ok(())
    }

    fn drain_stderr(&mut self) -> String {
        // The reader thread may still be flushing the last bytes after EOF.
        thread::sleep(Duration::from_millis(20));
        match self.stderr.lock() {
            Ok(mut buffer) => std::mem::take(&mut *buffer),
            Err(_) => String::new(),
        }
    }

    fn check_sort(&self, sort: &SmtSort) -> Result<(), ProcessError> {
        match sort {
            SmtSort::Bool => Ok(()),
            SmtSort::Named(name) if self.sorts.contains(name) => Ok(()),
            SmtSort::Named(name) => Err(ProcessError::SolverError(format!(
                "sort `{name}` is not declared"
            ))),
        }
    }
}

impl Drop for ProcessSolver {
    fn drop(&mut self) {
        let _ = writeln!(self.stdin, "(exit)");
        let _ = self.stdin.flush();
        wait_or_kill(&mut self.child, EXIT_GRACE);
    }
}

/// Reap `child`, killing it if it is still running after `grace`.
fn wait_or_kill(child: &mut Child, grace: Duration) {
    let deadline = Instant::now() + grace;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => return,
            Ok(None) if Instant::now() < deadline => thread::sleep(Duration::from_millis(10)),
            _ => break,
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

impl SmtSolver for ProcessSolver {
    type Error = ProcessError;

    fn declare_sort(&mut self, name: &str) -> Result<(), ProcessError> {
        let decl = Declaration::sort(name);
        self.send_command_no_response(&declaration_to_smtlib(&decl))?;
        self.sorts.insert(name.to_string());
        Ok(())
    }

    fn declare_enum_sort(&mut self, name: &str, members: &[&str]) -> Result<(), ProcessError> {
        let decl = Declaration::enum_sort(name, members);
        self.send_command_no_response(&declaration_to_smtlib(&decl))?;
        self.sorts.insert(name.to_string());
        Ok(())
    }

    fn declare_fun(
        &mut self,
        name: &str,
        domain: &[SmtSort],
        range: &SmtSort,
    ) -> Result<(), ProcessError> {
        for sort in domain.iter().chain(std::iter::once(range)) {
            self.check_sort(sort)?;
        }
        let args: Vec<String> = domain.iter().map(sort_to_smtlib).collect();
        self.send_command_no_response(&format!(
            "(declare-fun {name} ({}) {})",
            args.join(" "),
            sort_to_smtlib(range)
        ))?;
        Ok(())
    }

    fn assert(&mut self, term: &SmtTerm) -> Result<(), ProcessError> {
        let smt_str = to_smtlib(term);
        self.send_command_no_response(&format!("(assert {smt_str})"))?;
        Ok(())
    }

    fn push(&mut self) -> Result<(), ProcessError> {
        self.send_command_no_response("(push 1)")?;
        Ok(())
    }

    fn pop(&mut self) -> Result<(), ProcessError> {
        self.send_command_no_response("(pop 1)")?;
        self.has_model = false;
        Ok(())
    }

    fn check_sat(&mut self) -> Result<SatResult, ProcessError> {
        self.has_model = false;
        let response = self.send_command("(check-sat)")?;
        match response.as_str() {
            "sat" => {
                self.has_model = true;
                Ok(SatResult::Sat)
            }
            "unsat" => Ok(SatResult::Unsat),
            "unknown" => {
                let reason = self
                    .send_command("(get-info :reason-unknown)")
                    .unwrap_or_else(|_| format!("{} returned unknown", self.command.program));
                Ok(SatResult::Unknown(reason))
            }
            other => Err(ProcessError::SolverError(other.to_string())),
        }
    }

    fn eval_bool(
        &mut self,
        term: &SmtTerm,
        _completion: ModelCompletion,
    ) -> Result<bool, ProcessError> {
        // `get-value` always completes the model.
        if !self.has_model {
            return Err(ProcessError::NoModel);
        }
        let response = self.send_command(&format!("(get-value ({}))", to_smtlib(term)))?;
        parse_bool_value(&response)
    }

    fn reset(&mut self) -> Result<(), ProcessError> {
        self.send_command_no_response("(reset)")?;
        self.preamble()?;
        self.sorts.clear();
        self.has_model = false;
        Ok(())
    }
}

fn paren_balance(line: &str) -> i64 {
    let mut depth = 0;
    let mut in_string = false;
    let mut in_quoted_symbol = false;
    for ch in line.chars() {
        match ch {
            '"' if !in_quoted_symbol => in_string = !in_string,
            '|' if !in_string => in_quoted_symbol = !in_quoted_symbol,
            '(' if !in_string && !in_quoted_symbol => depth += 1,
            ')' if !in_string && !in_quoted_symbol => depth -= 1,
            _ => {}
        }
    }
    depth
}

/// Extract the value of a single-entry `get-value` reply: `((term value))`.
fn parse_bool_value(response: &str) -> Result<bool, ProcessError> {
    let inner = response.trim().trim_end_matches(')').trim_end();
    if inner.ends_with("true") {
        Ok(true)
    } else if inner.ends_with("false") {
        Ok(false)
    } else {
        Err(ProcessError::ParseError(response.to_string()))
    }
}
