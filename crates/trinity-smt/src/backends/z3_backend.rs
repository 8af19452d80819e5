use std::collections::HashMap;

use thiserror::Error;
use z3::ast::{Ast, Bool, Dynamic};
use z3::SatResult as Z3SatResult;

use crate::solver::{ModelCompletion, SatResult, SmtSolver};
use crate::sorts::SmtSort;
use crate::terms::SmtTerm;

#[derive(Debug, Error)]
pub enum Z3Error {
    #[error("Z3 error: {0}")]
    Internal(String),
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),
    #[error("Unknown sort: {0}")]
    UnknownSort(String),
    #[error("Sort mismatch: {0}")]
    SortMismatch(String),
    #[error("No model available: last check was not sat")]
    NoModel,
    #[error("Model does not fix a truth value for {0}")]
    Indefinite(String),
}

pub struct Z3Solver {
    solver: z3::Solver,
    sorts: HashMap<String, z3::Sort>,
    consts: HashMap<String, Dynamic>,
    funcs: HashMap<String, z3::FuncDecl>,
    model: Option<z3::Model>,
    _params: Option<z3::Params>,
}

impl Z3Solver {
    pub fn new() -> Self {
        Self::from_parts(z3::Solver::new(), None)
    }

    pub fn with_timeout_secs(timeout_secs: u64) -> Self {
        if timeout_secs == 0 {
            return Self::new();
        }
        let solver = z3::Solver::new();
        let mut params = z3::Params::new();
        let timeout_ms = timeout_secs.saturating_mul(1000).min(u64::from(u32::MAX));
        params.set_u32("timeout", timeout_ms as u32);
        solver.set_params(&params);
        Self::from_parts(solver, Some(params))
    }

    pub fn with_default_config() -> Self {
        Self::new()
    }

    fn from_parts(solver: z3::Solver, params: Option<z3::Params>) -> Self {
        Self {
            solver,
            sorts: HashMap::new(),
            consts: HashMap::new(),
            funcs: HashMap::new(),
            model: None,
            _params: params,
        }
    }

    fn sort(&self, sort: &SmtSort) -> Result<z3::Sort, Z3Error> {
        match sort {
            SmtSort::Bool => Ok(z3::Sort::bool()),
            SmtSort::Named(name) => self
                .sorts
                .get(name)
                .cloned()
                .ok_or_else(|| Z3Error::UnknownSort(name.clone())),
        }
    }

    /// Translate `term`; `scope` holds quantifier-bound variables, innermost last.
    fn translate_term(
        &self,
        term: &SmtTerm,
        scope: &mut Vec<(String, Dynamic)>,
    ) -> Result<Dynamic, Z3Error> {
        match term {
            SmtTerm::Var(name) => {
                if let Some((_, bound)) = scope.iter().rev().find(|(n, _)| n == name) {
                    Ok(bound.clone())
                } else if let Some(c) = self.consts.get(name) {
                    Ok(c.clone())
                } else {
                    Err(Z3Error::UnknownSymbol(name.clone()))
                }
            }
            SmtTerm::BoolLit(b) => Ok(Dynamic::from_ast(&Bool::from_bool(*b))),
            SmtTerm::App(function, args) => {
                if args.is_empty() {
                    return self.translate_term(&SmtTerm::Var(function.clone()), scope);
                }
                let decl = self
                    .funcs
                    .get(function)
                    .ok_or_else(|| Z3Error::UnknownSymbol(function.clone()))?;
                let values = args
                    .iter()
                    .map(|a| self.translate_term(a, scope))
                    .collect::<Result<Vec<_>, _>>()?;
                let refs: Vec<&dyn Ast> = values.iter().map(|v| v as &dyn Ast).collect();
                Ok(decl.apply(&refs))
            }
            SmtTerm::Eq(lhs, rhs) => {
                let l = self.translate_term(lhs, scope)?;
                let r = self.translate_term(rhs, scope)?;
                Ok(Dynamic::from_ast(&equate(&l, &r)?))
            }
            SmtTerm::Distinct(terms) => {
                let values = terms
                    .iter()
                    .map(|t| self.translate_term(t, scope))
                    .collect::<Result<Vec<_>, _>>()?;
                let mut disequalities = Vec::new();
                for (i, l) in values.iter().enumerate() {
                    for r in &values[i + 1..] {
                        disequalities.push(equate(l, r)?.not());
                    }
                }
                let refs: Vec<&Bool> = disequalities.iter().collect();
                Ok(Dynamic::from_ast(&Bool::and(&refs)))
            }
            SmtTerm::And(terms) => {
                let bools = self.translate_bools(terms, scope)?;
                let refs: Vec<&Bool> = bools.iter().collect();
                Ok(Dynamic::from_ast(&Bool::and(&refs)))
            }
            SmtTerm::Or(terms) => {
                let bools = self.translate_bools(terms, scope)?;
                let refs: Vec<&Bool> = bools.iter().collect();
                Ok(Dynamic::from_ast(&Bool::or(&refs)))
            }
            SmtTerm::Not(inner) => {
                let b = into_bool(self.translate_term(inner, scope)?)?;
                Ok(Dynamic::from_ast(&b.not()))
            }
            SmtTerm::Implies(lhs, rhs) => {
                let l = into_bool(self.translate_term(lhs, scope)?)?;
                let r = into_bool(self.translate_term(rhs, scope)?)?;
                Ok(Dynamic::from_ast(&l.implies(&r)))
            }
            SmtTerm::ForAll(bindings, body) | SmtTerm::Exists(bindings, body) => {
                let depth = scope.len();
                for (name, sort) in bindings {
                    let z3_sort = self.sort(sort)?;
                    scope.push((name.clone(), Dynamic::new_const(name.as_str(), &z3_sort)));
                }
                let body = self.translate_term(body, scope).and_then(into_bool);
                let bound: Vec<Dynamic> = scope.drain(depth..).map(|(_, v)| v).collect();
                let body = body?;
                let refs: Vec<&dyn Ast> = bound.iter().map(|v| v as &dyn Ast).collect();
                let quantified = if matches!(term, SmtTerm::ForAll(_, _)) {
                    z3::ast::forall_const(&refs, &[], &body)
                } else {
                    z3::ast::exists_const(&refs, &[], &body)
                };
                Ok(Dynamic::from_ast(&quantified))
            }
        }
    }

    fn translate_bools(
        &self,
        terms: &[SmtTerm],
        scope: &mut Vec<(String, Dynamic)>,
    ) -> Result<Vec<Bool>, Z3Error> {
        terms
            .iter()
            .map(|t| self.translate_term(t, scope).and_then(into_bool))
            .collect()
    }

    fn translate_formula(&self, term: &SmtTerm) -> Result<Bool, Z3Error> {
        into_bool(self.translate_term(term, &mut Vec::new())?)
    }
}

fn into_bool(value: Dynamic) -> Result<Bool, Z3Error> {
    value
        .as_bool()
        .ok_or_else(|| Z3Error::SortMismatch(format!("expected Bool, got {}", value.get_sort())))
}

fn equate(l: &Dynamic, r: &Dynamic) -> Result<Bool, Z3Error> {
    if l.get_sort() != r.get_sort() {
        return Err(Z3Error::SortMismatch(format!(
            "cannot equate {} with {}",
            l.get_sort(),
            r.get_sort()
        )));
    }
    Ok(l.eq(r))
}

impl Default for Z3Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl SmtSolver for Z3Solver {
    type Error = Z3Error;

    fn declare_sort(&mut self, name: &str) -> Result<(), Z3Error> {
        let sort = z3::Sort::uninterpreted(z3::Symbol::String(name.to_string()));
        self.sorts.insert(name.to_string(), sort);
        Ok(())
    }

    fn declare_enum_sort(&mut self, name: &str, members: &[&str]) -> Result<(), Z3Error> {
        let symbols: Vec<z3::Symbol> = members
            .iter()
            .map(|m| z3::Symbol::String((*m).to_string()))
            .collect();
        let (sort, constructors, _testers) =
            z3::Sort::enumeration(z3::Symbol::String(name.to_string()), &symbols);
        if constructors.len() != members.len() {
            return Err(Z3Error::Internal(format!(
                "enumeration {name} produced {} constructors for {} members",
                constructors.len(),
                members.len()
            )));
        }
        for (member, ctor) in members.iter().zip(constructors.iter()) {
            self.consts.insert((*member).to_string(), ctor.apply(&[]));
        }
        self.sorts.insert(name.to_string(), sort);
        Ok(())
    }

    fn declare_fun(
        &mut self,
        name: &str,
        domain: &[SmtSort],
        range: &SmtSort,
    ) -> Result<(), Z3Error> {
        let range_sort = self.sort(range)?;
        if domain.is_empty() {
            self.consts
                .insert(name.to_string(), Dynamic::new_const(name, &range_sort));
            return Ok(());
        }
        let domain_sorts = domain
            .iter()
            .map(|s| self.sort(s))
            .collect::<Result<Vec<_>, _>>()?;
        let refs: Vec<&z3::Sort> = domain_sorts.iter().collect();
        let decl = z3::FuncDecl::new(name, &refs, &range_sort);
        self.funcs.insert(name.to_string(), decl);
        Ok(())
    }

    fn assert(&mut self, term: &SmtTerm) -> Result<(), Z3Error> {
        let z3_term = self.translate_formula(term)?;
        self.solver.assert(&z3_term);
        Ok(())
    }

    fn push(&mut self) -> Result<(), Z3Error> {
        self.solver.push();
        Ok(())
    }

    fn pop(&mut self) -> Result<(), Z3Error> {
        self.solver.pop(1);
        self.model = None;
        Ok(())
    }

    fn check_sat(&mut self) -> Result<SatResult, Z3Error> {
        self.model = None;
        match self.solver.check() {
            Z3SatResult::Sat => {
                let model = self
                    .solver
                    .get_model()
                    .ok_or_else(|| Z3Error::Internal("SAT but no model available".into()))?;
                self.model = Some(model);
                Ok(SatResult::Sat)
            }
            Z3SatResult::Unsat => Ok(SatResult::Unsat),
            Z3SatResult::Unknown => Ok(SatResult::Unknown(
                self.solver
                    .get_reason_unknown()
                    .unwrap_or_else(|| "Z3 returned unknown".into()),
            )),
        }
    }

    fn eval_bool(&mut self, term: &SmtTerm, completion: ModelCompletion) -> Result<bool, Z3Error> {
        let model = self.model.as_ref().ok_or(Z3Error::NoModel)?;
        let formula = self.translate_formula(term)?;
        model
            .eval(&formula, completion.is_complete())
            .and_then(|value| value.as_bool())
            .ok_or_else(|| Z3Error::Indefinite(term.to_string()))
    }

    fn reset(&mut self) -> Result<(), Z3Error> {
        self.solver.reset();
        // Z3 may drop per-solver parameters on reset; reapply timeout if configured.
        if let Some(params) = &self._params {
            self.solver.set_params(params);
        }
        self.sorts.clear();
        self.consts.clear();
        self.funcs.clear();
        self.model = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn person() -> SmtSort {
        SmtSort::named("Person")
    }

    fn declare_people(solver: &mut Z3Solver) -> Result<(), Z3Error> {
        solver.declare_enum_sort("Person", &["Ann", "Bob", "Cy"])
    }

    #[test]
    fn z3_enum_members_are_distinct() -> TestResult {
        let mut solver = Z3Solver::with_default_config();
        declare_people(&mut solver)?;
        solver.assert(&SmtTerm::var("Ann").eq(SmtTerm::var("Bob")))?;
        assert_eq!(solver.check_sat()?, SatResult::Unsat);
        Ok(())
    }

    #[test]
    fn z3_enum_sort_is_closed() -> TestResult {
        let mut solver = Z3Solver::with_default_config();
        declare_people(&mut solver)?;
        solver.declare_const("d", &person())?;
        solver.assert(&SmtTerm::and(vec![
            SmtTerm::var("d").neq(SmtTerm::var("Ann")),
            SmtTerm::var("d").neq(SmtTerm::var("Bob")),
            SmtTerm::var("d").neq(SmtTerm::var("Cy")),
        ]))?;
        assert_eq!(solver.check_sat()?, SatResult::Unsat);
        Ok(())
    }

    #[test]
    fn z3_singleton_sort_by_axiom() -> TestResult {
        let mut solver = Z3Solver::with_default_config();
        solver.declare_sort("Thing")?;
        solver.declare_const("t", &SmtSort::named("Thing"))?;
        solver.declare_const("u", &SmtSort::named("Thing"))?;
        solver.assert(&SmtTerm::forall(
            vec![("x", SmtSort::named("Thing"))],
            SmtTerm::var("x").eq(SmtTerm::var("t")),
        ))?;
        assert_eq!(solver.check_sat()?, SatResult::Sat);

        solver.assert(&SmtTerm::var("u").neq(SmtTerm::var("t")))?;
        assert_eq!(solver.check_sat()?, SatResult::Unsat);
        Ok(())
    }

    #[test]
    fn z3_universal_instantiation_refutes_counterexample() -> TestResult {
        let mut solver = Z3Solver::with_default_config();
        declare_people(&mut solver)?;
        solver.declare_fun("Tall", &[person()], &SmtSort::Bool)?;
        solver.assert(&SmtTerm::forall(
            vec![("p", person())],
            SmtTerm::app("Tall", vec![SmtTerm::var("p")]),
        ))?;
        solver.assert(&SmtTerm::app("Tall", vec![SmtTerm::var("Bob")]).not())?;
        assert_eq!(solver.check_sat()?, SatResult::Unsat);
        Ok(())
    }

    #[test]
    fn z3_existential_witness() -> TestResult {
        let mut solver = Z3Solver::with_default_config();
        declare_people(&mut solver)?;
        solver.declare_fun("Tall", &[person()], &SmtSort::Bool)?;
        solver.assert(&SmtTerm::exists(
            vec![("p", person())],
            SmtTerm::app("Tall", vec![SmtTerm::var("p")]),
        ))?;
        solver.assert(&SmtTerm::app("Tall", vec![SmtTerm::var("Ann")]).not())?;
        solver.assert(&SmtTerm::app("Tall", vec![SmtTerm::var("Bob")]).not())?;
        assert_eq!(solver.check_sat()?, SatResult::Sat);
        assert!(solver.eval_bool(
            &SmtTerm::app("Tall", vec![SmtTerm::var("Cy")]),
            ModelCompletion::Complete
        )?);
        Ok(())
    }

    #[test]
    fn z3_model_evaluation_with_completion() -> TestResult {
        let mut solver = Z3Solver::with_default_config();
        declare_people(&mut solver)?;
        solver.declare_fun("Likes", &[person(), person()], &SmtSort::Bool)?;
        solver.assert(&SmtTerm::app(
            "Likes",
            vec![SmtTerm::var("Ann"), SmtTerm::var("Bob")],
        ))?;
        assert_eq!(solver.check_sat()?, SatResult::Sat);

        assert!(solver.eval_bool(
            &SmtTerm::app("Likes", vec![SmtTerm::var("Ann"), SmtTerm::var("Bob")]),
            ModelCompletion::Complete
        )?);
        // Unconstrained, but completion still yields a definite value.
        let _ = solver.eval_bool(
            &SmtTerm::app("Likes", vec![SmtTerm::var("Cy"), SmtTerm::var("Cy")]),
            ModelCompletion::Complete,
        )?;
        assert!(!solver.eval_bool(
            &SmtTerm::var("Ann").eq(SmtTerm::var("Cy")),
            ModelCompletion::Complete
        )?);
        Ok(())
    }

    #[test]
    fn z3_eval_without_model_is_an_error() -> TestResult {
        let mut solver = Z3Solver::with_default_config();
        declare_people(&mut solver)?;
        let err = solver
            .eval_bool(&SmtTerm::bool(true), ModelCompletion::Complete)
            .expect_err("no check has run yet");
        assert!(matches!(err, Z3Error::NoModel));

        solver.assert(&SmtTerm::var("Ann").eq(SmtTerm::var("Cy")))?;
        assert_eq!(solver.check_sat()?, SatResult::Unsat);
        let err = solver
            .eval_bool(&SmtTerm::bool(true), ModelCompletion::Complete)
            .expect_err("unsat leaves no model");
        assert!(matches!(err, Z3Error::NoModel));
        Ok(())
    }

    #[test]
    fn z3_push_pop_restores_satisfiability() -> TestResult {
        let mut solver = Z3Solver::with_default_config();
        declare_people(&mut solver)?;
        solver.push()?;
        solver.assert(&SmtTerm::var("Ann").eq(SmtTerm::var("Bob")))?;
        assert_eq!(solver.check_sat()?, SatResult::Unsat);
        solver.pop()?;
        assert_eq!(solver.check_sat()?, SatResult::Sat);
        Ok(())
    }

    #[test]
    fn z3_timeout_configuration_survives_reset() -> TestResult {
        let mut solver = Z3Solver::with_timeout_secs(2);
        assert!(
            solver._params.is_some(),
            "timeout-backed solver should persist params for reset()"
        );

        declare_people(&mut solver)?;
        solver.assert(&SmtTerm::var("Ann").neq(SmtTerm::var("Bob")))?;
        assert_eq!(solver.check_sat()?, SatResult::Sat);

        solver.reset()?;
        assert!(
            solver.assert(&SmtTerm::var("Ann").neq(SmtTerm::var("Bob"))).is_err(),
            "reset should drop declared symbols"
        );
        declare_people(&mut solver)?;
        solver.assert(&SmtTerm::var("Ann").neq(SmtTerm::var("Bob")))?;
        assert_eq!(solver.check_sat()?, SatResult::Sat);
        assert!(solver._params.is_some());
        Ok(())
    }

    #[test]
    fn z3_rejects_unknown_symbols_and_sorts() -> TestResult {
        let mut solver = Z3Solver::with_default_config();
        assert!(matches!(
            solver.assert(&SmtTerm::var("ghost").eq(SmtTerm::var("ghost"))),
            Err(Z3Error::UnknownSymbol(_))
        ));
        assert!(matches!(
            solver.declare_const("c", &SmtSort::named("Nowhere")),
            Err(Z3Error::UnknownSort(_))
        ));
        Ok(())
    }

    #[test]
    fn z3_rejects_sort_mismatch() -> TestResult {
        let mut solver = Z3Solver::with_default_config();
        declare_people(&mut solver)?;
        solver.declare_sort("Thing")?;
        solver.declare_const("t", &SmtSort::named("Thing"))?;
        assert!(matches!(
            solver.assert(&SmtTerm::var("t").eq(SmtTerm::var("Ann"))),
            Err(Z3Error::SortMismatch(_))
        ));
        assert!(matches!(
            solver.assert(&SmtTerm::var("t")),
            Err(Z3Error::SortMismatch(_))
        ));
        Ok(())
    }
}
