use crate::sorts::SmtSort;

/// Abstract SMT term representation, solver-agnostic.
#[derive(Debug, Clone, PartialEq)]
pub enum SmtTerm {
    /// Constant, enumeration member, or quantifier-bound variable.
    Var(String),
    /// Boolean literal.
    BoolLit(bool),
    /// Application of a declared function or predicate.
    App(String, Vec<SmtTerm>),

    Eq(Box<SmtTerm>, Box<SmtTerm>),
    /// Pairwise disequality.
    Distinct(Vec<SmtTerm>),

    // Boolean logic
    And(Vec<SmtTerm>),
    Or(Vec<SmtTerm>),
    Not(Box<SmtTerm>),
    Implies(Box<SmtTerm>, Box<SmtTerm>),

    // Quantifiers
    ForAll(Vec<(String, SmtSort)>, Box<SmtTerm>),
    Exists(Vec<(String, SmtSort)>, Box<SmtTerm>),
}

#[allow(clippy::should_implement_trait)]
impl SmtTerm {
    pub fn var(name: impl Into<String>) -> Self {
        SmtTerm::Var(name.into())
    }

    pub fn bool(b: bool) -> Self {
        SmtTerm::BoolLit(b)
    }

    pub fn app(function: impl Into<String>, args: Vec<SmtTerm>) -> Self {
        SmtTerm::App(function.into(), args)
    }

    pub fn eq(self, other: SmtTerm) -> Self {
        SmtTerm::Eq(Box::new(self), Box::new(other))
    }

    pub fn neq(self, other: SmtTerm) -> Self {
        self.eq(other).not()
    }

    pub fn distinct(terms: Vec<SmtTerm>) -> Self {
        SmtTerm::Distinct(terms)
    }

    pub fn and(terms: Vec<SmtTerm>) -> Self {
        SmtTerm::And(terms)
    }

    pub fn or(terms: Vec<SmtTerm>) -> Self {
        SmtTerm::Or(terms)
    }

    pub fn not(self) -> Self {
        SmtTerm::Not(Box::new(self))
    }

    pub fn implies(self, other: SmtTerm) -> Self {
        SmtTerm::Implies(Box::new(self), Box::new(other))
    }

    pub fn forall(bindings: Vec<(&str, SmtSort)>, body: SmtTerm) -> Self {
        SmtTerm::ForAll(
            bindings
                .into_iter()
                .map(|(name, sort)| (name.to_string(), sort))
                .collect(),
            Box::new(body),
        )
    }

    pub fn exists(bindings: Vec<(&str, SmtSort)>, body: SmtTerm) -> Self {
        SmtTerm::Exists(
            bindings
                .into_iter()
                .map(|(name, sort)| (name.to_string(), sort))
                .collect(),
            Box::new(body),
        )
    }

    /// True when the term contains no quantifier.
    pub fn is_quantifier_free(&self) -> bool {
        match self {
            SmtTerm::Var(_) | SmtTerm::BoolLit(_) => true,
            SmtTerm::App(_, args)
            | SmtTerm::Distinct(args)
            | SmtTerm::And(args)
            | SmtTerm::Or(args) => args.iter().all(SmtTerm::is_quantifier_free),
            SmtTerm::Eq(lhs, rhs) | SmtTerm::Implies(lhs, rhs) => {
                lhs.is_quantifier_free() && rhs.is_quantifier_free()
            }
            SmtTerm::Not(inner) => inner.is_quantifier_free(),
            SmtTerm::ForAll(_, _) | SmtTerm::Exists(_, _) => false,
        }
    }
}

impl std::fmt::Display for SmtTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::backends::smtlib_printer::to_smtlib(self))
    }
}
