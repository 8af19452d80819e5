use crate::solver::SmtSolver;
use crate::sorts::SmtSort;

/// A signature entry, kept as data so the same symbol set can be replayed
/// into a fresh solver or printed as SMT-LIB2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// Uninterpreted sort.
    Sort { name: String },
    /// Finite sort whose members are pairwise distinct by construction.
    EnumSort { name: String, members: Vec<String> },
    /// Uninterpreted function; a constant when `domain` is empty.
    Fun {
        name: String,
        domain: Vec<SmtSort>,
        range: SmtSort,
    },
}

impl Declaration {
    pub fn sort(name: impl Into<String>) -> Self {
        Declaration::Sort { name: name.into() }
    }

    pub fn enum_sort(name: impl Into<String>, members: &[&str]) -> Self {
        Declaration::EnumSort {
            name: name.into(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn fun(name: impl Into<String>, domain: Vec<SmtSort>, range: SmtSort) -> Self {
        Declaration::Fun {
            name: name.into(),
            domain,
            range,
        }
    }

    pub fn constant(name: impl Into<String>, sort: SmtSort) -> Self {
        Declaration::fun(name, Vec::new(), sort)
    }

    pub fn name(&self) -> &str {
        match self {
            Declaration::Sort { name }
            | Declaration::EnumSort { name, .. }
            | Declaration::Fun { name, .. } => name,
        }
    }

    /// Replay this declaration into `solver`.
    pub fn declare_into<S: SmtSolver>(&self, solver: &mut S) -> Result<(), S::Error> {
        match self {
            Declaration::Sort { name } => solver.declare_sort(name),
            Declaration::EnumSort { name, members } => {
                let refs: Vec<&str> = members.iter().map(String::as_str).collect();
                solver.declare_enum_sort(name, &refs)
            }
            Declaration::Fun {
                name,
                domain,
                range,
            } => solver.declare_fun(name, domain, range),
        }
    }
}
