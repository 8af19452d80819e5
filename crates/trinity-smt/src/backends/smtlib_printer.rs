use crate::decls::Declaration;
use crate::sorts::SmtSort;
use crate::terms::SmtTerm;

/// Print an SmtTerm as SMT-LIB2 format.
pub fn to_smtlib(term: &SmtTerm) -> String {
    match term {
        SmtTerm::Var(name) => name.clone(),
        SmtTerm::BoolLit(b) => {
            if *b {
                "true".to_string()
            } else {
                "false".to_string()
            }
        }
        SmtTerm::App(function, args) => {
            if args.is_empty() {
                function.clone()
            } else {
                let inner: Vec<String> = args.iter().map(to_smtlib).collect();
                format!("({function} {})", inner.join(" "))
            }
        }
        SmtTerm::Eq(lhs, rhs) => format!("(= {} {})", to_smtlib(lhs), to_smtlib(rhs)),
        SmtTerm::Distinct(terms) => {
            if terms.len() < 2 {
                "true".to_string()
            } else {
                let inner: Vec<String> = terms.iter().map(to_smtlib).collect();
                format!("(distinct {})", inner.join(" "))
            }
        }
        SmtTerm::And(terms) => {
            if terms.is_empty() {
                "true".to_string()
            } else if terms.len() == 1 {
                to_smtlib(&terms[0])
            } else {
                let inner: Vec<String> = terms.iter().map(to_smtlib).collect();
                format!("(and {})", inner.join(" "))
            }
        }
        SmtTerm::Or(terms) => {
            if terms.is_empty() {
                "false".to_string()
            } else if terms.len() == 1 {
                to_smtlib(&terms[0])
            } else {
                let inner: Vec<String> = terms.iter().map(to_smtlib).collect();
                format!("(or {})", inner.join(" "))
            }
        }
        SmtTerm::Not(inner) => format!("(not {})", to_smtlib(inner)),
        SmtTerm::Implies(lhs, rhs) => {
            format!("(=> {} {})", to_smtlib(lhs), to_smtlib(rhs))
        }
        SmtTerm::ForAll(bindings, body) => {
            let vars: Vec<String> = bindings.iter().map(|(n, s)| format!("({n} {s})")).collect();
            format!("(forall ({}) {})", vars.join(" "), to_smtlib(body))
        }
        SmtTerm::Exists(bindings, body) => {
            let vars: Vec<String> = bindings.iter().map(|(n, s)| format!("({n} {s})")).collect();
            format!("(exists ({}) {})", vars.join(" "), to_smtlib(body))
        }
    }
}

/// Print a sort as SMT-LIB2 format.
pub fn sort_to_smtlib(sort: &SmtSort) -> String {
    match sort {
        SmtSort::Bool => "Bool".to_string(),
        SmtSort::Named(name) => name.clone(),
    }
}

/// Print a declaration as an SMT-LIB2 command.
///
/// Enumerations become nullary-constructor datatypes, which gives the same
/// pairwise distinctness and closure as a native enumeration sort.
pub fn declaration_to_smtlib(decl: &Declaration) -> String {
    match decl {
        Declaration::Sort { name } => format!("(declare-sort {name} 0)"),
        Declaration::EnumSort { name, members } => {
            let ctors: Vec<String> = members.iter().map(|m| format!("({m})")).collect();
            format!("(declare-datatypes (({name} 0)) (({})))", ctors.join(" "))
        }
        Declaration::Fun {
            name,
            domain,
            range,
        } => {
            let args: Vec<String> = domain.iter().map(sort_to_smtlib).collect();
            format!(
                "(declare-fun {name} ({}) {})",
                args.join(" "),
                sort_to_smtlib(range)
            )
        }
    }
}
