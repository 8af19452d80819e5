/// SMT sorts.
///
/// `Named` sorts refer to a sort introduced earlier through
/// `declare_sort` or `declare_enum_sort`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SmtSort {
    Bool,
    Named(String),
}

impl SmtSort {
    pub fn named(name: impl Into<String>) -> Self {
        SmtSort::Named(name.into())
    }
}

impl std::fmt::Display for SmtSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SmtSort::Bool => write!(f, "Bool"),
            SmtSort::Named(name) => write!(f, "{name}"),
        }
    }
}
