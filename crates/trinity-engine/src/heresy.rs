//! Heretical claims, each added on top of the axioms to show it contradicts
//! them.

use serde::Serialize;
use trinity_smt::solver::SmtSolver;

use crate::error::EngineError;
use crate::report::Expectation;
use crate::session::Session;
use crate::vocabulary::Person;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Heresy {
    /// The Persons are modes of one subject: Father = Son.
    Modalism,
    /// Three gods: a second essence `E2` distinct from `E`.
    Tritheism,
    /// The Son lacks an attribute the essence has.
    Subordinationism,
}

impl Heresy {
    pub const ALL: [Heresy; 3] = [
        Heresy::Modalism,
        Heresy::Tritheism,
        Heresy::Subordinationism,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Heresy::Modalism => "modalism",
            Heresy::Tritheism => "tritheism",
            Heresy::Subordinationism => "subordinationism",
        }
    }

    /// Inverse of [`Heresy::name`].
    pub fn from_name(name: &str) -> Option<Heresy> {
        Heresy::ALL.into_iter().find(|h| h.name() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            Heresy::Modalism => "Modalism forced (Father = Son)",
            Heresy::Tritheism => "Tritheism forced (Second essence E2 != E)",
            Heresy::Subordinationism => {
                "Subordinationism forced (Son lacks an essential attribute)"
            }
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Heresy::Modalism => "forces two Persons to be identical",
            Heresy::Tritheism => "introduces a second essence distinct from E",
            Heresy::Subordinationism => "denies the Son an attribute of the essence",
        }
    }

    pub fn expected(self) -> Expectation {
        Expectation::Contradiction
    }

    /// Add this heresy's symbols and claims to `session`.
    pub fn apply<S: SmtSolver>(self, session: &mut Session<S>) -> Result<(), EngineError> {
        let vocab = session.vocabulary().clone();
        match self {
            Heresy::Modalism => {
                let claim = vocab.person(Person::Father).eq(vocab.person(Person::Son));
                session.assert_extra(self.name(), claim)
            }
            Heresy::Tritheism => {
                session.declare(vocab.second_essence_declaration())?;
                let claim = vocab.second_essence().neq(vocab.essence());
                session.assert_extra(self.name(), claim)
            }
            Heresy::Subordinationism => {
                session.declare(vocab.omnipotence_declaration())?;
                let essence_has = vocab.has(vocab.essence(), vocab.omnipotence());
                let son_lacks = vocab.has_p(vocab.person(Person::Son), vocab.omnipotence()).not();
                session.assert_extra("subordinationism.essence", essence_has)?;
                session.assert_extra("subordinationism.son", son_lacks)
            }
        }
    }
}

impl std::fmt::Display for Heresy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
