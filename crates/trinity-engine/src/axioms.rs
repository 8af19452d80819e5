//! The Nicene axiom set.

use serde::Serialize;
use trinity_smt::terms::SmtTerm;

use crate::vocabulary::{Person, Vocabulary};

/// Identifier of one axiom group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AxiomId {
    /// (U1) Every essence is `E`.
    UniqueEssence,
    /// (C1) Each Person shares the essence `E`.
    Consubstantiality,
    /// (A1) Whatever the essence has, every Person has.
    AttributeSharing,
    /// (R1) Relations of origin, without the Filioque.
    RelationsOfOrigin,
    /// (W1) All Persons have the one will of the essence.
    UnityOfWill,
    /// (D1) The Persons are pairwise distinct.
    DistinctPersons,
}

impl AxiomId {
    pub const ALL: [AxiomId; 6] = [
        AxiomId::UniqueEssence,
        AxiomId::Consubstantiality,
        AxiomId::AttributeSharing,
        AxiomId::RelationsOfOrigin,
        AxiomId::UnityOfWill,
        AxiomId::DistinctPersons,
    ];

    pub fn code(self) -> &'static str {
        match self {
            AxiomId::UniqueEssence => "U1",
            AxiomId::Consubstantiality => "C1",
            AxiomId::AttributeSharing => "A1",
            AxiomId::RelationsOfOrigin => "R1",
            AxiomId::UnityOfWill => "W1",
            AxiomId::DistinctPersons => "D1",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AxiomId::UniqueEssence => "unique essence: all essences are E",
            AxiomId::Consubstantiality => {
                "consubstantiality: each Person shares the one essence E"
            }
            AxiomId::AttributeSharing => {
                "attribute sharing: if the essence has an attribute, each Person has it"
            }
            AxiomId::RelationsOfOrigin => {
                "relations of origin: Father begets Son, Spirit proceeds from Father"
            }
            AxiomId::UnityOfWill => "unity of will: all Persons have the same will",
            AxiomId::DistinctPersons => "distinct Persons",
        }
    }
}

/// Code and description of an axiom group, as listed in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AxiomSummary {
    pub code: &'static str,
    pub description: &'static str,
}

impl From<AxiomId> for AxiomSummary {
    fn from(id: AxiomId) -> Self {
        AxiomSummary {
            code: id.code(),
            description: id.description(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axiom {
    pub id: AxiomId,
    pub term: SmtTerm,
}

/// The full axiom set over `vocab`, one entry per group.
pub fn nicene_axioms(vocab: &Vocabulary) -> Vec<Axiom> {
    AxiomId::ALL
        .iter()
        .map(|&id| Axiom {
            id,
            term: axiom_term(vocab, id),
        })
        .collect()
}

pub fn axiom_term(vocab: &Vocabulary, id: AxiomId) -> SmtTerm {
    let father = vocab.person(Person::Father);
    let son = vocab.person(Person::Son);
    let spirit = vocab.person(Person::Spirit);
    match id {
        AxiomId::UniqueEssence => SmtTerm::forall(
            vec![("x", vocab.essence_sort())],
            SmtTerm::var("x").eq(vocab.essence()),
        ),
        AxiomId::Consubstantiality => SmtTerm::and(
            Person::ALL
                .iter()
                .map(|&p| vocab.shares(vocab.person(p), vocab.essence()))
                .collect(),
        ),
        AxiomId::AttributeSharing => SmtTerm::forall(
            vec![("p", vocab.person_sort()), ("a", vocab.attribute_sort())],
            vocab
                .has(vocab.essence(), SmtTerm::var("a"))
                .implies(vocab.has_p(SmtTerm::var("p"), SmtTerm::var("a"))),
        ),
        AxiomId::RelationsOfOrigin => SmtTerm::and(vec![
            vocab.begets(father.clone(), son.clone()),
            vocab.begets(son, father.clone()).not(),
            vocab.proceeds(father, spirit),
        ]),
        AxiomId::UnityOfWill => SmtTerm::forall(
            vec![("p", vocab.person_sort())],
            vocab
                .will_of(SmtTerm::var("p"))
                .eq(vocab.will_of_essence()),
        ),
        // Redundant with the enumerated Person sort.
        AxiomId::DistinctPersons => SmtTerm::and(vec![
            father.clone().neq(son.clone()),
            father.neq(spirit.clone()),
            son.neq(spirit),
        ]),
    }
}
