use trinity_smt::terms::SmtTerm;

use crate::vocabulary::{Person, Vocabulary};

/// A creedal proposition and the closed formula that decides it.
#[derive(Debug, Clone, PartialEq)]
pub struct FactQuery {
    pub statement: &'static str,
    pub term: SmtTerm,
}

/// The ten propositions reported for a satisfying model.
pub fn creedal_facts(vocab: &Vocabulary) -> Vec<FactQuery> {
    let father = vocab.person(Person::Father);
    let son = vocab.person(Person::Son);
    let spirit = vocab.person(Person::Spirit);
    let fact = |statement, term| FactQuery { statement, term };

    vec![
        // Consubstantiality
        fact(
            "The Father is God (fully possesses the one divine essence)",
            vocab.shares(father.clone(), vocab.essence()),
        ),
        fact(
            "The Son is God (fully possesses the one divine essence)",
            vocab.shares(son.clone(), vocab.essence()),
        ),
        fact(
            "The Holy Spirit is God (fully possesses the one divine essence)",
            vocab.shares(spirit.clone(), vocab.essence()),
        ),
        // Distinctness
        fact("The Father is not the Son", father.clone().neq(son.clone())),
        fact("The Father is not the Holy Spirit", father.clone().neq(spirit.clone())),
        fact("The Son is not the Holy Spirit", son.clone().neq(spirit.clone())),
        // Relations of origin
        fact("The Father begets the Son", vocab.begets(father.clone(), son.clone())),
        fact(
            "The Holy Spirit proceeds from the Father",
            vocab.proceeds(father.clone(), spirit.clone()),
        ),
        // Unity of will
        fact(
            "The will of the Father is the will of the Son",
            vocab.will_of(father).eq(vocab.will_of(son.clone())),
        ),
        fact(
            "The will of the Son is the will of the Holy Spirit",
            vocab.will_of(son).eq(vocab.will_of(spirit)),
        ),
    ]
}
