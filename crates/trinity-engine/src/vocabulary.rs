//! Sorts, constants and relations of the Trinitarian signature.

use serde::Serialize;
use trinity_smt::decls::Declaration;
use trinity_smt::sorts::SmtSort;
use trinity_smt::terms::SmtTerm;

/// The three divine Persons, members of the enumerated `Person` sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Person {
    Father,
    Son,
    Spirit,
}

impl Person {
    pub const ALL: [Person; 3] = [Person::Father, Person::Son, Person::Spirit];

    /// Name of the enumeration member.
    pub fn symbol(self) -> &'static str {
        match self {
            Person::Father => "Father",
            Person::Son => "Son",
            Person::Spirit => "Spirit",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Person::Father => "the Father",
            Person::Son => "the Son",
            Person::Spirit => "the Holy Spirit",
        }
    }
}

/// Symbol set of a single solver session.
///
/// Built fresh for every session and passed explicitly to everything that
/// constructs terms, so no symbol table outlives the session that declared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    person_sort: String,
    essence_sort: String,
    attribute_sort: String,
    will_sort: String,
    essence: String,
    will_of_essence: String,
    shares: String,
    has: String,
    has_p: String,
    begets: String,
    proceeds: String,
    will_of: String,
    second_essence: String,
    omnipotence: String,
}

impl Vocabulary {
    pub fn nicene() -> Self {
        Self {
            person_sort: "Person".into(),
            essence_sort: "Essence".into(),
            attribute_sort: "Attribute".into(),
            will_sort: "Will".into(),
            essence: "E".into(),
            will_of_essence: "will_of_E".into(),
            shares: "Shares".into(),
            has: "Has".into(),
            has_p: "HasP".into(),
            begets: "Begets".into(),
            proceeds: "Proceeds".into(),
            will_of: "will_of".into(),
            second_essence: "E2".into(),
            omnipotence: "Omnipotence".into(),
        }
    }

    /// Declarations in dependency order: sorts first, then symbols over them.
    ///
    /// Symbols used only by heretical claims are not included; see
    /// [`Vocabulary::second_essence_declaration`] and
    /// [`Vocabulary::omnipotence_declaration`].
    pub fn declarations(&self) -> Vec<Declaration> {
        let person = self.person_sort();
        let essence = self.essence_sort();
        let attribute = self.attribute_sort();
        let members: Vec<&str> = Person::ALL.iter().map(|p| p.symbol()).collect();
        vec![
            Declaration::enum_sort(&self.person_sort, &members),
            Declaration::sort(&self.essence_sort),
            Declaration::sort(&self.attribute_sort),
            Declaration::sort(&self.will_sort),
            Declaration::constant(&self.essence, essence.clone()),
            Declaration::constant(&self.will_of_essence, self.will_sort()),
            Declaration::fun(
                &self.shares,
                vec![person.clone(), essence.clone()],
                SmtSort::Bool,
            ),
            Declaration::fun(&self.has, vec![essence, attribute.clone()], SmtSort::Bool),
            Declaration::fun(&self.has_p, vec![person.clone(), attribute], SmtSort::Bool),
            Declaration::fun(
                &self.begets,
                vec![person.clone(), person.clone()],
                SmtSort::Bool,
            ),
            Declaration::fun(
                &self.proceeds,
                vec![person.clone(), person.clone()],
                SmtSort::Bool,
            ),
            Declaration::fun(&self.will_of, vec![person], self.will_sort()),
        ]
    }

    pub fn person_sort(&self) -> SmtSort {
        SmtSort::named(&self.person_sort)
    }

    pub fn essence_sort(&self) -> SmtSort {
        SmtSort::named(&self.essence_sort)
    }

    pub fn attribute_sort(&self) -> SmtSort {
        SmtSort::named(&self.attribute_sort)
    }

    pub fn will_sort(&self) -> SmtSort {
        SmtSort::named(&self.will_sort)
    }

    pub fn person(&self, person: Person) -> SmtTerm {
        SmtTerm::var(person.symbol())
    }

    /// The one divine essence `E`.
    pub fn essence(&self) -> SmtTerm {
        SmtTerm::var(&self.essence)
    }

    pub fn will_of_essence(&self) -> SmtTerm {
        SmtTerm::var(&self.will_of_essence)
    }

    pub fn shares(&self, person: SmtTerm, essence: SmtTerm) -> SmtTerm {
        SmtTerm::app(&self.shares, vec![person, essence])
    }

    pub fn has(&self, essence: SmtTerm, attribute: SmtTerm) -> SmtTerm {
        SmtTerm::app(&self.has, vec![essence, attribute])
    }

    pub fn has_p(&self, person: SmtTerm, attribute: SmtTerm) -> SmtTerm {
        SmtTerm::app(&self.has_p, vec![person, attribute])
    }

    pub fn begets(&self, parent: SmtTerm, child: SmtTerm) -> SmtTerm {
        SmtTerm::app(&self.begets, vec![parent, child])
    }

    pub fn proceeds(&self, source: SmtTerm, person: SmtTerm) -> SmtTerm {
        SmtTerm::app(&self.proceeds, vec![source, person])
    }

    pub fn will_of(&self, person: SmtTerm) -> SmtTerm {
        SmtTerm::app(&self.will_of, vec![person])
    }

    /// A second essence `E2`, declared only when tritheism is claimed.
    pub fn second_essence(&self) -> SmtTerm {
        SmtTerm::var(&self.second_essence)
    }

    pub fn second_essence_declaration(&self) -> Declaration {
        Declaration::constant(&self.second_essence, self.essence_sort())
    }

    /// An essential attribute, declared only when subordinationism is claimed.
    pub fn omnipotence(&self) -> SmtTerm {
        SmtTerm::var(&self.omnipotence)
    }

    pub fn omnipotence_declaration(&self) -> Declaration {
        Declaration::constant(&self.omnipotence, self.attribute_sort())
    }
}
