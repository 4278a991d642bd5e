//! Defines a `Pedigree`, the family tree whose mother/father links form the structure of the
//! inheritance network.
//!
//! Each person contributes two random variables to the network: a gene count in `{0, 1, 2}` and a
//! boolean trait. Some people carry an observed trait value, which acts as evidence during
//! inference.

use crate::assignment::Assignments;
use crate::util::{HeredityError, MalformedPedigree, Result};

use indexmap::IndexMap;

/// Subsets of people are held in 64-bit masks during enumeration.
pub const MAX_PEOPLE: usize = 63;


/// A person as it arrives from an input source, before parent identifiers are resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonRecord {

    /// Identifier of the mother, if recorded
    pub mother: Option<String>,

    /// Identifier of the father, if recorded
    pub father: Option<String>,

    /// The observed trait, or `None` when unknown
    pub observed_trait: Option<bool>

}

impl PersonRecord {

    /// A record with no parents
    pub fn founder(observed_trait: Option<bool>) -> Self {
        PersonRecord { mother: None, father: None, observed_trait }
    }

    /// A record with both parents
    pub fn child(mother: &str, father: &str, observed_trait: Option<bool>) -> Self {
        PersonRecord {
            mother: Some(String::from(mother)),
            father: Some(String::from(father)),
            observed_trait
        }
    }
}


/// A validated member of a `Pedigree`. Parents are held as indices into the owning `Pedigree`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    name: String,
    parents: Option<(usize, usize)>,
    observed_trait: Option<bool>
}

impl Person {

    /// The identifier of this person
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Indices of `(mother, father)`, or `None` for a founder
    pub fn parents(&self) -> Option<(usize, usize)> {
        self.parents
    }

    /// The observed trait, or `None` when unknown
    pub fn observed_trait(&self) -> Option<bool> {
        self.observed_trait
    }

    /// `true` if this person has no recorded parents
    pub fn is_founder(&self) -> bool {
        self.parents.is_none()
    }
}


/// A validated, immutable family tree.
///
/// # Representation
/// People are held in insertion order. A person's position in that order is its index, which is
/// how `Assignment`s, parent links, and accumulated totals refer to it.
///
/// # Invariants
/// * every person has both parents or neither
/// * every parent index refers to a person in the same `Pedigree`
/// * no person is their own ancestor
/// * at most `MAX_PEOPLE` people
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pedigree {
    people: IndexMap<String, Person>
}

impl Pedigree {

    /// Build a `Pedigree` from `(identifier, record)` pairs.
    ///
    /// # Errors
    /// * `HeredityError::MalformedPedigree` if the records violate a structural invariant
    /// * `HeredityError::TooManyPeople` if there are more than `MAX_PEOPLE` records
    pub fn from_records<I, S>(records: I) -> Result<Self>
        where I: IntoIterator<Item = (S, PersonRecord)>,
              S: Into<String>
    {
        records.into_iter()
               .fold(PedigreeBuilder::new(), |builder, (name, record)| builder.with_record(name, record))
               .build()
    }

    /// Number of people in the pedigree
    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// The people of the pedigree, in index order
    pub fn people(&self) -> impl Iterator<Item = &Person> + '_ {
        self.people.values()
    }

    /// Look up a person by identifier
    pub fn person(&self, name: &str) -> Option<&Person> {
        self.people.get(name)
    }

    /// Look up the index of a person by identifier
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.people.get_index_of(name)
    }

    /// Look up the identifier of the person at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn name(&self, index: usize) -> &str {
        &self.people[index].name
    }

    /// Parent indices of the person at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn parents(&self, index: usize) -> Option<(usize, usize)> {
        self.people[index].parents
    }

    /// Observed trait of the person at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn observed_trait(&self, index: usize) -> Option<bool> {
        self.people[index].observed_trait
    }

    /// A fresh enumeration of every `Assignment` consistent with the observed traits. Each call
    /// starts over from the beginning.
    pub fn assignments(&self) -> Assignments {
        Assignments::new(self)
    }

    /// The number of assignments `assignments()` produces: `3^n` gene partitions for each of the
    /// `2^u` trait subsets, where `u` is the number of people with an unobserved trait.
    ///
    /// # Returns
    /// the count, or `None` if it does not fit in a `u64`
    pub fn assignment_count(&self) -> Option<u64> {
        let unobserved = self.people().filter(|p| p.observed_trait.is_none()).count() as u32;
        3u64.checked_pow(self.len() as u32)?
            .checked_mul(1u64.checked_shl(unobserved)?)
    }

    /// Masks of `(people with an observed trait, people observed to have the trait)`
    pub(crate) fn evidence_masks(&self) -> (u64, u64) {
        self.people().enumerate().fold((0, 0), |(observed, present), (i, person)| {
            match person.observed_trait {
                Some(true) => (observed | 1 << i, present | 1 << i),
                Some(false) => (observed | 1 << i, present),
                None => (observed, present)
            }
        })
    }
}


/// An implementation of the [builder pattern] for creating a `Pedigree`.
///
/// People may be added in any order; parent references are resolved and validated by `build`.
/// The first structural error encountered is held and returned from `build`.
///
/// [builder pattern]: https://en.wikipedia.org/wiki/Builder_pattern
#[derive(Debug, Default)]
pub struct PedigreeBuilder {

    /// The unresolved records, in insertion order
    records: IndexMap<String, PersonRecord>,

    /// The error state of the builder
    err: Option<MalformedPedigree>

}

impl PedigreeBuilder {

    /// Construct a new `PedigreeBuilder` representing an empty `Pedigree`
    pub fn new() -> Self {
        PedigreeBuilder { records: IndexMap::new(), err: None }
    }

    /// Add a person with no parents
    pub fn with_founder(self, name: &str, observed_trait: Option<bool>) -> Self {
        self.with_record(name, PersonRecord::founder(observed_trait))
    }

    /// Add a person with both parents
    pub fn with_child(self, name: &str, mother: &str, father: &str, observed_trait: Option<bool>) -> Self {
        self.with_record(name, PersonRecord::child(mother, father, observed_trait))
    }

    /// Add a person exactly as read from an input source, where either parent may be missing.
    pub fn with_person(
        self,
        name: &str,
        mother: Option<&str>,
        father: Option<&str>,
        observed_trait: Option<bool>
    ) -> Self {
        let record = PersonRecord {
            mother: mother.map(String::from),
            father: father.map(String::from),
            observed_trait
        };
        self.with_record(name, record)
    }

    /// Add a person from a `PersonRecord`
    pub fn with_record<S: Into<String>>(mut self, name: S, record: PersonRecord) -> Self {
        if self.err.is_some() {
            return self;
        }

        let name = name.into();
        if self.records.contains_key(&name) {
            self.err = Some(MalformedPedigree::DuplicatePerson(name));
        } else {
            self.records.insert(name, record);
        }

        self
    }

    /// Complete building the pedigree.
    ///
    /// # Returns
    /// the validated `Pedigree`, or the first error found
    ///
    /// # Errors
    /// * `MalformedPedigree::DuplicatePerson` if an identifier was added twice
    /// * `MalformedPedigree::SingleParent` if a person has exactly one parent
    /// * `MalformedPedigree::UnknownParent` if a parent is not in the pedigree
    /// * `MalformedPedigree::AncestorCycle` if a person is their own ancestor
    /// * `HeredityError::TooManyPeople` if there are more than `MAX_PEOPLE` people
    pub fn build(self) -> Result<Pedigree> {
        if let Some(e) = self.err {
            return Err(e.into());
        }

        if self.records.len() > MAX_PEOPLE {
            return Err(HeredityError::TooManyPeople { count: self.records.len(), max: MAX_PEOPLE });
        }

        ///////////////////////////////////////////////////////////////////////
        // 1) Resolve parent identifiers to indices
        let mut parents = Vec::with_capacity(self.records.len());
        for (name, record) in self.records.iter() {
            let resolved = match (&record.mother, &record.father) {
                (None, None) => None,
                (Some(mother), Some(father)) => {
                    Some((self.resolve(name, mother)?, self.resolve(name, father)?))
                },
                _ => return Err(MalformedPedigree::SingleParent(name.clone()).into())
            };
            parents.push(resolved);
        }

        ///////////////////////////////////////////////////////////////////////
        // 2) Reject ancestor cycles
        if let Some(cycle) = find_cycle(&parents) {
            let names = cycle.into_iter()
                             .filter_map(|i| self.records.get_index(i).map(|(n, _)| n.clone()))
                             .collect();
            return Err(MalformedPedigree::AncestorCycle(names).into());
        }

        ///////////////////////////////////////////////////////////////////////
        // 3) Assemble
        let people = self.records
                         .into_iter()
                         .zip(parents)
                         .map(|((name, record), parents)| {
                             let person = Person {
                                 name: name.clone(),
                                 parents,
                                 observed_trait: record.observed_trait
                             };
                             (name, person)
                         })
                         .collect();

        Ok(Pedigree { people })
    }

    fn resolve(&self, person: &str, parent: &str) -> Result<usize> {
        self.records.get_index_of(parent).ok_or_else(|| {
            MalformedPedigree::UnknownParent {
                person: String::from(person),
                parent: String::from(parent)
            }.into()
        })
    }
}


#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done
}

/// Depth-first search along parent links.
///
/// # Returns
/// the indices along the first cycle found, starting and ending with the same person
fn find_cycle(parents: &[Option<(usize, usize)>]) -> Option<Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; parents.len()];
    let mut path = Vec::new();

    (0..parents.len()).find_map(|start| visit(start, parents, &mut marks, &mut path))
}

fn visit(
    node: usize,
    parents: &[Option<(usize, usize)>],
    marks: &mut [Mark],
    path: &mut Vec<usize>
) -> Option<Vec<usize>> {
    match marks[node] {
        Mark::Done => return None,
        Mark::InProgress => {
            // node is on the current path, so the path from node back to itself is a cycle
            let from = path.iter().position(|&p| p == node)?;
            let mut cycle = path[from..].to_vec();
            cycle.push(node);
            return Some(cycle);
        },
        Mark::Unvisited => ()
    }

    marks[node] = Mark::InProgress;
    path.push(node);

    if let Some((mother, father)) = parents[node] {
        for parent in [mother, father] {
            if let Some(cycle) = visit(parent, parents, marks, path) {
                return Some(cycle);
            }
        }
    }

    path.pop();
    marks[node] = Mark::Done;
    None
}
