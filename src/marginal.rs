//! Accumulation of joint probabilities into per-person marginal distributions.
//!
//! An `Accumulator` holds one unnormalized table row per person: three gene-count buckets and two
//! trait buckets. Every evaluated `Assignment` adds its joint probability to one bucket of each
//! row. `normalize` turns the rows into `Marginals`.

use crate::assignment::Assignment;
use crate::genetics::GENE_COUNTS;
use crate::pedigree::Pedigree;
use crate::util::{HeredityError, Result};

use indexmap::IndexMap;
use ndarray::prelude as nd;

/// Unnormalized per-person totals, owned by a single inference run
#[derive(Clone, Debug)]
pub struct Accumulator {

    /// Indexed `[person, genes]`
    genes: nd::Array2<f64>,

    /// Indexed `[person, has_trait as usize]`
    traits: nd::Array2<f64>

}

impl Accumulator {

    /// An all-zero `Accumulator` for `people` people
    pub fn new(people: usize) -> Self {
        Accumulator {
            genes: nd::Array2::zeros((people, GENE_COUNTS)),
            traits: nd::Array2::zeros((people, 2))
        }
    }

    /// Number of people tracked
    pub fn len(&self) -> usize {
        self.genes.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add `probability` to the gene bucket and the trait bucket each person takes in `assignment`.
    ///
    /// # Errors
    /// * `HeredityError::IncompleteAssignment` if `assignment` covers a different number of people
    pub fn accumulate(&mut self, assignment: &Assignment, probability: f64) -> Result<()> {
        if assignment.len() != self.len() {
            return Err(HeredityError::IncompleteAssignment { expected: self.len(), got: assignment.len() });
        }

        for (person, (genes, has_trait)) in assignment.iter().enumerate() {
            self.genes[[person, genes]] += probability;
            self.traits[[person, has_trait as usize]] += probability;
        }

        Ok(())
    }

    /// Sum the totals of another `Accumulator` over the same people into this one
    pub fn merge(&mut self, other: &Accumulator) -> Result<()> {
        if other.len() != self.len() {
            return Err(HeredityError::IncompleteAssignment { expected: self.len(), got: other.len() });
        }

        self.genes += &other.genes;
        self.traits += &other.traits;
        Ok(())
    }

    /// The unnormalized gene total of `person` for `genes` copies
    pub fn gene_total(&self, person: usize, genes: usize) -> f64 {
        self.genes.get((person, genes)).cloned().unwrap_or(0.0)
    }

    /// The unnormalized trait total of `person` for `has_trait`
    pub fn trait_total(&self, person: usize, has_trait: bool) -> f64 {
        self.traits.get((person, has_trait as usize)).cloned().unwrap_or(0.0)
    }

    /// Rescale each person's gene and trait totals to sum to one.
    ///
    /// # Errors
    /// * `HeredityError::IncompleteAssignment` if `pedigree` has a different number of people
    /// * `HeredityError::DegenerateEvidence` if a person's gene or trait totals sum to zero
    pub fn normalize(self, pedigree: &Pedigree) -> Result<Marginals> {
        if pedigree.len() != self.len() {
            return Err(HeredityError::IncompleteAssignment { expected: pedigree.len(), got: self.len() });
        }

        let mut people = IndexMap::with_capacity(self.len());
        for ((person, genes), traits) in pedigree.people()
                                                 .zip(self.genes.outer_iter())
                                                 .zip(self.traits.outer_iter()) {
            let marginal = Marginal {
                genes: rescale(genes, person.name(), "gene")?,
                traits: rescale(traits, person.name(), "trait")?
            };
            people.insert(String::from(person.name()), marginal);
        }

        Ok(Marginals { people })
    }
}

fn rescale(totals: nd::ArrayView1<f64>, person: &str, distribution: &'static str) -> Result<nd::Array1<f64>> {
    let z = totals.sum();
    if z == 0.0 {
        return Err(HeredityError::DegenerateEvidence { person: String::from(person), distribution });
    }

    Ok(&totals / z)
}


/// The normalized gene-count and trait distributions of a single person
#[derive(Clone, Debug, PartialEq)]
pub struct Marginal {
    genes: nd::Array1<f64>,
    traits: nd::Array1<f64>
}

impl Marginal {

    /// `P(genes | evidence)`. Zero for a gene count outside `{0, 1, 2}`.
    pub fn gene_probability(&self, genes: usize) -> f64 {
        self.genes.get(genes).cloned().unwrap_or(0.0)
    }

    /// `P(trait = has_trait | evidence)`
    pub fn trait_probability(&self, has_trait: bool) -> f64 {
        self.traits[has_trait as usize]
    }

    /// The gene-count distribution, indexed by gene count
    pub fn genes(&self) -> nd::ArrayView1<f64> {
        self.genes.view()
    }
}


/// The marginal distributions of every person in a `Pedigree`, in pedigree order.
#[derive(Clone, Debug, PartialEq)]
pub struct Marginals {
    people: IndexMap<String, Marginal>
}

impl Marginals {

    /// Look up the distributions of a person by identifier
    pub fn get(&self, name: &str) -> Option<&Marginal> {
        self.people.get(name)
    }

    /// `(identifier, distributions)` for every person, in pedigree order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Marginal)> + '_ {
        self.people.iter().map(|(name, m)| (name.as_str(), m))
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}
