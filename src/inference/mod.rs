//! Defines the interface to inference engines, and the joint probability of a full `Assignment`
//! on which they are built.

use crate::assignment::Assignment;
use crate::genetics::GeneticModel;
use crate::marginal::Marginals;
use crate::pedigree::Pedigree;
use crate::util::{HeredityError, Result};

mod enumeration;

pub use self::enumeration::EnumerationEngine;


/// A `MarginalInferenceEngine` answers marginal queries ```P(X | E = e)``` for every gene-count and
/// trait variable ```X``` of a `Pedigree`, where the evidence ```e``` is the set of observed traits.
///
/// `MarginalInferenceEngine`s take the `Pedigree` and `GeneticModel` at construction.
pub trait MarginalInferenceEngine {

    /// Infer the gene-count and trait distributions of every person given the evidence
    fn infer(&self) -> Result<Marginals>;

}


/// Determine the probability of a full `Assignment` to a `Pedigree` under a `GeneticModel`.
///
/// Specifically, this computes ```P(zeta)``` by the chain rule, where ```zeta``` is the full
/// assignment: for every person, the probability of their trait given their genes, times the
/// probability of their genes given their parents' genes (or the founder prior). The result is not
/// normalized against any other assignment.
///
/// # Args
/// * `pedigree`: the family tree
/// * `model`: the probability tables
/// * `assignment`: a full `Assignment` to `pedigree`
///
/// # Errors
/// * `HeredityError::IncompleteAssignment` if `assignment` does not cover exactly the people of
///   `pedigree`
pub fn joint_probability(pedigree: &Pedigree, model: &GeneticModel, assignment: &Assignment) -> Result<f64> {
    if assignment.len() != pedigree.len() {
        return Err(HeredityError::IncompleteAssignment { expected: pedigree.len(), got: assignment.len() });
    }

    let p: f64 = pedigree.people()
                    .enumerate()
                    .map(|(i, person)| {
                        let genes = assignment.genes(i);
                        let expression = model.trait_probability(genes, assignment.has_trait(i));

                        // parents' genes are read from the same assignment, so order is irrelevant
                        let inheritance = match person.parents() {
                            None => model.founder_prior(genes),
                            Some((mother, father)) => {
                                model.child_gene_probability(genes, assignment.genes(mother), assignment.genes(father))
                            }
                        };

                        expression * inheritance
                    })
                    .product();

    Ok(p)
}
