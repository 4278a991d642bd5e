//! Defines a `MarginalInferenceEngine` that performs exact inference by enumerating every
//! `Assignment` consistent with the evidence.
//!
//! The joint probability of each consistent assignment is added to the buckets it selects for
//! every person. Normalizing those totals divides out ```P(e)``` and leaves the marginals.

use crate::genetics::GeneticModel;
use crate::marginal::{Accumulator, Marginals};
use crate::pedigree::Pedigree;
use super::{joint_probability, MarginalInferenceEngine};
use crate::util::Result;

use tracing::{debug, debug_span, trace};

/// Exact inference by brute-force enumeration. Intended for small pedigrees: the work grows as
/// ```3^n * 2^u``` for ```n``` people of whom ```u``` have an unobserved trait.
pub struct EnumerationEngine<'a> {

    /// The family tree, holding the evidence
    pedigree: &'a Pedigree,

    /// The probability tables
    model: &'a GeneticModel

}

impl<'a> EnumerationEngine<'a> {

    pub fn new(pedigree: &'a Pedigree, model: &'a GeneticModel) -> Self {
        EnumerationEngine { pedigree, model }
    }

}

impl<'a> MarginalInferenceEngine for EnumerationEngine<'a> {

    fn infer(&self) -> Result<Marginals> {
        let span = debug_span!("enumeration", people = self.pedigree.len());
        let _guard = span.enter();

        debug!(assignments = ?self.pedigree.assignment_count(), "starting exact enumeration");

        let mut totals = Accumulator::new(self.pedigree.len());
        // P(e), kept for diagnostics
        let mut evidence = 0.0;
        let mut visited = 0u64;

        for assignment in self.pedigree.assignments() {
            let p = joint_probability(self.pedigree, self.model, &assignment)?;
            trace!(?assignment, p, "evaluated assignment");

            totals.accumulate(&assignment, p)?;
            evidence += p;
            visited += 1;
        }

        debug!(visited, evidence, "enumeration complete");

        totals.normalize(self.pedigree)
    }

}
