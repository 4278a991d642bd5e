//! Defines the `GeneticModel`: the fixed conditional probability tables of the inheritance network.
//!
//! Every person has two variables. `genes` takes values in `{0, 1, 2}` and `trait` is boolean. The
//! CPD of `trait` depends only on the same person's `genes`. The CPD of `genes` is the founder prior
//! for a person without parents, and otherwise is determined by the parents' `genes` through the
//! transmission table, which accounts for mutation.

use crate::util::{HeredityError, Result};

use ndarray::prelude as nd;

/// Number of values a gene count can take: `{0, 1, 2}`
pub const GENE_COUNTS: usize = 3;

/// Unconditional gene-count distribution for people without parents, indexed by gene count
pub const DEFAULT_PRIOR: [f64; GENE_COUNTS] = [0.96, 0.03, 0.01];

/// `P(trait = true | genes)`, indexed by gene count
pub const DEFAULT_TRAIT: [f64; GENE_COUNTS] = [0.01, 0.56, 0.65];

/// Probability that a transmitted allele flips
pub const DEFAULT_MUTATION: f64 = 0.01;

/// Tolerance used when checking that a distribution sums to one
const SUM_TOLERANCE: f64 = 1e-9;


/// The probability tables of the inheritance network.
///
/// A `GeneticModel` is immutable once built. Every lookup is a pure function of its arguments, so
/// alternate models can be substituted freely.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneticModel {

    /// `P(genes)` for founders. Shape `[3]`.
    prior: nd::Array1<f64>,

    /// `P(trait | genes)`, indexed `[genes, trait as usize]`. Shape `[3, 2]`.
    expression: nd::Array2<f64>,

    /// `P(parent passes `passed` copies | parent genes)`, indexed `[genes, passed]`. Shape `[3, 2]`.
    transmission: nd::Array2<f64>,

    mutation: f64

}

impl GeneticModel {

    /// Create a new `GeneticModel`.
    ///
    /// # Args
    /// * `prior`: `P(genes = g)` for a person without parents, indexed by `g`
    /// * `trait_given_genes`: `P(trait = true | genes = g)`, indexed by `g`
    /// * `mutation`: the probability that a transmitted allele flips
    ///
    /// # Errors
    /// * `HeredityError::InvalidModel` if any value is outside `[0, 1]`, or `prior` does not sum
    ///   to one
    pub fn new(
        prior: [f64; GENE_COUNTS],
        trait_given_genes: [f64; GENE_COUNTS],
        mutation: f64
    ) -> Result<Self> {
        let values = prior.iter().chain(trait_given_genes.iter()).chain(Some(&mutation));
        if let Some(p) = values.cloned().find(|p| !is_probability(*p)) {
            return Err(HeredityError::InvalidModel(format!("{} is not a probability", p)));
        }

        let total: f64 = prior.iter().sum();
        if (total - 1.0).abs() > SUM_TOLERANCE {
            return Err(HeredityError::InvalidModel(format!("gene prior sums to {}, not 1", total)));
        }

        Ok(GeneticModel::build(prior, trait_given_genes, mutation))
    }

    fn build(prior: [f64; GENE_COUNTS], trait_given_genes: [f64; GENE_COUNTS], mutation: f64) -> Self {
        let expression = nd::Array2::from_shape_fn((GENE_COUNTS, 2), |(g, t)| {
            if t == 1 { trait_given_genes[g] } else { 1.0 - trait_given_genes[g] }
        });

        // Each of the parent's two copies is chosen with equal chance, so the chosen allele is the
        // gene with probability g / 2. It then flips with probability `mutation`.
        let transmission = nd::Array2::from_shape_fn((GENE_COUNTS, 2), |(g, passed)| {
            let carried = g as f64 / 2.0;
            let gene = carried * (1.0 - mutation) + (1.0 - carried) * mutation;
            if passed == 1 { gene } else { 1.0 - gene }
        });

        GeneticModel {
            prior: nd::Array1::from(prior.to_vec()),
            expression,
            transmission,
            mutation
        }
    }

    /// The mutation rate of this model
    pub fn mutation(&self) -> f64 {
        self.mutation
    }

    /// `P(genes)` for a person without parents. Zero for a gene count outside `{0, 1, 2}`.
    pub fn founder_prior(&self, genes: usize) -> f64 {
        self.prior.get(genes).cloned().unwrap_or(0.0)
    }

    /// `P(trait = has_trait | genes)`. Zero for a gene count outside `{0, 1, 2}`.
    pub fn trait_probability(&self, genes: usize, has_trait: bool) -> f64 {
        self.expression.get((genes, has_trait as usize)).cloned().unwrap_or(0.0)
    }

    /// The probability that a parent with `parent_genes` copies passes `passed` copies (0 or 1) to
    /// a child. Zero for any other `passed`.
    pub fn transmission_probability(&self, parent_genes: usize, passed: usize) -> f64 {
        self.transmission.get((parent_genes, passed)).cloned().unwrap_or(0.0)
    }

    /// `P(child genes = child_genes | mother genes, father genes)`.
    ///
    /// Sums over the ways to split `child_genes` into one copy count from each parent.
    pub fn child_gene_probability(&self, child_genes: usize, mother_genes: usize, father_genes: usize) -> f64 {
        (0..=1).filter(|&from_mother| from_mother <= child_genes)
               .map(|from_mother| {
                   self.transmission_probability(mother_genes, from_mother)
                       * self.transmission_probability(father_genes, child_genes - from_mother)
               })
               .sum()
    }
}

impl Default for GeneticModel {

    /// The model with `DEFAULT_PRIOR`, `DEFAULT_TRAIT`, and `DEFAULT_MUTATION`
    fn default() -> Self {
        GeneticModel::build(DEFAULT_PRIOR, DEFAULT_TRAIT, DEFAULT_MUTATION)
    }
}

fn is_probability(p: f64) -> bool {
    p.is_finite() && (0.0..=1.0).contains(&p)
}
