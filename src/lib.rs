//! Exact inference of gene-count and trait distributions over a family pedigree.
//!
//! Each person carries 0, 1, or 2 copies of a gene, and may or may not express a trait whose
//! probability depends on that count. Given the traits observed for some people, an
//! `EnumerationEngine` computes every person's marginal distribution over both variables.

pub mod assignment;
pub mod config;
pub mod genetics;
pub mod inference;
pub mod loader;
pub mod marginal;
pub mod pedigree;
pub mod report;
pub mod util;

pub use assignment::{Assignment, Assignments};
pub use config::ModelConfig;
pub use genetics::GeneticModel;
pub use inference::{joint_probability, EnumerationEngine, MarginalInferenceEngine};
pub use loader::{load_pedigree, read_pedigree};
pub use marginal::{Accumulator, Marginal, Marginals};
pub use pedigree::{Pedigree, PedigreeBuilder, Person, PersonRecord};
pub use report::write_report;
pub use util::{HeredityError, MalformedPedigree, Result};
