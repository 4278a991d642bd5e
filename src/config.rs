//! Configuration for the `GeneticModel`
//!
//! A model can be read from TOML:
//!
//! ```toml
//! mutation = 0.01
//! gene = [0.96, 0.03, 0.01]   # P(genes = 0, 1, 2) for people without parents
//! trait = [0.01, 0.56, 0.65]  # P(trait | genes = 0, 1, 2)
//! ```
//!
//! Keys that are left out take the values of the default model.

use crate::genetics::{GeneticModel, DEFAULT_MUTATION, DEFAULT_PRIOR, DEFAULT_TRAIT, GENE_COUNTS};
use crate::util::{HeredityError, Result};

use serde::{Deserialize, Serialize};
use tracing::debug;

use std::fs;
use std::path::Path;

/// The serialized form of a `GeneticModel`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {

    /// `P(genes = g)` for founders, indexed by `g`
    pub gene: [f64; GENE_COUNTS],

    /// `P(trait = true | genes = g)`, indexed by `g`
    #[serde(rename = "trait")]
    pub trait_given_genes: [f64; GENE_COUNTS],

    /// Probability that a transmitted allele flips
    pub mutation: f64

}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            gene: DEFAULT_PRIOR,
            trait_given_genes: DEFAULT_TRAIT,
            mutation: DEFAULT_MUTATION
        }
    }
}

impl TryFrom<ModelConfig> for GeneticModel {

    type Error = HeredityError;

    fn try_from(config: ModelConfig) -> Result<Self> {
        GeneticModel::new(config.gene, config.trait_given_genes, config.mutation)
    }
}

impl GeneticModel {

    /// Parse and validate a `GeneticModel` from TOML text.
    ///
    /// # Errors
    /// * `HeredityError::Config` if the text is not a valid `ModelConfig`
    /// * `HeredityError::InvalidModel` if the tables are not valid distributions
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ModelConfig = toml::from_str(text)?;
        GeneticModel::try_from(config)
    }

    /// Read a `GeneticModel` from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading genetic model");
        let text = fs::read_to_string(path)?;
        GeneticModel::from_toml_str(&text)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_default() {
        let model = GeneticModel::from_toml_str("").expect("unexpected error");
        assert_eq!(GeneticModel::default(), model);
    }

    #[test]
    fn full_config() {
        let text = r#"
            mutation = 0.0
            gene = [0.5, 0.25, 0.25]
            trait = [0.0, 0.5, 1.0]
        "#;

        let model = GeneticModel::from_toml_str(text).expect("unexpected error");
        assert_eq!(0.25, model.founder_prior(2));
        assert_eq!(1.0, model.trait_probability(2, true));
        assert_eq!(0.0, model.mutation());
    }

    #[test]
    fn partial_config() {
        let model = GeneticModel::from_toml_str("mutation = 0.05").expect("unexpected error");
        assert_eq!(0.05, model.mutation());
        assert_eq!(0.96, model.founder_prior(0));
    }

    #[test]
    fn unknown_key() {
        match GeneticModel::from_toml_str("mutaton = 0.05") {
            Err(HeredityError::Config(_)) => (),
            _ => panic!("accepted a misspelled key")
        }
    }

    #[test]
    fn invalid_tables() {
        match GeneticModel::from_toml_str("gene = [0.5, 0.5, 0.5]") {
            Err(HeredityError::InvalidModel(_)) => (),
            _ => panic!("accepted a prior that does not sum to one")
        }
    }

    #[test]
    fn wrong_table_length() {
        assert!(GeneticModel::from_toml_str("trait = [0.1, 0.2]").is_err());
    }

    #[test]
    fn config_round_trip_through_toml() {
        let config = ModelConfig::default();
        let text = toml::to_string(&config).expect("unexpected error");
        let parsed: ModelConfig = toml::from_str(&text).expect("unexpected error");
        assert_eq!(config, parsed);
    }
}
