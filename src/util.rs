//! Defines the `Error` type for the heredity library

use std::io;
use std::result;

use itertools::Itertools;
use thiserror::Error;

pub type Result<T> = result::Result<T, HeredityError>;

#[derive(Debug, Error)]
pub enum HeredityError {

    /// The pedigree violates a structural constraint and cannot be used for inference
    #[error("malformed pedigree: {0}")]
    MalformedPedigree(#[from] MalformedPedigree),

    /// A per-person distribution summed to zero after accumulation, so it cannot be normalized
    #[error("degenerate evidence: the {distribution} distribution of '{person}' has zero mass")]
    DegenerateEvidence {
        person: String,
        distribution: &'static str
    },

    /// Represents an incomplete assignment where a complete assignment was required
    #[error("assignment covers {got} people but the pedigree has {expected}")]
    IncompleteAssignment {
        expected: usize,
        got: usize
    },

    /// A gene count outside `{0, 1, 2}`
    #[error("gene count {0} is not one of 0, 1, 2")]
    InvalidGeneCount(usize),

    /// The probability tables of a `GeneticModel` are not valid distributions
    #[error("invalid genetic model: {0}")]
    InvalidModel(String),

    /// Enumeration indexes people with 64-bit subset masks
    #[error("pedigree has {count} people, exact enumeration supports at most {max}")]
    TooManyPeople {
        count: usize,
        max: usize
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error)
}


/// Structural problems in pedigree input, detected before any enumeration starts.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MalformedPedigree {

    /// The same identifier was given to more than one person
    #[error("person '{0}' appears more than once")]
    DuplicatePerson(String),

    /// Exactly one of mother/father was specified
    #[error("person '{0}' has exactly one parent; both or neither are required")]
    SingleParent(String),

    /// A parent identifier does not name a person in the pedigree
    #[error("person '{person}' names unknown parent '{parent}'")]
    UnknownParent {
        person: String,
        parent: String
    },

    /// A person is their own ancestor. Holds the identifiers along the cycle.
    #[error("ancestor cycle: {}", .0.iter().join(" -> "))]
    AncestorCycle(Vec<String>)
}
