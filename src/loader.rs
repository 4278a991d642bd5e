//! Reading a `Pedigree` from CSV.
//!
//! Expected columns (header required): `name`, `mother`, `father`, `trait`. Parents must both be
//! blank or both name people in the file. `trait` is `1` when the person is known to have the
//! trait, `0` when known not to, and blank when unknown.

use crate::pedigree::{Pedigree, PedigreeBuilder};
use crate::util::Result;

use serde::Deserialize;
use tracing::{debug, warn};

use std::fs::File;
use std::io;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Row {
    name: String,
    mother: Option<String>,
    father: Option<String>,
    #[serde(rename = "trait")]
    observed_trait: Option<String>
}

/// Read a pedigree from CSV text.
///
/// # Errors
/// * `HeredityError::Csv` if the input is not CSV with the expected columns
/// * `HeredityError::MalformedPedigree` if the records do not form a valid `Pedigree`
pub fn read_pedigree<R: io::Read>(reader: R) -> Result<Pedigree> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut builder = PedigreeBuilder::new();
    for row in reader.deserialize() {
        let row: Row = row?;
        let observed_trait = parse_trait(&row.name, row.observed_trait.as_deref());

        builder = builder.with_person(
            &row.name,
            non_blank(&row.mother),
            non_blank(&row.father),
            observed_trait
        );
    }

    builder.build()
}

/// Read a pedigree from a CSV file.
pub fn load_pedigree<P: AsRef<Path>>(path: P) -> Result<Pedigree> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading pedigree");
    read_pedigree(File::open(path)?)
}

fn non_blank(cell: &Option<String>) -> Option<&str> {
    cell.as_deref().filter(|s| !s.is_empty())
}

fn parse_trait(person: &str, cell: Option<&str>) -> Option<bool> {
    match cell {
        Some("1") => Some(true),
        Some("0") => Some(false),
        None | Some("") => None,
        Some(other) => {
            warn!(person, value = other, "unrecognised trait value, treating it as unknown");
            None
        }
    }
}
