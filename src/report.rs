//! Plain text presentation of `Marginals`

use crate::genetics::GENE_COUNTS;
use crate::marginal::Marginals;

use std::io::{self, Write};

/// Write every person's gene and trait distributions to `out`, in pedigree order, to four decimal
/// places. Gene counts are listed from two copies down to none.
pub fn write_report<W: Write>(marginals: &Marginals, mut out: W) -> io::Result<()> {
    for (name, marginal) in marginals.iter() {
        writeln!(out, "{}:", name)?;

        writeln!(out, "  Gene:")?;
        for genes in (0..GENE_COUNTS).rev() {
            writeln!(out, "    {}: {:.4}", genes, marginal.gene_probability(genes))?;
        }

        writeln!(out, "  Trait:")?;
        for &(label, has_trait) in [("True", true), ("False", false)].iter() {
            writeln!(out, "    {}: {:.4}", label, marginal.trait_probability(has_trait))?;
        }
    }

    Ok(())
}
