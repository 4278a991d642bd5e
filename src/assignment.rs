//! Definition of the assignment module
//!
//! An `Assignment` gives every person in a `Pedigree` a gene count and a trait value. `Assignments`
//! enumerates every `Assignment` that agrees with the observed traits of a `Pedigree`.

use crate::genetics::GENE_COUNTS;
use crate::pedigree::Pedigree;
use crate::util::{HeredityError, Result};

use std::iter::FusedIterator;

/// A full assignment to both variables of every person in a `Pedigree`, indexed by person index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Assignment {
    genes: Vec<usize>,
    traits: Vec<bool>
}

impl Assignment {

    /// Create an `Assignment` from per-person gene counts and trait values.
    ///
    /// # Errors
    /// * `HeredityError::IncompleteAssignment` if the two vectors differ in length
    /// * `HeredityError::InvalidGeneCount` if a gene count is not in `{0, 1, 2}`
    pub fn new(genes: Vec<usize>, traits: Vec<bool>) -> Result<Self> {
        if genes.len() != traits.len() {
            return Err(HeredityError::IncompleteAssignment { expected: genes.len(), got: traits.len() });
        }

        if let Some(&g) = genes.iter().find(|&&g| g >= GENE_COUNTS) {
            return Err(HeredityError::InvalidGeneCount(g));
        }

        Ok(Assignment { genes, traits })
    }

    /// Number of people covered by this `Assignment`
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The gene count assigned to the person at `person`.
    ///
    /// # Panics
    /// Panics if `person` is out of bounds.
    pub fn genes(&self, person: usize) -> usize {
        self.genes[person]
    }

    /// The trait value assigned to the person at `person`.
    ///
    /// # Panics
    /// Panics if `person` is out of bounds.
    pub fn has_trait(&self, person: usize) -> bool {
        self.traits[person]
    }

    /// `(genes, has_trait)` for each person, in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.genes.iter().cloned().zip(self.traits.iter().cloned())
    }

    /// `true` if this `Assignment` covers exactly the people of `pedigree` and agrees with every
    /// observed trait
    pub fn is_consistent_with(&self, pedigree: &Pedigree) -> bool {
        self.len() == pedigree.len()
            && pedigree.people()
                       .zip(self.traits.iter())
                       .all(|(p, &t)| p.observed_trait().map_or(true, |o| o == t))
    }
}


/// A lazy, finite enumeration of every `Assignment` consistent with a `Pedigree`'s evidence.
///
/// # Order
/// The outermost loop runs over subsets of people who have the trait, skipping any subset that
/// disagrees with an observed trait. For each such subset, every subset of people is chosen to
/// carry two copies of the gene, and then every subset of the remaining people to carry one copy.
/// Everyone else carries none. Each subset loop counts upward through its mask, so the enumeration
/// is deterministic.
///
/// Cloning an `Assignments` before iterating gives an independent restart.
#[derive(Clone, Debug)]
pub struct Assignments {

    /// Number of people
    people: usize,

    /// Mask of every person
    everyone: u64,

    /// People whose trait is free to vary
    unobserved: u64,

    /// People observed to have the trait
    observed_present: u64,

    /// The current subset of people with the trait
    have_trait: u64,

    /// The current subset of people with two copies
    two_genes: u64,

    /// The current subset of people with one copy, disjoint from `two_genes`
    one_gene: u64,

    done: bool
}

impl Assignments {

    /// Start an enumeration over the people of `pedigree`
    pub fn new(pedigree: &Pedigree) -> Self {
        let people = pedigree.len();
        let everyone = if people == 0 { 0 } else { u64::MAX >> (64 - people) };
        let (observed, observed_present) = pedigree.evidence_masks();

        Assignments {
            people,
            everyone,
            unobserved: everyone & !observed,
            observed_present,
            // the smallest consistent subset: only the people observed to have the trait
            have_trait: observed_present,
            two_genes: 0,
            one_gene: 0,
            done: false
        }
    }

    fn current(&self) -> Assignment {
        let genes = (0..self.people).map(|i| {
            let bit = 1u64 << i;
            if self.two_genes & bit != 0 {
                2
            } else if self.one_gene & bit != 0 {
                1
            } else {
                0
            }
        }).collect();

        let traits = (0..self.people).map(|i| self.have_trait & (1u64 << i) != 0).collect();

        Assignment { genes, traits }
    }

    /// Step to the next `(have_trait, two_genes, one_gene)` triple, innermost loop first
    fn advance(&mut self) {
        let remainder = self.everyone & !self.two_genes;
        if let Some(next) = next_subset(self.one_gene, remainder) {
            self.one_gene = next;
            return;
        }
        self.one_gene = 0;

        if let Some(next) = next_subset(self.two_genes, self.everyone) {
            self.two_genes = next;
            return;
        }
        self.two_genes = 0;

        // only the unobserved people vary; observed people keep their observed value
        let free = self.have_trait & self.unobserved;
        match next_subset(free, self.unobserved) {
            Some(next) => self.have_trait = next | self.observed_present,
            None => self.done = true
        }
    }
}

/// The next subset of `universe` after `subset` in increasing mask order, or `None` once `subset`
/// is `universe` itself
fn next_subset(subset: u64, universe: u64) -> Option<u64> {
    if subset == universe {
        None
    } else {
        // setting every bit outside the universe makes the carry skip over them
        Some(((subset | !universe) + 1) & universe)
    }
}

impl Iterator for Assignments {

    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        if self.done {
            return None;
        }

        let assignment = self.current();
        self.advance();
        Some(assignment)
    }
}

impl FusedIterator for Assignments {}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::pedigree::PedigreeBuilder;

    use itertools::iproduct;
    use std::collections::HashSet;

    fn family() -> Pedigree {
        PedigreeBuilder::new()
            .with_child("Harry", "Lily", "James", None)
            .with_founder("James", Some(true))
            .with_founder("Lily", Some(false))
            .build()
            .expect("unexpected error")
    }

    #[test]
    fn next_subset_counts_within_universe() {
        let universe = 0b1010;
        let mut seen = vec![0];
        let mut s = 0;
        while let Some(n) = next_subset(s, universe) {
            seen.push(n);
            s = n;
        }

        assert_eq!(vec![0b0000, 0b0010, 0b1000, 0b1010], seen);
    }

    #[test]
    fn empty_pedigree_has_one_assignment() {
        let all: Vec<Assignment> = Pedigree::default().assignments().collect();

        assert_eq!(1, all.len());
        assert!(all[0].is_empty());
    }

    #[test]
    fn single_unobserved_person() {
        let pedigree = PedigreeBuilder::new().with_founder("A", None).build().expect("unexpected error");
        let all: HashSet<(usize, bool)> = pedigree.assignments()
                                                  .map(|a| (a.genes(0), a.has_trait(0)))
                                                  .collect();

        let expected: HashSet<(usize, bool)> = iproduct!(0..3, vec![false, true]).collect();
        assert_eq!(expected, all);
    }

    #[test]
    fn every_consistent_assignment_exactly_once() {
        let pedigree = family();
        let all: Vec<Assignment> = pedigree.assignments().collect();
        let unique: HashSet<&Assignment> = all.iter().collect();

        assert_eq!(Some(all.len() as u64), pedigree.assignment_count());
        assert_eq!(all.len(), unique.len());
        assert!(all.iter().all(|a| a.is_consistent_with(&pedigree)));

        // every gene combination with both trait values for Harry
        for (h, j, l, t) in iproduct!(0..3, 0..3, 0..3, vec![false, true]) {
            let a = Assignment::new(vec![h, j, l], vec![t, true, false]).expect("unexpected error");
            assert!(unique.contains(&a), "missing {:?}", a);
        }
    }

    #[test]
    fn fully_observed_pedigree_varies_only_genes() {
        let pedigree = PedigreeBuilder::new()
            .with_founder("A", Some(true))
            .with_founder("B", Some(false))
            .build()
            .expect("unexpected error");

        let all: Vec<Assignment> = pedigree.assignments().collect();
        assert_eq!(9, all.len());
        assert!(all.iter().all(|a| a.has_trait(0) && !a.has_trait(1)));
    }

    #[test]
    fn restartable() {
        let pedigree = family();
        let first: Vec<Assignment> = pedigree.assignments().collect();
        let second: Vec<Assignment> = pedigree.assignments().collect();
        assert_eq!(first, second);

        let mut it = pedigree.assignments();
        it.next();
        let restart = it.clone();
        assert_eq!(it.count(), restart.count());
    }

    #[test]
    fn fused() {
        let pedigree = PedigreeBuilder::new().with_founder("A", Some(true)).build().expect("unexpected error");
        let mut it = pedigree.assignments();
        assert_eq!(3, it.by_ref().count());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn new_rejects_bad_input() {
        match Assignment::new(vec![0, 1], vec![true]) {
            Err(HeredityError::IncompleteAssignment { expected: 2, got: 1 }) => (),
            _ => panic!("wrong result for mismatched lengths")
        }

        match Assignment::new(vec![3], vec![true]) {
            Err(HeredityError::InvalidGeneCount(3)) => (),
            _ => panic!("wrong result for an invalid gene count")
        }
    }
}
