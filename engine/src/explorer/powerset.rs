use std::collections::{BTreeSet, VecDeque};

use itertools::Itertools;
use muse_core::Literal;

use super::{Exploration, Explorer};

/// Enumerates every subset of a fixed universe of assumption literals in
/// descending-cardinality order, skipping a candidate whenever a recorded
/// SAT set is a superset of it or a recorded MUS is a subset of it.
///
/// Deterministic: for a fixed universe, the enumeration order never
/// depends on anything but the SAT/MUS sets recorded so far.
pub struct PowersetExplorer {
    universe: Vec<Literal>,
    sat_sets: Vec<BTreeSet<Literal>>,
    mus_sets: Vec<BTreeSet<Literal>>,
    remaining: VecDeque<BTreeSet<Literal>>,
}

impl PowersetExplorer {
    pub fn new(universe: impl IntoIterator<Item = Literal>) -> Self {
        let universe: Vec<Literal> = universe.into_iter().collect();
        PowersetExplorer {
            remaining: all_subsets_by_descending_cardinality(&universe),
            universe,
            sat_sets: Vec::new(),
            mus_sets: Vec::new(),
        }
    }

    fn should_skip(&self, candidate: &BTreeSet<Literal>) -> bool {
        !matches!(self.explored(candidate), Exploration::Unknown)
    }
}

fn all_subsets_by_descending_cardinality(universe: &[Literal]) -> VecDeque<BTreeSet<Literal>> {
    let mut subsets = VecDeque::new();
    for k in (0..=universe.len()).rev() {
        for combo in universe.iter().copied().combinations(k) {
            subsets.push_back(combo.into_iter().collect());
        }
    }
    subsets
}

impl Explorer for PowersetExplorer {
    fn next_candidate(&mut self) -> Option<BTreeSet<Literal>> {
        while let Some(candidate) = self.remaining.pop_front() {
            if !self.should_skip(&candidate) {
                return Some(candidate);
            }
        }
        None
    }

    fn add_sat(&mut self, subset: BTreeSet<Literal>) {
        self.sat_sets.push(subset);
    }

    fn add_mus(&mut self, mus: BTreeSet<Literal>) {
        self.mus_sets.push(mus);
    }

    fn explored(&self, subset: &BTreeSet<Literal>) -> Exploration {
        if self.sat_sets.iter().any(|sat| subset.is_subset(sat)) {
            Exploration::Satisfiable
        } else if self.mus_sets.iter().any(|mus| mus.is_subset(subset)) {
            Exploration::Unsatisfiable
        } else {
            Exploration::Unknown
        }
    }

    fn reset(&mut self) {
        self.remaining = all_subsets_by_descending_cardinality(&self.universe);
        self.sat_sets.clear();
        self.mus_sets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(i: i32) -> Literal {
        Literal::new(i)
    }

    #[test]
    fn enumerates_in_descending_cardinality_order() {
        let mut explorer = PowersetExplorer::new([lit(1), lit(2), lit(3)]);
        let mut sizes = Vec::new();
        while let Some(candidate) = explorer.next_candidate() {
            sizes.push(candidate.len());
        }
        assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(sizes.first(), Some(&3));
        assert_eq!(sizes.last(), Some(&0));
    }

    #[test]
    fn recorded_sat_set_skips_its_subsets() {
        let mut explorer = PowersetExplorer::new([lit(1), lit(2)]);
        let full: BTreeSet<Literal> = [lit(1), lit(2)].into_iter().collect();
        explorer.add_sat(full);
        assert!(matches!(
            explorer.explored(&[lit(1)].into_iter().collect()),
            Exploration::Satisfiable
        ));
    }

    #[test]
    fn recorded_mus_skips_its_supersets() {
        let mut explorer = PowersetExplorer::new([lit(1), lit(2)]);
        explorer.add_mus([lit(1)].into_iter().collect());
        let superset: BTreeSet<Literal> = [lit(1), lit(2)].into_iter().collect();
        assert!(matches!(explorer.explored(&superset), Exploration::Unsatisfiable));
    }

    #[test]
    fn exhausted_explorer_yields_no_more_candidates() {
        let mut explorer = PowersetExplorer::new([lit(1)]);
        let mut count = 0;
        while explorer.next_candidate().is_some() {
            count += 1;
        }
        assert_eq!(count, 2); // {1} and {}
        assert_eq!(explorer.next_candidate(), None);
    }

    #[test]
    fn reset_restores_full_enumeration() {
        let mut explorer = PowersetExplorer::new([lit(1)]);
        explorer.add_mus([lit(1)].into_iter().collect());
        explorer.reset();
        let mut count = 0;
        while explorer.next_candidate().is_some() {
            count += 1;
        }
        assert_eq!(count, 2);
    }
}
