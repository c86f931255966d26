use std::collections::BTreeSet;

use muse_core::{Assumption, Error, Literal, Result, UnsatisfiableSubset};
use tracing::warn;

use crate::deadline::Deadline;
use crate::explorer::Explorer;
use crate::solve::{GroundedProgram, SolveOutcome};

/// Computes single and multiple minimal unsatisfiable subsets of a grounded
/// program's assumption set.
///
/// `shrink` follows `SubsetSolver::shrink`: start from the full candidate,
/// try removing each literal in turn, and whenever
/// the probe comes back UNSAT replace the working set with the returned
/// unsat core (which is already a subset of what remains, so the next
/// removal attempt only needs to consider literals still present).
pub struct MusEngine {
    program: GroundedProgram,
}

impl MusEngine {
    pub fn new(program: GroundedProgram) -> Self {
        MusEngine { program }
    }

    pub fn program(&self) -> &GroundedProgram {
        &self.program
    }

    pub fn program_mut(&mut self) -> &mut GroundedProgram {
        &mut self.program
    }

    /// Resolves `assumptions` to their signed literals without running a
    /// solve, for callers that need the literal universe up front (e.g. to
    /// construct an [`crate::explorer::Explorer`]).
    pub fn resolve_assumptions(&self, assumptions: &[Assumption]) -> Result<Vec<Literal>> {
        self.resolve(assumptions)
    }

    fn resolve(&self, assumptions: &[Assumption]) -> Result<Vec<Literal>> {
        assumptions
            .iter()
            .map(|a| self.program.literal_map().assumption_literal(*a))
            .collect()
    }

    /// Shrinks `assumptions` to a single minimal unsatisfiable subset.
    ///
    /// If `assumptions` is already satisfiable, returns an empty,
    /// non-minimal [`UnsatisfiableSubset`]: there is nothing to shrink
    /// because there was no conflict to begin with.
    pub fn shrink(&mut self, assumptions: &[Assumption], deadline: Option<Deadline>) -> Result<UnsatisfiableSubset> {
        if assumptions.is_empty() {
            warn!("{}", Error::EmptyAssumptionSet);
            return Ok(UnsatisfiableSubset::empty());
        }
        let literals = self.resolve(assumptions)?;
        let mut working: BTreeSet<Literal> = literals.iter().copied().collect();

        match self.probe(&working)? {
            SolveOutcome::Sat => return Ok(UnsatisfiableSubset::empty()),
            SolveOutcome::Unsat(core) => working = core,
        }

        for &literal in &literals {
            if !working.contains(&literal) {
                continue;
            }
            if let Some(deadline) = deadline {
                if deadline.is_expired() {
                    warn!("{}", Error::Timeout(deadline.limit_duration()));
                    return Ok(UnsatisfiableSubset::new(working, false));
                }
            }
            working.remove(&literal);
            match self.probe(&working)? {
                SolveOutcome::Unsat(core) => working = core,
                SolveOutcome::Sat => {
                    working.insert(literal);
                }
            }
        }
        Ok(UnsatisfiableSubset::new(working, true))
    }

    fn probe(&mut self, subset: &BTreeSet<Literal>) -> Result<SolveOutcome> {
        let literals: Vec<Literal> = subset.iter().copied().collect();
        self.program.solve_under(&literals)
    }

    /// Starts a streaming enumeration of minimal unsatisfiable subsets,
    /// driven by `explorer`'s candidate proposals.
    pub fn enumerate<'e>(
        &'e mut self,
        assumptions: &[Assumption],
        explorer: &'e mut dyn Explorer,
        max_mus: Option<usize>,
        deadline: Option<Deadline>,
    ) -> Result<MusEnumerator<'e>> {
        let literals = self.resolve(assumptions)?;
        explorer.reset();
        Ok(MusEnumerator {
            engine: self,
            universe: literals,
            explorer,
            max_mus,
            deadline,
            found: 0,
            done: false,
        })
    }
}

/// A streaming iterator over minimal unsatisfiable subsets of a fixed
/// assumption universe.
///
/// Stops when the explorer is exhausted, `max_mus` MUSes have been
/// returned, or `deadline` expires; a deadline expiry ends the stream
/// silently rather than yielding a partial, non-minimal result, since
/// enumeration (unlike a single [`MusEngine::shrink`]) has nothing
/// sensible to return mid-subset.
pub struct MusEnumerator<'e> {
    engine: &'e mut MusEngine,
    universe: Vec<Literal>,
    explorer: &'e mut dyn Explorer,
    max_mus: Option<usize>,
    deadline: Option<Deadline>,
    found: usize,
    done: bool,
}

impl<'e> MusEnumerator<'e> {
    fn restricted_to_universe(&self, subset: &BTreeSet<Literal>) -> BTreeSet<Literal> {
        subset.intersection(&self.universe.iter().copied().collect()).copied().collect()
    }
}

impl<'e> Iterator for MusEnumerator<'e> {
    type Item = Result<UnsatisfiableSubset>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(max) = self.max_mus {
            if self.found >= max {
                self.done = true;
                return None;
            }
        }
        loop {
            if let Some(deadline) = self.deadline {
                if deadline.is_expired() {
                    warn!("{}", Error::Timeout(deadline.limit_duration()));
                    self.done = true;
                    return None;
                }
            }
            let candidate = match self.explorer.next_candidate() {
                Some(candidate) => candidate,
                None => {
                    self.done = true;
                    return None;
                }
            };

            let outcome = match self.engine.probe(&candidate) {
                Ok(outcome) => outcome,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            match outcome {
                SolveOutcome::Sat => {
                    self.explorer.add_sat(candidate);
                    continue;
                }
                SolveOutcome::Unsat(core) => {
                    let mus = match self.engine.shrink_core(core, self.deadline) {
                        Ok(mus) => mus,
                        Err(e) => {
                            self.done = true;
                            return Some(Err(e));
                        }
                    };
                    let restricted = self.restricted_to_universe(mus.literals());
                    self.explorer.add_mus(restricted.clone());
                    self.found += 1;
                    return Some(Ok(UnsatisfiableSubset::new(restricted, mus.minimal)));
                }
            }
        }
    }
}

impl MusEngine {
    /// Shrinks an already-known-unsat candidate, reusing [`shrink`]'s loop
    /// body without re-deriving the initial unsat core from scratch.
    fn shrink_core(&mut self, core: BTreeSet<Literal>, deadline: Option<Deadline>) -> Result<UnsatisfiableSubset> {
        let mut working = core;
        let ordered: Vec<Literal> = working.iter().copied().collect();
        for literal in ordered {
            if !working.contains(&literal) {
                continue;
            }
            if let Some(deadline) = deadline {
                if deadline.is_expired() {
                    warn!("{}", Error::Timeout(deadline.limit_duration()));
                    return Ok(UnsatisfiableSubset::new(working, false));
                }
            }
            working.remove(&literal);
            match self.probe(&working)? {
                SolveOutcome::Unsat(new_core) => working = new_core,
                SolveOutcome::Sat => {
                    working.insert(literal);
                }
            }
        }
        Ok(UnsatisfiableSubset::new(working, true))
    }
}
