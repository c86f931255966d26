//! Candidate-subset proposal for multi-MUS enumeration.
//!
//! [`Explorer`] is a trait object so the engine stays the same regardless of
//! which strategy drives it, the same way `MapSolver`/`SubsetSolver` are
//! kept behind a trait in MARCO.

mod asp_oracle;
mod powerset;

use std::collections::BTreeSet;

use muse_core::Literal;

pub use asp_oracle::AspOracleExplorer;
pub use powerset::PowersetExplorer;

/// Cheap oracle answer: whether `subset`'s status is already implied by
/// previously recorded SAT/MUS sets, without a fresh solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exploration {
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

/// Proposes candidate assumption subsets for [`crate::mus::MusEngine`]'s
/// enumeration loop to test.
pub trait Explorer {
    /// The next candidate subset to test, or `None` once exhausted.
    fn next_candidate(&mut self) -> Option<BTreeSet<Literal>>;

    /// Records that `subset` is satisfiable, so is every subset of it.
    fn add_sat(&mut self, subset: BTreeSet<Literal>);

    /// Records that `mus` is a MUS, so no superset of it is minimal.
    fn add_mus(&mut self, mus: BTreeSet<Literal>);

    /// Whether `subset`'s status already follows from recorded SAT/MUS sets.
    ///
    /// Best-effort: an `Unknown` answer never licenses skipping a real
    /// solve, it only means this particular oracle cannot short-circuit it.
    fn explored(&self, subset: &BTreeSet<Literal>) -> Exploration;

    fn reset(&mut self);
}
