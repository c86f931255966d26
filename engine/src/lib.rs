//! MUS engine: single-MUS shrink by iterative deletion and multi-MUS
//! enumeration driven by a pluggable [`Explorer`].
//!
//! The shrink loop follows `SubsetSolver::shrink`: probe, and on UNSAT
//! replace the working set with the returned unsat core so later removals
//! never reconsider a literal already excluded by the solver itself.

mod deadline;
mod explorer;
mod mus;
mod solve;

pub use deadline::Deadline;
pub use explorer::{AspOracleExplorer, Exploration, Explorer, PowersetExplorer};
pub use mus::{MusEnumerator, MusEngine};
pub use solve::{GroundedProgram, SolveOutcome};
