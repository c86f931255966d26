//! Shared data model and error taxonomy for the ASP unsat-explanation
//! toolkit.
//!
//! Every other crate in the workspace builds on the types here instead of
//! talking to `clingo` directly, so that the MUS-search algorithms in
//! `muse-engine` and the rewriting logic in `muse-preprocess`/`muse-rewrite`
//! stay solver-agnostic at the type level even though, today, `clingo` is
//! the only backend.

mod assumption;
mod constraint;
mod decision;
mod error;
mod literal;
mod literal_map;
mod location;
mod symbol;
mod unsat_subset;

pub use assumption::Assumption;
pub use constraint::ConstraintRecord;
pub use decision::{DecisionBatch, DecisionRecord};
pub use error::{Error, Result};
pub use literal::Literal;
pub use literal_map::LiteralSymbolMap;
pub use location::SourceLocation;
pub use symbol::Symbol;
pub use unsat_subset::UnsatisfiableSubset;
