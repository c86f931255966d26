//! Locates the concrete integrity constraints responsible for a program's
//! unsatisfiability: tag every constraint, ask the solver for a
//! minimum-cardinality set of tags that must fire, and map the witness back
//! to source locations.

mod locator;

pub use locator::UnsatConstraintLocator;
