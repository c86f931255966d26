use std::collections::BTreeSet;

use crate::assumption::Assumption;
use crate::literal::Literal;

/// A set of assumptions plus a `minimal` flag.
///
/// `minimal = false` iff the engine aborted early (e.g. on timeout); a
/// `minimal = true` subset is irreducible: removing any assumption renders
/// the set satisfiable.
#[derive(Clone, Debug, Default)]
pub struct UnsatisfiableSubset {
    literals: BTreeSet<Literal>,
    pub minimal: bool,
}

impl UnsatisfiableSubset {
    pub fn new(literals: BTreeSet<Literal>, minimal: bool) -> Self {
        UnsatisfiableSubset { literals, minimal }
    }

    pub fn empty() -> Self {
        UnsatisfiableSubset {
            literals: BTreeSet::new(),
            minimal: true,
        }
    }

    pub fn literals(&self) -> &BTreeSet<Literal> {
        &self.literals
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Renders the subset as the assumptions it is made of, given a resolver
    /// from literal back to the `Assumption` it represents.
    pub fn to_assumptions(&self, resolve: impl Fn(Literal) -> Option<Assumption>) -> Vec<Assumption> {
        self.literals.iter().copied().filter_map(resolve).collect()
    }
}
