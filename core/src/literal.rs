use std::fmt;
use std::ops::Neg;

/// A signed solver literal: positive id means "assume true", negative id
/// means "assume false".
///
/// Hashing and set membership are by the raw signed integer, matching the
/// solver's own literal numbering after grounding.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal(i32);

impl Literal {
    pub fn new(id: i32) -> Self {
        debug_assert_ne!(id, 0, "literal id 0 is not a valid clingo literal");
        Literal(id)
    }

    pub fn from_clingo(lit: clingo::Literal) -> Self {
        Literal(lit.get())
    }

    pub fn as_clingo(&self) -> clingo::Literal {
        clingo::Literal::from(self.0)
    }

    pub fn get(&self) -> i32 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn variable(&self) -> i32 {
        self.0.abs()
    }
}

impl Neg for Literal {
    type Output = Literal;

    fn neg(self) -> Literal {
        Literal(-self.0)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Literal({})", self.0)
    }
}
