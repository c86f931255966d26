use std::collections::HashMap;

use crate::assumption::Assumption;
use crate::error::{Error, Result};
use crate::literal::Literal;
use crate::symbol::Symbol;

/// A `literal ↔ symbol` lookup table, built once per grounded `Control`.
///
/// Valid only while the grounded solver state that produced it is alive;
/// nothing here enforces that lifetime statically, the same way the
/// underlying `clingo::SymbolicAtoms` iterator does not either.
#[derive(Default, Clone)]
pub struct LiteralSymbolMap {
    literal_to_symbol: HashMap<i32, Symbol>,
    symbol_to_literal: HashMap<Symbol, Literal>,
}

impl LiteralSymbolMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: Symbol, literal: Literal) {
        self.literal_to_symbol.insert(literal.variable(), symbol);
        self.symbol_to_literal.insert(symbol, literal);
    }

    pub fn symbol_of(&self, literal: Literal) -> Option<Symbol> {
        self.literal_to_symbol.get(&literal.variable()).copied()
    }

    pub fn literal_of(&self, symbol: Symbol) -> Option<Literal> {
        self.symbol_to_literal.get(&symbol).copied()
    }

    /// Resolves an `Assumption` to its signed literal, honoring polarity.
    pub fn assumption_literal(&self, assumption: Assumption) -> Result<Literal> {
        let base = self
            .symbol_to_literal
            .get(&assumption.symbol)
            .copied()
            .ok_or(Error::NotGrounded)?;
        Ok(assumption.to_literal(base))
    }

    pub fn len(&self) -> usize {
        self.symbol_to_literal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbol_to_literal.is_empty()
    }
}
