use std::fmt;

use crate::error::{Error, Result};

/// An opaque handle to a ground ASP term produced by the external solver.
///
/// Only the solver creates `Symbol`s (through grounding or parsing of
/// ground terms); this type is a thin, `Copy`able wrapper around
/// [`clingo::Symbol`] so the rest of the workspace never has to import
/// `clingo` directly to talk about atoms.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(clingo::Symbol);

impl Symbol {
    pub fn from_clingo(symbol: clingo::Symbol) -> Self {
        Symbol(symbol)
    }

    pub fn as_clingo(&self) -> clingo::Symbol {
        self.0
    }

    pub fn number(n: i32) -> Self {
        Symbol(clingo::Symbol::create_number(n))
    }

    pub fn string(s: &str) -> Result<Self> {
        Ok(Symbol(clingo::Symbol::create_string(s).map_err(Error::from)?))
    }

    pub fn function(name: &str, arguments: &[Symbol], positive: bool) -> Result<Self> {
        let args: Vec<clingo::Symbol> = arguments.iter().map(Symbol::as_clingo).collect();
        Ok(Symbol(
            clingo::Symbol::create_function(name, &args, positive).map_err(Error::from)?,
        ))
    }

    pub fn tuple(arguments: &[Symbol]) -> Result<Self> {
        Symbol::function("", arguments, true)
    }

    /// The function name of the symbol, or an empty string for tuples.
    pub fn name(&self) -> Result<&str> {
        self.0.name().map_err(Error::from)
    }

    /// The number of arguments the symbol carries.
    pub fn arity(&self) -> Result<usize> {
        Ok(self.0.arguments().map_err(Error::from)?.len())
    }

    pub fn arguments(&self) -> Result<Vec<Symbol>> {
        Ok(self
            .0
            .arguments()
            .map_err(Error::from)?
            .into_iter()
            .map(Symbol::from_clingo)
            .collect())
    }

    /// `true` for a positive function symbol, `false` for a classically
    /// negated one (`-p(X)`).
    pub fn is_positive(&self) -> Result<bool> {
        self.0.is_positive().map_err(Error::from)
    }

    /// Whether `name`/`arity` match the given signature.
    pub fn matches_signature(&self, name: &str, arity: usize) -> bool {
        matches!((self.name(), self.arity()), (Ok(n), Ok(a)) if n == name && a == arity)
    }

    pub fn as_number(&self) -> Option<i32> {
        self.0.number().ok()
    }

    pub fn as_string(&self) -> Option<String> {
        self.0.string().ok().map(|s| s.to_string())
    }

    pub fn is_supremum(&self) -> bool {
        self.0.symbol_type() == Ok(clingo::SymbolType::Supremum)
    }

    pub fn is_infimum(&self) -> bool {
        self.0.symbol_type() == Ok(clingo::SymbolType::Infimum)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_string().unwrap_or_default())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({self})")
    }
}
