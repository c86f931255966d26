use crate::literal::Literal;
use crate::symbol::Symbol;

/// `(literal, polarity, symbol_or_internal)`.
///
/// `symbol` is `None` for internal literals the solver introduced during
/// grounding that do not correspond to any symbolic atom (e.g. auxiliary
/// choice/aggregate literals).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecisionRecord {
    pub literal: Literal,
    pub positive: bool,
    pub symbol: Option<Symbol>,
}

impl DecisionRecord {
    pub fn new(literal: Literal, symbol: Option<Symbol>) -> Self {
        DecisionRecord {
            literal,
            positive: literal.is_positive(),
            symbol,
        }
    }

    /// Whether this decision's symbol matches any of `signatures`; internal
    /// literals (no symbol) match iff `show_internal` is set.
    pub fn matches_any(&self, signatures: &[(String, usize)], show_internal: bool) -> bool {
        match &self.symbol {
            Some(symbol) => signatures
                .iter()
                .any(|(name, arity)| symbol.matches_signature(name, *arity)),
            None => show_internal,
        }
    }
}

impl std::fmt::Display for DecisionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.positive { "+" } else { "-" };
        match &self.symbol {
            Some(s) => write!(f, "[{sign}] {s} [{}]", self.literal.variable()),
            None => write!(f, "[{sign}] INTERNAL [{}]", self.literal.variable()),
        }
    }
}

/// A batch of decisions emitted by the solver-decision observer: a decision
/// literal followed by the literals it entails.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionBatch {
    pub decision: DecisionRecord,
    pub entailed: Vec<DecisionRecord>,
}
