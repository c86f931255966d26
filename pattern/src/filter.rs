use std::sync::Arc;

use muse_core::{Error, Symbol};

use crate::cache::compile;
use crate::matcher::Matcher;

/// A user-selected filter over symbolic atoms.
#[derive(Clone)]
pub enum Filter {
    /// Matches atoms with equal name and arity.
    BySignature { name: String, arity: usize },
    /// Matches atoms against a compiled structural pattern.
    ByPattern(Arc<Matcher>),
}

impl Filter {
    pub fn by_signature(name: impl Into<String>, arity: usize) -> Self {
        Filter::BySignature {
            name: name.into(),
            arity,
        }
    }

    /// Compiles `pattern` and wraps it as a `ByPattern` filter.
    pub fn by_pattern(pattern: &str) -> Result<Self, Error> {
        Ok(Filter::ByPattern(compile(pattern)?))
    }

    pub fn matches(&self, symbol: Symbol) -> bool {
        match self {
            Filter::BySignature { name, arity } => symbol.matches_signature(name, *arity),
            Filter::ByPattern(matcher) => matcher.matches(symbol).is_some(),
        }
    }
}

/// Whether any filter in `filters` applies to `symbol` (used by the
/// assumption preprocessor and the solver-decision observer to decide which
/// atoms a configured filter set covers).
pub fn any_matches(filters: &[Filter], symbol: Symbol) -> bool {
    filters.iter().any(|f| f.matches(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_filter_checks_name_and_arity() {
        let filter = Filter::by_signature("foo", 2);
        let matching = Symbol::function("foo", &[Symbol::number(1), Symbol::number(2)], true).unwrap();
        let wrong_arity = Symbol::function("foo", &[Symbol::number(1)], true).unwrap();
        assert!(filter.matches(matching));
        assert!(!filter.matches(wrong_arity));
    }

    #[test]
    fn pattern_filter_delegates_to_matcher() {
        let filter = Filter::by_pattern("foo(X)").unwrap();
        let matching = Symbol::function("foo", &[Symbol::number(1)], true).unwrap();
        let not_matching = Symbol::function("bar", &[Symbol::number(1)], true).unwrap();
        assert!(filter.matches(matching));
        assert!(!filter.matches(not_matching));
    }

    #[test]
    fn any_matches_is_true_if_one_filter_applies() {
        let filters = vec![Filter::by_signature("a", 0), Filter::by_signature("b", 1)];
        let sym = Symbol::function("b", &[Symbol::number(1)], true).unwrap();
        assert!(any_matches(&filters, sym));
        let other = Symbol::function("c", &[], true).unwrap();
        assert!(!any_matches(&filters, other));
    }
}
