use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

use crate::matcher::Matcher;
use crate::parser::Parser;
use muse_core::Error;

/// Process-wide memoization table for `compile`.
static CACHE: Lazy<Mutex<HashMap<String, Arc<Matcher>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Compiles `pattern` into a reusable [`Matcher`], parsing it only once per
/// distinct pattern string for the lifetime of the process.
///
/// Fails with a [`Error::ParseError`] at pattern-parse time on malformed
/// input; a compiled matcher never fails at match time.
pub fn compile(pattern: &str) -> Result<Arc<Matcher>, Error> {
    if let Some(cached) = CACHE.lock().unwrap().get(pattern) {
        return Ok(cached.clone());
    }
    let matcher = Arc::new(Parser::new(pattern)
        .and_then(|p| p.parse())
        .map_err(|message| Error::ParseError {
            location: pattern.to_string(),
            message,
        })?);
    CACHE.lock().unwrap().insert(pattern.to_string(), matcher.clone());
    Ok(matcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_compiles_return_the_same_allocation() {
        let pattern = "cache_test_marker(X, Y)";
        let first = compile(pattern).unwrap();
        let second = compile(pattern).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn malformed_pattern_is_a_parse_error() {
        assert!(matches!(compile("f(").unwrap_err(), Error::ParseError { .. }));
    }
}
