use std::collections::HashMap;
use std::path::Path;

use env_param::EnvParam;
use muse_core::{Assumption, Error, Result, Symbol};
use muse_pattern::{any_matches, Filter};
use muse_rewrite::classify::{is_directive, split_head_body};
use muse_rewrite::statement::{split_statements, Statement};

use crate::constants::parse_const_directive;
use crate::grounding::ground_fact_instances;

/// Whether `assumptions()`/`constants()` called before `process*` warn and
/// return an empty result instead of raising [`Error::Unprocessed`]. Off by
/// default: a caller that hasn't processed anything is almost always a
/// programmer error worth surfacing, not a condition to paper over.
static WARN_ON_UNPROCESSED: EnvParam<bool> = EnvParam::new("MUSE_WARN_ON_UNPROCESSED", "false");

/// Rewrites facts into assumable choices ahead of assumption-based
/// unsat-core extraction.
///
/// Three configurations, matching the rewrite rule:
///   - `AssumptionPreprocessor::new()`: no filters configured, every fact
///     is converted.
///   - `AssumptionPreprocessor::with_filters(filters)` with a non-empty
///     list: only facts matching some filter are converted.
///   - `AssumptionPreprocessor::with_filters(Vec::new())`: the
///     "convert-nothing" sentinel, an explicitly empty filter list converts
///     nothing, and warns.
pub struct AssumptionPreprocessor {
    filters: Option<Vec<Filter>>,
    processed: bool,
    constants: HashMap<String, String>,
    assumptions: Vec<Assumption>,
}

impl Default for AssumptionPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl AssumptionPreprocessor {
    pub fn new() -> Self {
        AssumptionPreprocessor {
            filters: None,
            processed: false,
            constants: HashMap::new(),
            assumptions: Vec::new(),
        }
    }

    pub fn with_filters(filters: Vec<Filter>) -> Self {
        if filters.is_empty() {
            tracing::warn!(
                "assumption preprocessor configured with an empty filter list; no facts will be converted"
            );
        }
        AssumptionPreprocessor {
            filters: Some(filters),
            processed: false,
            constants: HashMap::new(),
            assumptions: Vec::new(),
        }
    }

    pub fn process(&mut self, program_text: &str) -> Result<String> {
        self.process_statements(split_statements(program_text, "<string>"))
    }

    pub fn process_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<String> {
        let mut statements = Vec::new();
        for path in paths {
            let text = std::fs::read_to_string(path).map_err(|e| Error::ParseError {
                location: path.as_ref().display().to_string(),
                message: e.to_string(),
            })?;
            statements.extend(split_statements(&text, &path.as_ref().display().to_string()));
        }
        self.process_statements(statements)
    }

    /// The `(symbol, true)` assumptions recorded for every fact converted by
    /// the most recent `process`/`process_files` call.
    pub fn assumptions(&self) -> Result<&[Assumption]> {
        if !self.processed {
            if WARN_ON_UNPROCESSED.get() {
                tracing::warn!("{}", Error::Unprocessed);
                return Ok(&self.assumptions);
            }
            return Err(Error::Unprocessed);
        }
        Ok(&self.assumptions)
    }

    /// The `#const name = value` bindings encountered during the most recent
    /// `process`/`process_files` call.
    pub fn constants(&self) -> Result<&HashMap<String, String>> {
        if !self.processed {
            if WARN_ON_UNPROCESSED.get() {
                tracing::warn!("{}", Error::Unprocessed);
                return Ok(&self.constants);
            }
            return Err(Error::Unprocessed);
        }
        Ok(&self.constants)
    }

    fn process_statements(&mut self, statements: Vec<Statement>) -> Result<String> {
        self.constants.clear();
        self.assumptions.clear();
        let mut out = Vec::with_capacity(statements.len());

        for stmt in statements {
            if is_directive(&stmt.text) {
                if let Some((name, value)) = parse_const_directive(&stmt.text) {
                    self.constants.insert(name, value);
                }
                out.push(stmt.text);
                continue;
            }
            if is_already_transformed(&stmt.text) {
                out.push(stmt.text);
                continue;
            }
            match split_head_body(&stmt.text) {
                (Some(_head), None) => {
                    let bindings: Vec<(String, String)> = self
                        .constants
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect();
                    for instance in ground_fact_instances(&stmt.text, &bindings)? {
                        if self.should_convert(instance) {
                            out.push(format!("{{{instance}}}."));
                            self.assumptions.push(Assumption::positive(instance));
                        } else {
                            out.push(format!("{instance}."));
                        }
                    }
                }
                _ => out.push(stmt.text),
            }
        }

        self.processed = true;
        Ok(out.join("\n"))
    }

    fn should_convert(&self, symbol: Symbol) -> bool {
        match &self.filters {
            None => true,
            Some(filters) if filters.is_empty() => false,
            Some(filters) => any_matches(filters, symbol),
        }
    }
}

/// Whether `statement` is already a choice-rule fact (`{h}.`), left alone so
/// re-processing an already-transformed program is a no-op.
fn is_already_transformed(statement: &str) -> bool {
    statement.trim_start().starts_with('{')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_every_fact_when_unconfigured() {
        let mut pre = AssumptionPreprocessor::new();
        let out = pre.process("a.\nb.\nc :- a.").unwrap();
        assert_eq!(out, "{a}.\n{b}.\nc :- a.");
        assert_eq!(pre.assumptions().unwrap().len(), 2);
    }

    #[test]
    fn converts_only_matching_facts_with_signature_filter() {
        let mut pre = AssumptionPreprocessor::with_filters(vec![Filter::by_signature("a", 0)]);
        let out = pre.process("a.\nb.").unwrap();
        assert_eq!(out, "{a}.\nb.");
        assert_eq!(pre.assumptions().unwrap().len(), 1);
    }

    #[test]
    fn empty_filter_list_converts_nothing() {
        let mut pre = AssumptionPreprocessor::with_filters(Vec::new());
        let out = pre.process("a.\nb.").unwrap();
        assert_eq!(out, "a.\nb.");
        assert!(pre.assumptions().unwrap().is_empty());
    }

    #[test]
    fn reprocessing_an_already_transformed_program_is_idempotent() {
        let mut pre = AssumptionPreprocessor::new();
        let once = pre.process("a.").unwrap();
        let twice = pre.process(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn assumptions_before_process_is_an_error() {
        let pre = AssumptionPreprocessor::new();
        assert!(matches!(pre.assumptions(), Err(Error::Unprocessed)));
    }

    #[test]
    fn const_directives_are_recorded() {
        let mut pre = AssumptionPreprocessor::new();
        pre.process("#const n = 5.\na.").unwrap();
        assert_eq!(pre.constants().unwrap().get("n"), Some(&"5".to_string()));
    }

    #[test]
    fn multiple_head_instances_expand_in_sorted_order() {
        let mut pre = AssumptionPreprocessor::new();
        let out = pre.process("num(1..3).").unwrap();
        assert_eq!(out, "{num(1)}.\n{num(2)}.\n{num(3)}.");
    }
}
