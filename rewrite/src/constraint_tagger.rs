use std::collections::HashMap;
use std::path::Path;

use muse_core::{ConstraintRecord, Result};

use crate::classify::split_head_body;
use crate::constants::DEFAULT_CONSTRAINT_HEAD;
use crate::statement::split_statements;

/// Rewrites every integrity constraint `:- B.` into `tag :- B.` (or
/// `tag(k) :- B.` when `include_id` is set), assigning a fresh dense id to
/// each one and recording where it came from. Non-constraint statements pass
/// through unchanged.
pub struct ConstraintTagger {
    head_symbol: String,
    include_id: bool,
    next_id: u32,
    records: HashMap<u32, ConstraintRecord>,
}

impl ConstraintTagger {
    pub fn new(head_symbol: impl Into<String>, include_id: bool) -> Self {
        ConstraintTagger {
            head_symbol: head_symbol.into(),
            include_id,
            next_id: 1,
            records: HashMap::new(),
        }
    }

    pub fn with_default_head(include_id: bool) -> Self {
        ConstraintTagger::new(DEFAULT_CONSTRAINT_HEAD, include_id)
    }

    /// The tag atom's name, as written into rewritten constraint heads.
    pub fn head_symbol(&self) -> &str {
        &self.head_symbol
    }

    /// Source location of the constraint assigned id `k`, if any.
    pub fn location_of(&self, constraint_id: u32) -> Option<&ConstraintRecord> {
        self.records.get(&constraint_id)
    }

    pub fn records(&self) -> impl Iterator<Item = &ConstraintRecord> {
        self.records.values()
    }

    pub fn process_string(&mut self, text: &str) -> String {
        self.rewrite(split_statements(text, "<string>"))
    }

    pub fn process_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<String> {
        let mut out = Vec::new();
        for path in paths {
            let text = std::fs::read_to_string(path).map_err(|e| {
                muse_core::Error::ParseError {
                    location: path.as_ref().display().to_string(),
                    message: e.to_string(),
                }
            })?;
            out.extend(split_statements(&text, &path.as_ref().display().to_string()));
        }
        Ok(self.rewrite(out))
    }

    fn rewrite(&mut self, statements: Vec<crate::statement::Statement>) -> String {
        let mut out = Vec::with_capacity(statements.len());
        for stmt in statements {
            match split_head_body(&stmt.text) {
                (None, Some(body)) => {
                    let id = self.next_id;
                    self.next_id += 1;
                    let head = if self.include_id {
                        format!("{}({id})", self.head_symbol)
                    } else {
                        self.head_symbol.clone()
                    };
                    self.records
                        .insert(id, ConstraintRecord::new(id, stmt.location, stmt.text.clone()));
                    if body.trim().is_empty() {
                        out.push(format!("{head}."));
                    } else {
                        out.push(format!("{head} :- {body}."));
                    }
                }
                _ => out.push(stmt.text),
            }
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_a_bare_constraint() {
        let mut tagger = ConstraintTagger::new("fired", false);
        let out = tagger.process_string(":- a, not b.");
        assert_eq!(out, "fired :- a, not b.");
        assert_eq!(tagger.records().count(), 1);
    }

    #[test]
    fn tags_with_id_when_requested() {
        let mut tagger = ConstraintTagger::new("fired", true);
        let out = tagger.process_string(":- a.\n:- b.");
        assert_eq!(out, "fired(1) :- a.\nfired(2) :- b.");
        assert!(tagger.location_of(1).is_some());
        assert!(tagger.location_of(2).is_some());
    }

    #[test]
    fn non_constraint_rules_pass_through() {
        let mut tagger = ConstraintTagger::new("fired", true);
        let out = tagger.process_string("a.\nb :- a.");
        assert_eq!(out, "a.\nb :- a.");
        assert_eq!(tagger.records().count(), 0);
    }

    #[test]
    fn records_track_source_location() {
        let mut tagger = ConstraintTagger::new("fired", true);
        tagger.process_string("a.\n:- a.\n");
        let record = tagger.location_of(1).unwrap();
        assert_eq!(record.location.begin_line, 2);
    }
}
