use std::collections::HashSet;

use crate::classify::atom_signature;
use crate::statement::split_statements;

/// Deletes facts (bodiless rules) matching a given signature set from a
/// program. An empty signature set removes every fact; otherwise only facts
/// whose head matches one of the given `(name, arity)` pairs are removed.
pub struct FactTransformer {
    signatures: HashSet<(String, usize)>,
}

impl FactTransformer {
    pub fn new(signatures: HashSet<(String, usize)>) -> Self {
        FactTransformer { signatures }
    }

    pub fn remove_all() -> Self {
        FactTransformer::new(HashSet::new())
    }

    pub fn process_string(&self, text: &str) -> String {
        split_statements(text, "<string>")
            .into_iter()
            .filter(|stmt| !self.should_remove(&stmt.text))
            .map(|stmt| stmt.text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn should_remove(&self, statement: &str) -> bool {
        let body = statement.trim().trim_end_matches('.');
        if body.contains(":-") {
            return false;
        }
        let Some(signature) = atom_signature(body) else {
            return false;
        };
        self.signatures.is_empty() || self.signatures.contains(&signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_signature_set_removes_every_fact() {
        let remover = FactTransformer::remove_all();
        let out = remover.process_string("a.\nb(1).\nc :- a.");
        assert_eq!(out, "c :- a.");
    }

    #[test]
    fn non_empty_signature_set_only_removes_matching_facts() {
        let mut signatures = HashSet::new();
        signatures.insert(("a".to_string(), 0));
        let remover = FactTransformer::new(signatures);
        let out = remover.process_string("a.\nb(1).");
        assert_eq!(out, "b(1).");
    }

    #[test]
    fn rules_with_bodies_are_never_removed() {
        let remover = FactTransformer::remove_all();
        let out = remover.process_string("a :- b.");
        assert_eq!(out, "a :- b.");
    }
}
