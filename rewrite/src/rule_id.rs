use muse_core::{Assumption, Symbol};

use crate::classify::is_directive;
use crate::constants::DEFAULT_RULE_ID_SIGNATURE;
use crate::statement::split_statements;

/// Appends a `rule_id_signature(i)` atom to the body of every rule (facts
/// included), and adds a trailing choice rule over all emitted ids so that
/// assuming them true or false never perturbs the program's own models.
pub struct RuleIdTagger {
    signature: String,
    count: u32,
}

impl RuleIdTagger {
    pub fn new(signature: impl Into<String>) -> Self {
        RuleIdTagger {
            signature: signature.into(),
            count: 0,
        }
    }

    pub fn with_default_signature() -> Self {
        RuleIdTagger::new(DEFAULT_RULE_ID_SIGNATURE)
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Number of rules tagged by the most recent `process_string` call.
    pub fn rule_count(&self) -> u32 {
        self.count
    }

    pub fn process_string(&mut self, text: &str) -> String {
        self.count = 0;
        let mut out = Vec::new();
        for stmt in split_statements(text, "<string>") {
            if is_directive(&stmt.text) {
                out.push(stmt.text);
                continue;
            }
            self.count += 1;
            let id = self.count;
            let body_text = stmt.text.trim_end_matches('.').trim();
            let tag = format!("{}({id})", self.signature);
            let rewritten = match body_text.split_once(":-") {
                Some((head, body)) if !body.trim().is_empty() => {
                    format!("{} :- {}, {}.", head.trim(), body.trim(), tag)
                }
                Some((head, _)) => format!("{} :- {}.", head.trim(), tag),
                None => format!("{body_text} :- {tag}."),
            };
            out.push(rewritten);
        }
        if self.count > 0 {
            out.push(format!(
                "{{{}(1..{})}}.  % allow every tagged rule to be assumed",
                self.signature, self.count
            ));
        }
        out.join("\n")
    }

    /// The `(rule_id_signature(i), true)` assumptions for the rules tagged by
    /// the most recent `process_string` call.
    pub fn assumptions(&self) -> muse_core::Result<Vec<Assumption>> {
        (1..=self.count)
            .map(|i| {
                let symbol = Symbol::function(&self.signature, &[Symbol::number(i as i32)], true)?;
                Ok(Assumption::positive(symbol))
            })
            .collect()
    }
}
