//! Source-to-source rewrites over ground-agnostic ASP program text: tagging
//! every fired constraint, tagging every rule with an assumable id, and
//! deleting optimization statements or facts of a given signature.
//!
//! All rewriters share one statement splitter ([`statement::split_statements`])
//! rather than a full grammar parser: each only needs to recognize rule
//! shape (fact, constraint, directive), and leaves term-level semantics to
//! the solver at grounding time.

pub mod classify;
pub mod constants;
pub mod statement;

mod constraint_tagger;
mod fact;
mod optimization_remover;
mod rule_id;

pub use constraint_tagger::ConstraintTagger;
pub use fact::FactTransformer;
pub use optimization_remover::OptimizationRemover;
pub use rule_id::RuleIdTagger;
pub use statement::Statement;
