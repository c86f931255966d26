/// Default atom name the constraint tagger writes into a fired constraint's
/// head.
pub const DEFAULT_CONSTRAINT_HEAD: &str = "_constraint";

/// Default atom name the rule-id tagger appends to every rule body.
pub const DEFAULT_RULE_ID_SIGNATURE: &str = "_rule";
