use crate::location::SourceLocation;

/// `(constraint_id, source_location)`. `constraint_id`s are dense positive
/// integers assigned in source order by the constraint tagger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintRecord {
    pub constraint_id: u32,
    pub location: SourceLocation,
    /// The constraint's source text, e.g. `:- a, not b.`
    pub text: String,
}

impl ConstraintRecord {
    pub fn new(constraint_id: u32, location: SourceLocation, text: impl Into<String>) -> Self {
        ConstraintRecord {
            constraint_id,
            location,
            text: text.into(),
        }
    }
}
