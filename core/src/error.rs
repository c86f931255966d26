use thiserror::Error;

/// Shared error taxonomy for every crate in the workspace.
///
/// `ParseError`, `Unprocessed`, `NotGrounded`, `LocatorUninitialised` and
/// `SolverError` are meant to surface to the caller. `EmptyAssumptionSet` and
/// `Timeout` are recovered locally by the component that would otherwise
/// raise them (a warning is logged and a well-defined partial result is
/// returned instead) but are kept as variants so call sites that *do* want to
/// observe the condition (e.g. tests) can match on it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error at {location}: {message}")]
    ParseError { location: String, message: String },

    #[error("assumptions() or constants() called before process()")]
    Unprocessed,

    #[error("assumptions queried on a solver handle that has not been grounded")]
    NotGrounded,

    #[error("MUS requested over an empty assumption set")]
    EmptyAssumptionSet,

    #[error("external solver error: {0}")]
    SolverError(String),

    #[error("deadline of {0:?} exceeded")]
    Timeout(std::time::Duration),

    #[error("get_unsat_constraints called before parse_string/parse_files")]
    LocatorUninitialised,
}

impl From<clingo::ClingoError> for Error {
    fn from(e: clingo::ClingoError) -> Self {
        Error::SolverError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
