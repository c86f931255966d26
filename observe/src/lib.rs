//! A diagnostic `clingo::Propagator` that reports the solver's decision
//! stack and its entailments as they happen, purely for observation.

mod observer;

pub use observer::{DecisionEvent, DecisionObserver, DecisionSink};
