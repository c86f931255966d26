//! Rewrites facts into assumable choice rules ahead of assumption-based
//! unsat-core extraction.

pub mod constants;
mod grounding;
mod preprocessor;

pub use preprocessor::AssumptionPreprocessor;
