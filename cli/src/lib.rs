//! Thin CLI wiring over the preprocessing, MUS and locator crates.

pub mod cli;
