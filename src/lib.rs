//! Pittsburgh-style genetic algorithm over rule-set policies.
//!
//! An individual is an ordered list of condition-to-action rules plus a
//! default action, which together act as a complete policy for a
//! sequential-decision task. The engine evolves a population of them with
//! niched tournament selection, uniform crossover over flattened rule
//! genomes, and per-rule mutation, scoring candidates through a pluggable
//! fitness boundary.

pub mod config;
pub mod encoding;
pub mod engines;
pub mod error;
pub mod policy;
pub mod types;

pub use error::{Result, RulevoError};
