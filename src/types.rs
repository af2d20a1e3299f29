use serde::{Deserialize, Serialize};
use std::fmt;

/// An observation: one scalar per dimension of the task's observation space.
pub type Obs = Vec<f64>;

/// Decoded form of a condition: one interval predicate per observation dimension.
pub type Phenotype = Vec<Interval>;

/// Opaque identifier for an action in the task's action set.
///
/// The engine never interprets the value, it only compares, hashes and
/// copies it. What `Action(2)` means is the environment's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Action(pub usize);

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bounds of one observation-space dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObsDim {
    pub lower: f64,
    pub upper: f64,
}

impl ObsDim {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Closed interval predicate over a single observation dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// True when `lower <= val <= upper`. Both endpoints are inside.
    pub fn contains(&self, val: f64) -> bool {
        self.lower <= val && val <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}, {:.3}]", self.lower, self.upper)
    }
}
