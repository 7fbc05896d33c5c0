use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Rejected confidence weight
#[derive(Error, Debug, Clone, PartialEq)]
#[error("confidence must be in [0, 1], got {0}")]
pub struct ConfidenceError(pub f64);

/// Heuristic certainty of a source attribution, always within `[0, 1]`
///
/// The only way to build one is [`Confidence::new`] (or deserializing, which
/// goes through it), so every `Source` carries a valid score.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    pub fn new(value: f64) -> Result<Self, ConfidenceError> {
        // NaN fails the range check
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfidenceError(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Confidence {
    type Error = ConfidenceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
