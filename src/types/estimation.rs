use crate::error::{ReachError, Result};
use serde::Serialize;

/// Below this confidence an estimate is speculation.
pub const SPECULATION_THRESHOLD: f64 = 0.5;
/// At or above this confidence a measurable estimate is reliable.
pub const RELIABILITY_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReachEstimation {
    is_measurable: bool,
    minimum_impact: u64,
    maximum_impact: u64,
    confidence: f64,
    reasoning: String,
}

impl ReachEstimation {
    pub fn new(
        is_measurable: bool,
        minimum_impact: u64,
        maximum_impact: u64,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Result<Self> {
        if minimum_impact > maximum_impact {
            return Err(ReachError::InvalidEstimation(format!(
                "minimum impact {minimum_impact} exceeds maximum impact {maximum_impact}"
            )));
        }
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(ReachError::InvalidEstimation(format!(
                "confidence must be between 0.0 and 1.0 (found {confidence})"
            )));
        }

        Ok(Self {
            is_measurable,
            minimum_impact,
            maximum_impact,
            confidence,
            reasoning: reasoning.into(),
        })
    }

    pub fn is_measurable(&self) -> bool {
        self.is_measurable
    }

    pub fn minimum_impact(&self) -> u64 {
        self.minimum_impact
    }

    pub fn maximum_impact(&self) -> u64 {
        self.maximum_impact
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn is_speculation(&self) -> bool {
        !self.is_measurable || self.confidence < SPECULATION_THRESHOLD
    }

    pub fn is_reliable(&self) -> bool {
        self.is_measurable && self.confidence >= RELIABILITY_THRESHOLD
    }
}
