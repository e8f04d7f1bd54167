//! The scoring function and its level classifier.
//!
//! `raw = (criticality * Wc + avg_priority * Wp + workload * Ww) * 10`,
//! rounded to the nearest integer and clamped to [0, 100].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RiskLevel;
use crate::common::safe_ratio;
use crate::config::{LevelThresholds, ScoringWeights};
use crate::core::ActiveWorkload;

const SCALE: f64 = 10.0;

/// Integer risk score in [0, 100].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RiskScore(u8);

impl RiskScore {
    pub const ZERO: RiskScore = RiskScore(0);
    pub const MAX: RiskScore = RiskScore(100);

    /// Clamps to 100.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Rounds to the nearest integer and clamps to [0, 100]. NaN maps to 0.
    pub fn from_raw(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::ZERO;
        }
        Self(raw.round().clamp(0.0, 100.0) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn risk_score(
    criticality: f64,
    avg_priority: f64,
    workload: f64,
    weights: &ScoringWeights,
) -> RiskScore {
    let raw = (criticality * weights.criticality
        + avg_priority * weights.priority
        + workload * weights.workload)
        * SCALE;
    RiskScore::from_raw(raw)
}

/// Scores a workload, dividing its total weight by `capacity` first.
///
/// An idle workload scores 0 whatever the criticality.
pub fn workload_score(
    workload: &ActiveWorkload,
    criticality: f64,
    capacity: f64,
    weights: &ScoringWeights,
) -> RiskScore {
    if workload.is_idle() {
        return RiskScore::ZERO;
    }
    let normalized = safe_ratio(workload.total_weight, capacity).unwrap_or(workload.total_weight);
    risk_score(criticality, workload.average_priority, normalized, weights)
}

pub fn classify(score: RiskScore, thresholds: &LevelThresholds) -> RiskLevel {
    match score.value() {
        s if s >= thresholds.high => RiskLevel::High,
        s if s >= thresholds.medium => RiskLevel::Medium,
        _ => RiskLevel::Low,
    }
}
