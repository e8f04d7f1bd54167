use serde::{Deserialize, Serialize};
use tracing::warn;

use super::impact::{ImpactConfig, LandingConfig, PaginationConfig};
use super::scoring::{CapacityConfig, ScoringWeights};
use super::thresholds::ThresholdsConfig;

/// Root configuration structure for riskmap.
///
/// Built once (defaults, then file, then environment) and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskmapConfig {
    /// Scoring weights configuration
    #[serde(default)]
    pub scoring: ScoringWeights,

    /// Default employee criticality and workload divisors
    #[serde(default)]
    pub capacity: CapacityConfig,

    /// Risk level thresholds per entity type
    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    /// Business-impact constants
    #[serde(default)]
    pub impact: ImpactConfig,

    #[serde(default)]
    pub pagination: PaginationConfig,

    #[serde(default)]
    pub landing: LandingConfig,
}

impl RiskmapConfig {
    /// Every problem in the configuration, empty when it is usable as-is.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = self.scoring.validation_errors();
        errors.extend(self.capacity.validation_errors());
        errors.extend(self.thresholds.validation_errors());
        errors.extend(self.impact.validation_errors());
        errors.extend(self.pagination.validation_errors());
        errors
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Replaces each invalid section with its defaults, logging what was dropped.
    pub fn sanitized(mut self) -> Self {
        if let Err(e) = self.scoring.validate() {
            warn!("Invalid scoring weights: {}. Using defaults.", e);
            self.scoring = ScoringWeights::default();
        }
        reset_if_invalid(
            &mut self.capacity,
            CapacityConfig::validation_errors,
            "capacity",
        );
        reset_if_invalid(
            &mut self.thresholds,
            ThresholdsConfig::validation_errors,
            "thresholds",
        );
        reset_if_invalid(&mut self.impact, ImpactConfig::validation_errors, "impact");
        reset_if_invalid(
            &mut self.pagination,
            PaginationConfig::validation_errors,
            "pagination",
        );
        self
    }
}

fn reset_if_invalid<T: Default>(section: &mut T, check: fn(&T) -> Vec<String>, name: &str) {
    let errors = check(section);
    if !errors.is_empty() {
        warn!(
            "Invalid [{}] configuration: {}. Using defaults.",
            name,
            errors.join("; ")
        );
        *section = T::default();
    }
}
