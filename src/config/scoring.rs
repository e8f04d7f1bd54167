//! Scoring configuration for the risk formula
//!
//! This module contains:
//! - Weight configuration for the three scoring inputs (criticality, priority, workload)
//! - Capacity configuration: the employee default criticality and the
//!   per-entity workload divisors

use serde::{Deserialize, Serialize};

/// Weights applied to each scoring input before the x10 scale-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for criticality (`RISK_WEIGHT_CRITICALITY`)
    #[serde(default = "default_criticality_weight")]
    pub criticality: f64,

    /// Weight for average task priority (`RISK_WEIGHT_PRIORITY`)
    #[serde(default = "default_priority_weight")]
    pub priority: f64,

    /// Weight for aggregate workload (`RISK_WEIGHT_WORKLOAD`)
    #[serde(default = "default_workload_weight")]
    pub workload: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            criticality: default_criticality_weight(),
            priority: default_priority_weight(),
            workload: default_workload_weight(),
        }
    }
}

impl ScoringWeights {
    // Pure function: Check if a weight is usable
    pub fn is_valid_weight(weight: f64) -> bool {
        weight.is_finite() && weight >= 0.0
    }

    // Pure function: Validate a single weight with name
    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!(
                "{} weight must be a finite, non-negative number (got {})",
                name, weight
            ))
        }
    }

    // Pure function: Collect all weight validations
    pub fn collect_weight_validations(&self) -> Vec<Result<(), String>> {
        vec![
            Self::validate_weight(self.criticality, "Criticality"),
            Self::validate_weight(self.priority, "Priority"),
            Self::validate_weight(self.workload, "Workload"),
        ]
    }

    /// All weight problems, empty when the weights are usable.
    pub fn validation_errors(&self) -> Vec<String> {
        self.collect_weight_validations()
            .into_iter()
            .filter_map(Result::err)
            .collect()
    }

    pub fn validate(&self) -> Result<(), String> {
        for validation in self.collect_weight_validations() {
            validation?;
        }
        Ok(())
    }
}

pub fn default_criticality_weight() -> f64 {
    0.8
}
pub fn default_priority_weight() -> f64 {
    0.6
}
pub fn default_workload_weight() -> f64 {
    0.3
}

/// Workload normalization per entity type.
///
/// Employees have no criticality of their own, so `default_employee_criticality`
/// stands in for it. Systems divide their summed work weight by
/// `system_capacity_factor`; team members divide theirs by `team_capacity_factor`.
/// Plain employee scores use no divisor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityConfig {
    /// `DEFAULT_EMPLOYEE_CRITICALITY`
    #[serde(default = "default_employee_criticality")]
    pub default_employee_criticality: f64,

    /// `TEAM_CAPACITY_FACTOR`
    #[serde(default = "default_team_capacity_factor")]
    pub team_capacity_factor: f64,

    /// `SYSTEM_CAPACITY_FACTOR`
    #[serde(default = "default_system_capacity_factor")]
    pub system_capacity_factor: f64,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            default_employee_criticality: default_employee_criticality(),
            team_capacity_factor: default_team_capacity_factor(),
            system_capacity_factor: default_system_capacity_factor(),
        }
    }
}

impl CapacityConfig {
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(0.0..=5.0).contains(&self.default_employee_criticality) {
            errors.push(format!(
                "default_employee_criticality {} is invalid (must be 0-5)",
                self.default_employee_criticality
            ));
        }

        for (name, value) in [
            ("team_capacity_factor", self.team_capacity_factor),
            ("system_capacity_factor", self.system_capacity_factor),
        ] {
            if !(value.is_finite() && value > 0.0) {
                errors.push(format!("{} {} is invalid (must be > 0.0)", name, value));
            }
        }

        errors
    }
}

pub fn default_employee_criticality() -> f64 {
    3.0
}
pub fn default_team_capacity_factor() -> f64 {
    3.0
}
pub fn default_system_capacity_factor() -> f64 {
    2.0
}
