//! Risk aggregation engine.
//!
//! `scoring` holds the pure scoring function and level classifier. The
//! `employee`, `system` and `team` calculators gather each entity's active
//! tasks and score them; `listing` and `dashboard` run those calculators
//! over whole populations.

pub mod dashboard;
pub mod employee;
pub mod listing;
pub mod scoring;
pub mod system;
pub mod team;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::ActiveWorkload;

pub use dashboard::{dashboard, Dashboard};
pub use employee::{
    assess_employee, employee_risk, employee_risk_sweep, own_employee_risk, EmployeeRisk,
    EmployeeRiskDetail,
};
pub use listing::{list_employee_risks, list_system_risks, list_team_risks, RiskListQuery};
pub use scoring::{classify, risk_score, workload_score, RiskScore};
pub use system::{assess_system, system_risk, system_risk_sweep, SystemRisk};
pub use team::{
    assess_team, manager_team_risk, manager_team_risk_for, team_risk, team_risk_sweep, TeamRisk,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LOW" => Ok(RiskLevel::Low),
            "MEDIUM" => Ok(RiskLevel::Medium),
            "HIGH" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubjectType {
    Employee,
    System,
    Team,
}

/// Entity-independent view of one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    pub subject_id: String,
    pub subject_type: SubjectType,
    pub risk_score: RiskScore,
    pub risk_level: RiskLevel,
    pub supporting_metrics: ActiveWorkload,
}

/// Common surface of the per-entity risk rows, used for ranking and filtering.
pub trait Assessed {
    fn subject_id(&self) -> &str;
    fn name(&self) -> &str;
    fn risk_score(&self) -> RiskScore;
    fn risk_level(&self) -> RiskLevel;
    fn subject_type(&self) -> SubjectType;
    fn supporting_metrics(&self) -> ActiveWorkload;

    fn to_result(&self) -> RiskResult {
        RiskResult {
            subject_id: self.subject_id().to_string(),
            subject_type: self.subject_type(),
            risk_score: self.risk_score(),
            risk_level: self.risk_level(),
            supporting_metrics: self.supporting_metrics(),
        }
    }
}

/// Worst first; ties broken by name so output is stable.
pub fn rank_by_risk<R: Assessed>(rows: &mut [R]) {
    rows.sort_by(|a, b| {
        b.risk_score()
            .cmp(&a.risk_score())
            .then_with(|| a.name().cmp(b.name()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_low_to_high() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn level_round_trips_through_label() {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            assert_eq!(level.label().parse::<RiskLevel>(), Ok(level));
        }
        assert_eq!("high".parse::<RiskLevel>(), Ok(RiskLevel::High));
        assert!("severe".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn level_serializes_screaming() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::Medium).unwrap(),
            "\"MEDIUM\""
        );
    }
}
