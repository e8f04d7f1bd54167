//! Business-impact constants, list paging limits and landing page switches.

use serde::{Deserialize, Serialize};

/// Longest daily trend accepted, one leap year of days.
pub const MAX_TREND_DAYS: usize = 366;

/// Monetary and sampling constants used by the landing statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactConfig {
    /// Dollars credited per resolved high-priority task (`COST_SAVINGS_PER_RESOLVED_RISK`)
    #[serde(default = "default_cost_savings_per_resolved_risk")]
    pub cost_savings_per_resolved_risk: f64,

    /// Dollars at stake per critical system (`REVENUE_LOSS_PER_CRITICAL_SYSTEM`)
    #[serde(default = "default_revenue_loss_per_critical_system")]
    pub revenue_loss_per_critical_system: f64,

    /// `DOWNTIME_MINUTES_PER_CRITICAL_SYSTEM`
    #[serde(default = "default_downtime_minutes_per_critical_system")]
    pub downtime_minutes_per_critical_system: f64,

    /// Tasks at or above this priority count as high priority.
    #[serde(default = "default_high_priority")]
    pub high_priority: u8,

    /// Systems at or above this criticality count as critical.
    #[serde(default = "default_critical_criticality")]
    pub critical_criticality: u8,

    /// Number of most recently completed tasks sampled for resolution time.
    #[serde(default = "default_resolution_sample_size")]
    pub resolution_sample_size: usize,

    /// Length of the daily trend, in days (1 to [`MAX_TREND_DAYS`]).
    #[serde(default = "default_trend_days")]
    pub trend_days: usize,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            cost_savings_per_resolved_risk: default_cost_savings_per_resolved_risk(),
            revenue_loss_per_critical_system: default_revenue_loss_per_critical_system(),
            downtime_minutes_per_critical_system: default_downtime_minutes_per_critical_system(),
            high_priority: default_high_priority(),
            critical_criticality: default_critical_criticality(),
            resolution_sample_size: default_resolution_sample_size(),
            trend_days: default_trend_days(),
        }
    }
}

impl ImpactConfig {
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = [
            (
                "cost_savings_per_resolved_risk",
                self.cost_savings_per_resolved_risk,
            ),
            (
                "revenue_loss_per_critical_system",
                self.revenue_loss_per_critical_system,
            ),
            (
                "downtime_minutes_per_critical_system",
                self.downtime_minutes_per_critical_system,
            ),
        ]
        .into_iter()
        .filter(|(_, value)| !(value.is_finite() && *value >= 0.0))
        .map(|(name, value)| format!("impact.{} {} is invalid (must be >= 0)", name, value))
        .collect();

        if !(1..=5).contains(&self.high_priority) {
            errors.push(format!(
                "impact.high_priority {} is invalid (must be 1-5)",
                self.high_priority
            ));
        }
        if self.critical_criticality > 5 {
            errors.push(format!(
                "impact.critical_criticality {} is invalid (must be 0-5)",
                self.critical_criticality
            ));
        }
        if self.resolution_sample_size == 0 {
            errors.push("impact.resolution_sample_size must be at least 1".to_string());
        }
        if !(1..=MAX_TREND_DAYS).contains(&self.trend_days) {
            errors.push(format!(
                "impact.trend_days {} is invalid (must be 1-{})",
                self.trend_days, MAX_TREND_DAYS
            ));
        }
        errors
    }
}

pub fn default_cost_savings_per_resolved_risk() -> f64 {
    5000.0
}
pub fn default_revenue_loss_per_critical_system() -> f64 {
    25000.0
}
pub fn default_downtime_minutes_per_critical_system() -> f64 {
    120.0
}
fn default_high_priority() -> u8 {
    4
}
fn default_critical_criticality() -> u8 {
    3
}
fn default_resolution_sample_size() -> usize {
    50
}
fn default_trend_days() -> usize {
    7
}

/// Page size limits for risk listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl PaginationConfig {
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.max_limit == 0 {
            errors.push("pagination.max_limit must be at least 1".to_string());
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            errors.push(format!(
                "pagination.default_limit {} is invalid (must be 1-{})",
                self.default_limit, self.max_limit
            ));
        }
        errors
    }
}

fn default_limit() -> usize {
    10
}
fn default_max_limit() -> usize {
    100
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LandingConfig {
    /// Report 100% coverage instead of 0% when no system has tasks yet.
    #[serde(default)]
    pub demo_mode_coverage: bool,
}
