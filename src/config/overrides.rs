//! Environment variable overrides, applied on top of file configuration.

use std::str::FromStr;

use tracing::{debug, warn};

use super::core::RiskmapConfig;

pub const RISK_WEIGHT_CRITICALITY: &str = "RISK_WEIGHT_CRITICALITY";
pub const RISK_WEIGHT_PRIORITY: &str = "RISK_WEIGHT_PRIORITY";
pub const RISK_WEIGHT_WORKLOAD: &str = "RISK_WEIGHT_WORKLOAD";
pub const DEFAULT_EMPLOYEE_CRITICALITY: &str = "DEFAULT_EMPLOYEE_CRITICALITY";
pub const TEAM_CAPACITY_FACTOR: &str = "TEAM_CAPACITY_FACTOR";
pub const SYSTEM_CAPACITY_FACTOR: &str = "SYSTEM_CAPACITY_FACTOR";
pub const COST_SAVINGS_PER_RESOLVED_RISK: &str = "COST_SAVINGS_PER_RESOLVED_RISK";
pub const REVENUE_LOSS_PER_CRITICAL_SYSTEM: &str = "REVENUE_LOSS_PER_CRITICAL_SYSTEM";
pub const DOWNTIME_MINUTES_PER_CRITICAL_SYSTEM: &str = "DOWNTIME_MINUTES_PER_CRITICAL_SYSTEM";

/// Every recognized option name, in documentation order.
pub const RECOGNIZED_OPTIONS: [&str; 9] = [
    RISK_WEIGHT_CRITICALITY,
    RISK_WEIGHT_PRIORITY,
    RISK_WEIGHT_WORKLOAD,
    DEFAULT_EMPLOYEE_CRITICALITY,
    TEAM_CAPACITY_FACTOR,
    SYSTEM_CAPACITY_FACTOR,
    COST_SAVINGS_PER_RESOLVED_RISK,
    REVENUE_LOSS_PER_CRITICAL_SYSTEM,
    DOWNTIME_MINUTES_PER_CRITICAL_SYSTEM,
];

/// Applies overrides read through `lookup`, which maps an option name to its raw value.
///
/// Values that fail to parse are skipped with a warning and the existing value kept.
pub fn apply_overrides<F>(mut config: RiskmapConfig, lookup: F) -> RiskmapConfig
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| parse_override::<f64>(name, lookup(name));

    if let Some(v) = read(RISK_WEIGHT_CRITICALITY) {
        config.scoring.criticality = v;
    }
    if let Some(v) = read(RISK_WEIGHT_PRIORITY) {
        config.scoring.priority = v;
    }
    if let Some(v) = read(RISK_WEIGHT_WORKLOAD) {
        config.scoring.workload = v;
    }
    if let Some(v) = read(DEFAULT_EMPLOYEE_CRITICALITY) {
        config.capacity.default_employee_criticality = v;
    }
    if let Some(v) = read(TEAM_CAPACITY_FACTOR) {
        config.capacity.team_capacity_factor = v;
    }
    if let Some(v) = read(SYSTEM_CAPACITY_FACTOR) {
        config.capacity.system_capacity_factor = v;
    }
    if let Some(v) = read(COST_SAVINGS_PER_RESOLVED_RISK) {
        config.impact.cost_savings_per_resolved_risk = v;
    }
    if let Some(v) = read(REVENUE_LOSS_PER_CRITICAL_SYSTEM) {
        config.impact.revenue_loss_per_critical_system = v;
    }
    if let Some(v) = read(DOWNTIME_MINUTES_PER_CRITICAL_SYSTEM) {
        config.impact.downtime_minutes_per_critical_system = v;
    }

    config
}

/// Applies overrides from the process environment.
pub fn apply_env_overrides(config: RiskmapConfig) -> RiskmapConfig {
    apply_overrides(config, |name| std::env::var(name).ok())
}

fn parse_override<T: FromStr>(name: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<T>() {
        Ok(value) => {
            debug!("{} overridden from environment: {}", name, trimmed);
            Some(value)
        }
        Err(_) => {
            warn!("Ignoring {}={:?}: not a number", name, raw);
            None
        }
    }
}
