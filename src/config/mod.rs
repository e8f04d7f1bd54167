// Sub-modules
mod impact;
mod scoring;
mod thresholds;

// Core configuration types
mod core;
mod loader;
pub mod overrides;

pub use scoring::{
    default_criticality_weight, default_employee_criticality, default_priority_weight,
    default_system_capacity_factor, default_team_capacity_factor, default_workload_weight,
    CapacityConfig, ScoringWeights,
};

pub use thresholds::{LevelThresholds, ThresholdsConfig};

pub use impact::{
    default_cost_savings_per_resolved_risk, default_downtime_minutes_per_critical_system,
    default_revenue_loss_per_critical_system, ImpactConfig, LandingConfig, PaginationConfig,
    MAX_TREND_DAYS,
};

pub use core::RiskmapConfig;

pub use loader::{
    directory_ancestors, discover_config_path, load_config, load_config_from,
    load_config_from_path, load_unvalidated_config, parse_and_validate_config, parse_config,
    resolve_config, CONFIG_FILE_NAME,
};

pub use overrides::{apply_env_overrides, apply_overrides, RECOGNIZED_OPTIONS};
