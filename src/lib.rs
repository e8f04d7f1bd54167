// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod env;
pub mod errors;
pub mod landing;
pub mod observability;
pub mod output;
pub mod profile;
pub mod risk;
pub mod store;
pub mod testkit;

// Re-export commonly used types
pub use crate::config::RiskmapConfig;

pub use crate::core::{
    ActiveStatus, ActiveWorkload, Admin, Assigner, AuthUser, Employee, EntityId, Manager, System,
    Task, TaskStatus, Team, UserRole,
};

pub use crate::env::RiskEnv;

pub use crate::errors::{EntityKind, Result, RiskError, StoreError};

pub use crate::landing::{landing_stats, LandingStats, TrendPoint};

pub use crate::profile::{resolve_profile, Profile, TeamSummary};

pub use crate::risk::{
    dashboard, employee_risk, list_employee_risks, list_system_risks, list_team_risks,
    manager_team_risk, system_risk, team_risk, Dashboard, EmployeeRisk, RiskLevel, RiskListQuery,
    RiskScore, SystemRisk, TeamRisk,
};

pub use crate::store::{
    EntityStore, InMemoryStore, PageMeta, Paginated, PaginationOptions, Snapshot, SortField,
    SortOrder,
};
