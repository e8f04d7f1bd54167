//! Error types for risk operations and the entity store

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The kind of record a lookup failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Admin,
    Manager,
    Employee,
    System,
    Team,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Admin => "admin",
            EntityKind::Manager => "manager",
            EntityKind::Employee => "employee",
            EntityKind::System => "system",
            EntityKind::Team => "team",
        };
        f.write_str(name)
    }
}

/// Main error type for riskmap operations
#[derive(Debug, Error)]
pub enum RiskError {
    /// A required record does not exist or is no longer live
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// A manager lookup succeeded but the manager is not assigned to a team
    #[error("manager {manager_id} has no team")]
    NoTeam { manager_id: String },

    /// A precondition on the request failed
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The entity store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RiskError {
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// HTTP-class status for a response layer.
    pub fn status_code(&self) -> u16 {
        match self {
            RiskError::NotFound { .. } | RiskError::NoTeam { .. } => 404,
            RiskError::BadRequest(_) => 400,
            RiskError::Store(_) | RiskError::Config(_) => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RiskError::NotFound { .. } | RiskError::NoTeam { .. })
    }
}

/// Errors raised while loading or reading the entity store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot references records that do not exist, or breaks a data invariant
    #[error("Inconsistent snapshot: {0}")]
    Inconsistent(String),
}

pub type Result<T> = std::result::Result<T, RiskError>;
