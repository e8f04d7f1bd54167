//! Single-entity risk lookups.

use anyhow::Result;

use crate::cli::OutputFormat;
use crate::core::{AuthUser, UserRole};
use crate::env::RiskEnv;
use crate::errors::RiskError;
use crate::output;
use crate::risk::{
    employee_risk, manager_team_risk, manager_team_risk_for, own_employee_risk, system_risk,
    team_risk,
};

fn missing_key(what: &str) -> RiskError {
    RiskError::BadRequest(format!("{what} needs an id or --email"))
}

pub async fn employee(
    env: &RiskEnv,
    id: Option<&str>,
    email: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let detail = match (id, email) {
        (Some(id), _) => employee_risk(env, id).await?,
        (None, Some(email)) => {
            own_employee_risk(env, &AuthUser::new(email, UserRole::Employee)).await?
        }
        (None, None) => return Err(missing_key("employee").into()),
    };
    output::emit(&detail, format)
}

pub async fn system(env: &RiskEnv, id: &str, format: OutputFormat) -> Result<()> {
    let risk = system_risk(env, id).await?;
    output::emit(&risk, format)
}

pub async fn team(env: &RiskEnv, id: &str, format: OutputFormat) -> Result<()> {
    let risk = team_risk(env, id).await?;
    output::emit(&risk, format)
}

pub async fn manager_team(
    env: &RiskEnv,
    manager_id: Option<&str>,
    email: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let risk = match (manager_id, email) {
        (Some(id), _) => manager_team_risk(env, id).await?,
        (None, Some(email)) => {
            manager_team_risk_for(env, &AuthUser::new(email, UserRole::Manager)).await?
        }
        (None, None) => return Err(missing_key("manager-team").into()),
    };
    output::emit(&risk, format)
}
