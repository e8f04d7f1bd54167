//! Team risk: the mean of member scores, each member scored with the team
//! capacity factor dividing their workload.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::employee::{assess_employee_with, EmployeeRisk};
use super::scoring::{classify, RiskScore};
use super::{rank_by_risk, Assessed, RiskLevel, SubjectType};
use crate::common::mean;
use crate::config::RiskmapConfig;
use crate::core::{ActiveStatus, ActiveWorkload, AuthUser, EntityId, Manager, Team, UserRole};
use crate::env::RiskEnv;
use crate::errors::{EntityKind, Result, RiskError};
use crate::store::{TaskInclude, TeamFilter, TeamQuery};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRisk {
    pub team_id: EntityId,
    pub name: String,
    pub status: ActiveStatus,
    pub employee_count: usize,
    pub system_count: usize,
    pub risk_score: RiskScore,
    pub risk_level: RiskLevel,
    /// Per-member breakdown, worst first.
    pub employee_risks: Vec<EmployeeRisk>,
}

impl Assessed for TeamRisk {
    fn subject_id(&self) -> &str {
        &self.team_id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn risk_score(&self) -> RiskScore {
        self.risk_score
    }
    fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }
    fn subject_type(&self) -> SubjectType {
        SubjectType::Team
    }
    fn supporting_metrics(&self) -> ActiveWorkload {
        let task_count = self
            .employee_risks
            .iter()
            .map(|r| r.workload.task_count)
            .sum();
        let total_weight = self
            .employee_risks
            .iter()
            .map(|r| r.workload.total_weight)
            .sum();
        ActiveWorkload {
            task_count,
            total_weight,
            average_priority: mean(
                self.employee_risks
                    .iter()
                    .filter(|r| !r.workload.is_idle())
                    .map(|r| r.workload.average_priority),
            ),
        }
    }
}

/// Scores a team from the members it carries. Soft-deleted members are skipped.
pub fn assess_team(team: &Team, config: &RiskmapConfig) -> TeamRisk {
    let mut employee_risks: Vec<EmployeeRisk> = team
        .employees
        .iter()
        .filter(|e| !e.is_deleted)
        .map(|e| {
            assess_employee_with(
                e,
                config.capacity.default_employee_criticality,
                config.capacity.team_capacity_factor,
                &config.scoring,
                &config.thresholds.employee,
            )
        })
        .collect();

    let risk_score = RiskScore::from_raw(mean(
        employee_risks.iter().map(|r| f64::from(r.risk_score.value())),
    ));
    rank_by_risk(&mut employee_risks);

    TeamRisk {
        team_id: team.id.clone(),
        name: team.name.clone(),
        status: team.status,
        employee_count: employee_risks.len(),
        system_count: team
            .systems
            .iter()
            .filter(|s| s.status != ActiveStatus::Deleted)
            .count(),
        risk_score,
        risk_level: classify(risk_score, &config.thresholds.team),
        employee_risks,
    }
}

pub async fn team_risk(env: &RiskEnv, team_id: &str) -> Result<TeamRisk> {
    let team = env
        .store()
        .find_team(team_id, TaskInclude::Active)
        .await?
        .filter(|t| t.status != ActiveStatus::Deleted)
        .ok_or_else(|| RiskError::not_found(EntityKind::Team, team_id))?;
    Ok(assess_team(&team, env.config()))
}

async fn team_of(env: &RiskEnv, manager: &Manager) -> Result<TeamRisk> {
    let team_id = manager.team_id.as_deref().ok_or_else(|| RiskError::NoTeam {
        manager_id: manager.id.clone(),
    })?;
    team_risk(env, team_id).await
}

/// Risk of the team a manager leads.
pub async fn manager_team_risk(env: &RiskEnv, manager_id: &str) -> Result<TeamRisk> {
    let manager = env
        .store()
        .find_manager(manager_id)
        .await?
        .filter(|m| !m.is_deleted)
        .ok_or_else(|| RiskError::not_found(EntityKind::Manager, manager_id))?;
    team_of(env, &manager).await
}

/// "My team" for the manager behind `user`.
pub async fn manager_team_risk_for(env: &RiskEnv, user: &AuthUser) -> Result<TeamRisk> {
    if user.role != UserRole::Manager {
        return Err(RiskError::BadRequest(format!(
            "{} is not signed in as a manager",
            user.email
        )));
    }
    let manager = env
        .store()
        .find_manager_by_email(&user.email)
        .await?
        .filter(|m| !m.is_deleted)
        .ok_or_else(|| RiskError::not_found(EntityKind::Manager, user.email.as_str()))?;
    team_of(env, &manager).await
}

/// Unranked risk for every ACTIVE team.
pub async fn team_risk_sweep(env: &RiskEnv) -> Result<Vec<TeamRisk>> {
    let query = TeamQuery::new(TeamFilter::active()).include_members(TaskInclude::Active);
    let teams = env.store().find_teams(&query).await?;
    debug!(count = teams.len(), "Swept teams");
    Ok(teams.iter().map(|t| assess_team(t, env.config())).collect())
}
