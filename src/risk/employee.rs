//! Employee risk: a configured default criticality stands in for the
//! employee, and the full active workload is scored without a capacity divisor.

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, Instrument};

use super::scoring::{classify, workload_score, RiskScore};
use super::{Assessed, RiskLevel, SubjectType};
use crate::config::{LevelThresholds, RiskmapConfig, ScoringWeights};
use crate::core::{ActiveWorkload, AuthUser, Employee, EntityId, Task, UserRole};
use crate::env::RiskEnv;
use crate::errors::{EntityKind, Result, RiskError};
use crate::store::{EmployeeFilter, EmployeeQuery, TaskInclude};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRisk {
    pub employee_id: EntityId,
    pub name: String,
    pub email: String,
    pub team_id: Option<EntityId>,
    #[serde(flatten)]
    pub workload: ActiveWorkload,
    pub risk_score: RiskScore,
    pub risk_level: RiskLevel,
}

impl Assessed for EmployeeRisk {
    fn subject_id(&self) -> &str {
        &self.employee_id
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
        SubjectType::Employee
    }
    fn supporting_metrics(&self) -> ActiveWorkload {
        self.workload
    }
}

/// A single employee's risk together with the tasks behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRiskDetail {
    #[serde(flatten)]
    pub risk: EmployeeRisk,
    pub active_tasks: Vec<Task>,
}

/// Scores an employee with an explicit capacity divisor and threshold table.
///
/// Plain employee risk uses a divisor of 1; team breakdowns pass the team
/// capacity factor.
pub(crate) fn assess_employee_with(
    employee: &Employee,
    criticality: f64,
    capacity: f64,
    weights: &ScoringWeights,
    thresholds: &LevelThresholds,
) -> EmployeeRisk {
    let workload = ActiveWorkload::from_tasks(&employee.tasks);
    let risk_score = workload_score(&workload, criticality, capacity, weights);
    EmployeeRisk {
        employee_id: employee.id.clone(),
        name: employee.name.clone(),
        email: employee.email.clone(),
        team_id: employee.team_id.clone(),
        workload,
        risk_score,
        risk_level: classify(risk_score, thresholds),
    }
}

/// Pure employee assessment over whatever tasks `employee` carries.
pub fn assess_employee(employee: &Employee, config: &RiskmapConfig) -> EmployeeRisk {
    assess_employee_with(
        employee,
        config.capacity.default_employee_criticality,
        1.0,
        &config.scoring,
        &config.thresholds.employee,
    )
}

fn detail(employee: &Employee, config: &RiskmapConfig) -> EmployeeRiskDetail {
    EmployeeRiskDetail {
        risk: assess_employee(employee, config),
        active_tasks: employee.active_tasks().cloned().collect(),
    }
}

/// Risk for one live employee by id.
pub async fn employee_risk(env: &RiskEnv, employee_id: &str) -> Result<EmployeeRiskDetail> {
    let employee = env
        .store()
        .find_employee(employee_id, TaskInclude::Active)
        .instrument(info_span!("employee_risk", employee_id))
        .await?
        .filter(|e| !e.is_deleted)
        .ok_or_else(|| RiskError::not_found(EntityKind::Employee, employee_id))?;
    Ok(detail(&employee, env.config()))
}

/// "My risk": the risk of the employee behind `user`.
pub async fn own_employee_risk(env: &RiskEnv, user: &AuthUser) -> Result<EmployeeRiskDetail> {
    if user.role != UserRole::Employee {
        return Err(RiskError::BadRequest(format!(
            "{} is not signed in as an employee",
            user.email
        )));
    }
    let employee = env
        .store()
        .find_employee_by_email(&user.email, TaskInclude::Active)
        .await?
        .filter(|e| !e.is_deleted)
        .ok_or_else(|| RiskError::not_found(EntityKind::Employee, user.email.as_str()))?;
    Ok(detail(&employee, env.config()))
}

/// Unranked risk for every live employee.
pub async fn employee_risk_sweep(env: &RiskEnv) -> Result<Vec<EmployeeRisk>> {
    let query = EmployeeQuery::new(EmployeeFilter::live()).include_tasks(TaskInclude::Active);
    let employees = env.store().find_employees(&query).await?;
    debug!(count = employees.len(), "Swept employees");
    Ok(employees
        .iter()
        .map(|e| assess_employee(e, env.config()))
        .collect())
}
