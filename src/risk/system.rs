//! System risk: the system's own criticality, with its active workload divided
//! by the system capacity factor.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::scoring::{classify, workload_score, RiskScore};
use super::{Assessed, RiskLevel, SubjectType};
use crate::config::RiskmapConfig;
use crate::core::{ActiveStatus, ActiveWorkload, EntityId, System};
use crate::env::RiskEnv;
use crate::errors::{EntityKind, Result, RiskError};
use crate::store::{SystemFilter, SystemQuery, TaskInclude};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemRisk {
    pub system_id: EntityId,
    pub name: String,
    pub criticality: u8,
    pub status: ActiveStatus,
    pub team_id: Option<EntityId>,
    #[serde(flatten)]
    pub workload: ActiveWorkload,
    pub risk_score: RiskScore,
    pub risk_level: RiskLevel,
}

impl Assessed for SystemRisk {
    fn subject_id(&self) -> &str {
        &self.system_id
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
        SubjectType::System
    }
    fn supporting_metrics(&self) -> ActiveWorkload {
        self.workload
    }
}

/// Scores a system on its own criticality, with total work weight divided
/// by the system capacity factor.
pub fn assess_system(system: &System, config: &RiskmapConfig) -> SystemRisk {
    let workload = ActiveWorkload::from_tasks(&system.tasks);
    let risk_score = workload_score(
        &workload,
        f64::from(system.criticality),
        config.capacity.system_capacity_factor,
        &config.scoring,
    );
    SystemRisk {
        system_id: system.id.clone(),
        name: system.name.clone(),
        criticality: system.criticality,
        status: system.status,
        team_id: system.team_id.clone(),
        workload,
        risk_score,
        risk_level: classify(risk_score, &config.thresholds.system),
    }
}

pub async fn system_risk(env: &RiskEnv, system_id: &str) -> Result<SystemRisk> {
    let system = env
        .store()
        .find_system(system_id, TaskInclude::Active)
        .await?
        .filter(|s| s.status != ActiveStatus::Deleted)
        .ok_or_else(|| RiskError::not_found(EntityKind::System, system_id))?;
    Ok(assess_system(&system, env.config()))
}

/// Unranked risk for every ACTIVE system.
pub async fn system_risk_sweep(env: &RiskEnv) -> Result<Vec<SystemRisk>> {
    let query = SystemQuery::new(SystemFilter::active()).include_tasks(TaskInclude::Active);
    let systems = env.store().find_systems(&query).await?;
    debug!(count = systems.len(), "Swept systems");
    Ok(systems
        .iter()
        .map(|s| assess_system(s, env.config()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{employee, system, task, SnapshotBuilder};

    fn env() -> RiskEnv {
        let store = SnapshotBuilder::new()
            .employee(employee("e1"))
            .system(system("s1").name("Payments").criticality(5))
            .system(system("s2").name("Wiki").criticality(1).status(ActiveStatus::Inactive))
            .system(system("s3").name("Legacy").status(ActiveStatus::Deleted))
            .task(task("k1").system("s1").priority(4))
            .task(task("k2").system("s1").priority(2))
            .store();
        RiskEnv::new(store, RiskmapConfig::default())
    }

    #[tokio::test]
    async fn critical_system_with_two_tasks() {
        let risk = system_risk(&env(), "s1").await.unwrap();
        assert_eq!(risk.workload.task_count, 2);
        assert_eq!(risk.workload.average_priority, 3.0);
        assert_eq!(risk.risk_score.value(), 61);
        assert_eq!(risk.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn idle_system_scores_zero_despite_criticality() {
        let risk = assess_system(&system("s9").criticality(5).build(), &RiskmapConfig::default());
        assert_eq!(risk.risk_score, RiskScore::ZERO);
        assert_eq!(risk.risk_level, RiskLevel::Low);
    }

    #[tokio::test]
    async fn deleted_system_is_not_found() {
        let err = system_risk(&env(), "s3").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(system_risk(&env(), "s2").await.is_ok());
    }

    #[tokio::test]
    async fn sweep_covers_only_active_systems() {
        let risks = system_risk_sweep(&env()).await.unwrap();
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].system_id, "s1");
    }

    #[test]
    fn capacity_factor_is_configurable() {
        let mut config = RiskmapConfig::default();
        config.capacity.system_capacity_factor = 1.0;
        let payments = system("s1")
            .criticality(5)
            .task(task("a").priority(4))
            .task(task("b").priority(2))
            .build();
        // (5*0.8 + 3*0.6 + 2*0.3) * 10 = 64
        assert_eq!(assess_system(&payments, &config).risk_score.value(), 64);
    }
}
