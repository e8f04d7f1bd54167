//! Role-tagged profile of the signed-in user.
//!
//! The role decides which table the email is looked up in, and the payload
//! shape follows the role. Serialized with a `role` tag:
//!
//! ```json
//! { "role": "MANAGER", "manager": { ... }, "team": { "id": "t1", ... } }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, Instrument};

use crate::core::{ActiveStatus, Admin, AuthUser, Employee, EntityId, Manager, Task, UserRole};
use crate::env::RiskEnv;
use crate::errors::{EntityKind, Result, RiskError};
use crate::store::TaskInclude;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub id: EntityId,
    pub name: String,
    pub status: ActiveStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub admin: Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerProfile {
    pub manager: Manager,
    pub team: Option<TeamSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub employee: Employee,
    pub team: Option<TeamSummary>,
    pub active_tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Profile {
    Admin(AdminProfile),
    Manager(ManagerProfile),
    Employee(EmployeeProfile),
}

impl Profile {
    pub fn role(&self) -> UserRole {
        match self {
            Profile::Admin(_) => UserRole::Admin,
            Profile::Manager(_) => UserRole::Manager,
            Profile::Employee(_) => UserRole::Employee,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Profile::Admin(p) => &p.admin.name,
            Profile::Manager(p) => &p.manager.name,
            Profile::Employee(p) => &p.employee.name,
        }
    }

    pub fn team(&self) -> Option<&TeamSummary> {
        match self {
            Profile::Admin(_) => None,
            Profile::Manager(p) => p.team.as_ref(),
            Profile::Employee(p) => p.team.as_ref(),
        }
    }
}

/// Resolves `user` against the table for their role.
pub async fn resolve_profile(env: &RiskEnv, user: &AuthUser) -> Result<Profile> {
    let span = info_span!("resolve_profile", role = ?user.role);
    resolve(env, user).instrument(span).await
}

async fn resolve(env: &RiskEnv, user: &AuthUser) -> Result<Profile> {
    let store = env.store();
    let email = user.email.as_str();

    let profile = match user.role {
        UserRole::Admin => {
            let admin = store
                .find_admin_by_email(email)
                .await?
                .filter(|a| !a.is_deleted)
                .ok_or_else(|| RiskError::not_found(EntityKind::Admin, email))?;
            Profile::Admin(AdminProfile { admin })
        }
        UserRole::Manager => {
            let manager = store
                .find_manager_by_email(email)
                .await?
                .filter(|m| !m.is_deleted)
                .ok_or_else(|| RiskError::not_found(EntityKind::Manager, email))?;
            let team = team_summary(env, manager.team_id.as_deref()).await?;
            Profile::Manager(ManagerProfile { manager, team })
        }
        UserRole::Employee => {
            let mut employee = store
                .find_employee_by_email(email, TaskInclude::Active)
                .await?
                .filter(|e| !e.is_deleted)
                .ok_or_else(|| RiskError::not_found(EntityKind::Employee, email))?;
            let team = team_summary(env, employee.team_id.as_deref()).await?;
            let active_tasks = std::mem::take(&mut employee.tasks);
            Profile::Employee(EmployeeProfile {
                employee,
                team,
                active_tasks,
            })
        }
    };
    debug!(name = profile.name(), "Resolved profile");
    Ok(profile)
}

async fn team_summary(env: &RiskEnv, team_id: Option<&str>) -> Result<Option<TeamSummary>> {
    let Some(team_id) = team_id else {
        return Ok(None);
    };
    let team = env.store().find_team(team_id, TaskInclude::None).await?;
    Ok(team.map(|t| TeamSummary {
        id: t.id,
        name: t.name,
        status: t.status,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RiskmapConfig;
    use crate::core::TaskStatus;
    use crate::testkit::{admin, employee, manager, system, task, team, SnapshotBuilder};

    fn env() -> RiskEnv {
        let store = SnapshotBuilder::new()
            .team(team("t1").name("Platform"))
            .admin(admin("a1").name("Root").email("root@corp.io"))
            .manager(manager("m1").name("Mia").email("mia@corp.io").team("t1"))
            .manager(manager("m2").email("old@corp.io").deleted())
            .employee(employee("e1").name("Ada").email("ada@corp.io").team("t1"))
            .system(system("s1"))
            .task(task("k1").employee("e1"))
            .task(task("k2").employee("e1").status(TaskStatus::Completed))
            .store();
        RiskEnv::new(store, RiskmapConfig::default())
    }

    #[tokio::test]
    async fn employee_profile_carries_team_and_active_tasks() {
        let user = AuthUser::new("ADA@corp.io", UserRole::Employee);
        let profile = resolve_profile(&env(), &user).await.unwrap();
        let Profile::Employee(p) = &profile else {
            panic!("expected employee profile, got {profile:?}");
        };
        assert_eq!(p.employee.name, "Ada");
        assert_eq!(p.active_tasks.len(), 1);
        assert!(p.employee.tasks.is_empty());
        assert_eq!(profile.team().map(|t| t.name.as_str()), Some("Platform"));
    }

    #[tokio::test]
    async fn manager_and_admin_resolve_to_their_variants() {
        let env = env();
        let manager = resolve_profile(&env, &AuthUser::new("mia@corp.io", UserRole::Manager))
            .await
            .unwrap();
        assert_eq!(manager.role(), UserRole::Manager);
        assert_eq!(manager.team().map(|t| t.id.as_str()), Some("t1"));

        let admin = resolve_profile(&env, &AuthUser::new("root@corp.io", UserRole::Admin))
            .await
            .unwrap();
        assert_eq!(admin.role(), UserRole::Admin);
        assert!(admin.team().is_none());
    }

    #[tokio::test]
    async fn role_mismatch_and_soft_deleted_are_not_found() {
        let env = env();
        let wrong_table = resolve_profile(&env, &AuthUser::new("ada@corp.io", UserRole::Manager))
            .await
            .unwrap_err();
        assert!(wrong_table.is_not_found());

        let deleted = resolve_profile(&env, &AuthUser::new("old@corp.io", UserRole::Manager))
            .await
            .unwrap_err();
        assert!(matches!(
            deleted,
            RiskError::NotFound {
                entity: EntityKind::Manager,
                ..
            }
        ));
    }

    #[test]
    fn profile_serializes_with_role_tag() {
        let profile = Profile::Manager(ManagerProfile {
            manager: manager("m1").build(),
            team: None,
        });
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["role"], "MANAGER");
        assert_eq!(json["manager"]["id"], "m1");
        assert!(json["team"].is_null());
    }
}
