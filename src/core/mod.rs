//! Entity model consumed by the risk engine.
//!
//! These are the records the entity store hands out. Relations follow the
//! store's include semantics: `Employee::tasks`, `System::tasks`,
//! `Team::employees` and `Team::systems` are empty unless the query asked
//! for them.

pub mod workload;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use workload::ActiveWorkload;

/// Identifier used for every entity table.
pub type EntityId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Statuses that count toward risk.
    pub const ACTIVE: [TaskStatus; 2] = [TaskStatus::Pending, TaskStatus::InProgress];

    pub fn is_active(self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::InProgress)
    }
}

/// Lifecycle status shared by teams and systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActiveStatus {
    #[default]
    Active,
    Inactive,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Manager,
    Employee,
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "MANAGER" => Ok(Self::Manager),
            "EMPLOYEE" => Ok(Self::Employee),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// The caller an operation is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub email: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn new(email: impl Into<String>, role: UserRole) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }
}

/// Who handed a task out. A task is assigned by an admin or a manager, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Assigner {
    Admin(EntityId),
    Manager(EntityId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    pub status: TaskStatus,
    /// 1 (lowest) to 5 (highest).
    pub priority: u8,
    /// Load factor; `None` or a non-positive value means 1.
    pub work_weight: Option<f64>,
    pub employee_id: EntityId,
    pub system_id: EntityId,
    pub assigned_by: Option<Assigner>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Work weight with the unset/falsy default applied.
    pub fn effective_work_weight(&self) -> f64 {
        match self.work_weight {
            Some(weight) if weight.is_finite() && weight > 0.0 => weight,
            _ => 1.0,
        }
    }

    /// Whether the task was open at `instant`: created by then and not yet completed.
    pub fn was_open_at(&self, instant: DateTime<Utc>) -> bool {
        self.created_at <= instant && self.completed_at.is_none_or(|done| done > instant)
    }
}

/// Wire shape of a task: the assigner is split into two mutually exclusive id columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    id: EntityId,
    #[serde(default)]
    title: String,
    status: TaskStatus,
    priority: u8,
    #[serde(default)]
    work_weight: Option<f64>,
    employee_id: EntityId,
    system_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigned_by_admin_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigned_by_manager_id: Option<EntityId>,
    #[serde(default)]
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = String;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let assigned_by = match (record.assigned_by_admin_id, record.assigned_by_manager_id) {
            (Some(_), Some(_)) => {
                return Err(format!(
                    "task {} has both assignedByAdminId and assignedByManagerId",
                    record.id
                ))
            }
            (Some(admin), None) => Some(Assigner::Admin(admin)),
            (None, Some(manager)) => Some(Assigner::Manager(manager)),
            (None, None) => None,
        };

        Ok(Task {
            id: record.id,
            title: record.title,
            status: record.status,
            priority: record.priority,
            work_weight: record.work_weight,
            employee_id: record.employee_id,
            system_id: record.system_id,
            assigned_by,
            due_date: record.due_date,
            created_at: record.created_at,
            completed_at: record.completed_at,
        })
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        let (assigned_by_admin_id, assigned_by_manager_id) = match task.assigned_by {
            Some(Assigner::Admin(id)) => (Some(id), None),
            Some(Assigner::Manager(id)) => (None, Some(id)),
            None => (None, None),
        };

        TaskRecord {
            id: task.id,
            title: task.title,
            status: task.status,
            priority: task.priority,
            work_weight: task.work_weight,
            employee_id: task.employee_id,
            system_id: task.system_id,
            assigned_by_admin_id,
            assigned_by_manager_id,
            due_date: task.due_date,
            created_at: task.created_at,
            completed_at: task.completed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub team_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
}

impl Employee {
    pub fn active_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| task.is_active())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub team_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    pub id: EntityId,
    pub name: String,
    /// 1 (lowest) to 5 (business critical).
    pub criticality: u8,
    #[serde(default)]
    pub status: ActiveStatus,
    #[serde(default)]
    pub team_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
}

impl System {
    pub fn active_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| task.is_active())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub status: ActiveStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub employees: Vec<Employee>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub systems: Vec<System>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
    }

    fn task(status: TaskStatus) -> Task {
        Task {
            id: "t1".into(),
            title: "Rotate certificates".into(),
            status,
            priority: 3,
            work_weight: None,
            employee_id: "e1".into(),
            system_id: "s1".into(),
            assigned_by: None,
            due_date: None,
            created_at: at(1, 9),
            completed_at: None,
        }
    }

    #[test]
    fn only_pending_and_in_progress_are_active() {
        assert!(TaskStatus::Pending.is_active());
        assert!(TaskStatus::InProgress.is_active());
        assert!(!TaskStatus::Completed.is_active());
        assert!(!TaskStatus::Cancelled.is_active());
    }

    #[test]
    fn work_weight_defaults_to_one_when_unset_or_falsy() {
        let mut t = task(TaskStatus::Pending);
        assert_eq!(t.effective_work_weight(), 1.0);
        t.work_weight = Some(0.0);
        assert_eq!(t.effective_work_weight(), 1.0);
        t.work_weight = Some(-2.0);
        assert_eq!(t.effective_work_weight(), 1.0);
        t.work_weight = Some(2.5);
        assert_eq!(t.effective_work_weight(), 2.5);
    }

    #[test]
    fn open_window_excludes_tasks_completed_before_instant() {
        let mut t = task(TaskStatus::Completed);
        t.completed_at = Some(at(3, 12));
        assert!(!t.was_open_at(at(1, 8)));
        assert!(t.was_open_at(at(2, 12)));
        assert!(!t.was_open_at(at(3, 12)));
        assert!(!t.was_open_at(at(4, 0)));
    }

    #[test]
    fn task_wire_format_splits_assigner_columns() {
        let json = r#"{
            "id": "t9", "title": "Patch", "status": "IN_PROGRESS", "priority": 4,
            "employeeId": "e1", "systemId": "s1", "assignedByManagerId": "m1",
            "createdAt": "2025-03-01T09:00:00Z"
        }"#;
        let parsed: Task = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.assigned_by, Some(Assigner::Manager("m1".into())));
        assert_eq!(parsed.work_weight, None);

        let back = serde_json::to_value(&parsed).unwrap();
        assert_eq!(back["assignedByManagerId"], "m1");
        assert!(back.get("assignedByAdminId").is_none());
    }

    #[test]
    fn task_with_both_assigners_is_rejected() {
        let json = r#"{
            "id": "t9", "status": "PENDING", "priority": 2,
            "employeeId": "e1", "systemId": "s1",
            "assignedByAdminId": "a1", "assignedByManagerId": "m1",
            "createdAt": "2025-03-01T09:00:00Z"
        }"#;
        let err = serde_json::from_str::<Task>(json).unwrap_err();
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("manager".parse::<UserRole>(), Ok(UserRole::Manager));
        assert!("owner".parse::<UserRole>().is_err());
    }
}
