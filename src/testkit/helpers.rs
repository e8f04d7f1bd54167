//! Fluent builders for entity fixtures.
//!
//! Every builder starts from a valid record and only the fields a test
//! cares about need to be set:
//!
//! ```rust,ignore
//! use riskmap::testkit::{employee, system, task, SnapshotBuilder};
//!
//! let store = SnapshotBuilder::new()
//!     .system(system("s1").criticality(5))
//!     .employee(employee("e1").name("Ada"))
//!     .task(task("k1").employee("e1").system("s1").priority(5))
//!     .store();
//! ```

use chrono::{DateTime, TimeDelta, Utc};

use crate::core::{
    ActiveStatus, Admin, Assigner, Employee, Manager, System, Task, TaskStatus, Team,
};
use crate::store::{InMemoryStore, Snapshot};

/// Creation time given to every fixture task: 2025-03-01T09:00:00Z.
pub fn fixture_created_at() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(20_148) + TimeDelta::hours(9)
}

#[derive(Debug, Clone)]
pub struct TaskBuilder {
    task: Task,
}

/// A PENDING priority-3 task for employee `e1` on system `s1`.
pub fn task(id: impl Into<String>) -> TaskBuilder {
    let id = id.into();
    TaskBuilder {
        task: Task {
            title: format!("Task {id}"),
            id,
            status: TaskStatus::Pending,
            priority: 3,
            work_weight: None,
            employee_id: "e1".into(),
            system_id: "s1".into(),
            assigned_by: None,
            due_date: None,
            created_at: fixture_created_at(),
            completed_at: None,
        },
    }
}

impl TaskBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.task.title = title.into();
        self
    }

    pub fn employee(mut self, employee_id: impl Into<String>) -> Self {
        self.task.employee_id = employee_id.into();
        self
    }

    pub fn system(mut self, system_id: impl Into<String>) -> Self {
        self.task.system_id = system_id.into();
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.task.status = status;
        self
    }

    pub fn priority(mut self, priority: u8) -> Self {
        self.task.priority = priority;
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.task.work_weight = Some(weight);
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.task.created_at = at;
        self
    }

    pub fn completed_at(mut self, at: DateTime<Utc>) -> Self {
        self.task.completed_at = Some(at);
        self
    }

    pub fn due_date(mut self, at: DateTime<Utc>) -> Self {
        self.task.due_date = Some(at);
        self
    }

    pub fn assigned_by_admin(mut self, admin_id: impl Into<String>) -> Self {
        self.task.assigned_by = Some(Assigner::Admin(admin_id.into()));
        self
    }

    pub fn assigned_by_manager(mut self, manager_id: impl Into<String>) -> Self {
        self.task.assigned_by = Some(Assigner::Manager(manager_id.into()));
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

#[derive(Debug, Clone)]
pub struct EmployeeBuilder {
    employee: Employee,
}

/// A live employee named after its id, with an `@example.com` address.
pub fn employee(id: impl Into<String>) -> EmployeeBuilder {
    let id = id.into();
    EmployeeBuilder {
        employee: Employee {
            name: id.clone(),
            email: format!("{id}@example.com"),
            id,
            is_deleted: false,
            team_id: None,
            tasks: Vec::new(),
        },
    }
}

impl EmployeeBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.employee.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.employee.email = email.into();
        self
    }

    pub fn team(mut self, team_id: impl Into<String>) -> Self {
        self.employee.team_id = Some(team_id.into());
        self
    }

    pub fn deleted(mut self) -> Self {
        self.employee.is_deleted = true;
        self
    }

    /// Attaches a task, reassigning it to this employee.
    pub fn task(mut self, task: TaskBuilder) -> Self {
        let task = task.employee(self.employee.id.clone()).build();
        self.employee.tasks.push(task);
        self
    }

    pub fn build(self) -> Employee {
        self.employee
    }
}

#[derive(Debug, Clone)]
pub struct SystemBuilder {
    system: System,
}

/// An ACTIVE system of criticality 3.
pub fn system(id: impl Into<String>) -> SystemBuilder {
    let id = id.into();
    SystemBuilder {
        system: System {
            name: id.clone(),
            id,
            criticality: 3,
            status: ActiveStatus::Active,
            team_id: None,
            tasks: Vec::new(),
        },
    }
}

impl SystemBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.system.name = name.into();
        self
    }

    pub fn criticality(mut self, criticality: u8) -> Self {
        self.system.criticality = criticality;
        self
    }

    pub fn status(mut self, status: ActiveStatus) -> Self {
        self.system.status = status;
        self
    }

    pub fn team(mut self, team_id: impl Into<String>) -> Self {
        self.system.team_id = Some(team_id.into());
        self
    }

    /// Attaches a task, reassigning it to this system.
    pub fn task(mut self, task: TaskBuilder) -> Self {
        let task = task.system(self.system.id.clone()).build();
        self.system.tasks.push(task);
        self
    }

    pub fn build(self) -> System {
        self.system
    }
}

#[derive(Debug, Clone)]
pub struct TeamBuilder {
    team: Team,
}

pub fn team(id: impl Into<String>) -> TeamBuilder {
    let id = id.into();
    TeamBuilder {
        team: Team {
            name: id.clone(),
            id,
            status: ActiveStatus::Active,
            employees: Vec::new(),
            systems: Vec::new(),
        },
    }
}

impl TeamBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.team.name = name.into();
        self
    }

    pub fn status(mut self, status: ActiveStatus) -> Self {
        self.team.status = status;
        self
    }

    /// Adds a member carrying this team's id.
    pub fn member(mut self, employee: EmployeeBuilder) -> Self {
        let member = employee.team(self.team.id.clone()).build();
        self.team.employees.push(member);
        self
    }

    /// Adds an owned system carrying this team's id.
    pub fn owns(mut self, system: SystemBuilder) -> Self {
        let owned = system.team(self.team.id.clone()).build();
        self.team.systems.push(owned);
        self
    }

    pub fn build(self) -> Team {
        self.team
    }
}

#[derive(Debug, Clone)]
pub struct ManagerBuilder {
    manager: Manager,
}

pub fn manager(id: impl Into<String>) -> ManagerBuilder {
    let id = id.into();
    ManagerBuilder {
        manager: Manager {
            name: id.clone(),
            email: format!("{id}@example.com"),
            id,
            is_deleted: false,
            team_id: None,
        },
    }
}

impl ManagerBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.manager.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.manager.email = email.into();
        self
    }

    pub fn team(mut self, team_id: impl Into<String>) -> Self {
        self.manager.team_id = Some(team_id.into());
        self
    }

    pub fn deleted(mut self) -> Self {
        self.manager.is_deleted = true;
        self
    }

    pub fn build(self) -> Manager {
        self.manager
    }
}

#[derive(Debug, Clone)]
pub struct AdminBuilder {
    admin: Admin,
}

pub fn admin(id: impl Into<String>) -> AdminBuilder {
    let id = id.into();
    AdminBuilder {
        admin: Admin {
            name: id.clone(),
            email: format!("{id}@example.com"),
            id,
            is_deleted: false,
        },
    }
}

impl AdminBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.admin.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.admin.email = email.into();
        self
    }

    pub fn deleted(mut self) -> Self {
        self.admin.is_deleted = true;
        self
    }

    pub fn build(self) -> Admin {
        self.admin
    }
}

/// Collects fixtures into flat [`Snapshot`] tables.
///
/// Nested records are flattened: members of a team become employees,
/// tasks attached to an employee or system become task rows.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admin(mut self, admin: AdminBuilder) -> Self {
        self.snapshot.admins.push(admin.build());
        self
    }

    pub fn manager(mut self, manager: ManagerBuilder) -> Self {
        self.snapshot.managers.push(manager.build());
        self
    }

    pub fn team(mut self, team: TeamBuilder) -> Self {
        let mut team = team.build();
        for member in std::mem::take(&mut team.employees) {
            self.push_employee(member);
        }
        for owned in std::mem::take(&mut team.systems) {
            self.push_system(owned);
        }
        self.snapshot.teams.push(team);
        self
    }

    pub fn employee(mut self, employee: EmployeeBuilder) -> Self {
        self.push_employee(employee.build());
        self
    }

    pub fn system(mut self, system: SystemBuilder) -> Self {
        self.push_system(system.build());
        self
    }

    pub fn task(mut self, task: TaskBuilder) -> Self {
        self.snapshot.tasks.push(task.build());
        self
    }

    fn push_employee(&mut self, mut employee: Employee) {
        self.snapshot.tasks.append(&mut employee.tasks);
        self.snapshot.employees.push(employee);
    }

    fn push_system(&mut self, mut system: System) {
        self.snapshot.tasks.append(&mut system.tasks);
        self.snapshot.systems.push(system);
    }

    pub fn build(self) -> Snapshot {
        self.snapshot
    }

    /// # Panics
    ///
    /// Panics if the fixtures do not form a consistent snapshot.
    pub fn store(self) -> InMemoryStore {
        InMemoryStore::new(self.snapshot)
            .unwrap_or_else(|err| panic!("inconsistent test snapshot: {err}"))
    }
}
