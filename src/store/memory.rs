//! Snapshot-backed reference implementation of [`EntityStore`].
//!
//! A [`Snapshot`] holds flat tables, the way a relational store would.
//! Relations are assembled on every read, so returned records never share
//! state with the store.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::query::{
    EmployeeFilter, EmployeeQuery, SortOrder, SystemFilter, SystemQuery, TaskFilter, TaskInclude,
    TaskOrder, TaskQuery, TeamFilter, TeamQuery,
};
use super::traits::{EntityStore, StoreResult};
use crate::core::{
    ActiveStatus, Admin, Assigner, Employee, EntityId, Manager, System, Task, Team,
};
use crate::errors::StoreError;

/// Flat tables as exported from the relational store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub admins: Vec<Admin>,
    #[serde(default)]
    pub managers: Vec<Manager>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub systems: Vec<System>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Referential integrity and value-range problems, empty when consistent.
    pub fn integrity_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let admins = unique_ids("admin", self.admins.iter().map(|a| &a.id), &mut errors);
        let managers = unique_ids("manager", self.managers.iter().map(|m| &m.id), &mut errors);
        let employees = unique_ids("employee", self.employees.iter().map(|e| &e.id), &mut errors);
        let teams = unique_ids("team", self.teams.iter().map(|t| &t.id), &mut errors);
        let systems = unique_ids("system", self.systems.iter().map(|s| &s.id), &mut errors);
        unique_ids("task", self.tasks.iter().map(|t| &t.id), &mut errors);

        let team_refs = self
            .employees
            .iter()
            .map(|e| ("employee", &e.id, &e.team_id))
            .chain(self.managers.iter().map(|m| ("manager", &m.id, &m.team_id)))
            .chain(self.systems.iter().map(|s| ("system", &s.id, &s.team_id)));
        for (kind, id, team_id) in team_refs {
            if let Some(team_id) = team_id {
                if !teams.contains(team_id.as_str()) {
                    errors.push(format!("{kind} {id} references unknown team {team_id}"));
                }
            }
        }

        for system in &self.systems {
            if system.criticality > 5 {
                errors.push(format!(
                    "system {} has criticality {} (must be 0-5)",
                    system.id, system.criticality
                ));
            }
        }

        for task in &self.tasks {
            if !employees.contains(task.employee_id.as_str()) {
                errors.push(format!(
                    "task {} references unknown employee {}",
                    task.id, task.employee_id
                ));
            }
            if !systems.contains(task.system_id.as_str()) {
                errors.push(format!(
                    "task {} references unknown system {}",
                    task.id, task.system_id
                ));
            }
            if !(1..=5).contains(&task.priority) {
                errors.push(format!(
                    "task {} has priority {} (must be 1-5)",
                    task.id, task.priority
                ));
            }
            match &task.assigned_by {
                Some(Assigner::Admin(id)) if !admins.contains(id.as_str()) => {
                    errors.push(format!("task {} assigned by unknown admin {id}", task.id))
                }
                Some(Assigner::Manager(id)) if !managers.contains(id.as_str()) => {
                    errors.push(format!("task {} assigned by unknown manager {id}", task.id))
                }
                _ => {}
            }
        }

        errors
    }
}

fn unique_ids<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a EntityId>,
    errors: &mut Vec<String>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.as_str()) {
            errors.push(format!("duplicate {kind} id {id}"));
        }
    }
    seen
}

/// In-memory [`EntityStore`] over a validated [`Snapshot`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    snapshot: Snapshot,
    tasks_by_employee: HashMap<EntityId, Vec<usize>>,
    tasks_by_system: HashMap<EntityId, Vec<usize>>,
}

impl InMemoryStore {
    pub fn new(mut snapshot: Snapshot) -> Result<Self, StoreError> {
        let errors = snapshot.integrity_errors();
        if !errors.is_empty() {
            return Err(StoreError::Inconsistent(errors.join("; ")));
        }

        // Relations come from the flat tables only.
        snapshot.employees.iter_mut().for_each(|e| e.tasks.clear());
        snapshot.systems.iter_mut().for_each(|s| s.tasks.clear());
        snapshot.teams.iter_mut().for_each(|t| {
            t.employees.clear();
            t.systems.clear();
        });

        let mut tasks_by_employee: HashMap<EntityId, Vec<usize>> = HashMap::new();
        let mut tasks_by_system: HashMap<EntityId, Vec<usize>> = HashMap::new();
        for (index, task) in snapshot.tasks.iter().enumerate() {
            tasks_by_employee
                .entry(task.employee_id.clone())
                .or_default()
                .push(index);
            tasks_by_system
                .entry(task.system_id.clone())
                .or_default()
                .push(index);
        }

        debug!(
            employees = snapshot.employees.len(),
            systems = snapshot.systems.len(),
            teams = snapshot.teams.len(),
            tasks = snapshot.tasks.len(),
            "Loaded snapshot"
        );

        Ok(Self {
            snapshot,
            tasks_by_employee,
            tasks_by_system,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        Self::new(Snapshot::from_path(path)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Self::new(Snapshot::from_json(json)?)
    }

    fn tasks_in(
        &self,
        index: &HashMap<EntityId, Vec<usize>>,
        owner: &str,
        include: TaskInclude,
    ) -> Vec<Task> {
        if include == TaskInclude::None {
            return Vec::new();
        }
        index
            .get(owner)
            .into_iter()
            .flatten()
            .map(|&i| &self.snapshot.tasks[i])
            .filter(|task| include.admits(task))
            .cloned()
            .collect()
    }

    fn task_count(&self, system_id: &str) -> usize {
        self.tasks_by_system.get(system_id).map_or(0, Vec::len)
    }

    fn hydrate_employee(&self, employee: &Employee, include: TaskInclude) -> Employee {
        Employee {
            tasks: self.tasks_in(&self.tasks_by_employee, &employee.id, include),
            ..employee.clone()
        }
    }

    fn hydrate_system(&self, system: &System, include: TaskInclude) -> System {
        System {
            tasks: self.tasks_in(&self.tasks_by_system, &system.id, include),
            ..system.clone()
        }
    }

    fn hydrate_team(&self, team: &Team, member_tasks: TaskInclude) -> Team {
        let team_id = Some(&team.id);
        Team {
            employees: self
                .snapshot
                .employees
                .iter()
                .filter(|e| !e.is_deleted && e.team_id.as_ref() == team_id)
                .map(|e| self.hydrate_employee(e, member_tasks))
                .collect(),
            systems: self
                .snapshot
                .systems
                .iter()
                .filter(|s| s.status != ActiveStatus::Deleted && s.team_id.as_ref() == team_id)
                .map(|s| self.hydrate_system(s, TaskInclude::None))
                .collect(),
            ..team.clone()
        }
    }
}

/// Orders by name when asked, then applies `skip`/`take`.
fn order_and_page<'a, T>(
    mut rows: Vec<&'a T>,
    name: impl Fn(&T) -> &str,
    order: Option<SortOrder>,
    skip: usize,
    take: Option<usize>,
) -> Vec<&'a T> {
    if let Some(order) = order {
        rows.sort_by(|a, b| order.apply(name(a).cmp(name(b))));
    }
    rows.into_iter()
        .skip(skip)
        .take(take.unwrap_or(usize::MAX))
        .collect()
}

fn by_completion(a: &Task, b: &Task, order: SortOrder) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a.completed_at, b.completed_at) {
        (Some(x), Some(y)) => order.apply(x.cmp(&y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn find_employees(&self, query: &EmployeeQuery) -> StoreResult<Vec<Employee>> {
        let matching = self
            .snapshot
            .employees
            .iter()
            .filter(|e| query.filter.matches(e))
            .collect();
        Ok(order_and_page(
            matching,
            |e: &Employee| e.name.as_str(),
            query.name_order,
            query.skip,
            query.take,
        )
        .into_iter()
        .map(|e| self.hydrate_employee(e, query.include_tasks))
        .collect())
    }

    async fn count_employees(&self, filter: &EmployeeFilter) -> StoreResult<usize> {
        Ok(self
            .snapshot
            .employees
            .iter()
            .filter(|e| filter.matches(e))
            .count())
    }

    async fn find_employee(&self, id: &str, tasks: TaskInclude) -> StoreResult<Option<Employee>> {
        Ok(self
            .snapshot
            .employees
            .iter()
            .find(|e| e.id == id)
            .map(|e| self.hydrate_employee(e, tasks)))
    }

    async fn find_employee_by_email(
        &self,
        email: &str,
        tasks: TaskInclude,
    ) -> StoreResult<Option<Employee>> {
        Ok(self
            .snapshot
            .employees
            .iter()
            .find(|e| e.email.eq_ignore_ascii_case(email))
            .map(|e| self.hydrate_employee(e, tasks)))
    }

    async fn find_manager(&self, id: &str) -> StoreResult<Option<Manager>> {
        Ok(self.snapshot.managers.iter().find(|m| m.id == id).cloned())
    }

    async fn find_manager_by_email(&self, email: &str) -> StoreResult<Option<Manager>> {
        Ok(self
            .snapshot
            .managers
            .iter()
            .find(|m| m.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_admin_by_email(&self, email: &str) -> StoreResult<Option<Admin>> {
        Ok(self
            .snapshot
            .admins
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_systems(&self, query: &SystemQuery) -> StoreResult<Vec<System>> {
        let matching = self
            .snapshot
            .systems
            .iter()
            .filter(|s| query.filter.matches(s, self.task_count(&s.id)))
            .collect();
        Ok(order_and_page(
            matching,
            |s: &System| s.name.as_str(),
            query.name_order,
            query.skip,
            query.take,
        )
        .into_iter()
        .map(|s| self.hydrate_system(s, query.include_tasks))
        .collect())
    }

    async fn count_systems(&self, filter: &SystemFilter) -> StoreResult<usize> {
        Ok(self
            .snapshot
            .systems
            .iter()
            .filter(|s| filter.matches(s, self.task_count(&s.id)))
            .count())
    }

    async fn find_system(&self, id: &str, tasks: TaskInclude) -> StoreResult<Option<System>> {
        Ok(self
            .snapshot
            .systems
            .iter()
            .find(|s| s.id == id)
            .map(|s| self.hydrate_system(s, tasks)))
    }

    async fn find_teams(&self, query: &TeamQuery) -> StoreResult<Vec<Team>> {
        let matching = self
            .snapshot
            .teams
            .iter()
            .filter(|t| query.filter.matches(t))
            .collect();
        Ok(order_and_page(
            matching,
            |t: &Team| t.name.as_str(),
            query.name_order,
            query.skip,
            query.take,
        )
        .into_iter()
        .map(|t| {
            if query.include_members {
                self.hydrate_team(t, query.member_tasks)
            } else {
                t.clone()
            }
        })
        .collect())
    }

    async fn count_teams(&self, filter: &TeamFilter) -> StoreResult<usize> {
        Ok(self
            .snapshot
            .teams
            .iter()
            .filter(|t| filter.matches(t))
            .count())
    }

    async fn find_team(&self, id: &str, member_tasks: TaskInclude) -> StoreResult<Option<Team>> {
        Ok(self
            .snapshot
            .teams
            .iter()
            .find(|t| t.id == id)
            .map(|t| self.hydrate_team(t, member_tasks)))
    }

    async fn find_tasks(&self, query: &TaskQuery) -> StoreResult<Vec<Task>> {
        let mut matching: Vec<&Task> = self
            .snapshot
            .tasks
            .iter()
            .filter(|t| query.filter.matches(t))
            .collect();

        match query.order {
            Some(TaskOrder::CompletedAt(order)) => {
                matching.sort_by(|a, b| by_completion(a, b, order))
            }
            None => {}
        }

        Ok(matching
            .into_iter()
            .take(query.take.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count_tasks(&self, filter: &TaskFilter) -> StoreResult<usize> {
        Ok(self
            .snapshot
            .tasks
            .iter()
            .filter(|t| filter.matches(t))
            .count())
    }
}
