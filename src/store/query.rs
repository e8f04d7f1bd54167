//! Typed filters and queries accepted by [`EntityStore`](super::EntityStore).
//!
//! Every filter field is optional; `None` means "no constraint". Filters
//! are plain data with a `matches` predicate so any store implementation
//! can evaluate them the same way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{ActiveStatus, Employee, EntityId, System, Task, TaskStatus, Team};

/// Which tasks to attach to employees and systems returned by a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskInclude {
    #[default]
    None,
    /// Only PENDING and IN_PROGRESS tasks.
    Active,
    All,
}

impl TaskInclude {
    pub fn admits(self, task: &Task) -> bool {
        match self {
            TaskInclude::None => false,
            TaskInclude::Active => task.is_active(),
            TaskInclude::All => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// Case-insensitive substring match; an empty needle matches everything.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn status_admitted<S: PartialEq>(statuses: &Option<Vec<S>>, status: &S) -> bool {
    statuses
        .as_ref()
        .is_none_or(|allowed| allowed.contains(status))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeFilter {
    pub is_deleted: Option<bool>,
    pub team_id: Option<EntityId>,
    /// Matches name or email.
    pub search: Option<String>,
}

impl EmployeeFilter {
    /// Employees that have not been soft-deleted.
    pub fn live() -> Self {
        Self {
            is_deleted: Some(false),
            ..Default::default()
        }
    }

    pub fn deleted() -> Self {
        Self {
            is_deleted: Some(true),
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        self.is_deleted.is_none_or(|d| employee.is_deleted == d)
            && self
                .team_id
                .as_ref()
                .is_none_or(|team| employee.team_id.as_ref() == Some(team))
            && self.search.as_deref().is_none_or(|needle| {
                contains_ignore_case(&employee.name, needle)
                    || contains_ignore_case(&employee.email, needle)
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeQuery {
    pub filter: EmployeeFilter,
    pub include_tasks: TaskInclude,
    /// Order by name; `None` keeps store order.
    pub name_order: Option<SortOrder>,
    pub skip: usize,
    pub take: Option<usize>,
}

impl EmployeeQuery {
    pub fn new(filter: EmployeeFilter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn include_tasks(mut self, include: TaskInclude) -> Self {
        self.include_tasks = include;
        self
    }

    pub fn order_by_name(mut self, order: SortOrder) -> Self {
        self.name_order = Some(order);
        self
    }

    pub fn page(mut self, skip: usize, take: usize) -> Self {
        self.skip = skip;
        self.take = Some(take);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemFilter {
    pub statuses: Option<Vec<ActiveStatus>>,
    pub criticality_at_least: Option<u8>,
    pub criticality_below: Option<u8>,
    /// Whether the system has at least one task of any status.
    pub has_tasks: Option<bool>,
    pub team_id: Option<EntityId>,
    pub search: Option<String>,
}

impl SystemFilter {
    pub fn with_status(status: ActiveStatus) -> Self {
        Self {
            statuses: Some(vec![status]),
            ..Default::default()
        }
    }

    pub fn active() -> Self {
        Self::with_status(ActiveStatus::Active)
    }

    /// ACTIVE or INACTIVE systems.
    pub fn not_deleted() -> Self {
        Self {
            statuses: Some(vec![ActiveStatus::Active, ActiveStatus::Inactive]),
            ..Default::default()
        }
    }

    pub fn criticality_at_least(mut self, min: u8) -> Self {
        self.criticality_at_least = Some(min);
        self
    }

    pub fn criticality_below(mut self, bound: u8) -> Self {
        self.criticality_below = Some(bound);
        self
    }

    pub fn has_tasks(mut self, has_tasks: bool) -> Self {
        self.has_tasks = Some(has_tasks);
        self
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    /// `task_count` is the number of tasks (any status) on the system.
    pub fn matches(&self, system: &System, task_count: usize) -> bool {
        status_admitted(&self.statuses, &system.status)
            && self
                .criticality_at_least
                .is_none_or(|min| system.criticality >= min)
            && self
                .criticality_below
                .is_none_or(|bound| system.criticality < bound)
            && self.has_tasks.is_none_or(|wanted| (task_count > 0) == wanted)
            && self
                .team_id
                .as_ref()
                .is_none_or(|team| system.team_id.as_ref() == Some(team))
            && self
                .search
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(&system.name, needle))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemQuery {
    pub filter: SystemFilter,
    pub include_tasks: TaskInclude,
    pub name_order: Option<SortOrder>,
    pub skip: usize,
    pub take: Option<usize>,
}

impl SystemQuery {
    pub fn new(filter: SystemFilter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn include_tasks(mut self, include: TaskInclude) -> Self {
        self.include_tasks = include;
        self
    }

    pub fn order_by_name(mut self, order: SortOrder) -> Self {
        self.name_order = Some(order);
        self
    }

    pub fn page(mut self, skip: usize, take: usize) -> Self {
        self.skip = skip;
        self.take = Some(take);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamFilter {
    pub statuses: Option<Vec<ActiveStatus>>,
    pub search: Option<String>,
}

impl TeamFilter {
    pub fn active() -> Self {
        Self {
            statuses: Some(vec![ActiveStatus::Active]),
            ..Default::default()
        }
    }

    pub fn not_deleted() -> Self {
        Self {
            statuses: Some(vec![ActiveStatus::Active, ActiveStatus::Inactive]),
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    pub fn matches(&self, team: &Team) -> bool {
        status_admitted(&self.statuses, &team.status)
            && self
                .search
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(&team.name, needle))
    }
}

/// Team reads. When `member_tasks` is not `None`, teams come back with
/// their live employees (carrying those tasks) and their non-deleted systems.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamQuery {
    pub filter: TeamFilter,
    pub include_members: bool,
    pub member_tasks: TaskInclude,
    pub name_order: Option<SortOrder>,
    pub skip: usize,
    pub take: Option<usize>,
}

impl TeamQuery {
    pub fn new(filter: TeamFilter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn include_members(mut self, member_tasks: TaskInclude) -> Self {
        self.include_members = true;
        self.member_tasks = member_tasks;
        self
    }

    pub fn order_by_name(mut self, order: SortOrder) -> Self {
        self.name_order = Some(order);
        self
    }

    pub fn page(mut self, skip: usize, take: usize) -> Self {
        self.skip = skip;
        self.take = Some(take);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub statuses: Option<Vec<TaskStatus>>,
    pub priority_at_least: Option<u8>,
    /// Due date strictly before this instant.
    pub due_before: Option<DateTime<Utc>>,
    pub created_at_or_before: Option<DateTime<Utc>>,
    /// Not completed, or completed strictly after this instant.
    pub open_or_completed_after: Option<DateTime<Utc>>,
    pub has_completed_at: Option<bool>,
    pub employee_id: Option<EntityId>,
    pub system_id: Option<EntityId>,
}

impl TaskFilter {
    pub fn with_statuses(statuses: impl Into<Vec<TaskStatus>>) -> Self {
        Self {
            statuses: Some(statuses.into()),
            ..Default::default()
        }
    }

    pub fn priority_at_least(mut self, min: u8) -> Self {
        self.priority_at_least = Some(min);
        self
    }

    pub fn due_before(mut self, instant: DateTime<Utc>) -> Self {
        self.due_before = Some(instant);
        self
    }

    pub fn created_at_or_before(mut self, instant: DateTime<Utc>) -> Self {
        self.created_at_or_before = Some(instant);
        self
    }

    pub fn open_or_completed_after(mut self, instant: DateTime<Utc>) -> Self {
        self.open_or_completed_after = Some(instant);
        self
    }

    pub fn has_completed_at(mut self, present: bool) -> Self {
        self.has_completed_at = Some(present);
        self
    }

    pub fn matches(&self, task: &Task) -> bool {
        status_admitted(&self.statuses, &task.status)
            && self.priority_at_least.is_none_or(|min| task.priority >= min)
            && self
                .due_before
                .is_none_or(|bound| task.due_date.is_some_and(|due| due < bound))
            && self
                .created_at_or_before
                .is_none_or(|bound| task.created_at <= bound)
            && self
                .open_or_completed_after
                .is_none_or(|bound| task.completed_at.is_none_or(|done| done > bound))
            && self
                .has_completed_at
                .is_none_or(|wanted| task.completed_at.is_some() == wanted)
            && self
                .employee_id
                .as_ref()
                .is_none_or(|id| &task.employee_id == id)
            && self
                .system_id
                .as_ref()
                .is_none_or(|id| &task.system_id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOrder {
    /// Tasks without `completed_at` sort last in either direction.
    CompletedAt(SortOrder),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQuery {
    pub filter: TaskFilter,
    pub order: Option<TaskOrder>,
    pub take: Option<usize>,
}

impl TaskQuery {
    pub fn new(filter: TaskFilter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn order(mut self, order: TaskOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn take(mut self, take: usize) -> Self {
        self.take = Some(take);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{employee, system, task};
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn employee_search_matches_name_or_email_case_insensitively() {
        let ada = employee("e1").name("Ada Lovelace").email("ada@corp.io").build();
        let filter = EmployeeFilter::live().with_search(Some("LOVE".into()));
        assert!(filter.matches(&ada));
        let filter = EmployeeFilter::live().with_search(Some("CORP.IO".into()));
        assert!(filter.matches(&ada));
        let filter = EmployeeFilter::live().with_search(Some("grace".into()));
        assert!(!filter.matches(&ada));
    }

    #[test]
    fn live_filter_excludes_soft_deleted() {
        let gone = employee("e2").deleted().build();
        assert!(!EmployeeFilter::live().matches(&gone));
        assert!(EmployeeFilter::deleted().matches(&gone));
        assert!(EmployeeFilter::default().matches(&gone));
    }

    #[test]
    fn system_filter_combines_status_and_criticality_bounds() {
        let billing = system("s1").criticality(4).build();
        assert!(SystemFilter::active().criticality_at_least(3).matches(&billing, 0));
        assert!(!SystemFilter::active().criticality_below(3).matches(&billing, 0));
        assert!(!SystemFilter::active().has_tasks(true).matches(&billing, 0));
        assert!(SystemFilter::active().has_tasks(true).matches(&billing, 2));

        let retired = system("s2").status(ActiveStatus::Deleted).build();
        assert!(!SystemFilter::not_deleted().matches(&retired, 0));
    }

    #[test]
    fn task_filter_time_bounds() {
        let t = task("t1")
            .created_at(at(2))
            .completed_at(at(5))
            .status(TaskStatus::Completed)
            .build();
        assert!(TaskFilter::default().created_at_or_before(at(2)).matches(&t));
        assert!(!TaskFilter::default().created_at_or_before(at(1)).matches(&t));
        assert!(TaskFilter::default().open_or_completed_after(at(4)).matches(&t));
        assert!(!TaskFilter::default().open_or_completed_after(at(5)).matches(&t));
        assert!(TaskFilter::default().has_completed_at(true).matches(&t));
    }

    #[test]
    fn due_before_ignores_tasks_without_due_date() {
        let undated = task("t1").build();
        let dated = task("t2").due_date(at(3)).build();
        let filter = TaskFilter::default().due_before(at(4));
        assert!(!filter.matches(&undated));
        assert!(filter.matches(&dated));
    }

    #[test]
    fn sort_order_parses_and_applies() {
        assert_eq!("ASC".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!(
            SortOrder::Desc.apply(1.cmp(&2)),
            std::cmp::Ordering::Greater
        );
    }
}
