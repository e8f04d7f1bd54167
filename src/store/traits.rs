//! The read-only contract between the risk engine and whatever holds the data.
//!
//! The risk engine never writes. Implementations only need to answer
//! filtered reads with relations attached as the query asks.

use async_trait::async_trait;

use super::query::{
    EmployeeFilter, EmployeeQuery, SystemFilter, SystemQuery, TaskFilter, TaskInclude, TaskQuery,
    TeamFilter, TeamQuery,
};
use crate::core::{Admin, Employee, Manager, System, Task, Team};
use crate::errors::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Entity store reads.
///
/// Point lookups return soft-deleted and `DELETED` records as-is; callers
/// decide whether such a record counts as found.
///
/// Implementations should be thread-safe (`Send + Sync`) so one store can
/// serve concurrent sweeps.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn find_employees(&self, query: &EmployeeQuery) -> StoreResult<Vec<Employee>>;

    async fn count_employees(&self, filter: &EmployeeFilter) -> StoreResult<usize>;

    async fn find_employee(&self, id: &str, tasks: TaskInclude) -> StoreResult<Option<Employee>>;

    async fn find_employee_by_email(
        &self,
        email: &str,
        tasks: TaskInclude,
    ) -> StoreResult<Option<Employee>>;

    async fn find_manager(&self, id: &str) -> StoreResult<Option<Manager>>;

    async fn find_manager_by_email(&self, email: &str) -> StoreResult<Option<Manager>>;

    async fn find_admin_by_email(&self, email: &str) -> StoreResult<Option<Admin>>;

    async fn find_systems(&self, query: &SystemQuery) -> StoreResult<Vec<System>>;

    async fn count_systems(&self, filter: &SystemFilter) -> StoreResult<usize>;

    async fn find_system(&self, id: &str, tasks: TaskInclude) -> StoreResult<Option<System>>;

    async fn find_teams(&self, query: &TeamQuery) -> StoreResult<Vec<Team>>;

    async fn count_teams(&self, filter: &TeamFilter) -> StoreResult<usize>;

    /// A team with its live employees (carrying `member_tasks`) and non-deleted systems.
    async fn find_team(&self, id: &str, member_tasks: TaskInclude) -> StoreResult<Option<Team>>;

    async fn find_tasks(&self, query: &TaskQuery) -> StoreResult<Vec<Task>>;

    async fn count_tasks(&self, filter: &TaskFilter) -> StoreResult<usize>;
}
