//! Testing infrastructure for riskmap.
//!
//! Builders for every entity plus a [`SnapshotBuilder`] that turns them
//! into an [`InMemoryStore`](crate::store::InMemoryStore), so tests can
//! describe an organisation in a few lines without JSON fixtures.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use riskmap::config::RiskmapConfig;
//! use riskmap::env::RiskEnv;
//! use riskmap::testkit::{employee, system, task, SnapshotBuilder};
//!
//! #[tokio::test]
//! async fn busy_employee_is_high_risk() {
//!     let store = SnapshotBuilder::new()
//!         .system(system("s1"))
//!         .employee(employee("e1"))
//!         .task(task("k1").priority(5).weight(8.0))
//!         .store();
//!     let env = RiskEnv::new(store, RiskmapConfig::default());
//!     let risk = riskmap::risk::employee_risk(&env, "e1").await.unwrap();
//!     assert_eq!(risk.risk_level, riskmap::risk::RiskLevel::High);
//! }
//! ```

pub mod helpers;

pub use helpers::{
    admin, employee, fixture_created_at, manager, system, task, team, AdminBuilder,
    EmployeeBuilder, ManagerBuilder, SnapshotBuilder, SystemBuilder, TaskBuilder, TeamBuilder,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaskStatus;

    #[test]
    fn nested_fixtures_flatten_into_tables() {
        let snapshot = SnapshotBuilder::new()
            .team(
                team("t1")
                    .member(employee("e1").task(task("k1")))
                    .owns(system("s1").task(task("k2").status(TaskStatus::Completed))),
            )
            .build();

        assert_eq!(snapshot.employees.len(), 1);
        assert_eq!(snapshot.employees[0].team_id.as_deref(), Some("t1"));
        assert!(snapshot.employees[0].tasks.is_empty());
        assert_eq!(snapshot.systems[0].team_id.as_deref(), Some("t1"));
        assert!(snapshot.teams[0].employees.is_empty());
        assert_eq!(snapshot.tasks.len(), 2);
        assert!(snapshot.integrity_errors().is_empty());
    }

    #[test]
    fn fixture_dates_are_stable() {
        assert_eq!(
            fixture_created_at().to_rfc3339(),
            "2025-03-01T09:00:00+00:00"
        );
    }
}
