// Shared fixtures for riskmap integration tests
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use riskmap::config::RiskmapConfig;
use riskmap::core::{ActiveStatus, TaskStatus};
use riskmap::env::RiskEnv;
use riskmap::store::Snapshot;
use riskmap::testkit::{admin, employee, manager, system, task, team, SnapshotBuilder};
use std::path::{Path, PathBuf};

/// 2025-03-`day` at `hour`:00 UTC.
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
}

/// The instant the landing fixture figures are computed for.
pub fn fixture_now() -> DateTime<Utc> {
    at(10, 12)
}

/// A small organisation with one record of every interesting kind.
///
/// Expected default-config scores:
/// - employees: Cleo 72 HIGH, Ada 60 MEDIUM, Ben 0 LOW (Dan is soft-deleted)
/// - systems: Billing 82 HIGH, Search 48 MEDIUM, Wiki 0 LOW (Old is DELETED)
/// - teams: Payments 60 MEDIUM, Platform 27 LOW (Legacy is DELETED)
pub fn acme_snapshot() -> Snapshot {
    SnapshotBuilder::new()
        .team(team("t1").name("Platform"))
        .team(team("t2").name("Payments"))
        .team(team("t3").name("Legacy").status(ActiveStatus::Deleted))
        .admin(admin("a1").name("Root").email("root@acme.io"))
        .manager(manager("m1").name("Mia").email("lead@acme.io").team("t1"))
        .manager(manager("m2").name("Flo").email("float@acme.io"))
        .employee(employee("e1").name("Ada").email("ada@acme.io").team("t1"))
        .employee(employee("e2").name("Ben").email("ben@acme.io").team("t1"))
        .employee(employee("e3").name("Cleo").email("cleo@acme.io").team("t2"))
        .employee(employee("e4").name("Dan").email("dan@acme.io").team("t2").deleted())
        .system(system("s1").name("Billing").criticality(5).team("t2"))
        .system(system("s2").name("Wiki").criticality(1).team("t1"))
        .system(system("s3").name("Search").criticality(3).team("t1"))
        .system(system("s4").name("Old").criticality(4).status(ActiveStatus::Deleted))
        .task(
            task("k1")
                .employee("e1")
                .system("s1")
                .priority(5)
                .weight(2.0)
                .created_at(at(1, 9))
                .assigned_by_manager("m1"),
        )
        .task(
            task("k2")
                .employee("e1")
                .system("s3")
                .priority(4)
                .status(TaskStatus::InProgress)
                .created_at(at(2, 9))
                .due_date(at(5, 0)),
        )
        .task(
            task("k3")
                .employee("e2")
                .system("s2")
                .priority(2)
                .status(TaskStatus::Completed)
                .created_at(at(1, 9))
                .completed_at(at(4, 9)),
        )
        .task(
            task("k4")
                .employee("e3")
                .system("s1")
                .priority(5)
                .status(TaskStatus::Completed)
                .created_at(at(2, 9))
                .completed_at(at(6, 9))
                .assigned_by_admin("a1"),
        )
        .task(
            task("k5")
                .employee("e3")
                .system("s1")
                .priority(4)
                .status(TaskStatus::Cancelled)
                .created_at(at(3, 9)),
        )
        .task(
            task("k6")
                .employee("e4")
                .system("s3")
                .priority(3)
                .created_at(at(5, 9)),
        )
        .task(
            task("k7")
                .employee("e3")
                .system("s1")
                .priority(5)
                .weight(6.0)
                .created_at(at(8, 9)),
        )
        .build()
}

pub fn acme_env() -> RiskEnv {
    acme_env_with(RiskmapConfig::default())
}

pub fn acme_env_with(config: RiskmapConfig) -> RiskEnv {
    let store = riskmap::store::InMemoryStore::new(acme_snapshot()).unwrap();
    RiskEnv::new(store, config)
}

/// Writes the fixture snapshot as JSON into `dir`.
pub fn write_acme_snapshot(dir: &Path) -> PathBuf {
    let path = dir.join("snapshot.json");
    let json = serde_json::to_string_pretty(&acme_snapshot()).unwrap();
    std::fs::write(&path, json).unwrap();
    path
}
