//! Hand-computed scores for the scoring model and its calculators.

mod common;

use common::{acme_env, acme_env_with};
use pretty_assertions::assert_eq;
use riskmap::config::RiskmapConfig;
use riskmap::core::ActiveWorkload;
use riskmap::env::RiskEnv;
use riskmap::risk::{
    assess_employee, assess_system, assess_team, dashboard, employee_risk, manager_team_risk,
    system_risk, team_risk, Assessed, RiskLevel, RiskScore, SubjectType,
};
use riskmap::store::InMemoryStore;
use riskmap::testkit::{employee, system, task, team};

#[test]
fn single_heavy_task_employee_scores_sixty() {
    let person = employee("e1")
        .task(task("k1").priority(5).weight(2.0))
        .build();
    let risk = assess_employee(&person, &RiskmapConfig::default());
    assert_eq!(risk.risk_score.value(), 60);
    assert_eq!(risk.risk_level, RiskLevel::Medium);
}

#[test]
fn system_workload_is_halved() {
    let payments = system("s1")
        .criticality(5)
        .task(task("a").priority(4))
        .task(task("b").priority(2))
        .build();
    let risk = assess_system(&payments, &RiskmapConfig::default());
    assert_eq!(risk.risk_score.value(), 61);
    assert_eq!(risk.workload.task_count, 2);
    assert_eq!(risk.workload.average_priority, 3.0);
}

#[test]
fn empty_team_scores_zero() {
    let risk = assess_team(&team("t1").build(), &RiskmapConfig::default());
    assert_eq!(risk.risk_score, RiskScore::ZERO);
    assert_eq!(risk.risk_level, RiskLevel::Low);
    assert!(risk.employee_risks.is_empty());
}

#[tokio::test]
async fn empty_store_dashboard_is_all_zero() {
    let env = RiskEnv::new(InMemoryStore::default(), RiskmapConfig::default());
    let dashboard = dashboard(&env).await.unwrap();
    assert_eq!(dashboard.summary.high_risk_employee_count, 0);
    assert_eq!(dashboard.summary.high_risk_system_count, 0);
    assert_eq!(dashboard.summary.high_risk_team_count, 0);
    assert!(dashboard.rankings.top_risk_employees.is_empty());
    assert!(dashboard.rankings.top_risk_systems.is_empty());
    assert!(dashboard.rankings.top_risk_teams.is_empty());
}

#[tokio::test]
async fn fixture_scores_match_hand_computation() {
    let env = acme_env();

    let ada = employee_risk(&env, "e1").await.unwrap();
    assert_eq!(ada.risk.risk_score.value(), 60);
    assert_eq!(ada.active_tasks.len(), 2);

    let cleo = employee_risk(&env, "e3").await.unwrap();
    assert_eq!(cleo.risk.risk_score.value(), 72);
    assert_eq!(cleo.risk.risk_level, RiskLevel::High);

    let billing = system_risk(&env, "s1").await.unwrap();
    assert_eq!(billing.risk_score.value(), 82);
    assert_eq!(billing.risk_level, RiskLevel::High);

    // k6 belongs to a soft-deleted employee but still loads the system.
    let search = system_risk(&env, "s3").await.unwrap();
    assert_eq!(search.workload.task_count, 2);
    assert_eq!(search.risk_score.value(), 48);

    let platform = team_risk(&env, "t1").await.unwrap();
    assert_eq!(platform.risk_score.value(), 27);
    assert_eq!(platform.system_count, 2);
    let payments = team_risk(&env, "t2").await.unwrap();
    assert_eq!(payments.employee_count, 1);
    assert_eq!(payments.risk_score.value(), 60);
    assert_eq!(payments.risk_level, RiskLevel::Medium);
}

#[tokio::test]
async fn deleted_records_are_not_found() {
    let env = acme_env();
    assert!(employee_risk(&env, "e4").await.unwrap_err().is_not_found());
    assert!(system_risk(&env, "s4").await.unwrap_err().is_not_found());
    assert!(team_risk(&env, "t3").await.unwrap_err().is_not_found());
    assert!(employee_risk(&env, "nobody").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn manager_without_team_is_not_found() {
    let env = acme_env();
    let err = manager_team_risk(&env, "m2").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status_code(), 404);
    assert_eq!(manager_team_risk(&env, "m1").await.unwrap().team_id, "t1");
}

#[tokio::test]
async fn calculators_are_idempotent() {
    let env = acme_env();
    let first = dashboard(&env).await.unwrap();
    let second = dashboard(&env).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn injected_weights_change_scores() {
    let mut config = RiskmapConfig::default();
    config.scoring.workload = 0.0;
    let env = acme_env_with(config);
    // (3 * 0.8 + 5 * 0.6) * 10
    let cleo = employee_risk(&env, "e3").await.unwrap();
    assert_eq!(cleo.risk.risk_score.value(), 54);
}

#[test]
fn risk_result_exposes_supporting_metrics() {
    let person = employee("e1")
        .task(task("k1").priority(4).weight(3.0))
        .build();
    let result = assess_employee(&person, &RiskmapConfig::default()).to_result();
    assert_eq!(result.subject_type, SubjectType::Employee);
    assert_eq!(
        result.supporting_metrics,
        ActiveWorkload {
            task_count: 1,
            total_weight: 3.0,
            average_priority: 4.0,
        }
    );
}
