mod common;

use chrono::NaiveDate;
use common::{acme_env, acme_env_with, fixture_now};
use pretty_assertions::assert_eq;
use riskmap::config::{resolve_config, RiskmapConfig, CONFIG_FILE_NAME, MAX_TREND_DAYS};
use riskmap::env::RiskEnv;
use riskmap::landing::landing_stats;
use riskmap::risk::{dashboard, RiskLevel};
use riskmap::store::InMemoryStore;

#[tokio::test]
async fn dashboard_summarizes_fixture() {
    let dashboard = dashboard(&acme_env()).await.unwrap();

    assert_eq!(dashboard.summary.high_risk_employee_count, 1);
    assert_eq!(dashboard.summary.high_risk_system_count, 1);
    assert_eq!(dashboard.summary.high_risk_team_count, 0);

    let employees: Vec<_> = dashboard
        .rankings
        .top_risk_employees
        .iter()
        .map(|r| (r.name.as_str(), r.risk_score.value()))
        .collect();
    assert_eq!(employees, vec![("Cleo", 72), ("Ada", 60), ("Ben", 0)]);

    let systems: Vec<_> = dashboard
        .charts
        .system_risk_chart
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(systems, vec!["Billing", "Search", "Wiki"]);

    let teams: Vec<_> = dashboard
        .rankings
        .top_risk_teams
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(teams, vec!["Payments", "Platform"]);

    assert_eq!(dashboard.tables.high_risk_systems[0].system_id, "s1");
    assert!(dashboard.tables.high_risk_teams.is_empty());
}

#[tokio::test]
async fn dashboard_sweeps_skip_deleted_records() {
    let dashboard = dashboard(&acme_env()).await.unwrap();
    assert!(dashboard
        .charts
        .employee_risk_chart
        .iter()
        .all(|r| r.employee_id != "e4"));
    assert!(dashboard.charts.system_risk_chart.iter().all(|r| r.system_id != "s4"));
    assert!(dashboard.charts.team_risk_chart.iter().all(|r| r.team_id != "t3"));
}

#[tokio::test]
async fn stricter_thresholds_reclassify_rows() {
    let mut config = RiskmapConfig::default();
    config.thresholds.employee.high = 55;
    let dashboard = dashboard(&acme_env_with(config)).await.unwrap();
    assert_eq!(dashboard.summary.high_risk_employee_count, 2);
    assert!(dashboard
        .tables
        .high_risk_employees
        .iter()
        .all(|r| r.risk_level == RiskLevel::High));
}

#[tokio::test]
async fn landing_stats_on_populated_snapshot() {
    let stats = landing_stats(&acme_env(), fixture_now()).await.unwrap();

    assert_eq!(stats.hero.teams, 2);
    assert_eq!(stats.hero.employees, 3);
    assert_eq!(stats.hero.systems, 3);
    assert_eq!(stats.hero.coverage, 100);

    let before = &stats.before_after;
    assert_eq!(before.resolved_high_priority_tasks, 1);
    assert_eq!(before.prevented_losses, 5000.0);
    assert_eq!(before.prevented_losses_label, "$5,000+");
    // (3 days + 4 days) / 2, rounded
    assert_eq!(before.avg_resolution_days, 4);
    assert_eq!(before.attrition_rate, 25);
    assert_eq!(before.protected_projects, 1);
    assert_eq!(before.delayed_projects, 1);
    assert_eq!(before.crisis_reduction, 25);

    let visuals = &stats.risk_visuals;
    assert_eq!(visuals.critical_systems, 2);
    assert_eq!(visuals.current_risk_revenue_loss, 50_000.0);
    assert_eq!(visuals.estimated_downtime_minutes, 240.0);
}

#[tokio::test]
async fn landing_trend_is_seven_days_oldest_first() {
    let stats = landing_stats(&acme_env(), fixture_now()).await.unwrap();
    let trend = &stats.risk_visuals.daily_trend;

    assert_eq!(trend.len(), 7);
    assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
    assert_eq!(trend[6].date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());

    let active: Vec<_> = trend.iter().map(|p| p.active_tasks).collect();
    assert_eq!(active, vec![3, 3, 2, 2, 3, 3, 3]);
    let load: Vec<_> = trend.iter().map(|p| p.load_percent).collect();
    assert_eq!(load, vec![33, 33, 22, 22, 33, 33, 33]);
}

#[tokio::test]
async fn no_employees_gives_flat_trend() {
    let env = RiskEnv::new(InMemoryStore::default(), RiskmapConfig::default());
    let stats = landing_stats(&env, fixture_now()).await.unwrap();
    assert_eq!(stats.hero.employees, 0);
    assert_eq!(stats.risk_visuals.daily_trend.len(), 7);
    assert!(stats
        .risk_visuals
        .daily_trend
        .iter()
        .all(|p| p.active_tasks == 0 && p.load_percent == 0));
    assert_eq!(stats.before_after.crisis_reduction, 0);
    assert_eq!(stats.hero.coverage, 0);
}

#[tokio::test]
async fn oversized_trend_length_never_panics() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[impact]\ntrend_days = 200000000\n").unwrap();
    let config = resolve_config(Some(&path), |_| None).unwrap();
    assert_eq!(config.impact.trend_days, 7);
    let stats = landing_stats(&acme_env_with(config), fixture_now())
        .await
        .unwrap();
    assert_eq!(stats.risk_visuals.daily_trend.len(), 7);

    let mut unchecked = RiskmapConfig::default();
    unchecked.impact.trend_days = 200_000_000;
    let stats = landing_stats(&acme_env_with(unchecked), fixture_now())
        .await
        .unwrap();
    let trend = &stats.risk_visuals.daily_trend;
    assert_eq!(trend.len(), MAX_TREND_DAYS);
    assert_eq!(
        trend.last().map(|p| p.date),
        NaiveDate::from_ymd_opt(2025, 3, 10)
    );
}

#[tokio::test]
async fn impact_constants_are_configurable() {
    let mut config = RiskmapConfig::default();
    config.impact.revenue_loss_per_critical_system = 1_000.0;
    config.impact.cost_savings_per_resolved_risk = 12_000.0;
    let stats = landing_stats(&acme_env_with(config), fixture_now())
        .await
        .unwrap();
    assert_eq!(stats.risk_visuals.current_risk_revenue_loss, 2_000.0);
    assert_eq!(stats.before_after.prevented_losses_label, "$12,000+");
}

#[tokio::test]
async fn landing_json_shape() {
    let stats = landing_stats(&acme_env(), fixture_now()).await.unwrap();
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["hero"]["coverage"], 100);
    assert_eq!(json["beforeAfter"]["preventedLossesLabel"], "$5,000+");
    assert_eq!(json["riskVisuals"]["dailyTrend"][0]["date"], "2025-03-04");
    assert_eq!(json["riskVisuals"]["dailyTrend"][0]["loadPercent"], 33);
}
