//! Global risk dashboard: all three sweeps, ranked and summarized.

use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};

use super::employee::{employee_risk_sweep, EmployeeRisk};
use super::system::{system_risk_sweep, SystemRisk};
use super::team::{team_risk_sweep, TeamRisk};
use super::{rank_by_risk, Assessed, RiskLevel};
use crate::env::RiskEnv;
use crate::errors::Result;

/// Entries per category in the rankings.
pub const TOP_N: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub high_risk_employee_count: usize,
    pub high_risk_team_count: usize,
    pub high_risk_system_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    pub top_risk_employees: Vec<EmployeeRisk>,
    pub top_risk_systems: Vec<SystemRisk>,
    pub top_risk_teams: Vec<TeamRisk>,
}

/// Full sorted series, one per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charts {
    pub employee_risk_chart: Vec<EmployeeRisk>,
    pub system_risk_chart: Vec<SystemRisk>,
    pub team_risk_chart: Vec<TeamRisk>,
}

/// HIGH-level rows only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tables {
    pub high_risk_employees: Vec<EmployeeRisk>,
    pub high_risk_systems: Vec<SystemRisk>,
    pub high_risk_teams: Vec<TeamRisk>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub rankings: Rankings,
    pub charts: Charts,
    pub tables: Tables,
}

fn top<R: Clone>(rows: &[R]) -> Vec<R> {
    rows.iter().take(TOP_N).cloned().collect()
}

fn high<R: Assessed + Clone>(rows: &[R]) -> Vec<R> {
    rows.iter()
        .filter(|row| row.risk_level() == RiskLevel::High)
        .cloned()
        .collect()
}

/// Pure assembly from unranked sweeps.
pub fn build_dashboard(
    mut employees: Vec<EmployeeRisk>,
    mut systems: Vec<SystemRisk>,
    mut teams: Vec<TeamRisk>,
) -> Dashboard {
    rank_by_risk(&mut employees);
    rank_by_risk(&mut systems);
    rank_by_risk(&mut teams);

    let tables = Tables {
        high_risk_employees: high(&employees),
        high_risk_systems: high(&systems),
        high_risk_teams: high(&teams),
    };

    Dashboard {
        summary: DashboardSummary {
            high_risk_employee_count: tables.high_risk_employees.len(),
            high_risk_team_count: tables.high_risk_teams.len(),
            high_risk_system_count: tables.high_risk_systems.len(),
        },
        rankings: Rankings {
            top_risk_employees: top(&employees),
            top_risk_systems: top(&systems),
            top_risk_teams: top(&teams),
        },
        charts: Charts {
            employee_risk_chart: employees,
            system_risk_chart: systems,
            team_risk_chart: teams,
        },
        tables,
    }
}

/// Runs the three sweeps concurrently and assembles the dashboard.
pub async fn dashboard(env: &RiskEnv) -> Result<Dashboard> {
    sweep_and_build(env).instrument(info_span!("dashboard")).await
}

async fn sweep_and_build(env: &RiskEnv) -> Result<Dashboard> {
    let (employees, systems, teams) = tokio::try_join!(
        employee_risk_sweep(env),
        system_risk_sweep(env),
        team_risk_sweep(env),
    )?;
    let dashboard = build_dashboard(employees, systems, teams);
    info!(
        high_employees = dashboard.summary.high_risk_employee_count,
        high_systems = dashboard.summary.high_risk_system_count,
        high_teams = dashboard.summary.high_risk_team_count,
        "Dashboard assembled"
    );
    Ok(dashboard)
}
