//! Landing page statistics: business-impact figures derived from the same
//! task and entity population as the risk engine.
//!
//! Every figure degrades to zero on an empty population.

pub mod trend;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, Instrument};

use crate::common::{format_currency, mean, rounded_percentage};
use crate::core::{EntityId, Task, TaskStatus};
use crate::env::RiskEnv;
use crate::errors::Result;
use crate::store::{
    EmployeeFilter, EmployeeQuery, SortOrder, SystemFilter, SystemQuery, TaskFilter, TaskOrder,
    TaskQuery, TeamFilter,
};

pub use trend::{daily_trend, day_end, trend_window, TrendPoint};

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub teams: usize,
    pub employees: usize,
    pub systems: usize,
    /// Share of active systems with at least one task.
    pub coverage: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeforeAfter {
    pub prevented_losses: f64,
    /// `"$12,000+"`, or `"$0"` when nothing was prevented.
    pub prevented_losses_label: String,
    pub resolved_high_priority_tasks: usize,
    pub avg_resolution_days: u32,
    pub attrition_rate: u32,
    pub protected_projects: usize,
    pub delayed_projects: usize,
    pub crisis_reduction: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskVisuals {
    pub critical_systems: usize,
    pub current_risk_revenue_loss: f64,
    pub estimated_downtime_minutes: f64,
    pub daily_trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingStats {
    pub hero: Hero,
    pub before_after: BeforeAfter,
    pub risk_visuals: RiskVisuals,
}

pub fn prevented_losses_label(amount: f64) -> String {
    if amount > 0.0 {
        format!("{}+", format_currency(amount))
    } else {
        "$0".to_string()
    }
}

/// Mean of `completed_at - created_at` in whole days. Negative spans count as 0.
pub fn average_resolution_days(tasks: &[Task]) -> u32 {
    let days = mean(tasks.iter().filter_map(|task| {
        task.completed_at.map(|done| {
            let seconds = (done - task.created_at).num_seconds().max(0) as f64;
            seconds / SECONDS_PER_DAY
        })
    }));
    days.round().max(0.0) as u32
}

/// Landing statistics as of `now`.
pub async fn landing_stats(env: &RiskEnv, now: DateTime<Utc>) -> Result<LandingStats> {
    collect(env, now)
        .instrument(info_span!("landing_stats", %now))
        .await
}

async fn collect(env: &RiskEnv, now: DateTime<Utc>) -> Result<LandingStats> {
    let store = env.store();
    let config = env.config();
    let impact = &config.impact;

    let high_priority = TaskFilter::with_statuses([
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ])
    .priority_at_least(impact.high_priority);
    let resolved_high = TaskFilter::with_statuses([TaskStatus::Completed])
        .priority_at_least(impact.high_priority);

    let active_teams = TeamFilter::active();
    let live_query = EmployeeQuery::new(EmployeeFilter::live());
    let deleted = EmployeeFilter::deleted();
    let active_systems = SystemFilter::active();
    let covered = SystemFilter::active().has_tasks(true);
    let protected = SystemFilter::active().criticality_below(impact.critical_criticality);
    let critical = SystemFilter::active().criticality_at_least(impact.critical_criticality);

    let (
        teams,
        live_employees,
        deleted_employees,
        systems,
        covered_systems,
        protected_projects,
        critical_systems,
        resolved_high_priority_tasks,
        high_priority_tasks,
    ) = tokio::try_join!(
        store.count_teams(&active_teams),
        store.find_employees(&live_query),
        store.count_employees(&deleted),
        store.count_systems(&active_systems),
        store.count_systems(&covered),
        store.count_systems(&protected),
        store.count_systems(&critical),
        store.count_tasks(&resolved_high),
        store.count_tasks(&high_priority),
    )?;

    let sample = store
        .find_tasks(
            &TaskQuery::new(
                TaskFilter::with_statuses([TaskStatus::Completed]).has_completed_at(true),
            )
            .order(TaskOrder::CompletedAt(SortOrder::Desc))
            .take(impact.resolution_sample_size),
        )
        .await?;

    let overdue = TaskFilter::with_statuses([TaskStatus::Pending, TaskStatus::InProgress])
        .due_before(now);
    let overdue_systems: HashSet<EntityId> = store
        .find_tasks(&TaskQuery::new(overdue))
        .await?
        .into_iter()
        .map(|task| task.system_id)
        .collect();
    let delayed_projects = store
        .find_systems(&SystemQuery::new(SystemFilter::active()))
        .await?
        .iter()
        .filter(|system| overdue_systems.contains(&system.id))
        .count();

    let window = trend_window(now, impact.trend_days);
    let trend_tasks = match (window.first(), window.last()) {
        (Some(&first), Some(&last)) => {
            let live: HashSet<&str> = live_employees.iter().map(|e| e.id.as_str()).collect();
            store
                .find_tasks(&TaskQuery::new(
                    TaskFilter::with_statuses([
                        TaskStatus::Pending,
                        TaskStatus::InProgress,
                        TaskStatus::Completed,
                    ])
                    .created_at_or_before(day_end(last))
                    .open_or_completed_after(day_end(first)),
                ))
                .await?
                .into_iter()
                .filter(|task| live.contains(task.employee_id.as_str()))
                .collect()
        }
        _ => Vec::new(),
    };
    debug!(
        sample = sample.len(),
        trend_tasks = trend_tasks.len(),
        "Landing inputs loaded"
    );

    let employees = live_employees.len();
    let mut coverage = rounded_percentage(covered_systems, systems);
    if coverage == 0 && config.landing.demo_mode_coverage {
        coverage = 100;
    }

    let prevented_losses =
        resolved_high_priority_tasks as f64 * impact.cost_savings_per_resolved_risk;
    let capacity = trend::capacity(employees, config.capacity.team_capacity_factor);

    Ok(LandingStats {
        hero: Hero {
            teams,
            employees,
            systems,
            coverage,
        },
        before_after: BeforeAfter {
            prevented_losses,
            prevented_losses_label: prevented_losses_label(prevented_losses),
            resolved_high_priority_tasks,
            avg_resolution_days: average_resolution_days(&sample),
            attrition_rate: rounded_percentage(deleted_employees, employees + deleted_employees),
            protected_projects,
            delayed_projects,
            crisis_reduction: rounded_percentage(resolved_high_priority_tasks, high_priority_tasks),
        },
        risk_visuals: RiskVisuals {
            critical_systems,
            current_risk_revenue_loss: critical_systems as f64
                * impact.revenue_loss_per_critical_system,
            estimated_downtime_minutes: critical_systems as f64
                * impact.downtime_minutes_per_critical_system,
            daily_trend: daily_trend(&trend_tasks, &window, capacity),
        },
    })
}
