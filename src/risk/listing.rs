//! Paginated risk listings with search and a risk-level filter.
//!
//! Scores only exist after assessment, so a risk-level filter or a
//! risk-score sort needs the whole matching population. The level filter
//! runs before the page is cut and `meta.total` counts filtered rows. A
//! plain name-ordered listing without a level filter is paged by the store.

use tracing::{debug, info_span, Instrument};

use super::employee::{assess_employee, EmployeeRisk};
use super::system::{assess_system, SystemRisk};
use super::team::{assess_team, TeamRisk};
use super::{Assessed, RiskLevel};
use crate::env::RiskEnv;
use crate::errors::Result;
use crate::store::{
    calculate_pagination, EmployeeFilter, EmployeeQuery, Paginated, Pagination,
    PaginationOptions, SortField, SystemFilter, SystemQuery, TaskInclude, TeamFilter, TeamQuery,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskListQuery {
    /// Case-insensitive match on name (and email for employees).
    pub search: Option<String>,
    pub risk_level: Option<RiskLevel>,
    pub pagination: PaginationOptions,
}

impl RiskListQuery {
    fn search(&self) -> Option<String> {
        self.search
            .as_ref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Whether the store can cut the page itself.
    fn store_paged(&self, pagination: &Pagination) -> bool {
        self.risk_level.is_none() && pagination.sort_by == SortField::Name
    }
}

fn sort_rows<R: Assessed>(rows: &mut [R], pagination: &Pagination) {
    match pagination.sort_by {
        SortField::RiskScore => {
            rows.sort_by(|a, b| {
                pagination
                    .sort_order
                    .apply(a.risk_score().cmp(&b.risk_score()))
                    .then_with(|| a.name().cmp(b.name()))
            });
        }
        SortField::Name => {
            rows.sort_by(|a, b| pagination.sort_order.apply(a.name().cmp(b.name())));
        }
    }
}

/// Level filter, then ordering, then the page cut.
fn filter_and_page<R: Assessed>(
    rows: Vec<R>,
    level: Option<RiskLevel>,
    pagination: &Pagination,
) -> Paginated<R> {
    let mut rows: Vec<R> = rows
        .into_iter()
        .filter(|row| level.is_none_or(|wanted| row.risk_level() == wanted))
        .collect();
    sort_rows(&mut rows, pagination);
    Paginated::from_rows(rows, pagination)
}

pub async fn list_employee_risks(
    env: &RiskEnv,
    query: &RiskListQuery,
) -> Result<Paginated<EmployeeRisk>> {
    let pagination = calculate_pagination(&query.pagination, &env.config().pagination);
    let span = info_span!("list_employee_risks", page = pagination.page);
    employee_page(env, query, &pagination).instrument(span).await
}

async fn employee_page(
    env: &RiskEnv,
    query: &RiskListQuery,
    pagination: &Pagination,
) -> Result<Paginated<EmployeeRisk>> {
    let config = env.config();
    let filter = EmployeeFilter::live().with_search(query.search());
    let store = env.store();

    if query.store_paged(pagination) {
        let page_query = EmployeeQuery::new(filter.clone())
            .include_tasks(TaskInclude::Active)
            .order_by_name(pagination.sort_order)
            .page(pagination.skip, pagination.limit);
        let employees = store.find_employees(&page_query).await?;
        let total = store.count_employees(&filter).await?;
        let rows = employees.iter().map(|e| assess_employee(e, config)).collect();
        return Ok(Paginated::from_page(rows, pagination, total));
    }

    let employees = store
        .find_employees(&EmployeeQuery::new(filter).include_tasks(TaskInclude::Active))
        .await?;
    debug!(matched = employees.len(), "Assessing employees");
    let rows = employees.iter().map(|e| assess_employee(e, config)).collect();
    Ok(filter_and_page(rows, query.risk_level, pagination))
}

/// Lists ACTIVE and INACTIVE systems.
pub async fn list_system_risks(
    env: &RiskEnv,
    query: &RiskListQuery,
) -> Result<Paginated<SystemRisk>> {
    let config = env.config();
    let pagination = calculate_pagination(&query.pagination, &config.pagination);
    let filter = SystemFilter::not_deleted().with_search(query.search());
    let store = env.store();

    if query.store_paged(&pagination) {
        let page_query = SystemQuery::new(filter.clone())
            .include_tasks(TaskInclude::Active)
            .order_by_name(pagination.sort_order)
            .page(pagination.skip, pagination.limit);
        let systems = store.find_systems(&page_query).await?;
        let total = store.count_systems(&filter).await?;
        let rows = systems.iter().map(|s| assess_system(s, config)).collect();
        return Ok(Paginated::from_page(rows, &pagination, total));
    }

    let systems = store
        .find_systems(&SystemQuery::new(filter).include_tasks(TaskInclude::Active))
        .await?;
    let rows = systems.iter().map(|s| assess_system(s, config)).collect();
    Ok(filter_and_page(rows, query.risk_level, &pagination))
}

/// Lists ACTIVE and INACTIVE teams.
pub async fn list_team_risks(env: &RiskEnv, query: &RiskListQuery) -> Result<Paginated<TeamRisk>> {
    let config = env.config();
    let pagination = calculate_pagination(&query.pagination, &config.pagination);
    let filter = TeamFilter::not_deleted().with_search(query.search());
    let store = env.store();

    if query.store_paged(&pagination) {
        let page_query = TeamQuery::new(filter.clone())
            .include_members(TaskInclude::Active)
            .order_by_name(pagination.sort_order)
            .page(pagination.skip, pagination.limit);
        let teams = store.find_teams(&page_query).await?;
        let total = store.count_teams(&filter).await?;
        let rows = teams.iter().map(|t| assess_team(t, config)).collect();
        return Ok(Paginated::from_page(rows, &pagination, total));
    }

    let teams = store
        .find_teams(&TeamQuery::new(filter).include_members(TaskInclude::Active))
        .await?;
    let rows = teams.iter().map(|t| assess_team(t, config)).collect();
    Ok(filter_and_page(rows, query.risk_level, &pagination))
}
