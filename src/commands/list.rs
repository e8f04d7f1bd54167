//! Paginated risk lists.

use anyhow::Result;

use crate::cli::{ListArgs, OutputFormat};
use crate::env::RiskEnv;
use crate::output;
use crate::risk::{list_employee_risks, list_system_risks, list_team_risks, RiskListQuery};

fn query(args: &ListArgs) -> RiskListQuery {
    RiskListQuery {
        search: args.search.clone(),
        risk_level: args.risk_level,
        pagination: args.pagination(),
    }
}

pub async fn employees(env: &RiskEnv, args: &ListArgs, format: OutputFormat) -> Result<()> {
    let page = list_employee_risks(env, &query(args)).await?;
    output::emit(&page, format)
}

pub async fn systems(env: &RiskEnv, args: &ListArgs, format: OutputFormat) -> Result<()> {
    let page = list_system_risks(env, &query(args)).await?;
    output::emit(&page, format)
}

pub async fn teams(env: &RiskEnv, args: &ListArgs, format: OutputFormat) -> Result<()> {
    let page = list_team_risks(env, &query(args)).await?;
    output::emit(&page, format)
}
