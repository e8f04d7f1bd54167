use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::cli::OutputFormat;
use crate::env::RiskEnv;
use crate::landing::landing_stats;
use crate::output;

/// Landing statistics as of `as_of`, or the current instant.
pub async fn run(env: &RiskEnv, as_of: Option<DateTime<Utc>>, format: OutputFormat) -> Result<()> {
    let now = as_of.unwrap_or_else(Utc::now);
    let stats = landing_stats(env, now).await?;
    output::emit(&stats, format)
}
