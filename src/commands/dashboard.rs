use anyhow::Result;

use crate::cli::OutputFormat;
use crate::env::RiskEnv;
use crate::output;
use crate::risk::dashboard;

pub async fn run(env: &RiskEnv, format: OutputFormat) -> Result<()> {
    let dashboard = dashboard(env).await?;
    output::emit(&dashboard, format)
}
