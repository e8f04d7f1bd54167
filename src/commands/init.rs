use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;

const DEFAULT_CONFIG: &str = r#"# Riskmap Configuration
#
# Every value below is the built-in default. Environment variables such as
# RISK_WEIGHT_CRITICALITY or TEAM_CAPACITY_FACTOR override this file.

[scoring]
criticality = 0.8
priority = 0.6
workload = 0.3

[capacity]
default_employee_criticality = 3.0
team_capacity_factor = 3.0
system_capacity_factor = 2.0

# Scores at or above `high` are HIGH, at or above `medium` MEDIUM.
[thresholds.employee]
high = 70
medium = 30

[thresholds.system]
high = 70
medium = 30

[thresholds.team]
high = 70
medium = 30

[impact]
cost_savings_per_resolved_risk = 5000.0
revenue_loss_per_critical_system = 25000.0
downtime_minutes_per_critical_system = 120.0
high_priority = 4
critical_criticality = 3
resolution_sample_size = 50
trend_days = 7

[pagination]
default_limit = 10
max_limit = 100

[landing]
demo_mode_coverage = false
"#;

/// Writes the starter configuration into `dir`.
pub fn write_default_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

pub fn init_config(force: bool) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    write_default_config(&cwd, force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}
