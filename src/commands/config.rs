//! `riskmap config`: the effective configuration, or a validation report.

use std::path::Path;

use anyhow::{bail, Result};
use colored::Colorize;

use crate::cli::OutputFormat;
use crate::config::{apply_env_overrides, load_unvalidated_config, resolve_config, RiskmapConfig};
use crate::output;

/// Every problem in the file plus environment configuration, without repairs.
pub fn config_problems(explicit: Option<&Path>) -> Result<Vec<String>> {
    let raw = load_unvalidated_config(explicit)?;
    Ok(apply_env_overrides(raw).validation_errors())
}

pub fn show_config(explicit: Option<&Path>, validate: bool, format: OutputFormat) -> Result<()> {
    if validate {
        let problems = config_problems(explicit)?;
        if !problems.is_empty() {
            for problem in &problems {
                eprintln!("{} {}", "invalid:".red().bold(), problem);
            }
            bail!("Configuration has {} problem(s)", problems.len());
        }
        eprintln!("{}", "Configuration is valid".green());
    }

    let config: RiskmapConfig = resolve_config(explicit, |name| std::env::var(name).ok())?;
    output::emit(&config, format)
}
