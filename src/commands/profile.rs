use anyhow::Result;

use crate::cli::OutputFormat;
use crate::core::{AuthUser, UserRole};
use crate::env::RiskEnv;
use crate::output;
use crate::profile::resolve_profile;

pub async fn run(env: &RiskEnv, email: String, role: UserRole, format: OutputFormat) -> Result<()> {
    let profile = resolve_profile(env, &AuthUser::new(email, role)).await?;
    output::emit(&profile, format)
}
