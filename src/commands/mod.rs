//! CLI command implementations for riskmap operations.
//!
//! Each submodule handles one subcommand. Commands that read entities share
//! [`load_env`], which resolves configuration and opens the snapshot store.
//!
//! Available commands:
//! - **dashboard**: organization-wide risk overview
//! - **landing**: business-impact statistics
//! - **employee / system / team / manager-team**: single-entity risk
//! - **employees / systems / teams**: paginated risk lists
//! - **profile**: role-tagged profile of a signed-in user
//! - **config**: show or validate the effective configuration
//! - **init**: write a starter `.riskmap.toml`

pub mod config;
pub mod dashboard;
pub mod entity;
pub mod init;
pub mod landing;
pub mod list;
pub mod profile;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::config::resolve_config;
use crate::env::RiskEnv;
use crate::store::InMemoryStore;

/// Effective configuration plus the store opened from `snapshot`.
pub fn load_env(config: Option<&Path>, snapshot: Option<&Path>) -> Result<RiskEnv> {
    let config = resolve_config(config, |name| std::env::var(name).ok())?;
    let snapshot = snapshot.context(
        "No entity snapshot given. Pass --snapshot <PATH> or set RISKMAP_SNAPSHOT.",
    )?;
    let store = InMemoryStore::from_path(snapshot)
        .with_context(|| format!("Failed to load snapshot {}", snapshot.display()))?;
    debug!(snapshot = %snapshot.display(), "Opened entity store");
    Ok(RiskEnv::new(store, config))
}

/// Dispatches a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let format = cli.format;
    let config = cli.config.as_deref();
    let snapshot = cli.snapshot.as_deref();

    match cli.command {
        Commands::Init { force } => init::init_config(force),
        Commands::Config { validate } => config::show_config(config, validate, format),
        command => {
            let env = load_env(config, snapshot)?;
            match command {
                Commands::Dashboard => dashboard::run(&env, format).await,
                Commands::Landing { as_of } => landing::run(&env, as_of, format).await,
                Commands::Employee { id, email } => {
                    entity::employee(&env, id.as_deref(), email.as_deref(), format).await
                }
                Commands::System { id } => entity::system(&env, &id, format).await,
                Commands::Team { id } => entity::team(&env, &id, format).await,
                Commands::ManagerTeam { manager_id, email } => {
                    entity::manager_team(&env, manager_id.as_deref(), email.as_deref(), format)
                        .await
                }
                Commands::Employees(args) => list::employees(&env, &args, format).await,
                Commands::Systems(args) => list::systems(&env, &args, format).await,
                Commands::Teams(args) => list::teams(&env, &args, format).await,
                Commands::Profile { email, role } => {
                    profile::run(&env, email, role, format).await
                }
                Commands::Init { .. } | Commands::Config { .. } => Ok(()),
            }
        }
    }
}
