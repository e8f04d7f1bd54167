use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::UserRole;
use crate::risk::RiskLevel;
use crate::store::{PaginationOptions, SortField, SortOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Colored tables (default)
    #[default]
    Terminal,
}

#[derive(Parser, Debug)]
#[command(name = "riskmap")]
#[command(about = "Dependency-risk scoring for employees, systems and teams", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .riskmap.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON snapshot of the entity store
    #[arg(short, long, global = true, env = "RISKMAP_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal", global = true)]
    pub format: OutputFormat,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    /// -v: info, -vv: debug, -vvv: trace. RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Search, level filter and paging shared by the list commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive match on name (and email for employees)
    #[arg(long)]
    pub search: Option<String>,

    /// Only rows at this level (low, medium, high)
    #[arg(long = "risk-level")]
    pub risk_level: Option<RiskLevel>,

    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<usize>,

    /// Rows per page
    #[arg(long)]
    pub limit: Option<usize>,

    /// Sort field (riskScore, name)
    #[arg(long = "sort-by")]
    pub sort_by: Option<SortField>,

    /// Sort direction (asc, desc)
    #[arg(long = "sort-order")]
    pub sort_order: Option<SortOrder>,
}

impl ListArgs {
    pub fn pagination(&self) -> PaginationOptions {
        PaginationOptions {
            page: self.page,
            limit: self.limit,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Organization-wide risk overview
    Dashboard,

    /// Business-impact statistics
    Landing {
        /// Compute as of this RFC 3339 instant instead of now
        #[arg(long = "as-of")]
        as_of: Option<DateTime<Utc>>,
    },

    /// Risk of one employee
    Employee {
        /// Employee id
        #[arg(required_unless_present = "email")]
        id: Option<String>,

        /// Look the employee up by sign-in email instead
        #[arg(long, conflicts_with = "id")]
        email: Option<String>,
    },

    /// Risk of one system
    System {
        /// System id
        id: String,
    },

    /// Risk of one team with its member breakdown
    Team {
        /// Team id
        id: String,
    },

    /// Risk of the team a manager leads
    ManagerTeam {
        /// Manager id
        #[arg(required_unless_present = "email")]
        manager_id: Option<String>,

        /// Look the manager up by sign-in email instead
        #[arg(long, conflicts_with = "manager_id")]
        email: Option<String>,
    },

    /// Paginated employee risk list
    Employees(ListArgs),

    /// Paginated system risk list
    Systems(ListArgs),

    /// Paginated team risk list
    Teams(ListArgs),

    /// Profile of a signed-in user
    Profile {
        /// Sign-in email
        #[arg(long)]
        email: String,

        /// Role the user signed in with (admin, manager, employee)
        #[arg(long)]
        role: UserRole,
    },

    /// Show the effective configuration
    Config {
        /// Report configuration problems and exit non-zero if any
        #[arg(long)]
        validate: bool,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}
