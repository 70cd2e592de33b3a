//! Arguments of the user commands

use clap::Args;

use crate::config::SweepOverrides;
use crate::mapping::DEFAULT_GITHUB_BLUEPRINT;

/// Options for `users disable-inactive`.
///
/// Values left unset fall back to the environment, then the settings file.
#[derive(Debug, Clone, Args, Default)]
pub struct DisableInactiveArgs {
    /// Days without a login before a user counts as inactive [default: 45]
    #[arg(long, value_name = "DAYS")]
    pub days_inactive: Option<u32>,

    /// Only consider logins to this organization
    #[arg(long, value_name = "ORG_ID")]
    pub org_id: Option<String>,

    /// Users per bulk request, 1 to 20 [default: 20]
    #[arg(long, value_name = "N")]
    pub batch_size: Option<usize>,

    /// Report inactive users without disabling them
    #[arg(long)]
    pub dry_run: bool,
}

impl DisableInactiveArgs {
    /// Flag layer for sweep settings resolution
    pub fn overrides(&self) -> SweepOverrides {
        SweepOverrides {
            days_inactive: self.days_inactive,
            org_id: self.org_id.clone(),
            batch_size: self.batch_size,
            dry_run: self.dry_run,
        }
    }
}

/// Options for `users map-github`
#[derive(Debug, Clone, Args)]
pub struct MapGithubArgs {
    /// Blueprint holding GitHub user entities
    #[arg(
        long,
        env = "GITHUB_USER_BLUEPRINT",
        default_value = DEFAULT_GITHUB_BLUEPRINT,
        hide_env = true
    )]
    pub github_blueprint: String,

    /// Blueprint holding platform user entities
    #[arg(long, env = "USER_BLUEPRINT", default_value = "_user", hide_env = true)]
    pub user_blueprint: String,

    /// Print the planned links without updating any entity
    #[arg(long)]
    pub dry_run: bool,
}
