//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod context;
pub mod init;
pub mod integration;
pub mod status;
pub mod users;

pub use args::{DisableInactiveArgs, MapGithubArgs, OutputFormat};
pub use context::CommandContext;

/// portsweep - Keep a Port organization's user directory tidy
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "PORTSWEEP_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override settings file location
    #[arg(long, global = true, env = "PORTSWEEP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "PORTSWEEP_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Port client ID (or PORT_CLIENT_ID)
    #[arg(long, global = true)]
    pub client_id: Option<String>,

    /// Port client secret (or PORT_CLIENT_SECRET)
    #[arg(long, global = true)]
    pub client_secret: Option<String>,

    /// Port API base URL (or PORT_BASE_URL) [default: https://api.port.io]
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save credentials and API location to the settings file
    Init,

    /// Show resolved configuration and where each value comes from
    Status,

    /// Manage Port users
    #[command(subcommand)]
    Users(UsersCommands),

    /// Manage installed integrations
    #[command(subcommand)]
    Integration(IntegrationCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   portsweep completion bash > /etc/bash_completion.d/portsweep
  zsh:    portsweep completion zsh > \"${fpath[1]}/_portsweep\"
  fish:   portsweep completion fish > ~/.config/fish/completions/portsweep.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// User management subcommands
#[derive(Subcommand, Debug)]
pub enum UsersCommands {
    /// Disable users who have not logged in recently
    DisableInactive(DisableInactiveArgs),

    /// Link GitHub user entities to Port users by email
    MapGithub(MapGithubArgs),
}

/// Integration subcommands
#[derive(Subcommand, Debug)]
pub enum IntegrationCommands {
    /// List installed integrations
    List,

    /// Trigger a resync of one integration
    Resync {
        /// Installation ID (see `integration list`)
        installation_id: String,
    },
}
