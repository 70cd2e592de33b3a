//! portsweep - Keep a Port organization's user directory tidy

use clap::{CommandFactory, Parser};

mod cli;
mod client;
mod config;
mod error;
mod mapping;
mod models;
mod output;
mod sweep;

use cli::args::GlobalOptions;
use cli::{Cli, Commands, IntegrationCommands, UsersCommands};
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Values already in the environment win over the .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(err.exit_code());
    }
}

/// Log to stderr; RUST_LOG overrides the default filter
fn init_logging(debug: bool) {
    let default_filter = if debug { "portsweep=debug,warn" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
    log::debug!("Debug logging enabled");
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Users(users_cmd) => match users_cmd {
            UsersCommands::DisableInactive(args) => cli::users::disable_inactive(&opts, &args).await,
            UsersCommands::MapGithub(args) => cli::users::map_github(&opts, &args).await,
        },
        Commands::Integration(integration_cmd) => match integration_cmd {
            IntegrationCommands::List => cli::integration::list(&opts).await,
            IntegrationCommands::Resync { installation_id } => {
                cli::integration::resync(&opts, &installation_id).await
            }
        },
        Commands::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "portsweep",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
