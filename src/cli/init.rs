//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{AuthApi, PortClient};
use crate::config::{Credentials, DEFAULT_BASE_URL, Settings};
use crate::error::Result;

/// Run the init command
///
/// Prompts for credentials and API location, verifies them by requesting an
/// access token, then writes the settings file. Sweep settings already in the
/// file are kept.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to portsweep!".bold().green());
    println!("Let's set up your Port credentials.\n");

    let mut settings = Settings::load_at(opts.config_ref()).unwrap_or_default();
    let theme = ColorfulTheme::default();

    let mut client_id_prompt = Input::<String>::with_theme(&theme).with_prompt("Port client ID");
    if let Some(existing) = opts
        .connection
        .client_id
        .clone()
        .or_else(|| settings.client_id.clone())
    {
        client_id_prompt = client_id_prompt.default(existing);
    }
    let client_id = client_id_prompt.interact_text()?;

    let client_secret: String = Password::with_theme(&theme)
        .with_prompt("Port client secret")
        .interact()?;

    let base_url: String = Input::with_theme(&theme)
        .with_prompt("Port API base URL")
        .default(
            opts.connection
                .base_url
                .clone()
                .or_else(|| settings.base_url.clone())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        )
        .interact_text()?;

    println!("\n{}", "Authenticating...".cyan());
    let client = PortClient::new(&base_url)?;
    client
        .authenticate(&Credentials {
            client_id: client_id.clone(),
            client_secret: client_secret.clone(),
        })
        .await?;
    println!("{}", "✓ Authentication successful!".green());

    settings.client_id = Some(client_id);
    settings.client_secret = Some(client_secret);
    settings.base_url = (base_url != DEFAULT_BASE_URL).then_some(base_url);
    settings.save_at(opts.config_ref())?;

    let path = Settings::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "portsweep status".cyan());
    println!(
        "  {} - Preview inactive users",
        "portsweep users disable-inactive --dry-run".cyan()
    );

    Ok(())
}
