//! Integration commands

use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::IntegrationApi;
use crate::error::Result;
use crate::models::IntegrationDisplay;
use crate::output;

/// Run the integration list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let integrations = ctx.client.list_integrations().await?;
    debug!("Fetched {} integrations", integrations.len());

    let rows: Vec<IntegrationDisplay> = integrations.iter().map(IntegrationDisplay::from).collect();
    output::print(&rows, ctx.format)
}

/// Run the integration resync command
pub async fn resync(opts: &GlobalOptions, installation_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    ctx.client.resync_integration(installation_id).await?;

    match ctx.format {
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "installationId": installation_id,
            "resync": "requested"
        })),
        OutputFormat::Pretty | OutputFormat::Table => {
            println!(
                "{} Resync requested for integration {}",
                "✓".green(),
                installation_id.bold()
            );
            Ok(())
        }
    }
}
