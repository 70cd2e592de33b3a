//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for settings loading, credential resolution, and client authentication.

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{AuthApi, PortClient};
use crate::config::{ConnectionConfig, Settings, process_env};
use crate::error::Result;

/// Context for command execution containing the client and runtime options.
pub struct CommandContext {
    /// API client holding a fresh access token
    pub client: PortClient,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context, loading the settings file first.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        let settings = Settings::load_at(opts.config_ref())?;
        Self::with_settings(opts, &settings).await
    }

    /// Create a command context from already loaded settings.
    ///
    /// This handles:
    /// - Resolving credentials and base URL across flags, env, and file
    /// - Creating the API client
    /// - Exchanging the credentials for an access token
    ///
    /// # Errors
    /// Returns a config error before any network call if a credential is
    /// missing, or an API error if authentication fails.
    pub async fn with_settings(opts: &GlobalOptions, settings: &Settings) -> Result<Self> {
        let connection = ConnectionConfig::resolve(&opts.connection, &process_env, settings);
        let credentials = connection.credentials()?;

        let client = PortClient::new(&connection.base_url.value)?;
        log::debug!(
            "Authenticating against {} (base URL from {})",
            connection.base_url.value,
            connection.base_url.source
        );
        let token = client.authenticate(&credentials).await?;
        client.set_token(token).await;

        Ok(Self {
            client,
            format: opts.format,
        })
    }
}
