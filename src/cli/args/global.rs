//! Global CLI options shared across all commands
//!
//! Handlers receive one struct instead of each global flag separately.

use crate::cli::{Cli, OutputFormat};
use crate::config::ConnectionOverrides;

/// Global CLI options passed to all command handlers.
///
/// This captures the flag layer only. Environment and settings file values
/// are resolved later in `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json)
    pub format: OutputFormat,

    /// Custom settings file path (defaults to ~/.portsweep/config.yaml)
    pub config: Option<String>,

    /// Connection flags (client id, secret, base URL)
    pub connection: ConnectionOverrides,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    ///
    /// This is the primary constructor, called once in main.rs after parsing.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            connection: ConnectionOverrides {
                client_id: cli.client_id.clone(),
                client_secret: cli.client_secret.clone(),
                base_url: cli.base_url.clone(),
            },
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli() {
        let cli = Cli::try_parse_from([
            "portsweep",
            "--format",
            "json",
            "--config",
            "/custom/path",
            "--client-id",
            "id-1",
            "status",
        ])
        .unwrap();
        let opts = GlobalOptions::from_cli(&cli);

        assert_eq!(opts.format, OutputFormat::Json);
        assert_eq!(opts.config_ref(), Some("/custom/path"));
        assert_eq!(opts.connection.client_id.as_deref(), Some("id-1"));
        assert!(opts.connection.client_secret.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "portsweep",
            "users",
            "disable-inactive",
            "--dry-run",
            "--base-url",
            "http://localhost:8080",
        ])
        .unwrap();
        let opts = GlobalOptions::from_cli(&cli);

        assert_eq!(
            opts.connection.base_url.as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(opts.config_ref(), None);
    }
}
