//! Status command implementation

use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::{
    ConnectionConfig, Resolved, Settings, Source, SweepConfig, SweepOverrides, process_env,
};
use crate::error::Result;
use crate::output;

/// One resolved setting as shown by `status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    pub name: &'static str,
    /// Display value; `None` when unset. Secrets are never included.
    pub value: Option<String>,
    pub source: Option<String>,
    #[serde(skip)]
    pub is_default: bool,
}

impl StatusEntry {
    fn from_resolved<T: ToString>(name: &'static str, resolved: Option<&Resolved<T>>) -> Self {
        Self {
            name,
            value: resolved.map(|r| r.value.to_string()),
            source: resolved.map(|r| r.source.to_string()),
            is_default: resolved.is_some_and(|r| r.source == Source::Default),
        }
    }

    fn secret(name: &'static str, resolved: Option<&Resolved<String>>) -> Self {
        Self {
            name,
            value: resolved.map(|_| "********".to_string()),
            source: resolved.map(|r| r.source.to_string()),
            is_default: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct StatusReport {
    settings_path: String,
    settings_found: bool,
    entries: Vec<StatusEntry>,
}

/// Resolve every setting without touching the network
pub fn collect_entries(
    connection: &ConnectionConfig,
    sweep: &SweepConfig,
) -> Vec<StatusEntry> {
    vec![
        StatusEntry::from_resolved("client id", connection.client_id.as_ref()),
        StatusEntry::secret("client secret", connection.client_secret.as_ref()),
        StatusEntry::from_resolved("base URL", Some(&connection.base_url)),
        StatusEntry::from_resolved("days inactive", Some(&sweep.days_inactive)),
        StatusEntry::from_resolved("org filter", sweep.org_id.as_ref()),
        StatusEntry::from_resolved("batch size", Some(&sweep.batch_size)),
    ]
}

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let path = Settings::resolve_path(opts.config_ref())?;
    let settings_found = path.exists();
    let settings = Settings::load_from(&path)?;

    let connection = ConnectionConfig::resolve(&opts.connection, &process_env, &settings);
    let sweep = SweepConfig::resolve(&SweepOverrides::default(), &process_env, &settings)?;
    let entries = collect_entries(&connection, &sweep);

    if opts.format == OutputFormat::Json {
        return output::print_json(&StatusReport {
            settings_path: path.display().to_string(),
            settings_found,
            entries,
        });
    }

    println!("{}\n", "portsweep Configuration Status".bold());
    if settings_found {
        println!("Settings file: {}", path.display().to_string().cyan());
    } else {
        println!(
            "Settings file: {} {}",
            path.display().to_string().cyan(),
            "(not found)".dimmed()
        );
    }
    println!();

    for entry in &entries {
        match (&entry.value, &entry.source) {
            (Some(value), Some(source)) => {
                let marker = if entry.is_default {
                    "○".dimmed()
                } else {
                    "✓".green()
                };
                println!(
                    "{} {}: {} {}",
                    marker,
                    entry.name,
                    value,
                    format!("({})", source).dimmed()
                );
            }
            _ => println!("{} {}: {}", "✗".red(), entry.name, "not set".dimmed()),
        }
    }

    if connection.credentials().is_err() {
        println!();
        println!(
            "  → Run {} or set PORT_CLIENT_ID and PORT_CLIENT_SECRET",
            "portsweep init".cyan()
        );
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectionOverrides;

    #[test]
    fn test_entries_hide_secret() {
        let settings = Settings {
            client_id: Some("id-1".to_string()),
            client_secret: Some("hunter2".to_string()),
            ..Default::default()
        };
        let no_env = |_: &str| -> Option<String> { None };
        let connection =
            ConnectionConfig::resolve(&ConnectionOverrides::default(), &no_env, &settings);
        let sweep = SweepConfig::resolve(&SweepOverrides::default(), &no_env, &settings).unwrap();

        let entries = collect_entries(&connection, &sweep);
        let rendered = serde_json::to_string(&entries).unwrap();

        assert!(!rendered.contains("hunter2"));
        assert_eq!(entries[0].value.as_deref(), Some("id-1"));
        assert_eq!(entries[0].source.as_deref(), Some("settings file"));
        assert_eq!(entries[1].value.as_deref(), Some("********"));
        assert_eq!(entries[2].source.as_deref(), Some("default"));
        assert_eq!(entries[5].value.as_deref(), Some("20"));
    }

    #[test]
    fn test_entries_unset_values() {
        let no_env = |_: &str| -> Option<String> { None };
        let connection = ConnectionConfig::resolve(
            &ConnectionOverrides::default(),
            &no_env,
            &Settings::default(),
        );
        let sweep =
            SweepConfig::resolve(&SweepOverrides::default(), &no_env, &Settings::default())
                .unwrap();

        let entries = collect_entries(&connection, &sweep);
        assert!(entries[0].value.is_none());
        assert!(entries[1].source.is_none());
        assert!(entries[4].value.is_none());
    }
}
