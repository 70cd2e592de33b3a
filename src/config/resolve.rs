//! Priority-ordered resolution of configuration values
//!
//! Every value is resolved by [`first_set`] over the same layer order:
//! flag, environment, settings file. Callers supply the environment as a
//! lookup function so resolution stays pure and testable.

use std::fmt;
use std::str::FromStr;

use super::{DEFAULT_BASE_URL, DEFAULT_DAYS_INACTIVE, Settings};
use crate::error::{ConfigError, Result};
use crate::sweep::BatchSize;

/// Environment variable names
pub mod env_keys {
    pub const CLIENT_ID: &str = "PORT_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "PORT_CLIENT_SECRET";
    pub const BASE_URL: &str = "PORT_BASE_URL";
    pub const DAYS_INACTIVE: &str = "DAYS_INACTIVE";
    pub const ORG_ID: &str = "PORT_ORG_ID";
    pub const BATCH_SIZE: &str = "PORT_BATCH_SIZE";
}

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    Env,
    File,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Source::Flag => "flag",
            Source::Env => "environment",
            Source::File => "settings file",
            Source::Default => "default",
        };
        f.write_str(label)
    }
}

/// A configuration value together with its source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Resolved<T> {
    pub fn new(value: T, source: Source) -> Self {
        Self { value, source }
    }
}

/// Pick the first layer that carries a value: flag, then env, then file.
pub fn first_set<T>(flag: Option<T>, env: Option<T>, file: Option<T>) -> Option<Resolved<T>> {
    flag.map(|v| Resolved::new(v, Source::Flag))
        .or_else(|| env.map(|v| Resolved::new(v, Source::Env)))
        .or_else(|| file.map(|v| Resolved::new(v, Source::File)))
}

/// Like [`first_set`], falling back to a default.
pub fn first_set_or<T>(flag: Option<T>, env: Option<T>, file: Option<T>, default: T) -> Resolved<T> {
    first_set(flag, env, file).unwrap_or_else(|| Resolved::new(default, Source::Default))
}

/// Look up a variable in the process environment, treating empty values as unset.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_string(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    env(key).filter(|v| !v.trim().is_empty())
}

fn env_parsed<T>(env: &dyn Fn(&str) -> Option<String>, key: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env_string(env, key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            ConfigError::Invalid {
                name: key,
                reason: format!("{:?}: {}", raw, e),
            }
            .into()
        }),
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

/// Connection-related values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub base_url: Option<String>,
}

/// Client credential pair
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Resolved connection settings
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub client_id: Option<Resolved<String>>,
    pub client_secret: Option<Resolved<String>>,
    pub base_url: Resolved<String>,
}

impl ConnectionConfig {
    /// Resolve connection settings across all layers
    pub fn resolve(
        flags: &ConnectionOverrides,
        env: &dyn Fn(&str) -> Option<String>,
        file: &Settings,
    ) -> Self {
        Self {
            client_id: first_set(
                non_empty(flags.client_id.as_ref()),
                env_string(env, env_keys::CLIENT_ID),
                non_empty(file.client_id.as_ref()),
            ),
            client_secret: first_set(
                non_empty(flags.client_secret.as_ref()),
                env_string(env, env_keys::CLIENT_SECRET),
                non_empty(file.client_secret.as_ref()),
            ),
            base_url: first_set_or(
                non_empty(flags.base_url.as_ref()),
                env_string(env, env_keys::BASE_URL),
                non_empty(file.base_url.as_ref()),
                DEFAULT_BASE_URL.to_string(),
            ),
        }
    }

    /// Get the credential pair, failing before any network call if incomplete
    pub fn credentials(&self) -> Result<Credentials> {
        let client_id = self
            .client_id
            .as_ref()
            .ok_or(ConfigError::MissingCredential("PORT_CLIENT_ID or --client-id"))?;
        let client_secret = self.client_secret.as_ref().ok_or(ConfigError::MissingCredential(
            "PORT_CLIENT_SECRET or --client-secret",
        ))?;

        Ok(Credentials {
            client_id: client_id.value.clone(),
            client_secret: client_secret.value.clone(),
        })
    }
}

/// Inactivity sweep values given on the command line
#[derive(Debug, Clone, Default)]
pub struct SweepOverrides {
    pub days_inactive: Option<u32>,
    pub org_id: Option<String>,
    pub batch_size: Option<usize>,
    pub dry_run: bool,
}

/// Resolved settings for one inactivity sweep
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub days_inactive: Resolved<u32>,
    pub org_id: Option<Resolved<String>>,
    pub batch_size: Resolved<BatchSize>,
    pub dry_run: bool,
}

impl SweepConfig {
    /// Resolve sweep settings across all layers
    pub fn resolve(
        flags: &SweepOverrides,
        env: &dyn Fn(&str) -> Option<String>,
        file: &Settings,
    ) -> Result<Self> {
        // Env values are only parsed when no flag shadows them
        let days_inactive = match flags.days_inactive {
            Some(days) => Resolved::new(days, Source::Flag),
            None => first_set_or(
                None,
                env_parsed::<u32>(env, env_keys::DAYS_INACTIVE)?,
                file.days_inactive,
                DEFAULT_DAYS_INACTIVE,
            ),
        };

        let org_id = first_set(
            non_empty(flags.org_id.as_ref()),
            env_string(env, env_keys::ORG_ID),
            non_empty(file.org_id.as_ref()),
        );

        let raw_batch = match flags.batch_size {
            Some(size) => Some(Resolved::new(size, Source::Flag)),
            None => first_set(
                None,
                env_parsed::<usize>(env, env_keys::BATCH_SIZE)?,
                file.batch_size,
            ),
        };
        let batch_size = match raw_batch {
            Some(Resolved { value, source }) => Resolved::new(BatchSize::new(value)?, source),
            None => Resolved::new(BatchSize::default(), Source::Default),
        };

        Ok(Self {
            days_inactive,
            org_id,
            batch_size,
            dry_run: flags.dry_run,
        })
    }

    /// Organization filter, if any
    pub fn org_filter(&self) -> Option<&str> {
        self.org_id.as_ref().map(|r| r.value.as_str())
    }
}
