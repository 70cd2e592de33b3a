//! Error types for the portsweep CLI

use thiserror::Error;

/// Result type alias for portsweep operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Every error that reaches `main` ends the run, so all kinds map to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Api(_)
            | Error::Config(_)
            | Error::Payload(_)
            | Error::Io(_)
            | Error::Prompt(_)
            | Error::Json(_)
            | Error::Other(_) => 1,
        }
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to get token ({status}): {body}")]
    AuthFailed { status: u16, body: String },

    #[error("Token response missing accessToken")]
    MissingAccessToken,

    #[error("Failed to fetch users ({status}): {body}")]
    FetchFailed { status: u16, body: String },

    #[error("Bulk disable failed ({status}): {body}")]
    DispatchFailed { status: u16, body: String },

    #[error("Request to {path} failed ({status}): {body}")]
    RequestFailed {
        path: String,
        status: u16,
        body: String,
    },

    #[error("Not authenticated. Call authenticate before making API requests.")]
    NotAuthenticated,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required credential: {0}")]
    MissingCredential(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("Failed to parse settings file: {0}")]
    ParseError(String),

    #[error("Failed to save settings file: {0}")]
    SaveError(String),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Response bodies that decoded as JSON but match none of the expected shapes
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Unexpected {resource} payload: expected a list, found {found}")]
    UnrecognizedShape {
        resource: &'static str,
        found: &'static str,
    },

    #[error("Unexpected {resource} entry at index {index}: {reason}")]
    InvalidItem {
        resource: &'static str,
        index: usize,
        reason: String,
    },
}
