use std::path::PathBuf;

use thiserror::Error;

use crate::cache::CacheKind;

/// Result type alias for daywall operations
pub type Result<T> = std::result::Result<T, DaywallError>;

/// Errors that can occur while resolving and applying a wallpaper
#[derive(Error, Debug)]
pub enum DaywallError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing required configuration
    #[error("{0}")]
    ConfigMissing(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A required external program is not available
    #[error("Environment error: {0}")]
    Environment(String),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),

    /// Remote service answered with a non-success HTTP status
    #[error("{service} API error (HTTP {status}): {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed service URL
    #[error("Invalid service URL: {0}")]
    Url(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Provider answered, but the data did not pass validation
    #[error("Invalid {kind} data: {reason}")]
    InvalidResponse { kind: CacheKind, reason: String },

    /// Every attempt to obtain valid data failed
    #[error("Giving up on {kind} data after {attempts} attempts: {reason}")]
    RetriesExhausted {
        kind: CacheKind,
        attempts: u32,
        reason: String,
    },

    /// Wallpaper image for the resolved period does not exist
    #[error("Wallpaper image not found: {}", .0.display())]
    ImageMissing(PathBuf),

    /// The apply command ran but did not succeed
    #[error("Wallpaper command '{command}' failed ({status})")]
    ApplyFailed { command: String, status: String },

    /// Internal invariant violation
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DaywallError {
    /// Create an API error from service name, HTTP status and message
    pub fn api(service: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            service,
            status,
            message: message.into(),
        }
    }

    /// Create a config missing error with helpful message
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::ConfigMissing(message.into())
    }

    /// Create a validation failure for the given data kind
    pub fn invalid(kind: CacheKind, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            kind,
            reason: reason.into(),
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::ConfigMissing(_) | Self::InvalidArgument(_) | Self::Toml(_) => 2,
            Self::Environment(_) | Self::Env(_) => 3,
            Self::RetriesExhausted { .. } => 4,
            Self::ImageMissing(_) | Self::ApplyFailed { .. } => 5,
            Self::Internal(_) => 70,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_follow_error_taxonomy() {
        assert_eq!(DaywallError::config_missing("no folder").exit_code(), 2);
        assert_eq!(DaywallError::Environment("feh".into()).exit_code(), 3);
        assert_eq!(DaywallError::Env(std::env::VarError::NotPresent).exit_code(), 3);
        let exhausted = DaywallError::RetriesExhausted {
            kind: CacheKind::Sun,
            attempts: 3,
            reason: "status INVALID_REQUEST".into(),
        };
        assert_eq!(exhausted.exit_code(), 4);
        assert_eq!(DaywallError::Internal("no period".into()).exit_code(), 70);
        assert_eq!(DaywallError::api("Sun", 500, "boom").exit_code(), 1);
    }

    #[test]
    fn test_exhausted_message_names_kind() {
        let err = DaywallError::RetriesExhausted {
            kind: CacheKind::Geo,
            attempts: 3,
            reason: "status fail".into(),
        };
        assert_eq!(
            err.to_string(),
            "Giving up on geo data after 3 attempts: status fail"
        );
    }
}
