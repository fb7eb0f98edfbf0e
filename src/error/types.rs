//! Error classification for the export service
//!
//! Maps every failure the service can hit (configuration, upstream auth,
//! upstream listing calls, transport) onto one enum so the handler boundary
//! can translate errors to HTTP statuses in a single place.

use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport errors (connect failures, timeouts, protocol errors)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Date/time parsing errors
    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    /// Configuration errors (missing or invalid settings)
    #[error("Configuration error in {field}: {message}")]
    Config {
        /// The configuration field or environment variable that has an error
        field: String,
        /// Error message describing the issue
        message: String,
    },

    /// The upstream rejected our credentials or bearer token
    #[error("Authentication failed ({status}): {detail}")]
    Auth {
        /// HTTP status returned by the upstream
        status: u16,
        /// Upstream response detail (truncated)
        detail: String,
        /// The endpoint where authentication was attempted
        endpoint: Option<String>,
    },

    /// Non-auth HTTP error from an upstream listing endpoint
    #[error("Upstream request to {endpoint} failed with status {status}: {detail}")]
    Upstream {
        /// HTTP status returned by the upstream
        status: u16,
        /// The upstream endpoint that failed
        endpoint: String,
        /// Upstream response detail (truncated)
        detail: String,
    },

    /// Network/connection errors not covered by [`Error::Http`]
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// Validation errors for individual upstream records
    #[error("Validation failed for {field}: {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Error message describing the validation failure
        message: String,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal issue
        message: String,
    },

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(field: S, message: S) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn auth(status: u16, detail: impl Into<String>) -> Self {
        Self::Auth {
            status,
            detail: detail.into(),
            endpoint: None,
        }
    }

    /// Create an authentication error with endpoint context
    pub fn auth_at(status: u16, detail: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::Auth {
            status,
            detail: detail.into(),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Create an upstream error
    pub fn upstream(status: u16, endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            endpoint: endpoint.into(),
            detail: detail.into(),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Error::Http(..) => "http",
            Error::Json(..) => "json",
            Error::Toml(..) => "toml",
            Error::Url(..) => "url",
            Error::Io(..) => "io",
            Error::DateParse(..) => "date_parse",
            Error::Config { .. } => "config",
            Error::Auth { .. } => "auth",
            Error::Upstream { .. } => "upstream",
            Error::Network { .. } => "network",
            Error::Validation { .. } => "validation",
            Error::Internal { .. } => "internal",
            Error::Server(..) => "server",
        }
    }

    /// HTTP status the handler boundary maps this error to
    ///
    /// Only authentication failures surface as 401; everything else is a 500
    /// so upstream detail stays in the logs rather than the response.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Auth { .. } => 401,
            _ => 500,
        }
    }
}
