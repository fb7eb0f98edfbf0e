//! Configuration management
//!
//! Two kinds of configuration live here. [`Settings`] covers how the service
//! itself runs (bind address, timeouts, logging, page size) and is loaded
//! from defaults, an optional TOML file, and `BT_EXPORT_*` environment
//! overrides. [`Credentials`] covers the BeyondTrust site and API secret pair
//! and is read fresh from the environment on every invocation, with no
//! defaults and no fallback chain.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// Helper functions for serde defaults
fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("bt-jump-export/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_per_page() -> usize {
    100
}

fn default_host() -> String {
    "::".to_string()
}

fn default_port() -> u16 {
    8370
}

// Duration serialization module
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Main configuration settings for the export service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Server configuration
    #[serde(default)]
    pub server: ServerSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Network configuration
    #[serde(default)]
    pub network: NetworkSettings,
    /// Upstream API configuration
    #[serde(default)]
    pub upstream: UpstreamSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout duration
    #[serde(with = "duration_secs", default = "default_timeout")]
    pub timeout: Duration,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Enable request/response logging
    #[serde(default = "default_true")]
    pub log_requests: bool,
}

/// Outbound HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Upstream BeyondTrust API behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamSettings {
    /// Page size for paginated listing endpoints
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout: default_timeout(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            verbose: false,
            format: default_log_format(),
            log_requests: default_true(),
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut settings = Self::default();

        if let Ok(host) = std::env::var("BT_EXPORT_SERVER_HOST") {
            settings.server.host = host;
        }

        if let Ok(port) = std::env::var("BT_EXPORT_SERVER_PORT") {
            settings.server.port = port
                .parse()
                .map_err(|e| crate::Error::config("port", &format!("Invalid port: {}", e)))?;
        }

        if let Ok(timeout) = std::env::var("BT_EXPORT_SERVER_TIMEOUT") {
            let timeout_secs: u64 = timeout
                .parse()
                .map_err(|e| crate::Error::config("timeout", &format!("Invalid timeout: {}", e)))?;
            settings.server.timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(level) = std::env::var("BT_EXPORT_LOG_LEVEL") {
            settings.logging.level = level;
        }

        if let Ok(format) = std::env::var("BT_EXPORT_LOG_FORMAT") {
            settings.logging.format = format;
        }

        if let Ok(per_page) = std::env::var("BT_EXPORT_PER_PAGE") {
            settings.upstream.per_page = per_page.parse().map_err(|e| {
                crate::Error::config("per_page", &format!("Invalid page size: {}", e))
            })?;
        }

        if let Ok(connect_timeout) = std::env::var("BT_EXPORT_CONNECT_TIMEOUT") {
            settings.network.connect_timeout = connect_timeout.parse().map_err(|e| {
                crate::Error::config("connect_timeout", &format!("Invalid timeout: {}", e))
            })?;
        }

        if let Ok(request_timeout) = std::env::var("BT_EXPORT_REQUEST_TIMEOUT") {
            settings.network.request_timeout = request_timeout.parse().map_err(|e| {
                crate::Error::config("request_timeout", &format!("Invalid timeout: {}", e))
            })?;
        }

        Ok(settings)
    }

    /// Load settings from configuration file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config("file", &format!("Failed to read config file: {}", e))
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| {
            crate::Error::config("file", &format!("Failed to parse config file: {}", e))
        })?;

        Ok(settings)
    }

    /// Merge settings with environment variable overrides
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        let env_settings = Self::from_env()?;
        let defaults = Self::default();

        // Merge only non-default values from environment
        if env_settings.server.host != defaults.server.host {
            self.server.host = env_settings.server.host;
        }
        if env_settings.server.port != defaults.server.port {
            self.server.port = env_settings.server.port;
        }
        if env_settings.server.timeout != defaults.server.timeout {
            self.server.timeout = env_settings.server.timeout;
        }
        if env_settings.logging.level != defaults.logging.level {
            self.logging.level = env_settings.logging.level;
        }
        if env_settings.logging.format != defaults.logging.format {
            self.logging.format = env_settings.logging.format;
        }
        if env_settings.upstream.per_page != defaults.upstream.per_page {
            self.upstream.per_page = env_settings.upstream.per_page;
        }
        if env_settings.network.connect_timeout != defaults.network.connect_timeout {
            self.network.connect_timeout = env_settings.network.connect_timeout;
        }
        if env_settings.network.request_timeout != defaults.network.request_timeout {
            self.network.request_timeout = env_settings.network.request_timeout;
        }

        Ok(self)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.port == 0 {
            return Err(crate::Error::config(
                "port",
                "Invalid server port: cannot be 0",
            ));
        }

        if self.upstream.per_page == 0 {
            return Err(crate::Error::config(
                "per_page",
                "Invalid page size: cannot be 0",
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(crate::Error::config(
                    "log_level",
                    &format!("Invalid log level: {}", self.logging.level),
                ));
            }
        }

        match self.logging.format.as_str() {
            "text" | "json" => {}
            _ => {
                return Err(crate::Error::config(
                    "log_format",
                    &format!("Invalid log format: {}", self.logging.format),
                ));
            }
        }

        Ok(())
    }
}

/// BeyondTrust API credentials, read from the environment per invocation
///
/// All three values are required with no defaults. The site URL keeps no
/// trailing slash so joined paths stay stable.
#[derive(Clone)]
pub struct Credentials {
    site_url: String,
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Environment variable holding the BeyondTrust site URL
    pub const SITE_URL_VAR: &'static str = "BeyondTrustSiteUrl";
    /// Environment variable holding the OAuth client id
    pub const API_KEY_VAR: &'static str = "BeyondTrustApiKey";
    /// Environment variable holding the OAuth client secret
    pub const API_SECRET_VAR: &'static str = "BeyondTrustApiSecret";

    /// Read credentials from the environment
    ///
    /// Fails with a configuration error naming the first missing or empty
    /// variable, before any network call can be attempted.
    pub fn from_env() -> crate::Result<Self> {
        Ok(Self::new(
            required_var(Self::SITE_URL_VAR)?,
            required_var(Self::API_KEY_VAR)?,
            required_var(Self::API_SECRET_VAR)?,
        ))
    }

    /// Create credentials from explicit values
    pub fn new(
        site_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        let site_url = site_url.into();
        Self {
            site_url: site_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// BeyondTrust site URL without trailing slash
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// OAuth client id
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// OAuth client secret
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

// Manual Debug so the secret never reaches a log line
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("site_url", &self.site_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

fn required_var(name: &str) -> crate::Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(crate::Error::config(
            name,
            "environment variable is set but empty",
        )),
        Err(_) => Err(crate::Error::config(
            name,
            "environment variable is not set",
        )),
    }
}

// Shared by every config test that touches the process environment
#[cfg(test)]
pub(crate) static ENV_TEST_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "::");
        assert_eq!(settings.server.port, 8370);
        assert_eq!(settings.upstream.per_page, 100);
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.log_requests);
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[server]
host = "localhost"
port = 8080

[upstream]
per_page = 25
        "#
        )
        .unwrap();

        let settings = Settings::from_file(temp_file.path()).unwrap();
        assert_eq!(settings.server.host, "localhost");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.upstream.per_page, 25);
        // Untouched sections keep their defaults
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_env_var_override() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        unsafe {
            std::env::set_var("BT_EXPORT_SERVER_PORT", "9000");
            std::env::set_var("BT_EXPORT_PER_PAGE", "50");
        }

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.upstream.per_page, 50);

        unsafe {
            std::env::remove_var("BT_EXPORT_SERVER_PORT");
            std::env::remove_var("BT_EXPORT_PER_PAGE");
        }
    }

    #[test]
    fn test_invalid_env_port_is_an_error() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        unsafe {
            std::env::set_var("BT_EXPORT_SERVER_PORT", "not-a-port");
        }

        let result = Settings::from_env();
        assert!(result.is_err());

        unsafe {
            std::env::remove_var("BT_EXPORT_SERVER_PORT");
        }
    }

    #[test]
    fn test_validation_success() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_port() {
        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_per_page() {
        let mut settings = Settings::default();
        settings.upstream.per_page = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "loud".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_log_format() {
        let mut settings = Settings::default();
        settings.logging.format = "xml".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_credentials_from_env() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        unsafe {
            std::env::set_var(Credentials::SITE_URL_VAR, "https://pam.example.com/");
            std::env::set_var(Credentials::API_KEY_VAR, "key123");
            std::env::set_var(Credentials::API_SECRET_VAR, "secret456");
        }

        let credentials = Credentials::from_env().unwrap();
        // Trailing slash is trimmed
        assert_eq!(credentials.site_url(), "https://pam.example.com");
        assert_eq!(credentials.api_key(), "key123");
        assert_eq!(credentials.api_secret(), "secret456");

        unsafe {
            std::env::remove_var(Credentials::SITE_URL_VAR);
            std::env::remove_var(Credentials::API_KEY_VAR);
            std::env::remove_var(Credentials::API_SECRET_VAR);
        }
    }

    #[test]
    fn test_credentials_missing_variable_names_it() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        unsafe {
            std::env::remove_var(Credentials::SITE_URL_VAR);
            std::env::remove_var(Credentials::API_KEY_VAR);
            std::env::remove_var(Credentials::API_SECRET_VAR);
        }

        let error = Credentials::from_env().unwrap_err();
        assert!(error.to_string().contains("BeyondTrustSiteUrl"));
    }

    #[test]
    fn test_credentials_empty_variable_is_missing() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();

        unsafe {
            std::env::set_var(Credentials::SITE_URL_VAR, "https://pam.example.com");
            std::env::set_var(Credentials::API_KEY_VAR, "   ");
            std::env::set_var(Credentials::API_SECRET_VAR, "secret");
        }

        let error = Credentials::from_env().unwrap_err();
        assert!(error.to_string().contains("BeyondTrustApiKey"));

        unsafe {
            std::env::remove_var(Credentials::SITE_URL_VAR);
            std::env::remove_var(Credentials::API_KEY_VAR);
            std::env::remove_var(Credentials::API_SECRET_VAR);
        }
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let credentials = Credentials::new("https://pam.example.com", "key", "topsecret");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("topsecret"));
        assert!(debug.contains("<redacted>"));
    }
}
