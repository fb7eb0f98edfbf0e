//! Response type definitions
//!
//! Shapes of the JSON bodies this service emits. Field names on
//! [`InstallerRecord`] are part of the contract with downstream consumers
//! and use the PascalCase names those tools already parse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the installer export: the latest-expiring installer of a Jump
/// Group together with its synthesized download URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallerRecord {
    /// Resolved Jump Group name
    #[serde(rename = "JumpGroupName")]
    pub jump_group_name: String,

    /// Installer display name
    #[serde(rename = "InstallerName")]
    pub installer_name: String,

    /// Installer identifier
    #[serde(rename = "InstallerID")]
    pub installer_id: String,

    /// Installer expiration timestamp
    #[serde(rename = "ExpirationDate")]
    pub expiration_date: DateTime<Utc>,

    /// Download URL for the Windows 64-bit MSI package
    #[serde(rename = "WindowsDownloadURL")]
    pub windows_download_url: String,

    /// Download URL for the macOS package
    #[serde(rename = "MacDownloadURL")]
    pub mac_download_url: String,
}

/// Ping response for health checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    /// Server uptime in seconds
    pub server_uptime: u64,

    /// Server version
    pub version: String,
}

impl PingResponse {
    /// Create a new ping response
    pub fn new(server_uptime: u64, version: impl Into<String>) -> Self {
        Self {
            server_uptime,
            version: version.into(),
        }
    }
}

/// Error response for API errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional error context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Error timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            context: None,
            timestamp: Some(Utc::now()),
        }
    }

    /// Create error response with context
    pub fn with_context(error: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            context: Some(context.into()),
            timestamp: Some(Utc::now()),
        }
    }
}
