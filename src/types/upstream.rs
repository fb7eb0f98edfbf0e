//! BeyondTrust wire types
//!
//! Shapes of the upstream API payloads this service consumes. Unknown fields
//! are ignored; the upstream returns far more than we project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named collection of deployable remote-access installers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JumpGroup {
    /// Jump group identifier
    pub id: String,
    /// Display name
    pub name: String,
}

/// A downloadable agent package tied to a Jump Group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JumpClientInstaller {
    /// Installer identifier, also the `jc` parameter of download URLs
    pub installer_id: String,
    /// Display name
    pub name: String,
    /// The Jump Group this installer belongs to
    pub jump_group_id: String,
    /// When the installer package stops being valid
    pub expiration_timestamp: DateTime<Utc>,
}

/// A deployed remote-access agent instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JumpClient {
    /// Public IP the agent last connected from, when known
    #[serde(default)]
    pub public_ip: Option<String>,
}

/// Response from the OAuth token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The bearer token; absent when the upstream rejects the exchange
    #[serde(default)]
    pub access_token: Option<String>,
    /// Token scheme, usually `Bearer`
    #[serde(default)]
    pub token_type: Option<String>,
    /// Token lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
}
