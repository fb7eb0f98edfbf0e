//! BeyondTrust configuration API client
//!
//! Thin client over the `/api/config/v1` listing endpoints. All listings go
//! through the same paginated fetch: pages are requested with
//! `per_page`/`current_page` until a page comes back shorter than the page
//! size, which also bounds the loop against malformed upstream responses.

use crate::{
    Result,
    beyondtrust::auth::AccessToken,
    types::{JumpClient, JumpClientInstaller, JumpGroup},
};
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;

/// Jump group listing endpoint
pub const JUMP_GROUP_ENDPOINT: &str = "/api/config/v1/jump-group";
/// Jump client installer listing endpoint
pub const INSTALLER_ENDPOINT: &str = "/api/config/v1/jump-client/installer";
/// Jump client listing endpoint
pub const JUMP_CLIENT_ENDPOINT: &str = "/api/config/v1/jump-client";

/// Authenticated client for the BeyondTrust configuration API
#[derive(Clone)]
pub struct BeyondTrustClient {
    /// Underlying HTTP client
    http: Client,
    /// Site URL without trailing slash
    base_url: String,
    /// Pre-rendered `Authorization` header value
    authorization: String,
    /// Page size for listing requests
    per_page: usize,
}

impl BeyondTrustClient {
    /// Create a client for one invocation
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        token: &AccessToken,
        per_page: usize,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: token.authorization_header(),
            per_page,
        }
    }

    /// Site URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all Jump Groups
    pub async fn jump_groups(&self) -> Result<Vec<JumpGroup>> {
        self.fetch_all(JUMP_GROUP_ENDPOINT).await
    }

    /// Fetch all Jump Client installers
    pub async fn jump_client_installers(&self) -> Result<Vec<JumpClientInstaller>> {
        self.fetch_all(INSTALLER_ENDPOINT).await
    }

    /// Fetch all Jump Clients
    pub async fn jump_clients(&self) -> Result<Vec<JumpClient>> {
        self.fetch_all(JUMP_CLIENT_ENDPOINT).await
    }

    /// Fetch every page of a listing endpoint
    ///
    /// Pagination is sequential: each page's number follows from the last.
    /// Terminates when a page holds fewer items than `per_page` (an empty
    /// page included), so a misbehaving upstream cannot loop this forever.
    async fn fetch_all<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut items: Vec<T> = Vec::new();
        let mut current_page: usize = 1;

        loop {
            tracing::debug!("Fetching {} page {}", endpoint, current_page);

            let response = self
                .http
                .get(&url)
                .header(header::AUTHORIZATION, &self.authorization)
                .header(header::ACCEPT, "application/json")
                .query(&[
                    ("per_page", self.per_page.to_string()),
                    ("current_page", current_page.to_string()),
                ])
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::UNAUTHORIZED {
                let detail = super::body_snippet(&response.text().await.unwrap_or_default());
                tracing::error!("{} rejected the bearer token", endpoint);
                return Err(crate::Error::auth_at(status.as_u16(), detail, endpoint));
            }
            if !status.is_success() {
                let detail = super::body_snippet(&response.text().await.unwrap_or_default());
                tracing::error!("{} failed with status {}", endpoint, status);
                return Err(crate::Error::upstream(status.as_u16(), endpoint, detail));
            }

            let page: Vec<T> = response.json().await.map_err(|e| {
                tracing::error!("Failed to decode {} page {}: {}", endpoint, current_page, e);
                crate::Error::upstream(
                    status.as_u16(),
                    endpoint,
                    format!("failed to decode listing page: {}", e),
                )
            })?;

            let page_len = page.len();
            items.extend(page);
            tracing::debug!(
                "Retrieved {} items from {} page {} ({} total)",
                page_len,
                endpoint,
                current_page,
                items.len()
            );

            if page_len < self.per_page {
                break;
            }
            current_page += 1;
        }

        tracing::info!("Retrieved {} items from {}", items.len(), endpoint);
        Ok(items)
    }
}

// Manual Debug so the rendered bearer token never reaches a log line
impl std::fmt::Debug for BeyondTrustClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeyondTrustClient")
            .field("base_url", &self.base_url)
            .field("authorization", &"<redacted>")
            .field("per_page", &self.per_page)
            .finish()
    }
}
