//! OAuth client-credentials exchange
//!
//! `POST {site}/oauth2/token` with an HTTP Basic authorization header built
//! from the API key and secret. The upstream answers with a short-lived
//! bearer token used by all subsequent listing calls.

use crate::{Result, config::Credentials, types::TokenResponse};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::{Client, header};

/// Path of the token endpoint, relative to the site URL
pub const TOKEN_ENDPOINT: &str = "/oauth2/token";

/// A bearer token obtained from the token endpoint
///
/// Carries the upstream's token scheme so listing requests echo it back
/// (`{token_type} {token}`), rather than assuming `Bearer`.
#[derive(Clone)]
pub struct AccessToken {
    token: String,
    token_type: String,
}

impl AccessToken {
    /// Create an access token with an explicit scheme
    pub fn new(token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type: token_type.into(),
        }
    }

    /// Value for the `Authorization` header of listing requests
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }
}

// Manual Debug so the token never reaches a log line
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Base64 value for the Basic authorization header of the token exchange
pub(crate) fn basic_credentials(credentials: &Credentials) -> String {
    BASE64.encode(format!(
        "{}:{}",
        credentials.api_key(),
        credentials.api_secret()
    ))
}

/// Exchange API credentials for an access token
///
/// Any non-2xx answer is an authentication error carrying the upstream
/// status; so is a 2xx body without an `access_token`. Transport failures
/// surface as [`crate::Error::Http`].
pub async fn request_access_token(
    http: &Client,
    credentials: &Credentials,
) -> Result<AccessToken> {
    let url = format!("{}{}", credentials.site_url(), TOKEN_ENDPOINT);
    tracing::info!("Requesting BeyondTrust access token from {}", url);

    let response = http
        .post(&url)
        .header(
            header::AUTHORIZATION,
            format!("Basic {}", basic_credentials(credentials)),
        )
        .header(header::ACCEPT, "application/json")
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let detail = super::body_snippet(&response.text().await.unwrap_or_default());
        tracing::error!("Token request rejected with status {}", status);
        return Err(crate::Error::auth_at(
            status.as_u16(),
            detail,
            TOKEN_ENDPOINT,
        ));
    }

    let token_response: TokenResponse = response.json().await?;

    let access_token = token_response
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::error!("Token response did not contain an access token");
            crate::Error::auth_at(
                status.as_u16(),
                "token response did not contain access_token",
                TOKEN_ENDPOINT,
            )
        })?;

    let token_type = token_response
        .token_type
        .unwrap_or_else(|| "Bearer".to_string());

    tracing::info!("Successfully obtained access token");
    Ok(AccessToken::new(access_token, token_type))
}
