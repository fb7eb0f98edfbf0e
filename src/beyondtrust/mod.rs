//! BeyondTrust API integration
//!
//! OAuth client-credentials token exchange and the paginated listing client.
//! Every invocation obtains a fresh token; nothing here caches state across
//! requests.

pub mod auth;
pub mod client;

pub use auth::{AccessToken, request_access_token};
pub use client::BeyondTrustClient;

/// Trim an upstream response body for inclusion in error detail
///
/// Bodies can be large and are only ever logged, never returned to callers.
pub(crate) fn body_snippet(body: &str) -> String {
    const MAX_CHARS: usize = 512;
    if body.chars().count() <= MAX_CHARS {
        body.to_string()
    } else {
        let mut snippet: String = body.chars().take(MAX_CHARS).collect();
        snippet.push_str("...");
        snippet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_snippet_short_body_unchanged() {
        assert_eq!(body_snippet("short"), "short");
    }

    #[test]
    fn test_body_snippet_truncates_long_body() {
        let long = "x".repeat(2000);
        let snippet = body_snippet(&long);
        assert!(snippet.len() < long.len());
        assert!(snippet.ends_with("..."));
    }
}
