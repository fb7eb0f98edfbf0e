//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use bt_jump_export::config::Credentials;
use serde_json::{Value, json};
use std::sync::Mutex;

/// Serializes tests that touch the process environment
///
/// Credentials are read from the environment per invocation, so any test that
/// sets or clears them must hold this lock for its whole body.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Point the credential environment variables at a test server
pub fn set_credentials(site_url: &str) {
    unsafe {
        std::env::set_var(Credentials::SITE_URL_VAR, site_url);
        std::env::set_var(Credentials::API_KEY_VAR, "test-key");
        std::env::set_var(Credentials::API_SECRET_VAR, "test-secret");
    }
}

/// Remove all credential environment variables
pub fn clear_credentials() {
    unsafe {
        std::env::remove_var(Credentials::SITE_URL_VAR);
        std::env::remove_var(Credentials::API_KEY_VAR);
        std::env::remove_var(Credentials::API_SECRET_VAR);
    }
}

/// Upstream jump group payload
pub fn group_json(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "code_name": name.to_lowercase() })
}

/// Upstream installer payload
pub fn installer_json(id: &str, name: &str, group_id: &str, expiration: &str) -> Value {
    json!({
        "installer_id": id,
        "name": name,
        "jump_group_id": group_id,
        "expiration_timestamp": expiration,
    })
}

/// Upstream jump client payload
pub fn jump_client_json(public_ip: Option<&str>) -> Value {
    match public_ip {
        Some(ip) => json!({ "hostname": "host", "public_ip": ip }),
        None => json!({ "hostname": "host" }),
    }
}

/// Token endpoint success payload
pub fn token_json() -> Value {
    json!({
        "access_token": "test-token",
        "token_type": "Bearer",
        "expires_in": 600,
    })
}
