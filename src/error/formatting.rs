//! Error formatting utilities
//!
//! Two audiences: the log (full detail, nested causes) and the API caller
//! (sanitized message that never carries upstream bodies or credentials).

use crate::Error;
use std::error::Error as StdError;

/// Format error for the log, including nested error causes
pub fn format_error(error: &Error) -> String {
    let mut result = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        if !result.contains(&cause.to_string()) {
            result = format!("{} (caused by {})", result, cause);
        }
        source = cause.source();
    }

    result
}

/// Format error for an HTTP response body
///
/// Upstream response bodies and transport detail stay out of the message:
/// they can echo credentials or internal host names. Configuration errors
/// keep the variable name so the operator knows what to set.
pub fn format_error_for_api(error: &Error) -> String {
    match error {
        Error::Config { field, .. } => {
            format!("Configuration error: {} is not set or invalid", field)
        }
        Error::Auth { status, .. } => {
            format!("Failed to authenticate with BeyondTrust (upstream status {})", status)
        }
        Error::Upstream { endpoint, .. } => {
            format!("BeyondTrust API request to {} failed", endpoint)
        }
        _ => "An unexpected error occurred while contacting BeyondTrust".to_string(),
    }
}

/// Format error for logging with structured data
pub fn format_error_for_logging(error: &Error) -> serde_json::Value {
    let mut log_data = serde_json::json!({
        "message": format_error(error),
        "category": error.category(),
        "status": error.status_code(),
    });

    match error {
        Error::Auth {
            endpoint: Some(endpoint),
            ..
        } => {
            log_data["endpoint"] = serde_json::Value::String(endpoint.clone());
        }
        Error::Upstream { endpoint, .. } => {
            log_data["endpoint"] = serde_json::Value::String(endpoint.clone());
        }
        _ => {}
    }

    log_data
}
