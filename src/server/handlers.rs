//! HTTP request handlers
//!
//! The two export endpoints plus a health check. Each export invocation is
//! self-contained: credentials come from the environment, a fresh token is
//! exchanged, listings are fetched, transformed, and the response emitted.
//! Errors bubble up to a single mapping point here.

use crate::{
    beyondtrust::{BeyondTrustClient, auth},
    config::Credentials,
    error::{format_error, format_error_for_api, format_error_for_logging},
    report,
    server::app::AppState,
    types::{ErrorResponse, InstallerRecord, PingResponse},
    utils::version,
};
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// Installer export endpoint
///
/// GET /api/GetBeyondTrustData
///
/// Returns a JSON array with the latest-expiring installer of every Jump
/// Group, including synthesized download URLs.
pub async fn get_beyondtrust_data(State(state): State<AppState>) -> Response {
    tracing::info!("Processing installer export request");

    match installer_report(&state).await {
        Ok(records) => {
            tracing::info!("Installer export complete ({} records)", records.len());
            (StatusCode::OK, Json(records)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// Jump client IP export endpoint
///
/// GET /api/GetBeyondTrustJumpClientIPs
///
/// Returns a text/plain body with one validated public IP per line, sorted.
pub async fn get_jump_client_ips(State(state): State<AppState>) -> Response {
    tracing::info!("Processing jump client IP export request");

    match jump_client_ips(&state).await {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Ping endpoint for health checks
///
/// GET /ping
///
/// Returns server status and uptime information; no upstream calls and no
/// credentials involved.
pub async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    let response = PingResponse::new(uptime, version::get_version());

    tracing::debug!(
        "Ping response: uptime={}s, version={}",
        uptime,
        version::get_version()
    );
    Json(response)
}

/// Full installer export flow for one invocation
async fn installer_report(state: &AppState) -> crate::Result<Vec<InstallerRecord>> {
    let credentials = Credentials::from_env()?;
    let token = auth::request_access_token(&state.http, &credentials).await?;
    let client = BeyondTrustClient::new(
        state.http.clone(),
        credentials.site_url(),
        &token,
        state.settings.upstream.per_page,
    );

    // Two unrelated listings; pagination inside each stays sequential
    let (groups, installers) =
        tokio::try_join!(client.jump_groups(), client.jump_client_installers())?;

    tracing::info!(
        "Retrieved {} jump groups and {} installers",
        groups.len(),
        installers.len()
    );

    Ok(report::build_installer_report(
        credentials.site_url(),
        &groups,
        &installers,
    ))
}

/// Full IP export flow for one invocation
async fn jump_client_ips(state: &AppState) -> crate::Result<String> {
    let credentials = Credentials::from_env()?;
    let token = auth::request_access_token(&state.http, &credentials).await?;
    let client = BeyondTrustClient::new(
        state.http.clone(),
        credentials.site_url(),
        &token,
        state.settings.upstream.per_page,
    );

    let clients = client.jump_clients().await?;
    let addresses = report::collect_public_ips(&clients);

    tracing::info!(
        "Collected {} unique public IPs from {} jump clients",
        addresses.len(),
        clients.len()
    );

    Ok(report::render_ip_list(&addresses))
}

/// Map an error to the HTTP response at the handler boundary
///
/// The response body goes through the sanitizing formatter; full detail only
/// reaches the log.
fn error_response(error: &crate::Error) -> Response {
    tracing::error!("Request failed: {}", format_error(error));
    tracing::debug!("Error detail: {}", format_error_for_logging(error));

    let status = StatusCode::from_u16(error.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse::with_context(
            format_error_for_api(error),
            error.category(),
        )),
    )
        .into_response()
}
