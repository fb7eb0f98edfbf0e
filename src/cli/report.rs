//! One-shot report mode CLI logic
//!
//! Runs a single export against the configured BeyondTrust site and prints
//! the result to stdout: the installer report as JSON, or the jump client IP
//! list as plain text. Same credential loading, token exchange, fetchers,
//! and transformations as the HTTP handlers.

use crate::{
    Settings,
    beyondtrust::{BeyondTrustClient, auth},
    config::{ConfigLoader, Credentials},
    report,
    server::app,
};
use anyhow::Result;
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Which export to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// JSON array of per-group installer records
    Installers,
    /// Plain text list of jump client public IPs
    Ips,
}

/// Arguments for one-shot report mode
#[derive(Debug)]
pub struct ReportArgs {
    pub report: ReportKind,
    pub verbose: bool,
}

/// Run one-shot report mode with the given arguments
pub async fn run_report_mode(args: ReportArgs) -> Result<()> {
    // Quiet by default so stdout stays parseable; logs go to stderr anyway
    let env_filter = if args.verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("warn")
    };

    crate::cli::init_logging(env_filter);

    let settings = ConfigLoader::new()
        .load(ConfigLoader::get_config_path().as_deref())
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to load configuration: {}. Using defaults.", e);
            Settings::default()
        });

    let http = app::build_http_client(&settings)?;
    let credentials = Credentials::from_env()?;
    let token = auth::request_access_token(&http, &credentials).await?;
    let client = BeyondTrustClient::new(
        http,
        credentials.site_url(),
        &token,
        settings.upstream.per_page,
    );

    match args.report {
        ReportKind::Installers => {
            let (groups, installers) =
                tokio::try_join!(client.jump_groups(), client.jump_client_installers())?;
            let records =
                report::build_installer_report(credentials.site_url(), &groups, &installers);
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        ReportKind::Ips => {
            let clients = client.jump_clients().await?;
            let addresses = report::collect_public_ips(&clients);
            print!("{}", report::render_ip_list(&addresses));
        }
    }

    Ok(())
}
