//! Unified CLI for the BeyondTrust Jump Export Service
//!
//! This is the main binary that provides both server and one-shot report
//! modes through a unified command-line interface using subcommands.
//!
//! # Usage
//!
//! ## Server Mode
//! ```bash
//! bt-jump-export server --port 8370 --host 0.0.0.0
//! ```
//!
//! ## Report Mode
//! ```bash
//! bt-jump-export --report installers
//! bt-jump-export --report ips --verbose
//! ```
//!
//! ## Help and Version
//! ```bash
//! bt-jump-export --version
//! bt-jump-export --help
//! bt-jump-export server --help
//! ```

use clap::{Parser, Subcommand};

use bt_jump_export::cli::{
    report::{ReportArgs, ReportKind, run_report_mode},
    server::{ServerArgs, run_server_mode},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "bt-jump-export")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Report mode options (when no subcommand is provided)
    /// Which export to print (installers as JSON, ips as plain text)
    #[arg(short, long, value_enum, default_value = "installers")]
    report: ReportKind,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server mode
    Server {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Configuration file path
        #[arg(long)]
        config: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Server {
            port,
            host,
            config,
            verbose,
        }) => {
            let args = ServerArgs {
                port,
                host,
                config,
                verbose,
            };
            run_server_mode(args).await
        }
        None => {
            let args = ReportArgs {
                report: cli.report,
                verbose: cli.verbose,
            };
            run_report_mode(args).await
        }
    }
}
