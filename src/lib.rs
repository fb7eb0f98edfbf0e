//! BeyondTrust Jump Export Service
//!
//! A small integration service that reshapes data from the BeyondTrust
//! privileged-access-management API into simpler forms for downstream
//! consumers (endpoint-management tooling, firewall automation).
//!
//! # Features
//!
//! - **Installer export**: the latest-expiring Jump Client installer of every
//!   Jump Group, with synthesized download URLs, as a JSON array
//! - **IP export**: the deduplicated, sorted public IPs of all Jump Clients,
//!   as plain text
//! - **HTTP Server Mode**: always-running service exposing both exports
//! - **Report Mode**: command-line one-shot export for cron jobs and debugging
//!
//! # Architecture
//!
//! Each invocation is an independent request-response flow: credentials are
//! read from the environment, a fresh OAuth token is exchanged, the relevant
//! listings are fetched page by page, transformed in memory, and the result
//! emitted. Nothing is cached or persisted across invocations.
//!
//! # Usage
//!
//! ## HTTP Server Mode
//!
//! ```bash
//! bt-jump-export server --port 8370 --host 0.0.0.0
//! ```
//!
//! ## Report Mode
//!
//! ```bash
//! bt-jump-export --report installers
//! bt-jump-export --report ips
//! ```
//!
//! # Examples
//!
//! ```rust
//! use bt_jump_export::{Settings, server::create_app};
//!
//! # fn example() -> bt_jump_export::Result<()> {
//! let settings = Settings::default();
//! let app = create_app(settings)?;
//! # Ok(())
//! # }
//! ```

pub mod beyondtrust;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod server;
pub mod types;
pub mod utils;

pub use beyondtrust::BeyondTrustClient;
pub use config::{ConfigLoader, Credentials, Settings};
pub use error::{Error, Result};
pub use types::{ErrorResponse, InstallerRecord, PingResponse};
