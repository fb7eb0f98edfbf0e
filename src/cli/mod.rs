//! Command-line interface logic
//!
//! Server mode runs the HTTP service; report mode performs one export and
//! prints it to stdout.

pub mod report;
pub mod server;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber with the given filter
///
/// Called exactly once per process, by whichever mode is running.
pub(crate) fn init_logging(env_filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
