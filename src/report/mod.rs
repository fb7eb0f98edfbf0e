//! Export transformations
//!
//! Pure functions turning raw BeyondTrust listings into the two outputs this
//! service serves: the per-group installer report and the public IP list.

pub mod installers;
pub mod ips;

pub use installers::build_installer_report;
pub use ips::{collect_public_ips, render_ip_list};
