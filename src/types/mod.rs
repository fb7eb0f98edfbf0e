//! Type definitions for upstream payloads and service responses

pub mod response;
pub mod upstream;

pub use response::{ErrorResponse, InstallerRecord, PingResponse};
pub use upstream::{JumpClient, JumpClientInstaller, JumpGroup, TokenResponse};
